//! Single-band GeoTIFF reading and writing.
//!
//! Uses the pure Rust `tiff` crate. Georeferencing is carried by the
//! standard GeoTIFF tags:
//!
//! - ModelPixelScale (33550): `[dx, dy, 0]`
//! - ModelTiepoint (33922): raster (0, 0) pinned to the north-west corner
//! - GeoKeyDirectory (34735): model type, PixelIsArea, and the EPSG code
//!   when the CRS has one
//! - GeoAsciiParams (34737): citation holding the CRS text otherwise

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use gw_common::{BoundingBox, Crs, GridGeometry, GwError, GwResult, Raster};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::{self, ColorType};
use tiff::encoder::{DirectoryEncoder, TiffEncoder, TiffKind, TiffValue};
use tiff::tags::Tag;
use tracing::debug;

const MODEL_PIXEL_SCALE: u16 = 33550;
const MODEL_TIEPOINT: u16 = 33922;
const GEO_KEY_DIRECTORY: u16 = 34735;
const GEO_ASCII_PARAMS: u16 = 34737;

const GT_MODEL_TYPE_KEY: u16 = 1024;
const GT_RASTER_TYPE_KEY: u16 = 1025;
const GT_CITATION_KEY: u16 = 1026;
const GEOGRAPHIC_TYPE_KEY: u16 = 2048;
const PROJECTED_CS_TYPE_KEY: u16 = 3072;

const MODEL_TYPE_PROJECTED: u16 = 1;
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;

fn tiff_err(path: &Path, err: tiff::TiffError) -> GwError {
    match err {
        tiff::TiffError::IoError(e) => GwError::Io(format!("{}: {}", path.display(), e)),
        other => GwError::FormatError(format!("{}: {}", path.display(), other)),
    }
}

/// Write an unsigned 8-bit single-band GeoTIFF.
pub fn write_geotiff_u8(path: impl AsRef<Path>, raster: &Raster<u8>) -> GwResult<()> {
    write_band::<colortype::Gray8>(path.as_ref(), raster)
}

/// Write a 32-bit float single-band GeoTIFF.
pub fn write_geotiff_f32(path: impl AsRef<Path>, raster: &Raster<f32>) -> GwResult<()> {
    write_band::<colortype::Gray32Float>(path.as_ref(), raster)
}

fn write_band<C>(path: &Path, raster: &Raster<C::Inner>) -> GwResult<()>
where
    C: ColorType,
    C::Inner: Copy,
    [C::Inner]: TiffValue,
{
    let geometry = raster.geometry();
    let file = File::create(path).map_err(|e| GwError::Io(format!("{}: {}", path.display(), e)))?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file)).map_err(|e| tiff_err(path, e))?;
    let mut image = encoder
        .new_image::<C>(geometry.cols as u32, geometry.rows as u32)
        .map_err(|e| tiff_err(path, e))?;

    write_geo_tags(image.encoder(), geometry).map_err(|e| tiff_err(path, e))?;
    image
        .write_data(raster.values())
        .map_err(|e| tiff_err(path, e))?;

    debug!(
        path = %path.display(),
        rows = geometry.rows,
        cols = geometry.cols,
        crs = %geometry.crs,
        "Wrote GeoTIFF"
    );
    Ok(())
}

fn write_geo_tags<W, K>(
    dir: &mut DirectoryEncoder<'_, W, K>,
    geometry: &GridGeometry,
) -> tiff::TiffResult<()>
where
    W: std::io::Write + std::io::Seek,
    K: TiffKind,
{
    let size = geometry.cell_size();
    let scale = [size.x, size.y, 0.0];
    let tiepoint = [0.0, 0.0, 0.0, geometry.extent.min_x, geometry.extent.max_y, 0.0];
    dir.write_tag(Tag::Unknown(MODEL_PIXEL_SCALE), &scale[..])?;
    dir.write_tag(Tag::Unknown(MODEL_TIEPOINT), &tiepoint[..])?;

    let crs = &geometry.crs;
    let model_type = if crs.is_geographic() {
        MODEL_TYPE_GEOGRAPHIC
    } else {
        MODEL_TYPE_PROJECTED
    };

    let mut keys: Vec<[u16; 4]> = vec![
        [GT_MODEL_TYPE_KEY, 0, 1, model_type],
        [GT_RASTER_TYPE_KEY, 0, 1, RASTER_PIXEL_IS_AREA],
    ];

    let citation = match crs.epsg() {
        Some(code) if code <= u16::MAX as u32 => {
            let key = if crs.is_geographic() {
                GEOGRAPHIC_TYPE_KEY
            } else {
                PROJECTED_CS_TYPE_KEY
            };
            keys.push([key, 0, 1, code as u16]);
            None
        }
        _ if !crs.as_str().is_empty() => {
            let text = format!("{}|", crs.as_str());
            keys.push([GT_CITATION_KEY, GEO_ASCII_PARAMS, text.len() as u16, 0]);
            Some(text)
        }
        _ => None,
    };

    let mut directory: Vec<u16> = vec![1, 1, 0, keys.len() as u16];
    directory.extend(keys.iter().flatten());
    dir.write_tag(Tag::Unknown(GEO_KEY_DIRECTORY), &directory[..])?;

    if let Some(text) = citation {
        dir.write_tag(Tag::Unknown(GEO_ASCII_PARAMS), text.as_str())?;
    }
    Ok(())
}

/// Read the grid geometry (extent, size, CRS) of a GeoTIFF without its pixels.
pub fn read_geotiff_geometry(path: impl AsRef<Path>) -> GwResult<GridGeometry> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| GwError::Io(format!("{}: {}", path.display(), e)))?;
    let mut decoder = Decoder::new(file).map_err(|e| tiff_err(path, e))?;
    geometry_from_decoder(path, &mut decoder)
}

/// Read a single-band GeoTIFF, converting samples to f64.
pub fn read_geotiff(path: impl AsRef<Path>) -> GwResult<Raster<f64>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| GwError::Io(format!("{}: {}", path.display(), e)))?;
    let mut decoder = Decoder::new(file).map_err(|e| tiff_err(path, e))?;
    let geometry = geometry_from_decoder(path, &mut decoder)?;

    let values: Vec<f64> = match decoder.read_image().map_err(|e| tiff_err(path, e))? {
        DecodingResult::U8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F64(v) => v,
        _ => {
            return Err(GwError::UnsupportedFeature(format!(
                "{}: 64-bit integer samples are not supported",
                path.display()
            )))
        }
    };

    Raster::from_values(geometry, values).map_err(|_| {
        GwError::FormatError(format!(
            "{}: pixel count does not match dimensions (multi-band files are not supported)",
            path.display()
        ))
    })
}

fn geometry_from_decoder<R>(path: &Path, decoder: &mut Decoder<R>) -> GwResult<GridGeometry>
where
    R: std::io::Read + std::io::Seek,
{
    let (width, height) = decoder.dimensions().map_err(|e| tiff_err(path, e))?;

    let scale = decoder
        .get_tag_f64_vec(Tag::from_u16_exhaustive(MODEL_PIXEL_SCALE))
        .map_err(|_| GwError::format(format!("{}: missing ModelPixelScale tag", path.display())))?;
    let tiepoint = decoder
        .get_tag_f64_vec(Tag::from_u16_exhaustive(MODEL_TIEPOINT))
        .map_err(|_| GwError::format(format!("{}: missing ModelTiepoint tag", path.display())))?;
    if scale.len() < 2 || tiepoint.len() < 6 {
        return Err(GwError::format(format!(
            "{}: malformed geotransform tags",
            path.display()
        )));
    }

    // ModelTiepoint: [I, J, K, X, Y, Z]; shift the tie point back to pixel (0, 0)
    let min_x = tiepoint[3] - tiepoint[0] * scale[0];
    let max_y = tiepoint[4] + tiepoint[1] * scale[1];
    let extent = BoundingBox::new(
        min_x,
        max_y - height as f64 * scale[1],
        min_x + width as f64 * scale[0],
        max_y,
    );

    let crs = read_crs(decoder);
    GridGeometry::from_dimensions(extent, height as usize, width as usize, crs)
        .map_err(|e| GwError::format(format!("{}: {}", path.display(), e)))
}

fn read_crs<R>(decoder: &mut Decoder<R>) -> Crs
where
    R: std::io::Read + std::io::Seek,
{
    let directory = match decoder.get_tag_u16_vec(Tag::from_u16_exhaustive(GEO_KEY_DIRECTORY)) {
        Ok(d) if d.len() >= 4 => d,
        _ => return Crs::new(""),
    };

    for key in directory[4..].chunks_exact(4) {
        if (key[0] == PROJECTED_CS_TYPE_KEY || key[0] == GEOGRAPHIC_TYPE_KEY) && key[1] == 0 {
            return Crs::from_epsg(key[3] as u32);
        }
    }

    match decoder.get_tag_ascii_string(Tag::from_u16_exhaustive(GEO_ASCII_PARAMS)) {
        Ok(text) => Crs::new(text.trim_end_matches(['|', '\0'])),
        Err(_) => Crs::new(""),
    }
}
