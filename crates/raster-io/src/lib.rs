//! Raster persistence and visualisation.
//!
//! - [`geotiff`]: single-band GeoTIFF writing (u8, f32) and reading
//! - [`ascii`]: ESRI ASCII grid writing with a `.prj` sidecar
//! - [`preview`]: renders a binary grid with a boundary outline on top and
//!   saves it as a PNG
//!
//! [`write_raster_u8`] picks the on-disk format from the file extension.

pub mod ascii;
pub mod geotiff;
pub mod preview;

use std::path::Path;

use gw_common::{GwError, GwResult, Raster};

pub use geotiff::{read_geotiff, read_geotiff_geometry, write_geotiff_f32, write_geotiff_u8};
pub use preview::{render_preview, write_preview, PreviewStyle};

/// On-disk raster formats selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    GeoTiff,
    AsciiGrid,
}

impl RasterFormat {
    /// Detect the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> GwResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "tif" | "tiff" => Ok(RasterFormat::GeoTiff),
            "asc" => Ok(RasterFormat::AsciiGrid),
            _ => Err(GwError::UnsupportedFeature(format!(
                "no raster writer for extension '{}' ({}); use .tif, .tiff or .asc",
                ext,
                path.display()
            ))),
        }
    }
}

/// Persist an unsigned 8-bit raster, choosing the format from the extension.
pub fn write_raster_u8(path: impl AsRef<Path>, raster: &Raster<u8>) -> GwResult<()> {
    let path = path.as_ref();
    match RasterFormat::from_path(path)? {
        RasterFormat::GeoTiff => geotiff::write_geotiff_u8(path, raster),
        RasterFormat::AsciiGrid => ascii::write_ascii_grid(path, raster, None),
    }
}
