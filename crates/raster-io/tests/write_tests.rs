//! Tests for extension-driven raster persistence.

use gw_common::{BoundingBox, Crs, ErrorKind, GridGeometry, Raster};
use raster_io::{read_geotiff, read_geotiff_geometry, write_raster_u8};
use test_utils::{assert_approx_eq, temp_test_dir};

fn mask() -> Raster<u8> {
    let geometry = GridGeometry::from_resolution(
        BoundingBox::new(500.0, 1000.0, 1500.0, 1500.0),
        100.0,
        100.0,
        Crs::from_epsg(26914),
    )
    .unwrap();
    let mut raster = Raster::filled(geometry, 1u8);
    for col in 0..raster.cols() {
        raster.set(0, col, 0);
    }
    raster
}

#[test]
fn test_write_tif_by_extension() {
    let dir = temp_test_dir();
    let path = dir.path().join("ibound.tif");
    write_raster_u8(&path, &mask()).unwrap();

    let read = read_geotiff(&path).unwrap();
    assert_eq!((read.rows(), read.cols()), (5, 10));
    assert_eq!(read.count_where(|v| v == 0.0), 10);
    assert_eq!(read.count_where(|v| v == 1.0), 40);

    let size = read.geometry().cell_size();
    assert_approx_eq!(size.x, 100.0, 1e-9);
    assert_approx_eq!(size.y, 100.0, 1e-9);
}

#[test]
fn test_write_asc_by_extension() {
    let dir = temp_test_dir();
    let path = dir.path().join("ibound.asc");
    write_raster_u8(&path, &mask()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("ncols 10\nnrows 5\n"));
    assert!(text.contains("cellsize 100\n"));
    // EPSG codes are not .prj content
    assert!(!dir.path().join("ibound.prj").exists());
}

#[test]
fn test_unknown_extension_is_unsupported() {
    let dir = temp_test_dir();
    let err = write_raster_u8(dir.path().join("ibound.shp"), &mask()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFeature);
}

#[test]
fn test_geometry_of_plain_tiff_is_format_error() {
    // A TIFF without georeferencing tags
    let dir = temp_test_dir();
    let path = dir.path().join("plain.tif");
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = tiff::encoder::TiffEncoder::new(file).unwrap();
    encoder
        .write_image::<tiff::encoder::colortype::Gray8>(2, 2, &[0, 1, 1, 0])
        .unwrap();

    let err = read_geotiff_geometry(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FormatError);
}
