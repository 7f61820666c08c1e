//! Binary active-cell grids from polygon boundaries.
//!
//! A [`BoundaryPolygon`] (geometry + CRS) is turned into a [`BinaryGrid`]
//! whose cells are 1 where they touch the boundary and 0 elsewhere. The
//! grid can optionally be previewed as a PNG and persisted as an unsigned
//! 8-bit raster.
//!
//! ```ignore
//! use boundary_mask::{rasterize, BoundaryPolygon, RasterizeOptions, Resolution};
//!
//! let boundary = BoundaryPolygon::from_geojson_file("domain.geojson", None)?;
//! let options = RasterizeOptions {
//!     resolution: Some(Resolution::Uniform(1000.0)),
//!     output_path: Some("ibound.tif".into()),
//!     ..Default::default()
//! };
//! let grid = rasterize(&boundary, &options)?;
//! ```

pub mod boundary;
pub mod rasterize;

pub use boundary::BoundaryPolygon;
pub use rasterize::{
    rasterize, BinaryGrid, CellRule, GridSizing, RasterizeOptions, Resolution, ACTIVE, INACTIVE,
};
