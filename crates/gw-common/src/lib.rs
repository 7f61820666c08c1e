//! Common types shared by the groundwater GIS utilities.
//!
//! Every crate in the workspace describes space the same way: a
//! [`BoundingBox`] extent, a [`Crs`] definition string, and a
//! [`GridGeometry`] that splits the extent into rows and columns.
//! Cell values live in a row-major [`Raster`].

pub mod bbox;
pub mod crs;
pub mod error;
pub mod grid;
pub mod raster;

pub use bbox::BoundingBox;
pub use crs::Crs;
pub use error::{ErrorKind, GwError, GwResult};
pub use grid::{CellSize, GridGeometry, MAX_CELLS};
pub use raster::Raster;
