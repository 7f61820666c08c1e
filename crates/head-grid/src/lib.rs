//! Head array to grid conversion.
//!
//! Groundwater model output stores simulated head as a 2-D array of shape
//! (cells, time steps) inside an HDF5 container. This crate slices one time
//! step at a time, lays the values out row-major on a template grid, and
//! labels each grid with its calendar year.
//!
//! # Example
//!
//! ```ignore
//! use head_grid::{head_array_to_grid_stack, ConvertOptions, Hdf5HeadSource};
//!
//! let template = head_grid::template_from_geotiff("ibound.tif")?;
//! let source = Hdf5HeadSource::new("model_output.h5");
//! let stack = head_array_to_grid_stack(&source, &template, 1, 2000, &ConvertOptions::default())?;
//! stack.write_geotiffs("out/", "head")?;
//! ```

pub mod convert;
pub mod source;
pub mod stack;

pub use convert::{head_array_to_grid_stack, template_from_geotiff, ConvertOptions, GridTemplate};
pub use source::{silence_hdf5_errors, HeadArray, HeadArraySource, Hdf5HeadSource, InMemoryHeadSource};
pub use stack::{GridStack, YearGrid};
