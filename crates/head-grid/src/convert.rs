//! Head array to grid stack conversion.

use std::path::Path;

use gw_common::{GridGeometry, GwError, GwResult, Raster};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::source::HeadArraySource;
use crate::stack::{GridStack, YearGrid};

/// Target grid: rows, columns and the spatial reference stamped on every
/// output grid.
pub type GridTemplate = GridGeometry;

/// Dataset path used by the model's HDF5 output.
pub const DEFAULT_DATASET_PATH: &str = "Datasets/Head/Values";

/// Options for [`head_array_to_grid_stack`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Path of the (cells, steps) dataset inside the source.
    pub dataset_path: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            dataset_path: DEFAULT_DATASET_PATH.to_string(),
        }
    }
}

/// Load a template from an existing GeoTIFF, such as a rasterized boundary.
pub fn template_from_geotiff(path: impl AsRef<Path>) -> GwResult<GridTemplate> {
    raster_io::read_geotiff_geometry(path)
}

/// Reshape each time step of a head array into a grid labelled by year.
///
/// Only model layer 1 is supported. For step `t`, the first `rows * cols`
/// values of column `t` fill the grid row-major and the grid is labelled
/// `start_year + t`.
pub fn head_array_to_grid_stack(
    source: &dyn HeadArraySource,
    template: &GridTemplate,
    layer: u32,
    start_year: i32,
    options: &ConvertOptions,
) -> GwResult<GridStack> {
    if layer != 1 {
        return Err(GwError::UnsupportedFeature(format!(
            "only layer 1 is currently processable (got layer {})",
            layer
        )));
    }

    let array = source.read_2d(&options.dataset_path)?;
    let cell_count = template.len();
    if cell_count > array.cells() {
        return Err(GwError::ShapeMismatch(format!(
            "template has {} cells ({} x {}) but '{}' holds {}",
            cell_count,
            template.rows,
            template.cols,
            options.dataset_path,
            array.cells()
        )));
    }
    if cell_count < array.cells() {
        debug!(
            template_cells = cell_count,
            array_cells = array.cells(),
            "Using the leading cells of each time step"
        );
    }

    let mut layers = Vec::with_capacity(array.steps());
    for step in 0..array.steps() {
        let values: Vec<f64> = array.column(step).take(cell_count).collect();
        let year = year_for_step(start_year, step)?;
        layers.push(YearGrid {
            year,
            grid: Raster::from_values(template.clone(), values)?,
        });
    }

    info!(
        source = %source.describe(),
        dataset = %options.dataset_path,
        grids = layers.len(),
        rows = template.rows,
        cols = template.cols,
        start_year,
        "Converted head array to grids"
    );
    Ok(GridStack::new(layers))
}

fn year_for_step(start_year: i32, step: usize) -> GwResult<i32> {
    i32::try_from(step)
        .ok()
        .and_then(|s| start_year.checked_add(s))
        .ok_or_else(|| {
            GwError::invalid_argument(format!(
                "year label overflows for start year {} and step {}",
                start_year, step
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{HeadArray, InMemoryHeadSource};
    use gw_common::{BoundingBox, Crs, ErrorKind};
    use test_utils::create_head_array;

    fn template(rows: usize, cols: usize) -> GridTemplate {
        GridGeometry::from_dimensions(
            BoundingBox::new(0.0, 0.0, cols as f64 * 100.0, rows as f64 * 100.0),
            rows,
            cols,
            Crs::from_epsg(26914),
        )
        .unwrap()
    }

    fn source(cells: usize, steps: usize) -> InMemoryHeadSource {
        InMemoryHeadSource::new().with_dataset(
            DEFAULT_DATASET_PATH,
            HeadArray::new(cells, steps, create_head_array(cells, steps)).unwrap(),
        )
    }

    #[test]
    fn test_layer_other_than_one_rejected_before_reading() {
        // An empty source would fail with Io if it were read
        let empty = InMemoryHeadSource::new();
        for layer in [0, 2, 3] {
            let err = head_array_to_grid_stack(
                &empty,
                &template(2, 2),
                layer,
                2000,
                &ConvertOptions::default(),
            )
            .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedFeature);
        }
    }

    #[test]
    fn test_extra_source_cells_ignored() {
        let stack = head_array_to_grid_stack(
            &source(12, 2),
            &template(2, 5),
            1,
            1990,
            &ConvertOptions::default(),
        )
        .unwrap();
        assert_eq!(stack.years(), [1990, 1991]);
        let grid = stack.get(1991).unwrap();
        let expected: Vec<f64> = (1000..1010).map(f64::from).collect();
        assert_eq!(grid.values(), expected.as_slice());
        assert_eq!(grid.get(1, 0), Some(1005.0));
    }

    #[test]
    fn test_too_few_source_cells() {
        let opts = ConvertOptions::default();
        let err = head_array_to_grid_stack(&source(8, 2), &template(3, 3), 1, 2000, &opts)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn test_custom_dataset_path() {
        let src = InMemoryHeadSource::new().with_dataset(
            "Results/Heads",
            HeadArray::new(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap(),
        );
        let opts = ConvertOptions {
            dataset_path: "Results/Heads".to_string(),
        };
        let stack = head_array_to_grid_stack(&src, &template(2, 2), 1, 2020, &opts).unwrap();
        assert_eq!(stack.get(2020).unwrap().values(), &[1.0, 2.0, 3.0, 4.0]);

        let opts = ConvertOptions::default();
        let err = head_array_to_grid_stack(&src, &template(2, 2), 1, 2020, &opts).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_year_overflow() {
        let opts = ConvertOptions::default();
        let err = head_array_to_grid_stack(&source(4, 2), &template(2, 2), 1, i32::MAX, &opts)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
