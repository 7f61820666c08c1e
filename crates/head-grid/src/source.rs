//! Head array sources.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Once;

use gw_common::{GwError, GwResult};
use tracing::debug;

/// A dense (cells x steps) array of head values, stored row-major so that
/// entry `(cell, step)` lives at `cell * steps + step`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadArray {
    cells: usize,
    steps: usize,
    values: Vec<f64>,
}

impl HeadArray {
    pub fn new(cells: usize, steps: usize, values: Vec<f64>) -> GwResult<Self> {
        if values.len() != cells * steps {
            return Err(GwError::ShapeMismatch(format!(
                "{} values cannot fill a ({}, {}) array",
                values.len(),
                cells,
                steps
            )));
        }
        Ok(Self {
            cells,
            steps,
            values,
        })
    }

    /// Number of cells (first dimension).
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Number of time steps (second dimension).
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn get(&self, cell: usize, step: usize) -> Option<f64> {
        if cell < self.cells && step < self.steps {
            Some(self.values[cell * self.steps + step])
        } else {
            None
        }
    }

    /// The values of time step `step` in cell order.
    pub fn column(&self, step: usize) -> impl Iterator<Item = f64> + '_ {
        self.values
            .iter()
            .skip(step)
            .step_by(self.steps.max(1))
            .take(if step < self.steps { self.cells } else { 0 })
            .copied()
    }
}

/// Anything that can hand out 2-D head arrays by dataset path.
pub trait HeadArraySource {
    /// Read the dataset at `dataset_path`.
    ///
    /// A missing dataset is an `Io` error; a dataset that is not 2-D is a
    /// `FormatError`.
    fn read_2d(&self, dataset_path: &str) -> GwResult<HeadArray>;

    /// Short description for log lines.
    fn describe(&self) -> String;
}

/// Silence HDF5's automatic error printing to stderr.
///
/// The C library prints a diagnostic stack for errors that are handled on the
/// Rust side (such as a dataset lookup that misses). Safe to call repeatedly.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 accepts a null handler to disable printing.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Reads head arrays from an HDF5 file.
#[derive(Debug, Clone)]
pub struct Hdf5HeadSource {
    path: PathBuf,
}

impl Hdf5HeadSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HeadArraySource for Hdf5HeadSource {
    fn read_2d(&self, dataset_path: &str) -> GwResult<HeadArray> {
        silence_hdf5_errors();

        let file = hdf5::File::open(&self.path)
            .map_err(|e| GwError::io(format!("{}: {}", self.path.display(), e)))?;
        let dataset = file.dataset(dataset_path).map_err(|e| {
            GwError::io(format!(
                "{}: dataset '{}' not found: {}",
                self.path.display(),
                dataset_path,
                e
            ))
        })?;

        let shape = dataset.shape();
        let (cells, steps) = match shape.as_slice() {
            [cells, steps] => (*cells, *steps),
            other => {
                return Err(GwError::format(format!(
                    "{}: dataset '{}' has shape {:?}, expected (cells, steps)",
                    self.path.display(),
                    dataset_path,
                    other
                )))
            }
        };
        let values = dataset.read_raw::<f64>().map_err(|e| {
            GwError::io(format!(
                "{}: reading '{}': {}",
                self.path.display(),
                dataset_path,
                e
            ))
        })?;

        debug!(
            path = %self.path.display(),
            dataset = dataset_path,
            cells,
            steps,
            "Read head array"
        );
        HeadArray::new(cells, steps, values)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Head arrays held in memory, keyed by dataset path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHeadSource {
    datasets: HashMap<String, HeadArray>,
}

impl InMemoryHeadSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, dataset_path: impl Into<String>, array: HeadArray) -> Self {
        self.insert(dataset_path, array);
        self
    }

    pub fn insert(&mut self, dataset_path: impl Into<String>, array: HeadArray) {
        self.datasets.insert(dataset_path.into(), array);
    }
}

impl HeadArraySource for InMemoryHeadSource {
    fn read_2d(&self, dataset_path: &str) -> GwResult<HeadArray> {
        self.datasets
            .get(dataset_path)
            .cloned()
            .ok_or_else(|| GwError::io(format!("dataset '{}' not found", dataset_path)))
    }

    fn describe(&self) -> String {
        format!("in-memory ({} datasets)", self.datasets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gw_common::ErrorKind;
    use test_utils::create_head_array;

    #[test]
    fn test_head_array_layout() {
        let array = HeadArray::new(4, 3, create_head_array(4, 3)).unwrap();
        assert_eq!(array.get(2, 1), Some(1002.0));
        assert_eq!(array.get(4, 0), None);
        assert_eq!(array.column(2).collect::<Vec<_>>(), [2000.0, 2001.0, 2002.0, 2003.0]);
        assert_eq!(array.column(3).count(), 0);
    }

    #[test]
    fn test_head_array_length_checked() {
        let err = HeadArray::new(4, 3, vec![0.0; 11]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn test_in_memory_missing_dataset_is_io() {
        let source = InMemoryHeadSource::new();
        let err = source.read_2d("Datasets/Head/Values").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_missing_hdf5_file_is_io() {
        let source = Hdf5HeadSource::new("/nonexistent/model.h5");
        let err = source.read_2d("Datasets/Head/Values").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
