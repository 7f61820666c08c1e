//! Georeferenced single-band rasters.

use crate::error::{GwError, GwResult};
use crate::grid::GridGeometry;

/// A single-band raster: grid geometry plus row-major cell values.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T> {
    geometry: GridGeometry,
    values: Vec<T>,
}

impl<T: Copy> Raster<T> {
    /// Allocate a raster with every cell set to `value`.
    pub fn filled(geometry: GridGeometry, value: T) -> Self {
        let values = vec![value; geometry.len()];
        Self { geometry, values }
    }

    /// Wrap existing row-major values; the length must match the geometry.
    pub fn from_values(geometry: GridGeometry, values: Vec<T>) -> GwResult<Self> {
        if values.len() != geometry.len() {
            return Err(GwError::ShapeMismatch(format!(
                "{} values cannot fill a {}x{} grid",
                values.len(),
                geometry.rows,
                geometry.cols
            )));
        }
        Ok(Self { geometry, values })
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn rows(&self) -> usize {
        self.geometry.rows
    }

    pub fn cols(&self) -> usize {
        self.geometry.cols
    }

    /// Cell values in row-major order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        Some(self.values[self.geometry.flat_index(row, col)])
    }

    /// Overwrite one cell. Returns `false`, leaving the raster unchanged,
    /// when the position is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> bool {
        if row >= self.rows() || col >= self.cols() {
            return false;
        }
        let idx = self.geometry.flat_index(row, col);
        self.values[idx] = value;
        true
    }

    /// Values of one row.
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols();
        &self.values[start..start + self.cols()]
    }

    /// Apply `f` to every cell, keeping the geometry.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Raster<U> {
        Raster {
            geometry: self.geometry.clone(),
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Number of cells matching a predicate.
    pub fn count_where(&self, pred: impl Fn(T) -> bool) -> usize {
        self.values.iter().filter(|&&v| pred(v)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoundingBox, Crs, ErrorKind};

    fn geometry() -> GridGeometry {
        GridGeometry::from_dimensions(BoundingBox::new(0.0, 0.0, 3.0, 2.0), 2, 3, Crs::wgs84())
            .unwrap()
    }

    #[test]
    fn test_filled_and_set() {
        let mut raster = Raster::filled(geometry(), 1u8);
        assert!(raster.set(1, 2, 0));
        assert_eq!(raster.get(1, 2), Some(0));
        assert_eq!(raster.get(0, 0), Some(1));
        assert_eq!(raster.get(2, 0), None);
        assert_eq!(raster.count_where(|v| v == 1), 5);
        assert_eq!(raster.row(1), &[1, 1, 0]);
    }

    #[test]
    fn test_set_out_of_range_is_rejected() {
        let mut raster = Raster::filled(geometry(), 1u8);
        // (0, 3) would alias (1, 0) in row-major storage.
        assert!(!raster.set(0, 3, 0));
        assert!(!raster.set(2, 0, 0));
        assert_eq!(raster.get(1, 0), Some(1));
        assert_eq!(raster.count_where(|v| v == 1), 6);
    }

    #[test]
    fn test_from_values_length_checked() {
        let err = Raster::from_values(geometry(), vec![0.0f32; 5]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    }
}
