//! Year-labelled grid stacks.

use std::path::{Path, PathBuf};

use gw_common::{GwError, GwResult, Raster};
use tracing::info;

/// One head grid and its calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearGrid {
    pub year: i32,
    pub grid: Raster<f64>,
}

/// Head grids in time-step order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridStack {
    layers: Vec<YearGrid>,
}

impl GridStack {
    pub(crate) fn new(layers: Vec<YearGrid>) -> Self {
        Self { layers }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.layers.iter().map(|l| l.year).collect()
    }

    pub fn get(&self, year: i32) -> Option<&Raster<f64>> {
        self.layers.iter().find(|l| l.year == year).map(|l| &l.grid)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, YearGrid> {
        self.layers.iter()
    }

    /// Write one float32 GeoTIFF per year as `<dir>/<prefix>_<year>.tif`.
    ///
    /// Returns the written paths in stack order.
    pub fn write_geotiffs(&self, dir: impl AsRef<Path>, prefix: &str) -> GwResult<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .map_err(|e| GwError::io(format!("{}: {}", dir.display(), e)))?;

        let mut written = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let path = dir.join(format!("{}_{}.tif", prefix, layer.year));
            raster_io::write_geotiff_f32(&path, &layer.grid.map(|v| v as f32))?;
            written.push(path);
        }

        info!(dir = %dir.display(), files = written.len(), "Wrote head grids");
        Ok(written)
    }
}

impl<'a> IntoIterator for &'a GridStack {
    type Item = &'a YearGrid;
    type IntoIter = std::slice::Iter<'a, YearGrid>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}

impl IntoIterator for GridStack {
    type Item = YearGrid;
    type IntoIter = std::vec::IntoIter<YearGrid>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.into_iter()
    }
}
