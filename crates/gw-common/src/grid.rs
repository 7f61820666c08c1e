//! Regular grid geometry over a fixed extent.

use crate::error::{GwError, GwResult};
use crate::{BoundingBox, Crs};
use serde::{Deserialize, Serialize};

/// Largest grid the utilities will allocate, in cells.
pub const MAX_CELLS: usize = 1 << 31;

/// Cell size in the x and y directions, in CRS units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSize {
    pub x: f64,
    pub y: f64,
}

/// Layout of a north-up regular grid.
///
/// The extent is fixed at construction. Row 0 is the northern edge and
/// column 0 the western edge; cell values are stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub extent: BoundingBox,
    pub rows: usize,
    pub cols: usize,
    pub crs: Crs,
}

impl GridGeometry {
    /// Create a grid with an explicit number of rows and columns.
    pub fn from_dimensions(
        extent: BoundingBox,
        rows: usize,
        cols: usize,
        crs: Crs,
    ) -> GwResult<Self> {
        extent.validate()?;
        if rows == 0 || cols == 0 {
            return Err(GwError::invalid_argument(format!(
                "rows and cols must be positive, got {}x{}",
                rows, cols
            )));
        }
        match rows.checked_mul(cols) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => {
                return Err(GwError::invalid_argument(format!(
                    "{}x{} grid exceeds the {} cell limit",
                    rows, cols, MAX_CELLS
                )))
            }
        }
        Ok(Self {
            extent,
            rows,
            cols,
            crs,
        })
    }

    /// Create a grid whose cells are as close as possible to `res_x` by `res_y`.
    ///
    /// The extent is kept exactly; the column count is
    /// `max(1, round(width / res_x))` (likewise for rows), so the realised
    /// cell size equals the request whenever it divides the extent.
    pub fn from_resolution(
        extent: BoundingBox,
        res_x: f64,
        res_y: f64,
        crs: Crs,
    ) -> GwResult<Self> {
        extent.validate()?;
        for (axis, res) in [("x", res_x), ("y", res_y)] {
            if !res.is_finite() || res <= 0.0 {
                return Err(GwError::invalid_argument(format!(
                    "resolution in {} must be finite and positive, got {}",
                    axis, res
                )));
            }
        }

        let cols = (extent.width() / res_x).round().max(1.0);
        let rows = (extent.height() / res_y).round().max(1.0);
        // Reject in f64 so the usize casts below cannot saturate.
        if rows * cols > MAX_CELLS as f64 {
            return Err(GwError::invalid_argument(format!(
                "resolution ({}, {}) gives {:.0}x{:.0} cells, over the {} cell limit",
                res_x, res_y, rows, cols, MAX_CELLS
            )));
        }
        Self::from_dimensions(extent, rows as usize, cols as usize, crs)
    }

    /// Realised cell size.
    pub fn cell_size(&self) -> CellSize {
        CellSize {
            x: self.extent.width() / self.cols as f64,
            y: self.extent.height() / self.rows as f64,
        }
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Check if grid is empty.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Get the 1D array index for a (row, col) position.
    pub fn flat_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Bounds of a single cell.
    pub fn cell_bounds(&self, row: usize, col: usize) -> BoundingBox {
        let size = self.cell_size();
        let min_x = self.extent.min_x + col as f64 * size.x;
        let max_y = self.extent.max_y - row as f64 * size.y;
        // Snap the last row/column to the extent edge to avoid drift.
        let max_x = if col + 1 == self.cols {
            self.extent.max_x
        } else {
            min_x + size.x
        };
        let min_y = if row + 1 == self.rows {
            self.extent.min_y
        } else {
            max_y - size.y
        };
        BoundingBox::new(min_x, min_y, max_x, max_y)
    }

    /// Center coordinate of a cell.
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        let size = self.cell_size();
        (
            self.extent.min_x + (col as f64 + 0.5) * size.x,
            self.extent.max_y - (row as f64 + 0.5) * size.y,
        )
    }
}
