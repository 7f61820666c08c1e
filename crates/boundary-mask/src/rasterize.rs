//! Binary grid rasterization of a boundary polygon.
//!
//! The grid extent is fixed up front (explicit override or the boundary's
//! bounding box), every cell starts active, and cells that do not meet the
//! boundary are reset to inactive. Rendering and persistence are optional
//! side effects that never change the returned grid.

use std::path::{Path, PathBuf};

use geo::{BoundingRect, Coord, Intersects, Point, Polygon, Rect};
use gw_common::{BoundingBox, GridGeometry, GwError, GwResult, Raster};
use raster_io::PreviewStyle;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::boundary::BoundaryPolygon;

/// Cell value inside the boundary.
pub const ACTIVE: u8 = 1;
/// Cell value outside the boundary.
pub const INACTIVE: u8 = 0;

/// A raster whose cells are exactly [`ACTIVE`] or [`INACTIVE`].
pub type BinaryGrid = Raster<u8>;

/// Requested cell size: one value for square cells or an (x, y) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resolution {
    Uniform(f64),
    XY(f64, f64),
}

impl Resolution {
    pub fn xy(&self) -> (f64, f64) {
        match *self {
            Resolution::Uniform(r) => (r, r),
            Resolution::XY(x, y) => (x, y),
        }
    }
}

/// Which cells count as inside the boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellRule {
    /// Active when any part of the cell (edges included) meets the boundary.
    #[default]
    Intersects,
    /// Active when the cell center lies in or on the boundary.
    Centroid,
}

/// How the grid is sized, once the options have been validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridSizing {
    Resolution { x: f64, y: f64 },
    Dimensions { rows: usize, cols: usize },
}

/// Options for [`rasterize`].
///
/// Exactly one sizing mode must be given: `resolution`, or `rows` together
/// with `cols`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterizeOptions {
    pub resolution: Option<Resolution>,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    /// Extent override; defaults to the boundary's bounding box.
    pub extent: Option<BoundingBox>,
    pub cell_rule: CellRule,
    /// Render the grid with the boundary on top.
    pub visualize: bool,
    /// Where the preview PNG goes; defaults to `<output stem>_preview.png`.
    pub preview_path: Option<PathBuf>,
    /// Persist the grid as unsigned 8-bit; format follows the extension.
    pub output_path: Option<PathBuf>,
}

impl RasterizeOptions {
    /// Validate the sizing parameters and pick the sizing mode.
    pub fn sizing(&self) -> GwResult<GridSizing> {
        match (self.resolution, self.rows, self.cols) {
            (_, Some(_), None) | (_, None, Some(_)) => Err(GwError::invalid_argument(
                "rows and cols must be given together",
            )),
            (Some(_), Some(_), Some(_)) => Err(GwError::invalid_argument(
                "give either a resolution or rows/cols, not both",
            )),
            (Some(res), None, None) => {
                let (x, y) = res.xy();
                Ok(GridSizing::Resolution { x, y })
            }
            (None, Some(rows), Some(cols)) => Ok(GridSizing::Dimensions { rows, cols }),
            (None, None, None) => Err(GwError::invalid_argument(
                "a resolution or a rows/cols pair is required",
            )),
        }
    }

    fn output(&self) -> Option<&Path> {
        self.output_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    fn preview_destination(&self) -> Option<PathBuf> {
        if let Some(p) = self.preview_path.as_deref().filter(|p| !p.as_os_str().is_empty()) {
            return Some(p.to_path_buf());
        }
        let output = self.output()?;
        let stem = output.file_stem()?.to_string_lossy();
        Some(output.with_file_name(format!("{}_preview.png", stem)))
    }
}

/// Rasterize `boundary` into a binary active/inactive grid.
///
/// Errors with `InvalidArgument` before any allocation when the sizing
/// parameters are missing, incomplete, conflicting or out of range.
pub fn rasterize(boundary: &BoundaryPolygon, options: &RasterizeOptions) -> GwResult<BinaryGrid> {
    let sizing = options.sizing()?;
    let extent = options.extent.unwrap_or_else(|| boundary.bbox());
    let crs = boundary.crs().clone();

    let geometry = match sizing {
        GridSizing::Resolution { x, y } => GridGeometry::from_resolution(extent, x, y, crs)?,
        GridSizing::Dimensions { rows, cols } => {
            GridGeometry::from_dimensions(extent, rows, cols, crs)?
        }
    };
    debug!(
        rows = geometry.rows,
        cols = geometry.cols,
        extent = ?geometry.extent,
        "Allocated grid"
    );

    let mut grid = Raster::filled(geometry, ACTIVE);
    mask_outside(&mut grid, boundary, options.cell_rule);

    if options.visualize {
        match options.preview_destination() {
            Some(path) => raster_io::write_preview(
                &path,
                &grid,
                &boundary.rings(),
                &PreviewStyle::default(),
            )?,
            None => warn!("visualize requested without a preview or output path; skipping render"),
        }
    }

    if let Some(path) = options.output() {
        raster_io::write_raster_u8(path, &grid)?;
    }

    let active = grid.count_where(|v| v == ACTIVE);
    info!(
        rows = grid.rows(),
        cols = grid.cols(),
        active,
        inactive = grid.geometry().len() - active,
        output = ?options.output(),
        "Rasterized boundary"
    );
    Ok(grid)
}

/// Reset every cell that does not meet the boundary to [`INACTIVE`].
fn mask_outside(grid: &mut BinaryGrid, boundary: &BoundaryPolygon, rule: CellRule) {
    let parts: Vec<(&Polygon<f64>, Option<BoundingBox>)> = boundary
        .geometry()
        .0
        .iter()
        .map(|p| (p, p.bounding_rect().map(|r| from_rect(&r))))
        .collect();
    let geometry = grid.geometry().clone();

    for row in 0..geometry.rows {
        for col in 0..geometry.cols {
            let cell = geometry.cell_bounds(row, col);
            let inside = parts.iter().any(|(polygon, bounds)| {
                let Some(bounds) = bounds else {
                    return false;
                };
                if !cell.touches(bounds) {
                    return false;
                }
                match rule {
                    CellRule::Intersects => polygon.intersects(&to_rect(&cell)),
                    CellRule::Centroid => {
                        let (x, y) = geometry.cell_center(row, col);
                        polygon.intersects(&Point::new(x, y))
                    }
                }
            });
            if !inside {
                grid.set(row, col, INACTIVE);
            }
        }
    }
}

fn from_rect(r: &Rect<f64>) -> BoundingBox {
    BoundingBox::new(r.min().x, r.min().y, r.max().x, r.max().y)
}

fn to_rect(b: &BoundingBox) -> Rect<f64> {
    Rect::new(
        Coord { x: b.min_x, y: b.min_y },
        Coord { x: b.max_x, y: b.max_y },
    )
}
