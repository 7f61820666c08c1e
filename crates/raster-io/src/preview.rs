//! Preview rendering for binary grids.
//!
//! The grid is painted first, one block of pixels per cell, and the boundary
//! rings are drawn over it in the same coordinate frame.

use std::path::Path;

use gw_common::{GwError, GwResult, Raster};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use tracing::debug;

/// Colors and size used for a preview.
#[derive(Debug, Clone, Copy)]
pub struct PreviewStyle {
    pub active: [u8; 4],
    pub inactive: [u8; 4],
    pub outline: [u8; 4],
    /// Longest image side to aim for; cells are never smaller than one pixel.
    pub target_size: u32,
}

impl Default for PreviewStyle {
    fn default() -> Self {
        Self {
            active: [30, 110, 200, 255],
            inactive: [225, 225, 225, 255],
            outline: [0, 0, 0, 255],
            target_size: 800,
        }
    }
}

/// Render a 0/1 grid with boundary rings overlaid.
///
/// `rings` are closed coordinate sequences in the grid's CRS.
pub fn render_preview(
    grid: &Raster<u8>,
    rings: &[Vec<(f64, f64)>],
    style: &PreviewStyle,
) -> RgbaImage {
    let geometry = grid.geometry();
    let longest = geometry.rows.max(geometry.cols) as u32;
    let scale = (style.target_size / longest.max(1)).max(1);
    let width = geometry.cols as u32 * scale;
    let height = geometry.rows as u32 * scale;

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba(style.inactive));
    for row in 0..geometry.rows {
        for (col, &value) in grid.row(row).iter().enumerate() {
            if value == 0 {
                continue;
            }
            let x0 = col as u32 * scale;
            let y0 = row as u32 * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    canvas.put_pixel(x0 + dx, y0 + dy, Rgba(style.active));
                }
            }
        }
    }

    let extent = geometry.extent;
    let to_pixel = |(x, y): (f64, f64)| -> (f32, f32) {
        let px = (x - extent.min_x) / extent.width() * width as f64;
        let py = (extent.max_y - y) / extent.height() * height as f64;
        (px as f32, py as f32)
    };

    for ring in rings {
        for pair in ring.windows(2) {
            draw_line_segment_mut(
                &mut canvas,
                to_pixel(pair[0]),
                to_pixel(pair[1]),
                Rgba(style.outline),
            );
        }
    }

    canvas
}

/// Render a preview and write it as a PNG file.
pub fn write_preview(
    path: impl AsRef<Path>,
    grid: &Raster<u8>,
    rings: &[Vec<(f64, f64)>],
    style: &PreviewStyle,
) -> GwResult<()> {
    let path = path.as_ref();
    let canvas = render_preview(grid, rings, style);
    canvas
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| GwError::Io(format!("{}: {}", path.display(), e)))?;

    debug!(
        path = %path.display(),
        width = canvas.width(),
        height = canvas.height(),
        "Wrote preview"
    );
    Ok(())
}
