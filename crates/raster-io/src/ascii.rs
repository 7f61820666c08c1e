//! ESRI ASCII grid writer.
//!
//! Square cells use the `cellsize` header; rectangular cells fall back to the
//! `dx`/`dy` pair GDAL also understands. A `.prj` sidecar is written only
//! when the grid's CRS is WKT; authority codes and PROJ strings are not valid
//! `.prj` content, so those grids are written without one.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use gw_common::{GwError, GwResult, Raster};
use tracing::debug;

/// Write `raster` as an ESRI ASCII grid.
pub fn write_ascii_grid<T>(
    path: impl AsRef<Path>,
    raster: &Raster<T>,
    nodata: Option<T>,
) -> GwResult<()>
where
    T: Copy + Display,
{
    let path = path.as_ref();
    let io_err = |e: std::io::Error| GwError::Io(format!("{}: {}", path.display(), e));

    let geometry = raster.geometry();
    let size = geometry.cell_size();
    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);

    writeln!(out, "ncols {}", geometry.cols).map_err(io_err)?;
    writeln!(out, "nrows {}", geometry.rows).map_err(io_err)?;
    writeln!(out, "xllcorner {}", geometry.extent.min_x).map_err(io_err)?;
    writeln!(out, "yllcorner {}", geometry.extent.min_y).map_err(io_err)?;
    if (size.x - size.y).abs() <= f64::EPSILON * size.x.abs().max(1.0) {
        writeln!(out, "cellsize {}", size.x).map_err(io_err)?;
    } else {
        writeln!(out, "dx {}", size.x).map_err(io_err)?;
        writeln!(out, "dy {}", size.y).map_err(io_err)?;
    }
    if let Some(nd) = nodata {
        writeln!(out, "NODATA_value {}", nd).map_err(io_err)?;
    }

    for row in 0..geometry.rows {
        let line = raster
            .row(row)
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{}", line).map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;

    match geometry.crs.wkt() {
        Some(wkt) => {
            let prj = path.with_extension("prj");
            std::fs::write(&prj, wkt)
                .map_err(|e| GwError::Io(format!("{}: {}", prj.display(), e)))?;
        }
        None if !geometry.crs.as_str().is_empty() => {
            debug!(crs = %geometry.crs, "CRS is not WKT; no .prj written");
        }
        None => {}
    }

    debug!(path = %path.display(), rows = geometry.rows, cols = geometry.cols, "Wrote ASCII grid");
    Ok(())
}
