//! Job execution.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use boundary_mask::{rasterize, BoundaryPolygon, RasterizeOptions, ACTIVE};
use gw_common::Crs;
use head_grid::{head_array_to_grid_stack, template_from_geotiff, ConvertOptions, Hdf5HeadSource};
use head_obs::{merge_head_observations, MergeOptions};
use tracing::info;

use crate::config::Job;

/// Run one job and log a summary line for it.
pub fn run_job(job: &Job) -> Result<()> {
    let start = Instant::now();
    let summary = match job {
        Job::Rasterize {
            boundary,
            default_crs,
            options,
            ..
        } => run_rasterize(boundary, default_crs.as_deref(), options)?,
        Job::MergeObservations {
            metadata,
            values,
            output_csv,
            options,
            ..
        } => run_merge(metadata, values, output_csv.as_deref(), options)?,
        Job::HeadGrids {
            array_file,
            template,
            layer,
            start_year,
            output_dir,
            prefix,
            options,
            ..
        } => run_head_grids(
            array_file,
            template,
            *layer,
            *start_year,
            output_dir.as_deref().map(|dir| (dir, prefix.as_str())),
            options,
        )?,
    };

    info!(
        job = job.name(),
        kind = job.kind(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "{}",
        summary
    );
    Ok(())
}

fn run_rasterize(
    boundary: &Path,
    default_crs: Option<&str>,
    options: &RasterizeOptions,
) -> Result<String> {
    let polygon = BoundaryPolygon::from_geojson_file(boundary, default_crs.map(Crs::new))
        .with_context(|| format!("Failed to load boundary {:?}", boundary))?;
    let grid = rasterize(&polygon, options).context("Rasterization failed")?;

    Ok(format!(
        "{} x {} grid, {} active cells",
        grid.rows(),
        grid.cols(),
        grid.count_where(|v| v == ACTIVE)
    ))
}

fn run_merge(
    metadata: &Path,
    values: &Path,
    output_csv: Option<&Path>,
    options: &MergeOptions,
) -> Result<String> {
    let table = merge_head_observations(metadata, values, options)
        .context("Failed to merge head observations")?;
    if let Some(path) = output_csv {
        table
            .write_csv(path)
            .with_context(|| format!("Failed to write {:?}", path))?;
    }
    Ok(format!("{} merged observations", table.len()))
}

fn run_head_grids(
    array_file: &Path,
    template: &Path,
    layer: u32,
    start_year: i32,
    output: Option<(&Path, &str)>,
    options: &ConvertOptions,
) -> Result<String> {
    let template = template_from_geotiff(template)
        .with_context(|| format!("Failed to load grid template {:?}", template))?;
    let source = Hdf5HeadSource::new(array_file);
    let stack = head_array_to_grid_stack(&source, &template, layer, start_year, options)
        .context("Failed to convert head array")?;

    if let Some((dir, prefix)) = output {
        stack
            .write_geotiffs(dir, prefix)
            .with_context(|| format!("Failed to write grids to {:?}", dir))?;
    }
    let years = stack.years();
    Ok(match (years.first(), years.last()) {
        (Some(first), Some(last)) => format!("{} grids, {}..={}", years.len(), first, last),
        _ => "no time steps".to_string(),
    })
}
