//! Inner join of observation metadata and values.

use std::collections::HashMap;
use std::path::Path;

use gw_common::{GwError, GwResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::metadata::{read_metadata_file, ObservationMetadata, WellId};
use crate::values::{read_values_file, ObservationValue};

/// Options for [`merge_head_observations`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Order rows by time, then well id. Otherwise keep values-file order.
    pub sort_output: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self { sort_output: true }
    }
}

/// A metadata record joined with its simulated/observed values.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedObservation {
    pub name: String,
    pub well_id: WellId,
    pub x: f64,
    pub y: f64,
    pub time: f64,
    pub simulated: f64,
    pub observed: f64,
}

impl MergedObservation {
    /// Observed minus simulated head.
    pub fn residual(&self) -> f64 {
        self.observed - self.simulated
    }
}

/// Rows that matched in both files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedTable {
    rows: Vec<MergedObservation>,
}

impl MergedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[MergedObservation] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MergedObservation> {
        self.rows.iter()
    }

    pub fn get(&self, name: &str) -> Option<&MergedObservation> {
        self.rows.iter().find(|r| r.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.name.as_str()).collect()
    }

    /// Write the table as CSV with a header row and a residual column.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> GwResult<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path).map_err(|e| csv_err(path, e))?;
        for row in &self.rows {
            writer
                .serialize(CsvRow::from(row))
                .map_err(|e| csv_err(path, e))?;
        }
        writer
            .flush()
            .map_err(|e| GwError::io(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), rows = self.rows.len(), "Wrote merged observations");
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MergedTable {
    type Item = &'a MergedObservation;
    type IntoIter = std::slice::Iter<'a, MergedObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    observation_name: &'a str,
    well_id: &'a str,
    x: f64,
    y: f64,
    time: f64,
    simulated: f64,
    observed: f64,
    residual: f64,
}

impl<'a> From<&'a MergedObservation> for CsvRow<'a> {
    fn from(row: &'a MergedObservation) -> Self {
        Self {
            observation_name: &row.name,
            well_id: row.well_id.as_str(),
            x: row.x,
            y: row.y,
            time: row.time,
            simulated: row.simulated,
            observed: row.observed,
            residual: row.residual(),
        }
    }
}

fn csv_err(path: &Path, err: csv::Error) -> GwError {
    if err.is_io_error() {
        GwError::io(format!("{}: {}", path.display(), err))
    } else {
        GwError::format(format!("{}: {}", path.display(), err))
    }
}

/// Read both files and join them on observation name.
pub fn merge_head_observations(
    metadata_path: impl AsRef<Path>,
    values_path: impl AsRef<Path>,
    options: &MergeOptions,
) -> GwResult<MergedTable> {
    let metadata = read_metadata_file(metadata_path.as_ref())?;
    let values = read_values_file(values_path.as_ref())?;
    let table = merge_records(&metadata, &values, options);

    info!(
        metadata = metadata.len(),
        values = values.len(),
        merged = table.len(),
        sorted = options.sort_output,
        "Merged head observations"
    );
    Ok(table)
}

/// Join parsed records; values order is kept unless sorting is requested.
pub fn merge_records(
    metadata: &[ObservationMetadata],
    values: &[ObservationValue],
    options: &MergeOptions,
) -> MergedTable {
    let by_name: HashMap<&str, &ObservationMetadata> =
        metadata.iter().map(|m| (m.name.as_str(), m)).collect();

    let mut rows: Vec<MergedObservation> = values
        .iter()
        .filter_map(|v| {
            let meta = by_name.get(v.name.as_str())?;
            Some(MergedObservation {
                name: v.name.clone(),
                well_id: meta.well_id.clone(),
                x: meta.x,
                y: meta.y,
                time: meta.time,
                simulated: v.simulated,
                observed: v.observed,
            })
        })
        .collect();

    if options.sort_output {
        rows.sort_by(|a, b| {
            a.time
                .total_cmp(&b.time)
                .then_with(|| a.well_id.cmp(&b.well_id))
        });
    }
    MergedTable { rows }
}
