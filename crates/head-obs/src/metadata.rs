//! Observation metadata file parsing.
//!
//! The file opens with `#` comment lines. The number of records to read is
//! one less than the number of comment lines (one header comment plus one
//! per record). Each record has eight whitespace-separated fields:
//!
//! ```text
//! LAYER ROW COL WELL_ID X Y TIME OBS_NAME
//! ```
//!
//! Only the last five are kept. Well ids and coordinates may carry
//! thousands separators (`1,001`, `-123,456.5`).

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use gw_common::{GwError, GwResult};
use serde::Serialize;
use tracing::{debug, warn};

const FIELD_COUNT: usize = 8;

/// Well identifier.
///
/// Integer ids order numerically and before any non-integer id; the rest
/// order lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WellId(String);

impl WellId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn as_integer(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl Ord for WellId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_integer(), other.as_integer()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for WellId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for WellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One observation's identity, location and time step.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationMetadata {
    pub well_id: WellId,
    pub x: f64,
    pub y: f64,
    pub time: f64,
    pub name: String,
}

/// Read and parse a metadata file.
pub fn read_metadata_file(path: impl AsRef<Path>) -> GwResult<Vec<ObservationMetadata>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| GwError::io(format!("{}: {}", path.display(), e)))?;
    let records = parse_metadata(&text).map_err(|e| with_path(e, path))?;
    debug!(path = %path.display(), records = records.len(), "Parsed observation metadata");
    Ok(records)
}

/// Parse metadata file contents.
pub fn parse_metadata(text: &str) -> GwResult<Vec<ObservationMetadata>> {
    let comments = text
        .lines()
        .filter(|l| l.trim_start().starts_with('#'))
        .count();
    if comments == 0 {
        return Err(GwError::format(
            "metadata has no '#' comment lines; cannot determine record count",
        ));
    }
    let expected = comments - 1;

    let data: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
        .collect();

    if data.len() < expected {
        return Err(GwError::format(format!(
            "metadata declares {} records but contains {}",
            expected,
            data.len()
        )));
    }
    if data.len() > expected {
        warn!(
            expected,
            found = data.len(),
            "Ignoring metadata rows past the declared record count"
        );
    }

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(expected);
    for &(line_no, line) in &data[..expected] {
        let record = parse_record(line_no, line)?;
        if !seen.insert(record.name.clone()) {
            return Err(GwError::format(format!(
                "line {}: duplicate observation name '{}'",
                line_no, record.name
            )));
        }
        records.push(record);
    }
    Ok(records)
}

fn parse_record(line_no: usize, line: &str) -> GwResult<ObservationMetadata> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != FIELD_COUNT {
        return Err(GwError::format(format!(
            "line {}: expected {} fields, found {}",
            line_no,
            FIELD_COUNT,
            fields.len()
        )));
    }

    let well_id = strip_separators(fields[3]);
    if well_id.is_empty() {
        return Err(GwError::format(format!("line {}: empty well id", line_no)));
    }

    Ok(ObservationMetadata {
        well_id: WellId(well_id),
        x: parse_number(line_no, "x", fields[4])?,
        y: parse_number(line_no, "y", fields[5])?,
        time: parse_number(line_no, "time", fields[6])?,
        name: fields[7].to_string(),
    })
}

fn strip_separators(field: &str) -> String {
    field.chars().filter(|&c| c != ',').collect()
}

fn parse_number(line_no: usize, field: &str, raw: &str) -> GwResult<f64> {
    strip_separators(raw)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            GwError::format(format!(
                "line {}: field '{}' is not a number: '{}'",
                line_no, field, raw
            ))
        })
}

pub(crate) fn with_path(err: GwError, path: &Path) -> GwError {
    match err {
        GwError::FormatError(msg) => GwError::FormatError(format!("{}: {}", path.display(), msg)),
        other => other,
    }
}
