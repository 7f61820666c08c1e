//! Simulated/observed values file parsing.
//!
//! A whitespace-delimited table whose first non-blank line is the header.
//! Header names may be double-quoted and contain spaces; they are matched
//! after normalisation (`"OBSERVATION NAME"` becomes `OBSERVATION.NAME`).

use std::collections::HashSet;
use std::path::Path;

use gw_common::{GwError, GwResult};
use tracing::debug;

use crate::metadata::with_path;

/// Normalised name of the join column.
pub const NAME_COLUMN: &str = "OBSERVATION.NAME";
const SIMULATED_PREFIX: &str = "SIMULATED";
const OBSERVED_PREFIX: &str = "OBSERVED";

/// Simulated and observed head for one observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationValue {
    pub name: String,
    pub simulated: f64,
    pub observed: f64,
}

struct Columns {
    name: usize,
    simulated: usize,
    observed: usize,
}

impl Columns {
    fn locate(header: &[String]) -> GwResult<Self> {
        Ok(Self {
            name: position(header, NAME_COLUMN, |h| h == NAME_COLUMN)?,
            simulated: position(header, SIMULATED_PREFIX, |h| h.starts_with(SIMULATED_PREFIX))?,
            observed: position(header, OBSERVED_PREFIX, |h| h.starts_with(OBSERVED_PREFIX))?,
        })
    }

    fn width(&self) -> usize {
        self.name.max(self.simulated).max(self.observed) + 1
    }
}

fn position(header: &[String], what: &str, pred: impl Fn(&str) -> bool) -> GwResult<usize> {
    header
        .iter()
        .position(|h| pred(h.as_str()))
        .ok_or_else(|| GwError::format(format!("values header has no {} column: {:?}", what, header)))
}

/// Read and parse a values file.
pub fn read_values_file(path: impl AsRef<Path>) -> GwResult<Vec<ObservationValue>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| GwError::io(format!("{}: {}", path.display(), e)))?;
    let values = parse_values(&text).map_err(|e| with_path(e, path))?;
    debug!(path = %path.display(), rows = values.len(), "Parsed observation values");
    Ok(values)
}

/// Parse values file contents, keeping row order.
pub fn parse_values(text: &str) -> GwResult<Vec<ObservationValue>> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (header_line, header) = lines
        .next()
        .ok_or_else(|| GwError::format("values file is empty"))?;
    let header: Vec<String> = tokenize(header_line, header)?
        .iter()
        .map(|t| normalize_name(t))
        .collect();
    let columns = Columns::locate(&header)?;

    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for (line_no, line) in lines {
        let fields = tokenize(line_no, line)?;
        if fields.len() < columns.width() {
            return Err(GwError::format(format!(
                "line {}: expected {} fields, found {}",
                line_no,
                header.len(),
                fields.len()
            )));
        }

        let name = fields[columns.name].clone();
        if !seen.insert(name.clone()) {
            return Err(GwError::format(format!(
                "line {}: duplicate observation name '{}'",
                line_no, name
            )));
        }
        values.push(ObservationValue {
            simulated: parse_value(line_no, &header[columns.simulated], &fields[columns.simulated])?,
            observed: parse_value(line_no, &header[columns.observed], &fields[columns.observed])?,
            name,
        });
    }
    Ok(values)
}

/// Replace whitespace runs with `.` and upper-case.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(".")
        .to_uppercase()
}

/// Split on whitespace, honouring double-quoted tokens.
fn tokenize(line_no: usize, line: &str) -> GwResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '"' {
            chars.next();
            let mut token = String::new();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(ch) => token.push(ch),
                    None => {
                        return Err(GwError::format(format!(
                            "line {}: unterminated quote",
                            line_no
                        )))
                    }
                }
            }
            tokens.push(token);
        } else {
            let mut token = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                token.push(ch);
                chars.next();
            }
            tokens.push(token);
        }
    }
    Ok(tokens)
}

fn parse_value(line_no: usize, column: &str, raw: &str) -> GwResult<f64> {
    raw.parse::<f64>().map_err(|_| {
        GwError::format(format!(
            "line {}: column '{}' is not a number: '{}'",
            line_no, column, raw
        ))
    })
}
