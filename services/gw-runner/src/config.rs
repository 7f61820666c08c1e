//! Job file loading.
//!
//! A job file lists the runs to perform, in order:
//!
//! ```yaml
//! log_level: info
//! jobs:
//!   - kind: rasterize
//!     name: ibound
//!     boundary: ${DATA_DIR}/domain.geojson
//!     resolution: 1000.0
//!     output_path: ${OUT_DIR:-out}/ibound.tif
//!     visualize: true
//!   - kind: merge_observations
//!     name: heads
//!     metadata: ${DATA_DIR}/obs_meta.txt
//!     values: ${DATA_DIR}/model_os.txt
//!     output_csv: out/merged_heads.csv
//!   - kind: head_grids
//!     name: yearly
//!     array_file: ${DATA_DIR}/model_output.h5
//!     template: out/ibound.tif
//!     start_year: 2000
//!     output_dir: out/heads
//! ```
//!
//! Environment variables are substituted with `${VAR}` and
//! `${VAR:-default}` before the YAML is parsed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use boundary_mask::RasterizeOptions;
use head_grid::ConvertOptions;
use head_obs::MergeOptions;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// Log level used when none is given on the command line.
    #[serde(default)]
    pub log_level: Option<String>,
    pub jobs: Vec<Job>,
}

/// One unit of work.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Job {
    Rasterize {
        name: String,
        /// GeoJSON boundary file.
        boundary: PathBuf,
        /// CRS for boundaries that do not declare one.
        #[serde(default)]
        default_crs: Option<String>,
        #[serde(flatten)]
        options: RasterizeOptions,
    },
    MergeObservations {
        name: String,
        metadata: PathBuf,
        values: PathBuf,
        #[serde(default)]
        output_csv: Option<PathBuf>,
        #[serde(flatten)]
        options: MergeOptions,
    },
    HeadGrids {
        name: String,
        array_file: PathBuf,
        /// GeoTIFF whose grid the heads are laid out on.
        template: PathBuf,
        #[serde(default = "default_layer")]
        layer: u32,
        start_year: i32,
        #[serde(default)]
        output_dir: Option<PathBuf>,
        #[serde(default = "default_prefix")]
        prefix: String,
        #[serde(flatten)]
        options: ConvertOptions,
    },
}

fn default_layer() -> u32 {
    1
}

fn default_prefix() -> String {
    "head".to_string()
}

impl Job {
    pub fn name(&self) -> &str {
        match self {
            Job::Rasterize { name, .. }
            | Job::MergeObservations { name, .. }
            | Job::HeadGrids { name, .. } => name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Job::Rasterize { .. } => "rasterize",
            Job::MergeObservations { .. } => "merge_observations",
            Job::HeadGrids { .. } => "head_grids",
        }
    }
}

/// Load and parse a job file with environment variable substitution.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunnerConfig> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read job file {:?}", path.as_ref()))?;
    parse_config(&content).with_context(|| format!("Invalid job file {:?}", path.as_ref()))
}

pub fn parse_config(content: &str) -> Result<RunnerConfig> {
    let expanded = expand_env_vars(content)?;
    let config: RunnerConfig =
        serde_yaml::from_str(&expanded).context("Failed to parse job file YAML")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &RunnerConfig) -> Result<()> {
    let mut names = std::collections::HashSet::new();
    for job in &config.jobs {
        if job.name().trim().is_empty() {
            anyhow::bail!("A {} job has an empty name", job.kind());
        }
        if !names.insert(job.name()) {
            anyhow::bail!("Duplicate job name: {}", job.name());
        }
    }
    Ok(())
}

/// Expand `$VAR`, `${VAR}` and `${VAR:-default}` references. A reference
/// to an unset variable without a default is an error.
fn expand_env_vars(content: &str) -> Result<String> {
    shellexpand::env(content)
        .map(|expanded| expanded.into_owned())
        .context("Failed to expand environment variables")
}

#[cfg(test)]
mod tests {
    use super::*;
    use boundary_mask::{CellRule, Resolution};

    const JOBS: &str = r#"
log_level: debug
jobs:
  - kind: rasterize
    name: ibound
    boundary: data/domain.geojson
    resolution: [500.0, 250.0]
    cell_rule: centroid
    output_path: out/ibound.tif
  - kind: merge_observations
    name: heads
    metadata: data/obs_meta.txt
    values: data/model_os.txt
    sort_output: false
  - kind: head_grids
    name: yearly
    array_file: data/model_output.h5
    template: out/ibound.tif
    start_year: 2000
    dataset_path: Results/Head
"#;

    #[test]
    fn test_parse_all_job_kinds() {
        let config = parse_config(JOBS).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.jobs.len(), 3);

        match &config.jobs[0] {
            Job::Rasterize { boundary, options, default_crs, .. } => {
                assert_eq!(boundary, &PathBuf::from("data/domain.geojson"));
                assert_eq!(options.resolution, Some(Resolution::XY(500.0, 250.0)));
                assert_eq!(options.cell_rule, CellRule::Centroid);
                assert!(!options.visualize);
                assert!(default_crs.is_none());
            }
            other => panic!("expected rasterize, got {:?}", other),
        }
        match &config.jobs[1] {
            Job::MergeObservations { options, output_csv, .. } => {
                assert!(!options.sort_output);
                assert!(output_csv.is_none());
            }
            other => panic!("expected merge_observations, got {:?}", other),
        }
        match &config.jobs[2] {
            Job::HeadGrids { layer, start_year, prefix, options, .. } => {
                assert_eq!(*layer, 1);
                assert_eq!(*start_year, 2000);
                assert_eq!(prefix, "head");
                assert_eq!(options.dataset_path, "Results/Head");
            }
            other => panic!("expected head_grids, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_defaults_to_sorted() {
        let config = parse_config(
            "jobs:\n  - kind: merge_observations\n    name: m\n    metadata: a\n    values: b\n",
        )
        .unwrap();
        match &config.jobs[0] {
            Job::MergeObservations { options, .. } => assert!(options.sort_output),
            other => panic!("expected merge_observations, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_job_names_rejected() {
        let yaml = "jobs:\n  - kind: merge_observations\n    name: m\n    metadata: a\n    values: b\n  - kind: merge_observations\n    name: m\n    metadata: a\n    values: b\n";
        assert!(parse_config(yaml).is_err());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(parse_config("jobs:\n  - kind: reproject\n    name: r\n").is_err());
    }

    #[test]
    fn test_expand_env_vars_simple() {
        std::env::set_var("GW_RUNNER_TEST_DIR", "/data/model");
        let result = expand_env_vars("boundary: ${GW_RUNNER_TEST_DIR}/domain.geojson").unwrap();
        assert_eq!(result, "boundary: /data/model/domain.geojson");
    }

    #[test]
    fn test_expand_env_vars_with_default() {
        std::env::remove_var("GW_RUNNER_UNSET");
        let result = expand_env_vars("${GW_RUNNER_UNSET:-out}/ibound.tif").unwrap();
        assert_eq!(result, "out/ibound.tif");
    }

    #[test]
    fn test_expand_env_vars_missing_required() {
        std::env::remove_var("GW_RUNNER_REQUIRED");
        let err = expand_env_vars("boundary: ${GW_RUNNER_REQUIRED}/domain.geojson").unwrap_err();
        assert!(format!("{:#}", err).contains("GW_RUNNER_REQUIRED"));
    }

    #[test]
    fn test_parse_config_expands_before_yaml() {
        std::env::set_var("GW_RUNNER_TEST_OBS", "/data/obs");
        std::env::remove_var("GW_RUNNER_TEST_VALUES");
        let config = parse_config(
            "jobs:\n  - kind: merge_observations\n    name: m\n    metadata: ${GW_RUNNER_TEST_OBS}/meta.txt\n    values: ${GW_RUNNER_TEST_VALUES:-model_os.txt}\n",
        )
        .unwrap();
        match &config.jobs[0] {
            Job::MergeObservations { metadata, values, .. } => {
                assert_eq!(metadata, &PathBuf::from("/data/obs/meta.txt"));
                assert_eq!(values, &PathBuf::from("model_os.txt"));
            }
            other => panic!("expected merge_observations, got {:?}", other),
        }
    }
}
