//! Groundwater GIS job runner.
//!
//! Reads a YAML job file and runs its rasterize, observation-merge and
//! head-grid jobs in order, stopping at the first failure.

mod config;
mod jobs;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use config::load_config;

#[derive(Parser, Debug)]
#[command(name = "gw-runner")]
#[command(about = "Run groundwater GIS jobs from a YAML job file")]
struct Args {
    /// Job file path
    #[arg(short, long, env = "GW_RUNNER_CONFIG", default_value = "jobs.yaml")]
    config: String,

    /// Log level (overrides the job file)
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Run only the named job
    #[arg(long)]
    only: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args.config)?;

    let level_name = args
        .log_level
        .as_deref()
        .or(config.log_level.as_deref())
        .unwrap_or("info");
    init_tracing(parse_level(level_name), args.json_logs)?;

    let selected: Vec<_> = config
        .jobs
        .iter()
        .filter(|job| args.only.as_deref().map_or(true, |only| job.name() == only))
        .collect();
    if selected.is_empty() {
        match &args.only {
            Some(only) => anyhow::bail!("No job named {} in {}", only, args.config),
            None => anyhow::bail!("{} lists no jobs", args.config),
        }
    }

    info!(config = %args.config, jobs = selected.len(), "Starting gw-runner");

    for job in selected {
        if let Err(e) = jobs::run_job(job) {
            error!(job = job.name(), kind = job.kind(), error = %format!("{:#}", e), "Job failed");
            return Err(e.context(format!("Job {} failed", job.name())));
        }
    }

    info!("All jobs completed");
    Ok(())
}

fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn init_tracing(level: Level, json: bool) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}
