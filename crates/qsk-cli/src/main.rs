//! qsk entry point.
//!
//! Thin binary: sets up tracing, parses the command tree, and drives the
//! engine. Everything deterministic lives in the library crates; the only
//! things minted here are the run id and the process exit code.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use uuid::Uuid;

use qsk_config::RunConfig;
use qsk_engine::SimEngine;

#[derive(Parser)]
#[command(name = "qsk")]
#[command(about = "QuantSim Kit regression runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered regression algorithms
    List,

    /// Run one regression algorithm against a daily-bar CSV
    Run {
        /// Registry name (overrides config `run.algorithm`)
        #[arg(long)]
        algorithm: Option<String>,

        /// Daily bars CSV path (overrides config `run.data_csv`)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Layered config paths in merge order (base first)
        #[arg(long = "config")]
        config_paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::List => cmd_list(),
        Commands::Run {
            algorithm,
            data,
            config_paths,
        } => cmd_run(algorithm, data, config_paths),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_list() -> Result<()> {
    let registry = qsk_regression::registry();
    for meta in registry.list() {
        println!("{}  {}  {}", meta.name, meta.version, meta.description);
    }
    Ok(())
}

fn cmd_run(
    algorithm: Option<String>,
    data: Option<PathBuf>,
    config_paths: Vec<String>,
) -> Result<()> {
    let run_id = Uuid::new_v4();

    let (run_cfg, config_hash) = if config_paths.is_empty() {
        (RunConfig::default(), None)
    } else {
        let refs: Vec<&str> = config_paths.iter().map(|s| s.as_str()).collect();
        let loaded = qsk_config::load_layered_yaml(&refs)?;
        (RunConfig::from_loaded(&loaded)?, Some(loaded.config_hash))
    };

    // CLI flags win over config values.
    let name = algorithm
        .or(run_cfg.algorithm)
        .context("no algorithm selected: pass --algorithm or set run.algorithm in config")?;
    let data_path = data
        .or(run_cfg.data_csv)
        .context("no data file selected: pass --data or set run.data_csv in config")?;

    let registry = qsk_regression::registry();
    let mut instance = registry.instantiate_verified(&name)?;

    let bars = qsk_engine::load_csv_file(&data_path)
        .with_context(|| format!("failed to load bars from {}", data_path.display()))?;
    let engine = SimEngine::new(bars);

    info!(run_id = %run_id, algorithm = %name, data = %data_path.display(), "starting regression run");
    if let Some(hash) = &config_hash {
        info!(config_hash = %hash, "effective config");
    }

    match engine.run(instance.as_mut()) {
        Ok(report) => {
            info!(days = report.days_delivered, "regression passed");
            let summary = serde_json::json!({
                "run_id": run_id.to_string(),
                "status": "PASSED",
                "config_hash": config_hash,
                "report": report,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Err(e) => {
            error!(run_id = %run_id, error = %e, "regression failed");
            bail!("regression '{name}' failed: {e}");
        }
    }
}
