mod error;
mod input;

use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use ic_config::ControllerConfig;
use ic_controls::ManagedController;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "ic-cli")]
#[command(about = "icontrol CLI - integral feedback controller driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a controller config file
    Validate {
        /// Path to the controller YAML file
        config_path: PathBuf,
    },
    /// Feed a series of measurements through a controller
    Run {
        /// Path to the controller YAML file
        config_path: PathBuf,
        /// Measurements, one per line (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Log file, overrides the configured path
        #[arg(short, long)]
        log: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing; stdout carries the signal series
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            input,
            log,
        } => cmd_run(&config_path, input.as_deref(), log.as_deref()),
    }
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = ic_config::load_yaml(config_path)?;
    print_summary(&config);
    println!("✓ Config is valid");
    Ok(())
}

fn print_summary(config: &ControllerConfig) {
    let c = &config.controller;
    println!("  reference = {}", c.reference);
    println!("  bounds    = [{}, {}]", c.min, c.max);
    println!("  initial   = {}", c.initial);
    if c.k_i > 0.0 {
        println!("  k_i       = {}", c.k_i);
    } else {
        println!("  k_i       = estimated on first step");
    }
    match config.log_capacity() {
        0 => println!("  logging   = off"),
        n => println!(
            "  logging   = {} records -> {}",
            n,
            config
                .log_path()
                .map_or_else(|| "(no sink)".to_string(), |p| p.display().to_string())
        ),
    }
}

fn cmd_run(config_path: &Path, input: Option<&Path>, log: Option<&Path>) -> CliResult<()> {
    let config = ic_config::load_yaml(config_path)?;

    let samples = match input {
        Some(path) => {
            let file = File::open(path).map_err(|source| CliError::InputRead {
                path: path.to_path_buf(),
                source,
            })?;
            input::read_samples(BufReader::new(file))?
        }
        None => input::read_samples(io::stdin().lock())?,
    };

    let log_path = log.or_else(|| config.log_path());
    let mut controller =
        ManagedController::open(&config.controller, config.log_capacity(), log_path)?;
    info!(samples = samples.len(), "running controller");

    for sample in &samples {
        let signal = controller.adapt(sample.line, sample.measured)?;
        println!("{} {} {}", sample.line, sample.measured, signal);
    }

    controller.close()?;
    Ok(())
}
