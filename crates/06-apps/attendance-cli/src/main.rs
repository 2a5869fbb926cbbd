//! Replays an attendance screen scenario and prints every emission.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use app::SessionConfig;
use clap::Parser;
use log::LevelFilter;

mod render;
mod scenario;

use scenario::Scenario;

/// Drive the attendance screen from a JSON scenario.
#[derive(Parser, Debug)]
#[command(author, version, about = "Replay attendance screen scenarios", long_about = None)]
struct Cli {
    /// Session configuration (budgets, weekday style, button titles).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Scenario file with scripted responses and steps.
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SessionConfig::default(),
    };
    let loaded = Scenario::load(&cli.scenario)
        .with_context(|| format!("failed to load scenario {:?}", cli.scenario))?;

    for line in scenario::run(loaded, &config)? {
        println!("{line}");
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_config(path: &Path) -> Result<SessionConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read config {path:?}"))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid config {path:?}"))
}
