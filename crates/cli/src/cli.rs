use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use config::{Config, SamplingMode, Strategy};
use std::path::{Path, PathBuf};

/// champcast: championship odds for a season in progress
///
/// Fetches the season's sessions from the OpenF1 API (or a saved snapshot),
/// tallies the points scored so far and estimates each driver's and team's
/// chance of taking the title, plus the favourite for every weekend.
#[derive(Debug, Parser, Clone)]
#[command(about, long_about, version)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, value_parser = validate_file)]
    pub config: Option<PathBuf>,

    /// Season to forecast. Defaults to `feed.year`, then the current year.
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Read the season from a snapshot file instead of the API.
    #[arg(long, value_parser = validate_file, conflicts_with = "save_snapshot")]
    pub snapshot: Option<PathBuf>,

    /// Save the fetched season to this file for offline reruns.
    #[arg(long)]
    pub save_snapshot: Option<PathBuf>,

    /// Which forecasts to produce: all, monte-carlo or weighted.
    #[arg(short, long)]
    pub strategy: Option<Strategy>,

    /// Number of simulated season completions.
    #[arg(short, long, value_parser = validate_trials)]
    pub trials: Option<u32>,

    /// Seed for the simulation, for repeatable output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// How synthetic races are drawn: without-replacement or with-replacement.
    #[arg(long)]
    pub sampling: Option<SamplingMode>,

    /// Spread the simulation over all cores.
    #[arg(short, long)]
    pub parallel: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub dump_config: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

impl Cli {
    /// Flags win over the file and the environment.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(year) = self.year {
            config.feed.year = Some(year);
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(trials) = self.trials {
            config.simulation.trials = trials;
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if let Some(sampling) = self.sampling {
            config.simulation.sampling = sampling;
        }
        if self.parallel {
            config.simulation.parallel = true;
        }
    }
}

/// Check if the file exists.
#[inline(always)]
fn validate_file(file: &str) -> Result<PathBuf, String> {
    let path = Path::new(file);
    if path.is_file() {
        Ok(path.to_owned())
    } else {
        Err(format!("File not found: {:?}", path))
    }
}

/// Validate trial count
#[inline(always)]
fn validate_trials(trials: &str) -> Result<u32, String> {
    let trials: u32 = trials
        .parse()
        .map_err(|_| format!("`{trials}` is not a valid trial count"))?;
    if trials > 0 {
        Ok(trials)
    } else {
        Err("At least one trial is required".to_string())
    }
}
