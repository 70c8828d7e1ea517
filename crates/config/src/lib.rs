#![forbid(unsafe_code)]

//! Configuration for champcast.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `CHAMPCAST_`-prefixed environment variables (`__` separates sections, so
//! `CHAMPCAST_SIMULATION__TRIALS=500` sets `simulation.trials`).

mod error;
mod feed;
mod sampling;
mod simulation;
mod strategy;
mod weights;

pub use error::Error;
pub use feed::Feed;
pub use sampling::SamplingMode;
pub use simulation::{Championship, Simulation};
pub use strategy::Strategy;
pub use weights::{SessionWeights, Weighted};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

const ENV_PREFIX: &str = "CHAMPCAST_";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub strategy: Strategy,
    pub championship: Championship,
    pub simulation: Simulation,
    pub weighted: Weighted,
    pub feed: Feed,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with the environment, for runs without a file.
    pub fn from_env() -> Result<Self, Error> {
        let config = Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(config)
    }

    /// Load `path` on top of the defaults, then apply the environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InvalidPath(path.to_owned()));
        }
        let config = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(config)
    }

    /// Parse a TOML document on top of the defaults. The environment is not
    /// consulted.
    pub fn from_toml(document: &str) -> Result<Self, Error> {
        let config = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(document))
            .extract()?;
        Ok(config)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, Error> {
        Ok(toml_edit::ser::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn defaults_match_the_f1_points_system() {
        let config = Config::default();
        assert_eq!(config.championship.total_events, 24);
        assert_eq!(
            config.championship.points,
            vec![25, 18, 15, 12, 10, 8, 6, 4, 2, 1]
        );
        assert_eq!(config.simulation.trials, 10_000);
        assert_eq!(config.simulation.sampling, SamplingMode::WithoutReplacement);
        assert_eq!(config.strategy, Strategy::All);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = Config::from_toml(
            r#"
            strategy = "monte-carlo"

            [simulation]
            trials = 500
            seed = 7
            sampling = "with-replacement"

            [weighted.session]
            practice = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.strategy, Strategy::MonteCarlo);
        assert_eq!(config.simulation.trials, 500);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.sampling, SamplingMode::WithReplacement);
        assert_eq!(config.weighted.session.practice, 0.0);
        assert_eq!(config.weighted.session.qualifying, 1.5);
        assert_eq!(config.championship, Championship::default());
    }

    #[test]
    fn durations_are_read_in_their_units() {
        let config = Config::from_toml(
            r#"
            [feed]
            request_delay = 50
            timeout = 5
            year = 2024
            "#,
        )
        .unwrap();
        assert_eq!(config.feed.request_delay, Duration::from_millis(50));
        assert_eq!(config.feed.timeout, Duration::from_secs(5));
        assert_eq!(config.feed.year, Some(2024));
    }

    #[test]
    fn rendered_toml_loads_back() {
        let mut config = Config::default();
        config.simulation.seed = Some(42);
        config.weighted.baseline_discount = 0.5;

        let rendered = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&rendered).unwrap(), config);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[championship]\ntotal_events = 23").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.championship.total_events, 23);
    }

    #[test]
    fn load_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            Config::load(&missing),
            Err(Error::InvalidPath(path)) if path == missing
        ));
    }

    #[test]
    fn environment_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("champcast.toml", "[simulation]\ntrials = 100")?;
            jail.set_env("CHAMPCAST_SIMULATION__TRIALS", "250");

            let config = Config::load("champcast.toml").map_err(|err| err.to_string())?;
            assert_eq!(config.simulation.trials, 250);
            Ok(())
        });
    }

    #[test]
    fn environment_alone_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CHAMPCAST_STRATEGY", "weighted");

            let config = Config::from_env().map_err(|err| err.to_string())?;
            assert_eq!(config.strategy, Strategy::Weighted);
            assert_eq!(config.simulation, Simulation::default());
            Ok(())
        });
    }
}
