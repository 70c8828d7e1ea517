#![forbid(unsafe_code)]

use crate::sampling::SamplingMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Simulation {
    /// Number of simulated season completions.
    pub trials: u32,

    /// Seed for the trial generator. A random seed is drawn (and logged) when
    /// unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    pub sampling: SamplingMode,

    /// Spread trial blocks over the rayon thread pool.
    pub parallel: bool,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            trials: 10_000,
            seed: None,
            sampling: SamplingMode::default(),
            parallel: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Championship {
    /// Scheduled number of scoring events in the season.
    pub total_events: u32,

    /// Award for each finishing position, starting at P1.
    pub points: Vec<u32>,
}

impl Default for Championship {
    fn default() -> Self {
        Self {
            total_events: 24,
            points: vec![25, 18, 15, 12, 10, 8, 6, 4, 2, 1],
        }
    }
}
