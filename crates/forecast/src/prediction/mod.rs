#![forbid(unsafe_code)]

mod monte_carlo;
mod team;
mod types;
mod weighted;

pub use monte_carlo::{ChampionshipModel, MonteCarloSimulator, TRIALS_PER_BLOCK};
pub use team::TeamAggregator;
pub use types::{ChampionshipEntry, ChampionshipForecast, ForecastEntry, RaceForecast};
pub use weighted::{RacePredictor, WeightedRacePredictor};
