#![forbid(unsafe_code)]

//! Championship forecasting for points-based racing series.
//!
//! Completed race results are folded into a [`domain::PointsLedger`], which
//! feeds two strategies: a Monte Carlo projection of the remaining season and
//! a deterministic weighted-session predictor for individual events. The
//! [`ForecastEngine`] runs whichever the configuration selects.

pub mod domain;
pub mod engine;
mod error;
pub mod ingest;
pub mod prediction;
pub mod scoring;
pub mod stores;

pub use engine::{ForecastEngine, ForecastReport, ReportSummary, Season, Services};
pub use error::{Error, InvalidConfiguration};
