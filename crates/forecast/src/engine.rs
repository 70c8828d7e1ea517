#![forbid(unsafe_code)]

use crate::domain::{ParticipantId, PointsLedger, PointsTable, Schedule};
use crate::error::{Error, InvalidConfiguration};
use crate::ingest::LedgerHistory;
use crate::prediction::{
    ChampionshipForecast, ChampionshipModel, MonteCarloSimulator, RaceForecast, RacePredictor,
    TeamAggregator, WeightedRacePredictor,
};
use crate::stores::ParticipantRegistry;
use config::{Config, Strategy};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug_span, info, info_span};

/// Everything known about a season: who takes part, what has been raced,
/// and which team each driver drives for.
#[derive(Debug, Default, Clone)]
pub struct Season {
    pub registry: ParticipantRegistry,
    pub schedule: Schedule,
    pub teams: HashMap<ParticipantId, ParticipantId>,
}

impl Season {
    pub fn new(
        registry: ParticipantRegistry,
        schedule: Schedule,
        teams: HashMap<ParticipantId, ParticipantId>,
    ) -> Self {
        Self {
            registry,
            schedule,
            teams,
        }
    }

    pub fn team_of(&self, driver: ParticipantId) -> Option<ParticipantId> {
        self.teams.get(&driver).copied()
    }
}

/// The two prediction strategies the engine drives.
pub struct Services {
    pub championship: Box<dyn ChampionshipModel + Send + Sync>,
    pub races: Box<dyn RacePredictor + Send + Sync>,
}

impl Services {
    /// Monte Carlo projection plus weighted session scoring, as configured.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let table = PointsTable::try_from(&config.championship)?;
        Ok(Self {
            championship: Box::new(MonteCarloSimulator::from_config(table, &config.simulation)?),
            races: Box::new(WeightedRacePredictor::new(&config.weighted)?),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ForecastReport {
    pub strategy: Strategy,
    pub completed_events: usize,
    /// Events left to simulate; set when the championship was projected.
    pub remaining_events: Option<u32>,
    pub seed: Option<u64>,
    pub standings: PointsLedger,
    pub team_standings: PointsLedger,
    pub drivers: Option<ChampionshipForecast>,
    pub teams: Option<ChampionshipForecast>,
    pub races: Vec<RaceForecast>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub num_drivers: usize,
    pub num_teams: usize,
    pub num_races_forecast: usize,
    pub driver_favourite: Option<ParticipantId>,
    pub team_favourite: Option<ParticipantId>,
}

impl ForecastReport {
    pub fn summarize(&self) -> ReportSummary {
        let favourite = |forecast: &Option<ChampionshipForecast>| {
            forecast
                .as_ref()
                .and_then(|f| f.favourite())
                .map(|e| e.participant)
        };
        ReportSummary {
            num_drivers: self.standings.len(),
            num_teams: self.team_standings.len(),
            num_races_forecast: self.races.len(),
            driver_favourite: favourite(&self.drivers),
            team_favourite: favourite(&self.teams),
        }
    }
}

/// Single entry point over both strategies.
pub struct ForecastEngine {
    strategy: Strategy,
    total_events: u32,
    table: PointsTable,
    services: Services,
}

impl ForecastEngine {
    /// Validate `config` and build the default services.
    pub fn new(config: &Config) -> Result<Self, Error> {
        Self::with_services(config, Services::from_config(config)?)
    }

    pub fn with_services(config: &Config, services: Services) -> Result<Self, Error> {
        Ok(Self {
            strategy: config.strategy,
            total_events: config.championship.total_events,
            table: PointsTable::try_from(&config.championship)?,
            services,
        })
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Score the season so far and run the configured strategies on it.
    pub fn run(&self, season: &Season, cancel: &CancellationToken) -> Result<ForecastReport, Error> {
        let _span = info_span!("forecast", strategy = %self.strategy).entered();

        let history = LedgerHistory::build(&season.schedule, &self.table);
        let standings = history.standing().clone();
        let team_standings = TeamAggregator::aggregate(&standings, |driver| season.team_of(driver));
        info!(
            events = season.schedule.len(),
            completed_events = history.completed_events(),
            drivers = standings.len(),
            teams = team_standings.len(),
            "season ingested"
        );

        let mut report = ForecastReport {
            strategy: self.strategy,
            completed_events: history.completed_events(),
            remaining_events: None,
            seed: None,
            standings,
            team_standings,
            drivers: None,
            teams: None,
            races: Vec::new(),
        };

        if self.strategy.runs_monte_carlo() {
            let remaining = remaining_events(self.total_events, report.completed_events)?;
            let model = &self.services.championship;

            let drivers = {
                let _span = debug_span!("drivers").entered();
                model.simulate_until(&report.standings, remaining, cancel)?
            };
            let teams = {
                let _span = debug_span!("teams").entered();
                model.simulate_until(&report.team_standings, remaining, cancel)?
            };

            report.remaining_events = Some(remaining);
            report.seed = model.seed();
            report.drivers = Some(drivers);
            report.teams = Some(teams);
        }

        if self.strategy.runs_weighted() {
            let _span = debug_span!("races").entered();
            report.races = self.services.races.forecast_all(&season.schedule, &history);
        }

        info!(summary = ?report.summarize(), "forecast complete");
        Ok(report)
    }
}

/// Events still to run, rejecting a season that has raced more than it
/// scheduled.
pub fn remaining_events(total_events: u32, completed: usize) -> Result<u32, Error> {
    let remaining = i64::from(total_events) - i64::try_from(completed).unwrap_or(i64::MAX);
    u32::try_from(remaining).map_err(|_| {
        InvalidConfiguration::NegativeRemainingEvents {
            total_events,
            completed,
            remaining,
        }
        .into()
    })
}
