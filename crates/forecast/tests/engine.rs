#![forbid(unsafe_code)]

use chrono::{TimeZone, Utc};
use config::{Config, Strategy};
use forecast::domain::{EventRecord, ParticipantId, ParticipantKey, Schedule, SessionKind, SessionResult};
use forecast::stores::ParticipantRegistry;
use forecast::{Error, ForecastEngine, InvalidConfiguration, Season};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

struct Fixture {
    season: Season,
    drivers: Vec<ParticipantId>,
    teams: Vec<ParticipantId>,
}

fn classified(order: &[ParticipantId]) -> SessionResult {
    SessionResult::from_positions(
        order
            .iter()
            .enumerate()
            .map(|(k, id)| (*id, Some(k as u32 + 1))),
    )
}

/// Three drivers in two teams; two races run, one weekend under way.
fn fixture() -> Fixture {
    let mut registry = ParticipantRegistry::new();
    let drivers: Vec<ParticipantId> = [1, 16, 44]
        .into_iter()
        .map(|n| registry.ensure(ParticipantKey::driver(n)))
        .collect();
    let teams: Vec<ParticipantId> = ["Red", "Blue"]
        .into_iter()
        .map(|name| registry.ensure(ParticipantKey::team(name)))
        .collect();
    let team_map = HashMap::from([
        (drivers[0], teams[0]),
        (drivers[1], teams[1]),
        (drivers[2], teams[1]),
    ]);

    let day = |d| Some(Utc.with_ymd_and_hms(2024, 3, d, 15, 0, 0).unwrap());
    // Listed out of order on purpose.
    let schedule = Schedule::new(vec![
        EventRecord::new("third", day(20))
            .with_session(SessionKind::Qualifying, classified(&[drivers[1], drivers[0]])),
        EventRecord::new("first", day(2))
            .with_session(SessionKind::Race, classified(&[drivers[0], drivers[1], drivers[2]])),
        EventRecord::new("second", day(9))
            .with_session(SessionKind::Race, classified(&[drivers[2], drivers[0], drivers[1]])),
    ]);

    Fixture {
        season: Season::new(registry, schedule, team_map),
        drivers,
        teams,
    }
}

fn config(strategy: Strategy) -> Config {
    let mut config = Config::default();
    config.strategy = strategy;
    config.championship.total_events = 5;
    config.simulation.trials = 1000;
    config.simulation.seed = Some(5);
    config
}

#[test]
fn full_run_produces_every_forecast() {
    let Fixture {
        season,
        drivers,
        teams,
    } = fixture();
    let engine = ForecastEngine::new(&config(Strategy::All)).unwrap();
    let report = engine.run(&season, &CancellationToken::new()).unwrap();

    assert_eq!(report.completed_events, 2);
    assert_eq!(report.remaining_events, Some(3));
    assert_eq!(report.seed, Some(5));

    // 25 + 18, 18 + 15, 15 + 25
    assert_eq!(report.standings.get(drivers[0]), Some(43));
    assert_eq!(report.standings.get(drivers[1]), Some(33));
    assert_eq!(report.standings.get(drivers[2]), Some(40));
    assert_eq!(report.team_standings.get(teams[0]), Some(43));
    assert_eq!(report.team_standings.get(teams[1]), Some(73));

    let drivers_forecast = report.drivers.as_ref().unwrap();
    let teams_forecast = report.teams.as_ref().unwrap();
    assert!((drivers_forecast.total_probability() - 100.0).abs() < 1e-6);
    assert!((teams_forecast.total_probability() - 100.0).abs() < 1e-6);

    let names: Vec<&str> = report.races.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
    assert!(report.races[0].is_empty());
    assert_eq!(
        report.races[2].favourite().map(|e| e.participant),
        Some(drivers[1])
    );

    let summary = report.summarize();
    assert_eq!(summary.num_drivers, 3);
    assert_eq!(summary.num_teams, 2);
    assert_eq!(summary.num_races_forecast, 3);
}

#[test]
fn seeded_runs_agree() {
    let Fixture { season, .. } = fixture();
    let engine = ForecastEngine::new(&config(Strategy::MonteCarlo)).unwrap();
    let cancel = CancellationToken::new();

    let first = engine.run(&season, &cancel).unwrap();
    let second = engine.run(&season, &cancel).unwrap();
    assert_eq!(first.drivers, second.drivers);
    assert_eq!(first.teams, second.teams);
    assert!(first.races.is_empty());
}

#[test]
fn weighted_only_skips_the_simulation() {
    let Fixture { season, .. } = fixture();
    let mut config = config(Strategy::Weighted);
    // More races run than scheduled is only a problem for the simulation.
    config.championship.total_events = 1;

    let report = ForecastEngine::new(&config)
        .unwrap()
        .run(&season, &CancellationToken::new())
        .unwrap();
    assert_eq!(report.drivers, None);
    assert_eq!(report.teams, None);
    assert_eq!(report.remaining_events, None);
    assert_eq!(report.races.len(), 3);
}

#[test]
fn overrun_season_is_rejected() {
    let Fixture { season, .. } = fixture();
    let mut config = config(Strategy::MonteCarlo);
    config.championship.total_events = 1;

    let result = ForecastEngine::new(&config)
        .unwrap()
        .run(&season, &CancellationToken::new());
    assert!(matches!(
        result,
        Err(Error::InvalidConfiguration(
            InvalidConfiguration::NegativeRemainingEvents {
                total_events: 1,
                completed: 2,
                remaining: -1,
            }
        ))
    ));
}

#[test]
fn cancellation_aborts_the_run() {
    let Fixture { season, .. } = fixture();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = ForecastEngine::new(&config(Strategy::All))
        .unwrap()
        .run(&season, &cancel);
    assert!(matches!(result, Err(Error::Cancelled { trials: 1000 })));
}
