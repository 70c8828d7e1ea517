use crate::error::Error;
use feed::FeedSeason;
use forecast::ForecastReport;
use forecast::domain::{ParticipantId, ParticipantKey, PointsLedger};
use forecast::prediction::{ChampionshipForecast, RaceForecast};
use std::io::Write;

/// Favourites listed per weekend.
const TOP_PER_EVENT: usize = 3;

/// Render standings, title odds and weekend favourites as plain tables.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &ForecastReport,
    feed: &FeedSeason,
) -> Result<(), Error> {
    write_drivers(out, &report.standings, report.drivers.as_ref(), feed)?;
    write_teams(out, &report.team_standings, report.teams.as_ref(), feed)?;
    if !report.races.is_empty() {
        write_races(out, &report.races, feed)?;
    }

    write!(out, "\nCompleted events: {}", report.completed_events)?;
    if let Some(remaining) = report.remaining_events {
        write!(out, ", remaining: {remaining}")?;
    }
    if let Some(seed) = report.seed {
        write!(out, ", seed: {seed}")?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_drivers<W: Write>(
    out: &mut W,
    standings: &PointsLedger,
    forecast: Option<&ChampionshipForecast>,
    feed: &FeedSeason,
) -> Result<(), Error> {
    writeln!(out, "=== Drivers ===\n")?;
    writeln!(out, "{:<10} {:<10} {:<10} {:>11}", "Number", "Driver", "Points", "Title odds")?;
    writeln!(out, "{}", "-".repeat(60))?;
    for (driver, points) in standings.ranked() {
        let number = match feed.season.registry.get(driver) {
            Some(ParticipantKey::Driver(number)) => number.to_string(),
            _ => "-".to_string(),
        };
        writeln!(
            out,
            "{:<10} {:<10} {:<10} {}",
            number,
            label(feed, driver),
            points,
            odds(forecast, driver)
        )?;
    }
    Ok(())
}

fn write_teams<W: Write>(
    out: &mut W,
    standings: &PointsLedger,
    forecast: Option<&ChampionshipForecast>,
    feed: &FeedSeason,
) -> Result<(), Error> {
    writeln!(out, "\n=== Teams ===\n")?;
    writeln!(out, "{:<20} {:<10} {:>11}", "Team", "Points", "Title odds")?;
    writeln!(out, "{}", "-".repeat(50))?;
    for (team, points) in standings.ranked() {
        writeln!(
            out,
            "{:<20} {:<10} {}",
            label(feed, team),
            points,
            odds(forecast, team)
        )?;
    }
    Ok(())
}

fn write_races<W: Write>(out: &mut W, races: &[RaceForecast], feed: &FeedSeason) -> Result<(), Error> {
    writeln!(out, "\n=== Weekend favourites ===\n")?;
    writeln!(out, "{:<20} {:<12} {}", "Event", "Date", "Favourites")?;
    writeln!(out, "{}", "-".repeat(70))?;
    for race in races {
        let date = race
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let favourites = if race.is_empty() {
            "no data".to_string()
        } else {
            race.entries
                .iter()
                .take(TOP_PER_EVENT)
                .map(|e| format!("{} {:.2}%", label(feed, e.participant), e.probability))
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(out, "{:<20} {:<12} {}", race.name, date, favourites)?;
    }
    Ok(())
}

/// Driver acronym, team name, or the raw key as a last resort.
fn label(feed: &FeedSeason, participant: ParticipantId) -> String {
    if let Some(acronym) = feed.roster.acronym(participant) {
        return acronym.to_string();
    }
    feed.season
        .registry
        .get(participant)
        .map(ToString::to_string)
        .unwrap_or_else(|| "?".to_string())
}

fn odds(forecast: Option<&ChampionshipForecast>, participant: ParticipantId) -> String {
    match forecast.and_then(|f| f.probability(participant)) {
        Some(probability) => format!("{probability:>10.2}%"),
        None => format!("{:>11}", "-"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Config;
    use feed::{DriverRecord, ResultRecord, SeasonSnapshot, SessionRecord};
    use forecast::ForecastEngine;
    use tokio_util::sync::CancellationToken;

    fn feed_season() -> FeedSeason {
        let session = |key, name: &str, start: &str| SessionRecord {
            session_key: key,
            meeting_key: 1,
            session_name: name.to_string(),
            date_start: Some(start.to_string()),
            location: Some("Sakhir".to_string()),
            country_name: None,
        };
        let row = |session_key, driver_number, position| ResultRecord {
            session_key,
            driver_number,
            position: Some(position),
        };
        let driver = |number, acronym: &str, team: &str| DriverRecord {
            driver_number: number,
            name_acronym: Some(acronym.to_string()),
            team_name: Some(team.to_string()),
        };

        SeasonSnapshot::new(
            2024,
            vec![
                session(1, "Qualifying", "2024-03-01T16:00:00+00:00"),
                session(2, "Race", "2024-03-02T15:00:00+00:00"),
            ],
            vec![row(1, 44, 1), row(1, 1, 2), row(2, 1, 1), row(2, 44, 2)],
            vec![
                driver(1, "VER", "Red Bull Racing"),
                driver(44, "HAM", "Mercedes"),
            ],
        )
        .into_season()
    }

    #[test]
    fn finished_season_report() {
        let feed = feed_season();
        let mut config = Config::default();
        config.championship.total_events = 1;
        config.simulation.seed = Some(3);

        let report = ForecastEngine::new(&config)
            .unwrap()
            .run(&feed.season, &CancellationToken::new())
            .unwrap();
        let mut out = Vec::new();
        write_report(&mut out, &report, &feed).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("=== Drivers ==="));
        assert!(text.contains(&format!("{:<10} {:<10} {:<10} {:>10.2}%", 1, "VER", 25, 100.0)));
        assert!(text.contains(&format!("{:<10} {:<10} {:<10} {:>10.2}%", 44, "HAM", 18, 0.0)));
        assert!(text.contains(&format!("{:<20} {:<10} {:>10.2}%", "Red Bull Racing", 25, 100.0)));
        assert!(text.contains(&format!(
            "{:<20} {:<12} {}",
            "Sakhir", "2024-03-01", "HAM 66.67%, VER 33.33%"
        )));
        assert!(text.contains("Completed events: 1, remaining: 0, seed: 3"));
    }
}
