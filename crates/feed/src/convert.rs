#![forbid(unsafe_code)]

use crate::dates::parse_timestamp;
use crate::records::{DriverRecord, ResultRecord};
use crate::sessions::session_kind;
use crate::snapshot::SeasonSnapshot;
use chrono::{DateTime, Utc};
use forecast::Season;
use forecast::domain::{EventRecord, ParticipantId, ParticipantKey, Schedule, SessionKind, SessionResult};
use forecast::stores::ParticipantRegistry;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Team assigned to drivers the feed has no metadata for.
pub const UNKNOWN_TEAM: &str = "Unknown";

/// Display names for registered drivers.
#[derive(Debug, Default, Clone)]
pub struct Roster {
    acronyms: HashMap<ParticipantId, String>,
}

impl Roster {
    pub fn acronym(&self, driver: ParticipantId) -> Option<&str> {
        self.acronyms.get(&driver).map(String::as_str)
    }
}

/// A converted season plus the labels needed to report on it.
#[derive(Debug, Clone)]
pub struct FeedSeason {
    pub season: Season,
    pub roster: Roster,
}

struct Meeting {
    key: u32,
    name: Option<String>,
    date: Option<DateTime<Utc>>,
    sessions: Vec<(Option<DateTime<Utc>>, SessionKind, u32)>,
}

/// Registers drivers on first classification, with their team.
struct Participants<'a> {
    metadata: &'a HashMap<u32, DriverRecord>,
    registry: ParticipantRegistry,
    teams: HashMap<ParticipantId, ParticipantId>,
    roster: Roster,
}

impl Participants<'_> {
    fn driver(&mut self, number: u32) -> ParticipantId {
        let key = ParticipantKey::driver(number);
        if let Some(id) = self.registry.id_by_key(&key) {
            return id;
        }

        let id = self.registry.ensure(key);
        let record = self.metadata.get(&number);
        if record.is_none() {
            debug!(number, "no metadata for driver, using placeholders");
        }
        let acronym = record
            .and_then(|r| r.name_acronym.clone())
            .unwrap_or_else(|| format!("P{number}"));
        let team_name = record
            .and_then(|r| r.team_name.clone())
            .unwrap_or_else(|| UNKNOWN_TEAM.to_string());

        let team = self.registry.ensure(ParticipantKey::team(team_name));
        self.teams.insert(id, team);
        self.roster.acronyms.insert(id, acronym);
        id
    }

    fn classify<'r>(&mut self, rows: impl Iterator<Item = &'r ResultRecord>) -> SessionResult {
        let mut result = SessionResult::new();
        for row in rows {
            if row.position.is_some_and(|p| p > 0) {
                let driver = self.driver(row.driver_number);
                result.push(driver, row.position);
            }
        }
        result
    }
}

impl SeasonSnapshot {
    /// Group sessions into race weekends and build the core's season.
    ///
    /// Sessions are grouped by meeting; a weekend is dated by its earliest
    /// session and named after its location (or country). Unrecognised
    /// session names are skipped. Only classified results are kept, and each
    /// driver is assigned the team from its first metadata record.
    pub fn into_season(self) -> FeedSeason {
        let mut metadata: HashMap<u32, DriverRecord> = HashMap::new();
        for driver in self.drivers {
            metadata.entry(driver.driver_number).or_insert(driver);
        }

        let mut rows: HashMap<u32, Vec<ResultRecord>> = HashMap::new();
        for row in self.results {
            rows.entry(row.session_key).or_default().push(row);
        }

        let mut meetings: Vec<Meeting> = Vec::new();
        let mut by_key: HashMap<u32, usize> = HashMap::new();
        for session in self.sessions {
            let Some(kind) = session_kind(&session.session_name) else {
                warn!(
                    session_key = session.session_key,
                    name = %session.session_name,
                    "skipping session of unknown type"
                );
                continue;
            };
            let date = session.date_start.as_deref().and_then(parse_timestamp);
            let ix = *by_key.entry(session.meeting_key).or_insert_with(|| {
                meetings.push(Meeting {
                    key: session.meeting_key,
                    name: None,
                    date: None,
                    sessions: Vec::new(),
                });
                meetings.len() - 1
            });

            let meeting = &mut meetings[ix];
            meeting.date = match (meeting.date, date) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
            if meeting.name.is_none() {
                meeting.name = session.location.or(session.country_name);
            }
            meeting.sessions.push((date, kind, session.session_key));
        }

        let mut participants = Participants {
            metadata: &metadata,
            registry: ParticipantRegistry::new(),
            teams: HashMap::new(),
            roster: Roster::default(),
        };
        let mut events = Vec::with_capacity(meetings.len());
        for mut meeting in meetings {
            meeting.sessions.sort_by_key(|(date, _, _)| *date);
            let name = meeting
                .name
                .unwrap_or_else(|| format!("Meeting {}", meeting.key));
            let mut event = EventRecord::new(name, meeting.date);
            for (_, kind, session_key) in meeting.sessions {
                let result = participants.classify(rows.get(&session_key).into_iter().flatten());
                event = event.with_session(kind, result);
            }
            events.push(event);
        }

        let Participants {
            registry,
            teams,
            roster,
            ..
        } = participants;
        info!(
            year = self.year,
            events = events.len(),
            participants = registry.len(),
            "season converted"
        );
        FeedSeason {
            season: Season::new(registry, Schedule::new(events), teams),
            roster,
        }
    }
}
