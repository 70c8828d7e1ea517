#![forbid(unsafe_code)]

use crate::domain::{Session, SessionKind, SessionResult};
use chrono::{DateTime, Utc};

/// One race weekend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub name: String,
    /// Start of the weekend, when the feed knows it.
    pub date: Option<DateTime<Utc>>,
    pub sessions: Vec<Session>,
}

impl EventRecord {
    pub fn new(name: impl Into<String>, date: Option<DateTime<Utc>>) -> Self {
        Self {
            name: name.into(),
            date,
            sessions: Vec::new(),
        }
    }

    pub fn with_session(mut self, kind: SessionKind, result: SessionResult) -> Self {
        self.sessions.push(Session::new(kind, result));
        self
    }

    pub fn sessions_of(&self, kind: SessionKind) -> impl Iterator<Item = &Session> + '_ {
        self.sessions.iter().filter(move |s| s.kind == kind)
    }

    /// Whether a race of this weekend has a classified result.
    pub fn is_completed(&self) -> bool {
        self.sessions_of(SessionKind::Race)
            .any(|s| !s.result.is_empty())
    }
}

/// Events in chronological order.
///
/// Events without a date come first; events sharing a date (or both lacking
/// one) keep the order in which they were listed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Schedule {
    events: Vec<EventRecord>,
}

impl Schedule {
    pub fn new(mut events: Vec<EventRecord>) -> Self {
        events.sort_by_key(|event| event.date);
        Self { events }
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn get(&self, index: usize) -> Option<&EventRecord> {
        self.events.get(index)
    }

    /// Events strictly before `index`.
    pub fn prior(&self, index: usize) -> &[EventRecord] {
        &self.events[..index.min(self.events.len())]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn completed_events(&self) -> usize {
        self.events.iter().filter(|e| e.is_completed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> Option<DateTime<Utc>> {
        Utc.with_ymd_and_hms(2025, 3, day, 14, 0, 0).single()
    }

    #[test]
    fn undated_events_sort_first_in_listing_order() {
        let schedule = Schedule::new(vec![
            EventRecord::new("late", at(30)),
            EventRecord::new("tbc-1", None),
            EventRecord::new("early", at(2)),
            EventRecord::new("tbc-2", None),
            EventRecord::new("early-twin", at(2)),
        ]);

        let names: Vec<_> = schedule.events().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["tbc-1", "tbc-2", "early", "early-twin", "late"]);
        assert_eq!(schedule.prior(2).len(), 2);
        assert_eq!(schedule.prior(99).len(), 5);
    }
}
