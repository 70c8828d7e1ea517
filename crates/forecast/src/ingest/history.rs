#![forbid(unsafe_code)]

use crate::domain::{PointsLedger, PointsTable, Schedule, SessionKind, SessionResult};
use tracing::trace;

/// Applies classified results to a ledger, one session at a time.
#[derive(Debug, Clone)]
pub struct LedgerBuilder {
    table: PointsTable,
    ledger: PointsLedger,
}

impl LedgerBuilder {
    pub fn new(table: PointsTable) -> Self {
        Self {
            table,
            ledger: PointsLedger::new(),
        }
    }

    /// Register every classified participant and credit its award.
    pub fn apply(&mut self, result: &SessionResult) {
        for entry in result.entries() {
            let award = self.table.award(entry.position);
            self.ledger.award(entry.participant, award);
        }
    }

    pub fn ledger(&self) -> &PointsLedger {
        &self.ledger
    }

    pub fn finish(self) -> PointsLedger {
        self.ledger
    }
}

/// Championship standings as they stood before each event of a schedule.
#[derive(Debug, Default, Clone)]
pub struct LedgerHistory {
    before: Vec<PointsLedger>,
    standing: PointsLedger,
    completed_events: usize,
}

impl LedgerHistory {
    /// Walk `schedule` in order, scoring only race sessions.
    pub fn build(schedule: &Schedule, table: &PointsTable) -> Self {
        let mut builder = LedgerBuilder::new(table.clone());
        let mut before = Vec::with_capacity(schedule.len());
        let mut completed_events = 0;

        for event in schedule.events() {
            before.push(builder.ledger().clone());
            for session in event.sessions_of(SessionKind::Race) {
                builder.apply(&session.result);
            }
            if event.is_completed() {
                completed_events += 1;
            }
            trace!(event = %event.name, participants = builder.ledger().len(), "ledger updated");
        }

        Self {
            before,
            standing: builder.finish(),
            completed_events,
        }
    }

    /// Standings before the event at `index`; the final standings once the
    /// index runs past the schedule.
    pub fn before(&self, index: usize) -> &PointsLedger {
        self.before.get(index).unwrap_or(&self.standing)
    }

    /// Standings after every event.
    pub fn standing(&self) -> &PointsLedger {
        &self.standing
    }

    pub fn completed_events(&self) -> usize {
        self.completed_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventRecord, ParticipantKey};
    use crate::stores::ParticipantRegistry;

    #[test]
    fn history_scores_races_only_and_snapshots_before_each_event() {
        let mut registry = ParticipantRegistry::new();
        let a = registry.ensure(ParticipantKey::driver(1));
        let b = registry.ensure(ParticipantKey::driver(2));
        let c = registry.ensure(ParticipantKey::driver(3));

        let race = |first, second| SessionResult::from_positions([(first, Some(1)), (second, Some(2))]);
        let schedule = Schedule::new(vec![
            EventRecord::new("one", None)
                .with_session(SessionKind::Qualifying, race(c, a))
                .with_session(SessionKind::Race, race(a, b)),
            EventRecord::new("two", None)
                .with_session(SessionKind::Sprint, race(c, b))
                .with_session(SessionKind::Race, race(b, a)),
            EventRecord::new("three", None).with_session(SessionKind::Race, SessionResult::new()),
        ]);

        let history = LedgerHistory::build(&schedule, &PointsTable::default());

        assert!(history.before(0).is_empty());
        assert_eq!(history.before(1).get(a), Some(25));
        assert_eq!(history.before(1).get(b), Some(18));
        assert_eq!(history.before(2).get(a), Some(43));
        assert_eq!(history.before(2).get(b), Some(43));
        assert_eq!(history.standing().get(c), None);
        assert_eq!(history.completed_events(), 2);
        assert_eq!(history.before(3), history.standing());
    }
}
