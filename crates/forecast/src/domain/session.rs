#![forbid(unsafe_code)]

use crate::domain::ParticipantId;
use std::fmt;

/// Category of a timed session within a race weekend.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionKind {
    Practice,
    Qualifying,
    SprintQualifying,
    Sprint,
    Race,
}

impl SessionKind {
    pub const ALL: [SessionKind; 5] = [
        SessionKind::Practice,
        SessionKind::Qualifying,
        SessionKind::SprintQualifying,
        SessionKind::Sprint,
        SessionKind::Race,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Practice => "practice",
            SessionKind::Qualifying => "qualifying",
            SessionKind::SprintQualifying => "sprint-qualifying",
            SessionKind::Sprint => "sprint",
            SessionKind::Race => "race",
        }
    }
}

impl fmt::Debug for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub participant: ParticipantId,
    /// 1-based finishing position.
    pub position: u32,
}

/// Classified finishers of one completed session, ordered by position.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionResult {
    entries: Vec<Classification>,
}

impl SessionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw (participant, position) pairs. Entries without a
    /// position, or with position zero, are not classified and are dropped.
    pub fn from_positions(
        positions: impl IntoIterator<Item = (ParticipantId, Option<u32>)>,
    ) -> Self {
        let mut result = Self::new();
        for (participant, position) in positions {
            result.push(participant, position);
        }
        result
    }

    /// Returns `false` when the entry was not classified.
    pub fn push(&mut self, participant: ParticipantId, position: Option<u32>) -> bool {
        let Some(position) = position.filter(|p| *p > 0) else {
            return false;
        };
        let at = self.entries.partition_point(|e| e.position <= position);
        self.entries.insert(
            at,
            Classification {
                participant,
                position,
            },
        );
        true
    }

    pub fn entries(&self) -> &[Classification] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub kind: SessionKind,
    pub result: SessionResult,
}

impl Session {
    pub fn new(kind: SessionKind, result: SessionResult) -> Self {
        Self { kind, result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn unclassified_entries_are_dropped_and_rest_sorted() {
        let mut arena: SlotMap<ParticipantId, ()> = SlotMap::with_key();
        let (a, b, c, d) = (
            arena.insert(()),
            arena.insert(()),
            arena.insert(()),
            arena.insert(()),
        );

        let result =
            SessionResult::from_positions([(a, Some(2)), (b, None), (c, Some(1)), (d, Some(0))]);

        let order: Vec<_> = result.entries().iter().map(|e| e.participant).collect();
        assert_eq!(order, vec![c, a]);
        assert_eq!(result.len(), 2);
    }
}
