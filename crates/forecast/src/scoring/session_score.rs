#![forbid(unsafe_code)]

use crate::domain::{ParticipantId, SessionResult};
use std::collections::HashMap;

/// Per-participant performance score for one session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScoreTable {
    order: Vec<ParticipantId>,
    scores: HashMap<ParticipantId, u32>,
}

impl ScoreTable {
    fn add(&mut self, participant: ParticipantId, score: u32) {
        let entry = self.scores.entry(participant).or_insert_with(|| {
            self.order.push(participant);
            0
        });
        *entry = entry.saturating_add(score);
    }

    pub fn get(&self, participant: ParticipantId) -> Option<u32> {
        self.scores.get(&participant).copied()
    }

    /// Scores in classification order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, u32)> + '_ {
        self.order
            .iter()
            .map(|id| (*id, self.scores.get(id).copied().unwrap_or(0)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Turns a finishing order into magnitudes scaled by field size.
///
/// With `N` classified entries, position `k` scores `max(0, N - (k - 1))`, so
/// the winner of a full field outscores the winner of a sparse one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionScoreAggregator;

impl SessionScoreAggregator {
    pub fn score(results: &SessionResult) -> ScoreTable {
        let field = u32::try_from(results.len()).unwrap_or(u32::MAX);
        let mut table = ScoreTable::default();
        for entry in results.entries() {
            let behind = entry.position.saturating_sub(1);
            table.add(entry.participant, field.saturating_sub(behind));
        }
        table
    }
}
