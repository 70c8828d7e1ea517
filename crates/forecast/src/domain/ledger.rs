#![forbid(unsafe_code)]

use crate::domain::ParticipantId;
use itertools::Itertools;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Accumulated championship points per participant.
///
/// Iteration follows insertion order, which is also the tie-break order for
/// every ranking built on top of a ledger. Points only ever grow.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PointsLedger {
    order: Vec<ParticipantId>,
    points: HashMap<ParticipantId, u32>,
}

impl PointsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `participant` with zero points. Returns `false` if it was
    /// already present.
    pub fn register(&mut self, participant: ParticipantId) -> bool {
        if self.points.contains_key(&participant) {
            return false;
        }
        self.order.push(participant);
        self.points.insert(participant, 0);
        true
    }

    /// Add `points` to `participant`, registering it first if needed.
    pub fn award(&mut self, participant: ParticipantId, points: u32) {
        self.register(participant);
        if let Some(total) = self.points.get_mut(&participant) {
            *total = total.saturating_add(points);
        }
    }

    pub fn get(&self, participant: ParticipantId) -> Option<u32> {
        self.points.get(&participant).copied()
    }

    pub fn contains(&self, participant: ParticipantId) -> bool {
        self.points.contains_key(&participant)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Participants in insertion order.
    pub fn participants(&self) -> &[ParticipantId] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, u32)> + '_ {
        self.order
            .iter()
            .map(|id| (*id, self.points.get(id).copied().unwrap_or(0)))
    }

    /// The participant with the most points; the earliest inserted wins ties.
    pub fn leader(&self) -> Option<(ParticipantId, u32)> {
        self.iter().fold(None, |best, (id, points)| match best {
            Some((_, best_points)) if best_points >= points => best,
            _ => Some((id, points)),
        })
    }

    /// Entries by points, highest first; equal points keep insertion order.
    pub fn ranked(&self) -> Vec<(ParticipantId, u32)> {
        self.iter()
            .sorted_by_key(|(_, points)| Reverse(*points))
            .collect()
    }

    pub fn total(&self) -> u64 {
        self.points.values().map(|p| u64::from(*p)).sum()
    }
}

impl FromIterator<(ParticipantId, u32)> for PointsLedger {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, u32)>>(iter: I) -> Self {
        let mut ledger = Self::new();
        for (participant, points) in iter {
            ledger.award(participant, points);
        }
        ledger
    }
}
