#![forbid(unsafe_code)]

use crate::domain::{EventRecord, ParticipantId, PointsLedger};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct ChampionshipEntry {
    pub participant: ParticipantId,
    /// Points held when the simulation started.
    pub points: u32,
    /// Trials in which this participant finished on top.
    pub wins: u32,
    /// Share of trials won, in percent.
    pub probability: f64,
}

/// Title odds per participant, in ledger order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChampionshipForecast {
    pub trials: u32,
    pub entries: Vec<ChampionshipEntry>,
}

impl ChampionshipForecast {
    pub(crate) fn from_wins(ledger: &PointsLedger, wins: &[u32], trials: u32) -> Self {
        let entries = ledger
            .iter()
            .zip(wins)
            .map(|((participant, points), wins)| ChampionshipEntry {
                participant,
                points,
                wins: *wins,
                probability: f64::from(*wins) / f64::from(trials) * 100.0,
            })
            .collect();
        Self { trials, entries }
    }

    pub fn probability(&self, participant: ParticipantId) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.participant == participant)
            .map(|e| e.probability)
    }

    pub fn total_probability(&self) -> f64 {
        self.entries.iter().map(|e| e.probability).sum()
    }

    /// Most likely champion; the earliest entry wins ties.
    pub fn favourite(&self) -> Option<&ChampionshipEntry> {
        self.entries.iter().fold(None, |best, entry| match best {
            Some(b) if b.probability >= entry.probability => Some(b),
            _ => Some(entry),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub participant: ParticipantId,
    pub score: f64,
    /// Chance of winning the event, in percent.
    pub probability: f64,
}

/// Win probabilities for one event, most likely winner first.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceForecast {
    /// Position of the event in its schedule.
    pub event: usize,
    pub name: String,
    pub date: Option<DateTime<Utc>>,
    pub entries: Vec<ForecastEntry>,
}

impl RaceForecast {
    /// Normalise combined scores into percentages. Falls back to a uniform
    /// split when no participant has a positive score.
    pub(crate) fn from_scores(
        index: usize,
        event: &EventRecord,
        scores: Vec<(ParticipantId, f64)>,
    ) -> Self {
        let total: f64 = scores.iter().map(|(_, s)| s).sum();
        let uniform = 100.0 / scores.len().max(1) as f64;
        let mut entries: Vec<ForecastEntry> = scores
            .into_iter()
            .map(|(participant, score)| ForecastEntry {
                participant,
                score,
                probability: if total > 0.0 && total.is_finite() {
                    score / total * 100.0
                } else {
                    uniform
                },
            })
            .collect();
        entries.sort_by(|a, b| b.probability.total_cmp(&a.probability));

        Self {
            event: index,
            name: event.name.clone(),
            date: event.date,
            entries,
        }
    }

    pub fn probability(&self, participant: ParticipantId) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.participant == participant)
            .map(|e| e.probability)
    }

    pub fn total_probability(&self) -> f64 {
        self.entries.iter().map(|e| e.probability).sum()
    }

    pub fn favourite(&self) -> Option<&ForecastEntry> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
