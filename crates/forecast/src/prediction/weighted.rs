#![forbid(unsafe_code)]

use crate::domain::{EventRecord, ParticipantId, PointsLedger, Schedule, SessionKind};
use crate::error::{Error, InvalidConfiguration};
use crate::ingest::LedgerHistory;
use crate::prediction::RaceForecast;
use crate::scoring::SessionScoreAggregator;
use config::SessionWeights;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Produces a favourite ranking for every event of a schedule.
pub trait RacePredictor: Send + Sync {
    fn forecast_all(&self, schedule: &Schedule, history: &LedgerHistory) -> Vec<RaceForecast>;
}

/// Deterministic per-event forecast from weighted session scores.
///
/// An event's combined score adds the weighted scores of its own non-race
/// sessions, every session of every earlier event scaled by
/// `past_race_weight`, and, for participants left at zero, a discounted share
/// of the championship points they held before the event.
#[derive(Debug, Clone)]
pub struct WeightedRacePredictor {
    session: SessionWeights,
    past_race_weight: f64,
    baseline_discount: f64,
}

impl WeightedRacePredictor {
    pub fn new(params: &config::Weighted) -> Result<Self, Error> {
        for (name, value) in params.session.named() {
            check_weight(name, value)?;
        }
        check_weight("past_race_weight", params.past_race_weight)?;
        if !(0.0..=1.0).contains(&params.baseline_discount) {
            return Err(InvalidConfiguration::DiscountOutOfRange(params.baseline_discount).into());
        }

        Ok(Self {
            session: params.session,
            past_race_weight: params.past_race_weight,
            baseline_discount: params.baseline_discount,
        })
    }

    /// Forecast the event at `index`, or `None` past the end of the schedule.
    pub fn forecast(
        &self,
        schedule: &Schedule,
        history: &LedgerHistory,
        index: usize,
    ) -> Option<RaceForecast> {
        let event = schedule.get(index)?;
        let mut past = CombinedScore::default();
        for prior in schedule.prior(index) {
            self.accumulate_past(&mut past, prior);
        }
        Some(self.finish(index, event, past, history.before(index)))
    }

    /// Weekend multiplier for a session category. Races never count towards
    /// their own event.
    fn weekend_weight(&self, kind: SessionKind) -> f64 {
        match kind {
            SessionKind::Practice => self.session.practice,
            SessionKind::Qualifying => self.session.qualifying,
            SessionKind::SprintQualifying => self.session.sprint_qualifying,
            SessionKind::Sprint => self.session.sprint,
            SessionKind::Race => 0.0,
        }
    }

    fn accumulate_past(&self, past: &mut CombinedScore, event: &EventRecord) {
        for session in &event.sessions {
            for (participant, score) in SessionScoreAggregator::score(&session.result).iter() {
                past.add(participant, self.past_race_weight * f64::from(score));
            }
        }
    }

    fn finish(
        &self,
        index: usize,
        event: &EventRecord,
        mut combined: CombinedScore,
        standing: &PointsLedger,
    ) -> RaceForecast {
        for session in &event.sessions {
            let weight = self.weekend_weight(session.kind);
            if weight == 0.0 {
                continue;
            }
            for (participant, score) in SessionScoreAggregator::score(&session.result).iter() {
                combined.add(participant, weight * f64::from(score));
            }
        }

        for (participant, points) in standing.iter() {
            if points > 0 && combined.get(participant) == 0.0 {
                trace!(?participant, points, "no session score, using championship points");
                combined.add(participant, self.baseline_discount * f64::from(points));
            } else {
                combined.add(participant, 0.0);
            }
        }

        let forecast = RaceForecast::from_scores(index, event, combined.into_scores());
        debug!(
            event = %event.name,
            participants = forecast.entries.len(),
            favourite = ?forecast.favourite().map(|e| e.participant),
            "event forecast"
        );
        forecast
    }
}

impl RacePredictor for WeightedRacePredictor {
    /// One forecast per event, in schedule order. Earlier events are folded
    /// into a running accumulator, so each forecast only sees its past.
    fn forecast_all(&self, schedule: &Schedule, history: &LedgerHistory) -> Vec<RaceForecast> {
        let mut past = CombinedScore::default();
        let mut forecasts = Vec::with_capacity(schedule.len());
        for (index, event) in schedule.events().iter().enumerate() {
            forecasts.push(self.finish(index, event, past.clone(), history.before(index)));
            self.accumulate_past(&mut past, event);
        }
        forecasts
    }
}

fn check_weight(name: &'static str, value: f64) -> Result<(), InvalidConfiguration> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InvalidConfiguration::InvalidWeight { name, value })
    }
}

/// Running per-participant total in first-seen order.
#[derive(Debug, Default, Clone)]
struct CombinedScore {
    order: Vec<ParticipantId>,
    totals: HashMap<ParticipantId, f64>,
}

impl CombinedScore {
    fn add(&mut self, participant: ParticipantId, amount: f64) {
        let total = self.totals.entry(participant).or_insert_with(|| {
            self.order.push(participant);
            0.0
        });
        *total += amount;
    }

    fn get(&self, participant: ParticipantId) -> f64 {
        self.totals.get(&participant).copied().unwrap_or(0.0)
    }

    fn into_scores(self) -> Vec<(ParticipantId, f64)> {
        let totals = self.totals;
        self.order
            .into_iter()
            .map(|id| (id, totals.get(&id).copied().unwrap_or(0.0)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_and_non_finite_weights() {
        let mut params = config::Weighted::default();
        params.session.sprint = -1.0;
        assert!(matches!(
            WeightedRacePredictor::new(&params),
            Err(Error::InvalidConfiguration(InvalidConfiguration::InvalidWeight { name: "sprint", .. }))
        ));

        let mut params = config::Weighted::default();
        params.past_race_weight = f64::NAN;
        assert!(WeightedRacePredictor::new(&params).is_err());
    }

    #[test]
    fn rejects_discount_outside_unit_interval() {
        for discount in [-0.1, 1.5, f64::NAN] {
            let params = config::Weighted {
                baseline_discount: discount,
                ..Default::default()
            };
            assert!(WeightedRacePredictor::new(&params).is_err(), "{discount}");
        }
        let params = config::Weighted {
            baseline_discount: 1.0,
            ..Default::default()
        };
        assert!(WeightedRacePredictor::new(&params).is_ok());
    }

    #[test]
    fn race_carries_no_weekend_weight() {
        let predictor = WeightedRacePredictor::new(&config::Weighted::default()).unwrap();
        assert_eq!(predictor.weekend_weight(SessionKind::Race), 0.0);
        assert_eq!(predictor.weekend_weight(SessionKind::Qualifying), 1.5);
    }
}
