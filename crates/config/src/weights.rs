#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Per-category multipliers applied to a weekend's session scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionWeights {
    pub practice: f64,
    pub qualifying: f64,
    pub sprint_qualifying: f64,
    pub sprint: f64,
}

impl Default for SessionWeights {
    fn default() -> Self {
        Self {
            practice: 0.5,
            qualifying: 1.5,
            sprint_qualifying: 1.0,
            sprint: 1.25,
        }
    }
}

impl SessionWeights {
    /// Every weight with its field name, in declaration order.
    pub fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("practice", self.practice),
            ("qualifying", self.qualifying),
            ("sprint_qualifying", self.sprint_qualifying),
            ("sprint", self.sprint),
        ]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Weighted {
    pub session: SessionWeights,

    /// Multiplier for every session of every earlier event.
    pub past_race_weight: f64,

    /// Fraction of championship points credited to a participant with no
    /// session score at all. Must lie in `0.0..=1.0`.
    pub baseline_discount: f64,
}

impl Default for Weighted {
    fn default() -> Self {
        Self {
            session: SessionWeights::default(),
            past_race_weight: 0.25,
            baseline_discount: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn named_follows_fields(a in 0.0f64..10.0, b in 0.0f64..10.0, c in 0.0f64..10.0, d in 0.0f64..10.0) {
            let weights = SessionWeights { practice: a, qualifying: b, sprint_qualifying: c, sprint: d };
            let values: Vec<f64> = weights.named().iter().map(|(_, w)| *w).collect();
            prop_assert_eq!(values, vec![a, b, c, d]);
        }
    }
}
