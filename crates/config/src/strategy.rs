#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Which forecasts a run produces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    All,
    MonteCarlo,
    Weighted,
}

impl Strategy {
    pub fn runs_monte_carlo(self) -> bool {
        matches!(self, Self::All | Self::MonteCarlo)
    }

    pub fn runs_weighted(self) -> bool {
        matches!(self, Self::All | Self::Weighted)
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "monte-carlo" => Ok(Self::MonteCarlo),
            "weighted" => Ok(Self::Weighted),
            other => Err(format!(
                "`{other}` is not a strategy (expected `all`, `monte-carlo` or `weighted`)"
            )),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::MonteCarlo => "monte-carlo",
            Self::Weighted => "weighted",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_parses_its_own_display() {
        for strategy in [Strategy::All, Strategy::MonteCarlo, Strategy::Weighted] {
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
        assert!("both".parse::<Strategy>().is_err());
    }

    #[test]
    fn strategy_selects_models() {
        assert!(Strategy::All.runs_monte_carlo() && Strategy::All.runs_weighted());
        assert!(!Strategy::MonteCarlo.runs_weighted());
        assert!(!Strategy::Weighted.runs_monte_carlo());
    }
}
