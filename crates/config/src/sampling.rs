#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How a synthetic race draws its finishing order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SamplingMode {
    /// Each participant occupies at most one place per race.
    #[default]
    WithoutReplacement,
    /// Every place is drawn independently, so one participant may collect
    /// several awards in the same race.
    WithReplacement,
}

impl FromStr for SamplingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "without-replacement" => Ok(Self::WithoutReplacement),
            "with-replacement" => Ok(Self::WithReplacement),
            other => Err(format!(
                "`{other}` is not a sampling mode (expected `without-replacement` or `with-replacement`)"
            )),
        }
    }
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WithoutReplacement => "without-replacement",
            Self::WithReplacement => "with-replacement",
        })
    }
}
