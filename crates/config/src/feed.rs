#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::time::Duration;

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Feed {
    /// Root of the OpenF1 REST API.
    pub base_url: String,

    /// Season to fetch. Defaults to the current calendar year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Pause before every request, in milliseconds.
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub request_delay: Duration,

    /// Per-request timeout in seconds.
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub timeout: Duration,
}

impl Default for Feed {
    fn default() -> Self {
        Self {
            base_url: "https://api.openf1.org/v1".to_string(),
            year: None,
            request_delay: Duration::from_millis(200),
            timeout: Duration::from_secs(30),
        }
    }
}
