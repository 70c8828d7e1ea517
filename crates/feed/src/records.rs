#![forbid(unsafe_code)]

//! Raw OpenF1 records. Only the fields the forecast needs are kept; anything
//! else in a response is ignored.

use serde::{Deserialize, Serialize};

/// One row of `/sessions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRecord {
    pub session_key: u32,
    pub meeting_key: u32,
    pub session_name: String,
    #[serde(default)]
    pub date_start: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
}

/// One row of `/session_result`. `position` is null for unclassified
/// finishers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultRecord {
    pub session_key: u32,
    pub driver_number: u32,
    #[serde(default)]
    pub position: Option<u32>,
}

/// One row of `/drivers`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriverRecord {
    pub driver_number: u32,
    #[serde(default)]
    pub name_acronym: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
}
