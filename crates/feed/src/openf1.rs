#![forbid(unsafe_code)]

use crate::dates::parse_timestamp;
use crate::error::FetchError;
use crate::records::{DriverRecord, ResultRecord, SessionRecord};
use crate::sessions::session_kind;
use crate::snapshot::SeasonSnapshot;
use crate::source::SeasonSource;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, trace};

/// Client for the OpenF1 REST API.
///
/// Requests are issued one at a time, each preceded by the configured delay.
/// Driver metadata is remembered from the first session a driver shows up
/// in; later sessions never replace it.
#[derive(Debug)]
pub struct OpenF1Client {
    http: reqwest::Client,
    base_url: String,
    request_delay: Duration,
    drivers: Mutex<HashMap<u32, DriverRecord>>,
}

impl OpenF1Client {
    pub fn new(config: &config::Feed) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("champcast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_delay: config.request_delay,
            drivers: Mutex::new(HashMap::new()),
        })
    }

    pub async fn sessions(&self, year: i32) -> Result<Vec<SessionRecord>, FetchError> {
        self.get("sessions", &[("year", year.to_string())]).await
    }

    pub async fn session_results(&self, session_key: u32) -> Result<Vec<ResultRecord>, FetchError> {
        self.get("session_result", &[("session_key", session_key.to_string())])
            .await
    }

    pub async fn session_drivers(&self, session_key: u32) -> Result<Vec<DriverRecord>, FetchError> {
        self.get("drivers", &[("session_key", session_key.to_string())])
            .await
    }

    /// Metadata of every driver seen so far, by number.
    pub fn known_drivers(&self) -> Vec<DriverRecord> {
        let mut drivers: Vec<DriverRecord> = self.drivers.lock().values().cloned().collect();
        drivers.sort_by_key(|d| d.driver_number);
        drivers
    }

    fn remember(&self, drivers: Vec<DriverRecord>) {
        let mut memo = self.drivers.lock();
        for driver in drivers {
            memo.entry(driver.driver_number).or_insert(driver);
        }
    }

    fn knows_all(&self, rows: &[ResultRecord]) -> bool {
        let memo = self.drivers.lock();
        rows.iter().all(|row| memo.contains_key(&row.driver_number))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, FetchError> {
        tokio::time::sleep(self.request_delay).await;

        let url = format!("{}/{endpoint}", self.base_url);
        trace!(%url, ?query, "GET");
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Http {
            url: url.clone(),
            source,
        })?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { url, source })
    }
}

#[async_trait]
impl SeasonSource for OpenF1Client {
    /// Fetch the session list, then results and driver metadata for every
    /// recognised session that has already started.
    async fn fetch(&self, year: i32) -> Result<SeasonSnapshot, FetchError> {
        let now = Utc::now();
        let sessions = self.sessions(year).await?;
        info!(year, sessions = sessions.len(), "fetched session list");

        let mut results = Vec::new();
        for session in &sessions {
            let started = session
                .date_start
                .as_deref()
                .and_then(parse_timestamp)
                .is_none_or(|start| start <= now);
            if !started || session_kind(&session.session_name).is_none() {
                continue;
            }

            let rows = self.session_results(session.session_key).await?;
            debug!(
                session_key = session.session_key,
                name = %session.session_name,
                rows = rows.len(),
                "fetched results"
            );
            if !self.knows_all(&rows) {
                let drivers = self.session_drivers(session.session_key).await?;
                self.remember(drivers);
            }
            results.extend(rows);
        }

        Ok(SeasonSnapshot::new(year, sessions, results, self.known_drivers()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(number: u32, team: &str) -> DriverRecord {
        DriverRecord {
            driver_number: number,
            name_acronym: None,
            team_name: Some(team.to_string()),
        }
    }

    #[test]
    fn first_driver_sighting_wins() {
        let client = OpenF1Client::new(&config::Feed::default()).unwrap();
        client.remember(vec![record(44, "Mercedes"), record(1, "Red Bull Racing")]);
        client.remember(vec![record(44, "Ferrari")]);

        let known = client.known_drivers();
        assert_eq!(known.len(), 2);
        assert_eq!(known[0].driver_number, 1);
        assert_eq!(known[1].team_name.as_deref(), Some("Mercedes"));

        let row = |n| ResultRecord {
            session_key: 1,
            driver_number: n,
            position: Some(1),
        };
        assert!(client.knows_all(&[row(1), row(44)]));
        assert!(!client.knows_all(&[row(1), row(16)]));
    }
}
