#![forbid(unsafe_code)]

use crate::error::FetchError;
use crate::records::{DriverRecord, ResultRecord, SessionRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Everything fetched for one season, as the API returned it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeasonSnapshot {
    pub meta: SnapshotMeta,
    pub year: i32,
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
    #[serde(default)]
    pub results: Vec<ResultRecord>,
    #[serde(default)]
    pub drivers: Vec<DriverRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotMeta {
    pub schema_version: u32,
    #[serde(default)]
    pub app_version: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SnapshotMeta {
    pub fn current() -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            app_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            created_at: Some(Utc::now()),
        }
    }
}

impl SeasonSnapshot {
    pub fn new(
        year: i32,
        sessions: Vec<SessionRecord>,
        results: Vec<ResultRecord>,
        drivers: Vec<DriverRecord>,
    ) -> Self {
        Self {
            meta: SnapshotMeta::current(),
            year,
            sessions,
            results,
            drivers,
        }
    }
}

/// Reads and writes snapshots as pretty-printed JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct SnapshotFile;

impl SnapshotFile {
    pub async fn load(path: &Path) -> Result<SeasonSnapshot, FetchError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| FetchError::Io {
            path: path.to_owned(),
            source,
        })?;
        let snapshot: SeasonSnapshot =
            serde_json::from_slice(&bytes).map_err(|source| FetchError::Json {
                path: path.to_owned(),
                source,
            })?;
        if snapshot.meta.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(FetchError::SchemaVersion {
                path: path.to_owned(),
                found: snapshot.meta.schema_version,
                expected: SNAPSHOT_SCHEMA_VERSION,
            });
        }
        debug!(path = %path.display(), sessions = snapshot.sessions.len(), "snapshot loaded");
        Ok(snapshot)
    }

    pub async fn save(path: &Path, snapshot: &SeasonSnapshot) -> Result<(), FetchError> {
        let bytes = serde_json::to_vec_pretty(snapshot).map_err(|source| FetchError::Json {
            path: path.to_owned(),
            source,
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| FetchError::Io {
                    path: parent.to_owned(),
                    source,
                })?;
        }
        tokio::fs::write(path, bytes)
            .await
            .map_err(|source| FetchError::Io {
                path: path.to_owned(),
                source,
            })?;
        debug!(path = %path.display(), "snapshot saved");
        Ok(())
    }
}
