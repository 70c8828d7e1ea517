#![forbid(unsafe_code)]

use crate::error::FetchError;
use crate::snapshot::{SeasonSnapshot, SnapshotFile};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;

#[async_trait]
pub trait SeasonSource: Send + Sync {
    /// Gather every session, result and driver record of `year`.
    async fn fetch(&self, year: i32) -> Result<SeasonSnapshot, FetchError>;
}

/// Replays a snapshot saved by an earlier run.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SeasonSource for SnapshotSource {
    async fn fetch(&self, year: i32) -> Result<SeasonSnapshot, FetchError> {
        let snapshot = SnapshotFile::load(&self.path).await?;
        if snapshot.year != year {
            warn!(
                requested = year,
                stored = snapshot.year,
                path = %self.path.display(),
                "snapshot is for a different season, using it anyway"
            );
        }
        Ok(snapshot)
    }
}
