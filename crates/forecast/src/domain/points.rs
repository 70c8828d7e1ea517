#![forbid(unsafe_code)]

use crate::error::{Error, InvalidConfiguration};

/// Championship points awarded per finishing position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsTable {
    awards: Vec<u32>,
}

impl PointsTable {
    /// `awards[0]` is the award for P1. At least one position must score.
    pub fn new(awards: Vec<u32>) -> Result<Self, Error> {
        if awards.is_empty() {
            return Err(InvalidConfiguration::EmptyPointsTable.into());
        }
        Ok(Self { awards })
    }

    /// Award for a 1-based finishing position; zero outside the table.
    pub fn award(&self, position: u32) -> u32 {
        position
            .checked_sub(1)
            .and_then(|ix| self.awards.get(ix as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Number of scoring positions.
    pub fn len(&self) -> usize {
        self.awards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.awards.is_empty()
    }

    pub fn awards(&self) -> &[u32] {
        &self.awards
    }
}

impl Default for PointsTable {
    fn default() -> Self {
        Self {
            awards: vec![25, 18, 15, 12, 10, 8, 6, 4, 2, 1],
        }
    }
}

impl TryFrom<&config::Championship> for PointsTable {
    type Error = Error;

    fn try_from(championship: &config::Championship) -> Result<Self, Self::Error> {
        Self::new(championship.points.clone())
    }
}
