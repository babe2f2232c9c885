//! Rollback marker: an operator's recorded intent to activate a
//! specific prior artifact on the next deploy. At most one
//! marker exists at a time; planning again overwrites it.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DeployResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbackMarker {
    pub artifact_key: String,
    pub rolled_back_at: DateTime<Utc>,
}

/// File-backed store for the marker.
pub struct MarkerStore {
    path: PathBuf,
}

impl MarkerStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Record intent to activate `artifact_key` on the next
    /// deploy. The key is trusted as-is; no check that it names
    /// an existing artifact.
    pub fn plan(&self, artifact_key: &str) -> DeployResult<()> {
        let marker = RollbackMarker {
            artifact_key: artifact_key.to_string(),
            rolled_back_at: Utc::now(),
        };
        std::fs::write(&self.path, serde_yaml::to_string(&marker)?)?;
        Ok(())
    }

    /// Return the marked artifact and delete the marker, so it
    /// is consumed at most once. `None` when no marker exists.
    pub fn consume_if_present(&self) -> DeployResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let marker: RollbackMarker = serde_yaml::from_str(&content)?;
        std::fs::remove_file(&self.path)?;
        Ok(Some(marker.artifact_key))
    }
}
