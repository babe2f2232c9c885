//! Two-slot release history: which artifact is live (`latest`)
//! and which one came before it (`previous`). Older generations
//! are discarded.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DeployError, DeployResult};

/// Whether the recorded `latest` artifact has been confirmed
/// live on the instance. `record_deploy` writes `pending`; the
/// orchestrator confirms only after the provision or remote
/// refresh step succeeds, so a crash mid-deploy is diagnosable
/// from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployStatus {
    Pending,
    Confirmed,
}

/// The persisted history document. Documents written before the
/// status field existed read back as `confirmed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseHistory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default = "confirmed")]
    pub status: DeployStatus,
}

const fn confirmed() -> DeployStatus {
    DeployStatus::Confirmed
}

impl Default for ReleaseHistory {
    fn default() -> Self {
        Self {
            latest: None,
            previous: None,
            status: DeployStatus::Confirmed,
        }
    }
}

/// File-backed store for [`ReleaseHistory`].
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted history, or an empty record when no
    /// file exists yet.
    pub fn load(&self) -> DeployResult<ReleaseHistory> {
        if !self.path.exists() {
            return Ok(ReleaseHistory::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Persist the record. Writes a sibling temp file and
    /// renames it over the target, so readers observe either
    /// the old document or the new one, never a partial write.
    pub fn save(&self, history: &ReleaseHistory) -> DeployResult<()> {
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(history)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Shift `latest` into `previous`, set `latest` to the new
    /// artifact, and persist with `pending` status. Returns
    /// whether this was the first-ever deploy (both slots unset
    /// beforehand) - the sole signal for provision-vs-update.
    pub fn record_deploy(&self, artifact_key: &str) -> DeployResult<bool> {
        let mut history = self.load()?;
        let first_deploy = history.latest.is_none() && history.previous.is_none();

        history.previous = history.latest.take();
        history.latest = Some(artifact_key.to_string());
        history.status = DeployStatus::Pending;
        self.save(&history)?;

        Ok(first_deploy)
    }

    /// Mark the recorded `latest` as live on the instance.
    pub fn confirm(&self) -> DeployResult<()> {
        let mut history = self.load()?;
        history.status = DeployStatus::Confirmed;
        self.save(&history)
    }

    /// Exchange `latest` and `previous` after a successful
    /// rollback and return the newly active artifact. Fails
    /// without touching the file when there is no previous
    /// artifact.
    pub fn swap_for_rollback(&self) -> DeployResult<String> {
        let mut history = self.load()?;
        let previous = history.previous.take().ok_or(DeployError::NoPreviousArtifact)?;

        history.previous = history.latest.replace(previous.clone());
        history.status = DeployStatus::Confirmed;
        self.save(&history)?;

        Ok(previous)
    }
}
