use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DeployError, DeployResult};

pub const CONFIG_FILE: &str = "deploy-tool.yml";
pub const HISTORY_FILE: &str = "deploy_history.json";
pub const MARKER_FILE: &str = "rollback-info.yml";
pub const TERRAFORM_DIR: &str = "terraform";

/// Project configuration, written once by `init` and read by
/// every later command. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub repo_url: String,
    pub folder: String,
    pub bucket: String,
    #[serde(default = "default_key_path")]
    pub key_path: String,
    #[serde(default = "default_ssh_user")]
    pub ssh_user: String,
}

fn default_key_path() -> String {
    ".pem/deploy-key.pem".to_string()
}

fn default_ssh_user() -> String {
    "ubuntu".to_string()
}

/// All paths the orchestrator touches, anchored at one root
/// directory. Commands receive explicit paths from here instead
/// of relying on the process working directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Workspace anchored at the current directory.
    pub fn current() -> DeployResult<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        self.root.join(HISTORY_FILE)
    }

    #[must_use]
    pub fn marker_path(&self) -> PathBuf {
        self.root.join(MARKER_FILE)
    }

    #[must_use]
    pub fn terraform_dir(&self) -> PathBuf {
        self.root.join(TERRAFORM_DIR)
    }

    #[must_use]
    pub fn project_dir(&self, config: &ProjectConfig) -> PathBuf {
        self.root.join(&config.folder)
    }

    /// SSH private key location. Relative paths resolve against
    /// the workspace root.
    #[must_use]
    pub fn key_file(&self, config: &ProjectConfig) -> PathBuf {
        let path = Path::new(&config.key_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn load_config(&self) -> DeployResult<ProjectConfig> {
        let path = self.config_path();
        if !path.exists() {
            return Err(DeployError::ConfigMissing(path.display().to_string()));
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save_config(&self, config: &ProjectConfig) -> DeployResult<()> {
        std::fs::write(self.config_path(), serde_yaml::to_string(config)?)?;
        Ok(())
    }
}
