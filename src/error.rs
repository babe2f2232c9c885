use std::process::ExitStatus;

pub type DeployResult<T> = Result<T, DeployError>;

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("no project config found at {0}, run `slipway init` first")]
    ConfigMissing(String),

    #[error("build tool not found: {0}")]
    BuildToolNotFound(String),

    #[error("build failed: {0}")]
    BuildFailed(String),

    #[error("upload failed: {0}")]
    UploadFailed(String),

    #[error("SSH key file not found at: {0}")]
    KeyFileMissing(String),

    #[error("no previous artifact to roll back to")]
    NoPreviousArtifact,

    #[error("not enough artifacts to roll back: found {0}, need at least 2")]
    InsufficientArtifacts(usize),

    #[error("remote execution failed: {0}")]
    RemoteExecutionFailed(String),

    #[error("provisioner failed: {0}")]
    ProvisionerFailed(String),

    #[error("command failed: {command}")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
}
