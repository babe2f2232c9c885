//! Infrastructure provisioner collaborator, driven through the
//! `terraform` CLI in an explicit working directory.

use std::path::PathBuf;

use crate::cmd;
use crate::error::{DeployError, DeployResult};

pub struct Terraform {
    dir: PathBuf,
}

impl Terraform {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn check_prerequisites(&self) -> DeployResult<()> {
        if !cmd::command_exists("terraform") {
            return Err(DeployError::ProvisionerFailed(
                "terraform is not installed".to_string(),
            ));
        }
        if !self.dir.is_dir() {
            return Err(DeployError::ProvisionerFailed(format!(
                "terraform directory not found at {}",
                self.dir.display()
            )));
        }
        Ok(())
    }

    pub fn init(&self) -> DeployResult<()> {
        cmd::run_interactive_in(&self.dir, "terraform", &["init"]).map_err(as_provisioner_error)
    }

    pub fn apply(&self, variables: &[(&str, &str)]) -> DeployResult<()> {
        let var_args: Vec<String> = variables
            .iter()
            .map(|(name, value)| format!("-var={name}={value}"))
            .collect();

        let mut args = vec!["apply", "-auto-approve"];
        args.extend(var_args.iter().map(String::as_str));

        cmd::run_interactive_in(&self.dir, "terraform", &args).map_err(as_provisioner_error)
    }

    /// Read a raw output value, e.g. the instance's public IP.
    pub fn output(&self, name: &str) -> DeployResult<String> {
        cmd::run_in(&self.dir, "terraform", &["output", "-raw", name])
            .map_err(as_provisioner_error)
    }
}

fn as_provisioner_error(err: DeployError) -> DeployError {
    match err {
        DeployError::CommandFailed { command, status } => {
            DeployError::ProvisionerFailed(format!("`{command}` exited with {status}"))
        }
        DeployError::CommandNotFound(program) => {
            DeployError::ProvisionerFailed(format!("{program} is not installed"))
        }
        other => other,
    }
}
