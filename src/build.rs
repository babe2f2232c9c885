//! Package-manager build step: install dependencies, then run
//! the project's build script. Yarn is preferred when a
//! `yarn.lock` is present, npm otherwise.

use std::path::Path;

use crate::cmd;
use crate::error::{DeployError, DeployResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
}

impl PackageManager {
    /// Pick the package manager for a project and verify it is
    /// on PATH.
    pub fn detect(project_dir: &Path) -> DeployResult<Self> {
        let runner = if project_dir.join("yarn.lock").exists() {
            Self::Yarn
        } else {
            Self::Npm
        };

        if !cmd::command_exists(runner.program()) {
            return Err(DeployError::BuildToolNotFound(runner.program().to_string()));
        }

        Ok(runner)
    }

    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
        }
    }

    pub fn install(self, project_dir: &Path) -> DeployResult<()> {
        eprintln!("Installing dependencies...");
        cmd::run_interactive_in(project_dir, self.program(), &["install"])
            .map_err(|e| as_build_error(self, e))
    }

    pub fn build(self, project_dir: &Path) -> DeployResult<()> {
        eprintln!("Building app...");
        let args: &[&str] = match self {
            Self::Npm => &["run", "build"],
            Self::Yarn => &["build"],
        };
        cmd::run_interactive_in(project_dir, self.program(), args)
            .map_err(|e| as_build_error(self, e))?;
        eprintln!("Build complete.");
        Ok(())
    }
}

fn as_build_error(runner: PackageManager, err: DeployError) -> DeployError {
    match err {
        DeployError::CommandFailed { command, status } => {
            DeployError::BuildFailed(format!("`{command}` exited with {status}"))
        }
        DeployError::CommandNotFound(_) => {
            DeployError::BuildToolNotFound(runner.program().to_string())
        }
        other => other,
    }
}
