use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::{DeployError, DeployResult};

/// Run a command and capture its output. Fails if the command
/// returns a non-zero exit code.
pub fn run(program: &str, args: &[&str]) -> DeployResult<String> {
    run_in_opt(None, program, args)
}

/// Run a command in an explicit working directory and capture
/// its output. The process-wide current directory is never
/// changed.
pub fn run_in(dir: &Path, program: &str, args: &[&str]) -> DeployResult<String> {
    run_in_opt(Some(dir), program, args)
}

/// Run a command with stdin/stdout/stderr inherited (interactive).
pub fn run_interactive(program: &str, args: &[&str]) -> DeployResult<()> {
    run_interactive_opt(None, program, args)
}

/// Run an interactive command in an explicit working directory.
pub fn run_interactive_in(dir: &Path, program: &str, args: &[&str]) -> DeployResult<()> {
    run_interactive_opt(Some(dir), program, args)
}

/// Check if a command exists on PATH.
#[must_use]
pub fn command_exists(program: &str) -> bool {
    Command::new("which")
        .arg(program)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

fn run_in_opt(dir: Option<&Path>, program: &str, args: &[&str]) -> DeployResult<String> {
    let output = spawn(dir, program, args)?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let command = format_command(program, args);
        eprintln!("stderr: {stderr}");
        Err(DeployError::CommandFailed {
            command,
            status: output.status,
        })
    }
}

fn run_interactive_opt(dir: Option<&Path>, program: &str, args: &[&str]) -> DeployResult<()> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(dir) = dir {
        command.current_dir(dir);
    }

    let status = command.status().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DeployError::CommandNotFound(program.to_string())
        } else {
            DeployError::Io(e)
        }
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(DeployError::CommandFailed {
            command: format_command(program, args),
            status,
        })
    }
}

fn spawn(dir: Option<&Path>, program: &str, args: &[&str]) -> DeployResult<Output> {
    let mut command = Command::new(program);
    command.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());
    if let Some(dir) = dir {
        command.current_dir(dir);
    }

    command.output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DeployError::CommandNotFound(program.to_string())
        } else {
            DeployError::Io(e)
        }
    })
}

fn format_command(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|a| (*a).to_string()));
    parts.join(" ")
}
