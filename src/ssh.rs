use std::path::Path;

use crate::cmd;
use crate::error::{DeployError, DeployResult};

/// SSH session wrapper for executing command scripts on the
/// deployment instance. Every session is keyed; the key path is
/// validated by the caller before the session is opened.
pub struct SshSession {
    host: String,
    user: String,
    key: String,
}

impl SshSession {
    #[must_use]
    pub fn new(host: &str, user: &str, key_file: &Path) -> Self {
        Self {
            host: host.to_string(),
            user: user.to_string(),
            key: key_file.to_string_lossy().to_string(),
        }
    }

    /// Execute a command on the remote host and capture output.
    pub fn exec(&self, command: &str) -> DeployResult<String> {
        let args = self.build_args(command);
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        cmd::run("ssh", &refs).map_err(as_remote_error)
    }

    /// Execute a command on the remote host interactively,
    /// streaming its output to the operator.
    pub fn exec_interactive(&self, command: &str) -> DeployResult<()> {
        let args = self.build_args(command);
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        cmd::run_interactive("ssh", &refs).map_err(as_remote_error)
    }

    fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    fn build_args(&self, command: &str) -> Vec<String> {
        vec![
            "-o".to_string(),
            "StrictHostKeyChecking=no".to_string(),
            "-o".to_string(),
            "ConnectTimeout=10".to_string(),
            "-i".to_string(),
            self.key.clone(),
            self.destination(),
            command.to_string(),
        ]
    }
}

fn as_remote_error(err: DeployError) -> DeployError {
    match err {
        DeployError::CommandFailed { command, status } => {
            DeployError::RemoteExecutionFailed(format!("`{command}` exited with {status}"))
        }
        DeployError::CommandNotFound(program) => {
            DeployError::RemoteExecutionFailed(format!("{program} is not installed"))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_carry_key_and_destination() {
        let ssh = SshSession::new("203.0.113.5", "ubuntu", Path::new(".pem/key.pem"));
        let args = ssh.build_args("echo ok");

        assert!(args.contains(&"StrictHostKeyChecking=no".to_string()));
        assert!(args.contains(&".pem/key.pem".to_string()));
        assert!(args.contains(&"ubuntu@203.0.113.5".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("echo ok"));
    }
}
