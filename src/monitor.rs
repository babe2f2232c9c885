//! One-shot monitoring setup: node exporter on the instance
//! plus a local Prometheus and Grafana pair. Not idempotent -
//! re-running collides with the existing container names, which
//! is reported but tolerated.

use std::path::Path;

use crate::cmd;
use crate::error::DeployResult;
use crate::ssh::SshSession;

const NODE_EXPORTER_VERSION: &str = "1.8.1";

/// Install node exporter on the instance, write a local
/// `prometheus.yml` scraping it, and start the two local
/// observability containers.
pub fn setup(ssh: &SshSession, workspace_root: &Path, instance_ip: &str) -> DeployResult<()> {
    eprintln!("Installing node exporter on {instance_ip}...");
    ssh.exec_interactive(&node_exporter_script())?;

    let config_path = workspace_root.join("prometheus.yml");
    std::fs::write(&config_path, prometheus_config(instance_ip))?;
    let config_abs = config_path.canonicalize()?;

    let volume = format!("{}:/etc/prometheus/prometheus.yml", config_abs.display());
    if cmd::run_interactive(
        "docker",
        &[
            "run",
            "-d",
            "--name",
            "prometheus",
            "-p",
            "9090:9090",
            "-v",
            &volume,
            "prom/prometheus",
        ],
    )
    .is_err()
    {
        eprintln!("Prometheus container not started (name already in use?)");
    }

    if cmd::run_interactive(
        "docker",
        &[
            "run",
            "-d",
            "--name",
            "grafana",
            "-p",
            "3000:3000",
            "grafana/grafana",
        ],
    )
    .is_err()
    {
        eprintln!("Grafana container not started (name already in use?)");
    }

    eprintln!("Monitoring now available:");
    eprintln!("  Prometheus: http://localhost:9090");
    eprintln!("  Grafana: http://localhost:3000 (admin/admin)");
    eprintln!("  Node Exporter: http://{instance_ip}:9100/metrics");

    Ok(())
}

/// Prometheus scrape config pointed at the instance's node
/// exporter.
#[must_use]
pub fn prometheus_config(instance_ip: &str) -> String {
    format!(
        "global:\n  \
           scrape_interval: 15s\n\
         \n\
         scrape_configs:\n  \
           - job_name: 'instance-node-exporter'\n    \
             static_configs:\n      \
               - targets: ['{instance_ip}:9100']\n"
    )
}

fn node_exporter_script() -> String {
    let archive = format!("node_exporter-{NODE_EXPORTER_VERSION}.linux-amd64");
    format!(
        "set -e\n\
         cd /tmp\n\
         wget -q https://github.com/prometheus/node_exporter/releases/download/v{NODE_EXPORTER_VERSION}/{archive}.tar.gz\n\
         tar xzf {archive}.tar.gz\n\
         sudo mv {archive}/node_exporter /usr/local/bin/\n\
         sudo useradd -rs /bin/false node_exporter || true\n\
         sudo tee /etc/systemd/system/node_exporter.service > /dev/null <<'EOL'\n\
         [Unit]\n\
         Description=Prometheus Node Exporter\n\
         After=network.target\n\
         [Service]\n\
         User=node_exporter\n\
         Group=node_exporter\n\
         Type=simple\n\
         ExecStart=/usr/local/bin/node_exporter\n\
         [Install]\n\
         WantedBy=multi-user.target\n\
         EOL\n\
         sudo systemctl daemon-reload && sudo systemctl restart node_exporter\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prometheus_config_targets_the_instance() {
        let config = prometheus_config("203.0.113.5");
        assert!(config.contains("scrape_interval: 15s"));
        assert!(config.contains("['203.0.113.5:9100']"));
    }

    #[test]
    fn exporter_script_installs_a_systemd_unit() {
        let script = node_exporter_script();
        assert!(script.contains("node_exporter-1.8.1.linux-amd64"));
        assert!(script.contains("/etc/systemd/system/node_exporter.service"));
        assert!(script.contains("systemctl restart node_exporter"));
    }
}
