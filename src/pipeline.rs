use chrono::Utc;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};

use crate::artifact::{self, Artifact};
use crate::build::PackageManager;
use crate::config::{ProjectConfig, Workspace};
use crate::dockerfile;
use crate::error::{DeployError, DeployResult};
use crate::framework::Framework;
use crate::git;
use crate::history::HistoryStore;
use crate::monitor;
use crate::remote;
use crate::rollback::MarkerStore;
use crate::ssh::SshSession;
use crate::storage;
use crate::terraform::Terraform;

/// Deployment orchestrator: owns the deploy/rollback state
/// machine and dispatches the CLI subcommands.
pub struct Orchestrator {
    workspace: Workspace,
}

impl Orchestrator {
    #[must_use]
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    /// Parse CLI arguments and dispatch the appropriate
    /// command.
    ///
    /// # Errors
    ///
    /// Returns an error if the dispatched command fails.
    pub fn run(&self) -> DeployResult<()> {
        let cli = Cli::parse();

        match &cli.command {
            Command::Init { bucket } => self.cmd_init(bucket.as_deref()),
            Command::Deploy => self.cmd_deploy(),
            Command::Rollback => self.cmd_rollback(),
            Command::PlanRollback => self.cmd_plan_rollback(),
            Command::Monitor => self.cmd_monitor(),
        }
    }

    fn cmd_init(&self, bucket: Option<&str>) -> DeployResult<()> {
        let repo_url: String = Input::new()
            .with_prompt("Git repository URL")
            .interact_text()?;

        let folder = git::folder_from_url(&repo_url);
        let dest = self.workspace.root().join(&folder);

        if dest.exists() {
            eprintln!("Folder {folder} already exists.");
        } else {
            git::clone(&repo_url, &dest)?;
            eprintln!("Repo cloned to: {folder}");
        }

        let config = ProjectConfig {
            repo_url,
            bucket: bucket.map_or_else(|| format!("{folder}-artifacts"), str::to_string),
            folder,
            key_path: ".pem/deploy-key.pem".to_string(),
            ssh_user: "ubuntu".to_string(),
        };

        self.workspace.save_config(&config)?;
        eprintln!("Config written to deploy-tool.yml");
        Ok(())
    }

    /// The deploy state machine: prepare, build, package,
    /// publish, resolve the effective artifact, update history,
    /// then provision (first deploy) or refresh over SSH.
    fn cmd_deploy(&self) -> DeployResult<()> {
        let config = self.workspace.load_config()?;
        let project_dir = self.workspace.project_dir(&config);

        let framework = Framework::detect(&project_dir)?;
        eprintln!("Detected framework: {framework}");

        dockerfile::write(&project_dir)?;
        eprintln!("Dockerfile written.");

        if framework.needs_build() {
            let runner = PackageManager::detect(&project_dir)?;
            runner.install(&project_dir)?;
            runner.build(&project_dir)?;
        } else {
            eprintln!("No build step required for static site.");
        }

        let output_dir = framework
            .output_dir()
            .map_or_else(|| project_dir.clone(), |sub| project_dir.join(sub));

        let history = HistoryStore::new(self.workspace.history_path());
        let current_latest = history.load()?.latest;
        let new_artifact = Artifact::next(&config.folder, Utc::now(), current_latest.as_deref());

        let archive_path = artifact::package(&project_dir, &output_dir, &new_artifact)?;
        eprintln!("Artifact zipped as {}", new_artifact.file_name);

        storage::ensure_bucket(&config.bucket)?;
        storage::upload_dir(&output_dir, &config.bucket, &config.folder)?;
        storage::upload_file(&archive_path, &config.bucket, &new_artifact.key)?;
        eprintln!("Artifact uploaded to storage");

        // A planned rollback overrides which artifact goes live;
        // the fresh upload above still happened and stays
        // archived.
        let marker = MarkerStore::new(self.workspace.marker_path());
        let effective_key = match marker.consume_if_present()? {
            Some(key) => {
                eprintln!("Detected rollback. Using: {key}");
                key
            }
            None => new_artifact.key.clone(),
        };

        let first_deploy = history.record_deploy(&effective_key)?;

        let key_file = self.workspace.key_file(&config);
        if !key_file.exists() {
            return Err(DeployError::KeyFileMissing(key_file.display().to_string()));
        }

        let terraform = Terraform::new(self.workspace.terraform_dir());
        terraform.check_prerequisites()?;

        if first_deploy {
            eprintln!("First deploy. Provisioning instance...");
            let key_arg = key_file.display().to_string();
            terraform.init()?;
            terraform.apply(&[
                ("bucket_name", config.bucket.as_str()),
                ("ec2_name", config.folder.as_str()),
                ("artifact_key", effective_key.as_str()),
                ("key_name", key_arg.as_str()),
            ])?;

            let ip = terraform.output("ec2_public_ip")?;
            history.confirm()?;
            eprintln!("Deployment complete at: http://{ip}");
        } else {
            eprintln!("Instance already provisioned. Deploying over SSH...");
            let ip = terraform.output("ec2_public_ip")?;

            let ssh = SshSession::new(&ip, &config.ssh_user, &key_file);
            let script = remote::refresh_script(&config.bucket, &effective_key, &config.folder);
            if let Err(e) = ssh.exec_interactive(&script) {
                eprintln!("SSH deployment failed.");
                eprintln!("History is recorded as pending; the instance may still run the old artifact.");
                return Err(e);
            }

            history.confirm()?;
            eprintln!("App deployed via SSH: http://{ip}");
        }

        Ok(())
    }

    /// Immediate rollback: redeploy the previous artifact over
    /// SSH, then swap the history slots. History is untouched
    /// when the remote refresh fails.
    fn cmd_rollback(&self) -> DeployResult<()> {
        let config = self.workspace.load_config()?;

        let key_file = self.workspace.key_file(&config);
        if !key_file.exists() {
            return Err(DeployError::KeyFileMissing(key_file.display().to_string()));
        }

        let history = HistoryStore::new(self.workspace.history_path());
        let previous = history
            .load()?
            .previous
            .ok_or(DeployError::NoPreviousArtifact)?;

        let terraform = Terraform::new(self.workspace.terraform_dir());
        terraform.check_prerequisites()?;
        let ip = terraform.output("ec2_public_ip")?;

        eprintln!("Rolling back to: {previous}");
        eprintln!("Deploying to instance: {ip}");

        let ssh = SshSession::new(&ip, &config.ssh_user, &key_file);
        ssh.exec_interactive(&remote::refresh_script(&config.bucket, &previous, &config.folder))?;

        let active = history.swap_for_rollback()?;
        eprintln!("Rollback completed successfully. Active artifact: {active}");
        eprintln!("App is now live at: http://{ip}");
        Ok(())
    }

    /// Planned rollback: pick an archived artifact; the next
    /// deploy activates it instead of a fresh build.
    fn cmd_plan_rollback(&self) -> DeployResult<()> {
        let config = self.workspace.load_config()?;

        let prefix = format!("{}/", config.folder);
        let artifacts = storage::list_artifacts(&config.bucket, &prefix)?;
        if artifacts.len() < 2 {
            return Err(DeployError::InsufficientArtifacts(artifacts.len()));
        }

        eprintln!("Available artifacts:");
        let choice = Select::new()
            .with_prompt("Artifact to roll back to")
            .items(&artifacts)
            .default(1)
            .interact()?;

        let artifact_key = &artifacts[choice];
        MarkerStore::new(self.workspace.marker_path()).plan(artifact_key)?;

        eprintln!("Marked rollback to {artifact_key}. Now run `slipway deploy`.");
        Ok(())
    }

    fn cmd_monitor(&self) -> DeployResult<()> {
        let config = self.workspace.load_config()?;

        let key_file = self.workspace.key_file(&config);
        if !key_file.exists() {
            return Err(DeployError::KeyFileMissing(key_file.display().to_string()));
        }

        let terraform = Terraform::new(self.workspace.terraform_dir());
        terraform.check_prerequisites()?;
        let ip = terraform.output("ec2_public_ip")?;

        let ssh = SshSession::new(&ip, &config.ssh_user, &key_file);
        monitor::setup(&ssh, self.workspace.root(), &ip)
    }
}

#[derive(Parser)]
#[command(name = "slipway")]
#[command(about = "Deployment automation for static and SPA web projects", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clone a project and write its deployment config
    Init {
        /// Storage bucket for build artifacts
        #[arg(long)]
        bucket: Option<String>,
    },

    /// Build, package, upload, and release the project
    Deploy,

    /// Redeploy the previous artifact immediately
    Rollback,

    /// Mark an archived artifact for the next deploy to activate
    PlanRollback,

    /// Install the metrics agent and start the local
    /// observability stack
    Monitor,
}
