//! Deployment orchestrator for static and SPA web projects.
//!
//! Slipway clones a repository, detects its front-end framework
//! (static, react, vite, or nextjs), builds it with npm or
//! yarn, packages the output as a timestamped zip artifact,
//! uploads it to object storage, and releases it on a single
//! cloud instance - provisioned with Terraform on the first
//! deploy, refreshed over SSH afterwards.
//!
//! The name comes from the ramp a ship is launched from: every
//! release slides down the same fixed track.
//!
//! # Overview
//!
//! State lives in three human-readable files next to the
//! project checkout:
//!
//! - `deploy-tool.yml` - project configuration
//!   ([`ProjectConfig`]), written once by `init`
//! - `deploy_history.json` - two-slot release history
//!   ([`ReleaseHistory`]): the live artifact and the one before
//!   it
//! - `rollback-info.yml` - a transient marker
//!   ([`RollbackMarker`]) consumed by the next deploy
//!
//! Everything else is delegated to external CLIs through thin
//! collaborator modules: `aws` ([`storage`]), `terraform`
//! ([`terraform`]), `git` ([`git`]), `ssh` ([`ssh`]), and npm
//! or yarn ([`build`]).
//!
//! # Commands
//!
//! ```sh
//! # Clone the project and write deploy-tool.yml
//! slipway init
//!
//! # Build, package, upload, and release
//! slipway deploy
//!
//! # Redeploy the previous artifact immediately
//! slipway rollback
//!
//! # Pick an older artifact; the next deploy activates it
//! slipway plan-rollback
//!
//! # Node exporter + Prometheus + Grafana
//! slipway monitor
//! ```
//!
//! # Release history
//!
//! Each successful deploy shifts `latest` into `previous` and
//! records the new artifact as `latest`, first with `pending`
//! status and then `confirmed` once the instance actually runs
//! it. `rollback` exchanges the two slots after the previous
//! artifact is live again; `plan-rollback` instead writes a
//! marker that the next deploy consumes, activating the marked
//! artifact while still archiving the fresh build.

// Allow noisy pedantic lints that don't add value for a
// deployment tool crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod artifact;
pub mod build;
pub mod cmd;
pub mod config;
pub mod dockerfile;
pub mod error;
pub mod framework;
pub mod git;
pub mod history;
pub mod monitor;
pub mod pipeline;
pub mod remote;
pub mod rollback;
pub mod ssh;
pub mod storage;
pub mod terraform;

pub use artifact::Artifact;
pub use build::PackageManager;
pub use config::{ProjectConfig, Workspace};
pub use error::{DeployError, DeployResult};
pub use framework::Framework;
pub use history::{DeployStatus, HistoryStore, ReleaseHistory};
pub use pipeline::Orchestrator;
pub use rollback::{MarkerStore, RollbackMarker};
pub use ssh::SshSession;
pub use terraform::Terraform;
