//! Artifact naming and packaging. An artifact is a zip of the
//! build output, keyed in storage as
//! `<project>/build_artifact_<UTC timestamp>.zip`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};

use crate::cmd;
use crate::error::{DeployError, DeployResult};

pub const ARCHIVE_PREFIX: &str = "build_artifact_";

/// Root-level files folded into the archive when the build
/// output does not already contain them.
const SUPPLEMENTARY_FILES: &[&str] = &["Dockerfile", "package.json", "package-lock.json"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// `build_artifact_YYYYMMDDHHMMSS`
    pub basename: String,
    /// `build_artifact_YYYYMMDDHHMMSS.zip`
    pub file_name: String,
    /// `<project>/build_artifact_YYYYMMDDHHMMSS.zip`
    pub key: String,
}

impl Artifact {
    /// Name the next artifact for a project. Timestamps have
    /// second resolution, so a candidate colliding with the
    /// currently recorded `latest` is bumped one second forward
    /// until unique - keys stay monotonic within a project.
    #[must_use]
    pub fn next(project: &str, now: DateTime<Utc>, current_latest: Option<&str>) -> Self {
        let mut when = now;
        let mut artifact = Self::at(project, when);

        while Some(artifact.key.as_str()) == current_latest {
            when += TimeDelta::seconds(1);
            artifact = Self::at(project, when);
        }

        artifact
    }

    fn at(project: &str, when: DateTime<Utc>) -> Self {
        let basename = format!("{ARCHIVE_PREFIX}{}", when.format("%Y%m%d%H%M%S"));
        let file_name = format!("{basename}.zip");
        let key = format!("{project}/{file_name}");
        Self {
            basename,
            file_name,
            key,
        }
    }
}

/// Zip the output directory's contents into an archive at the
/// project root and return its path. Root-level manifests are
/// copied into the output first so the instance can rebuild the
/// container from the unpacked archive alone.
pub fn package(project_dir: &Path, output_dir: &Path, artifact: &Artifact) -> DeployResult<PathBuf> {
    stage_supplementary_files(project_dir, output_dir)?;

    let archive_path = project_dir.join(&artifact.file_name);
    let archive_arg = archive_path.to_string_lossy().to_string();
    cmd::run_in(output_dir, "zip", &["-r", "-q", &archive_arg, "."]).map_err(|e| match e {
        DeployError::CommandNotFound(_) => {
            DeployError::BuildToolNotFound("zip".to_string())
        }
        other => other,
    })?;

    Ok(archive_path)
}

fn stage_supplementary_files(project_dir: &Path, output_dir: &Path) -> DeployResult<()> {
    for name in SUPPLEMENTARY_FILES {
        let src = project_dir.join(name);
        let dst = output_dir.join(name);
        if src.exists() && src != dst && !dst.exists() {
            std::fs::copy(&src, &dst)?;
            eprintln!("Copied {name} to build directory.");
        }
    }
    Ok(())
}
