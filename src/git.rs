//! Version control collaborator, driven through the `git` CLI.

use std::path::Path;

use crate::cmd;
use crate::error::DeployResult;

/// Derive the checkout folder name from a repository URL:
/// the last path segment with any `.git` suffix stripped.
#[must_use]
pub fn folder_from_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let segment = trimmed.rsplit('/').next().unwrap_or(trimmed);
    segment.strip_suffix(".git").unwrap_or(segment).to_string()
}

/// Clone a repository into the destination directory.
pub fn clone(url: &str, dest: &Path) -> DeployResult<()> {
    let dest_arg = dest.to_string_lossy().to_string();
    cmd::run_interactive("git", &["clone", url, &dest_arg])
}
