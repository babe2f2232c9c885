//! Object storage collaborator, driven through the `aws` CLI.

use std::path::{Path, PathBuf};

use crate::cmd;
use crate::error::{DeployError, DeployResult};

/// Create the bucket unless it already exists. Region comes
/// from `AWS_DEFAULT_REGION`, defaulting to `us-east-1` (which
/// rejects an explicit location constraint).
pub fn ensure_bucket(bucket: &str) -> DeployResult<()> {
    if cmd::run("aws", &["s3api", "head-bucket", "--bucket", bucket]).is_ok() {
        eprintln!("Bucket '{bucket}' already exists.");
        return Ok(());
    }

    let region =
        std::env::var("AWS_DEFAULT_REGION").unwrap_or_else(|_| "us-east-1".to_string());
    let constraint = format!("LocationConstraint={region}");

    let mut args = vec!["s3api", "create-bucket", "--bucket", bucket];
    if region != "us-east-1" {
        args.push("--create-bucket-configuration");
        args.push(&constraint);
    }

    cmd::run("aws", &args).map_err(|e| DeployError::UploadFailed(e.to_string()))?;
    eprintln!("Bucket '{bucket}' created.");
    Ok(())
}

/// Upload one local file under the given key.
pub fn upload_file(local_path: &Path, bucket: &str, key: &str) -> DeployResult<()> {
    let local = local_path.to_string_lossy().to_string();
    let dest = format!("s3://{bucket}/{key}");
    cmd::run("aws", &["s3", "cp", &local, &dest])
        .map_err(|e| DeployError::UploadFailed(e.to_string()))?;
    eprintln!("Uploaded: {key}");
    Ok(())
}

/// Upload every file under a directory, preserving relative
/// paths below a `<prefix>/` key prefix.
pub fn upload_dir(dir: &Path, bucket: &str, prefix: &str) -> DeployResult<()> {
    for file in collect_files(dir)? {
        let relative = file
            .strip_prefix(dir)
            .map_err(|_| DeployError::Other(format!("{} escapes upload dir", file.display())))?;
        let key = format!("{prefix}/{}", relative_key(relative));
        upload_file(&file, bucket, &key)?;
    }
    Ok(())
}

/// List archived artifact keys under a prefix, most recent
/// first. The timestamped key format makes descending lexical
/// order chronological.
pub fn list_artifacts(bucket: &str, prefix: &str) -> DeployResult<Vec<String>> {
    let output = cmd::run(
        "aws",
        &[
            "s3api",
            "list-objects-v2",
            "--bucket",
            bucket,
            "--prefix",
            prefix,
            "--query",
            "Contents[].Key",
            "--output",
            "json",
        ],
    )?;

    let keys: Option<Vec<String>> = serde_json::from_str(&output)?;
    Ok(descending_zip_keys(keys.unwrap_or_default()))
}

fn descending_zip_keys(keys: Vec<String>) -> Vec<String> {
    let mut artifacts: Vec<String> = keys.into_iter().filter(|k| k.ends_with(".zip")).collect();
    artifacts.sort_by(|a, b| b.cmp(a));
    artifacts
}

fn collect_files(dir: &Path) -> DeployResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];

    while let Some(current) = stack.pop() {
        for entry in std::fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                stack.push(path);
            } else {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

fn relative_key(relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_filtered_to_zips_and_sorted_descending() {
        let keys = vec![
            "proj/build_artifact_20240101000000.zip".to_string(),
            "proj/index.html".to_string(),
            "proj/build_artifact_20240103000000.zip".to_string(),
            "proj/build_artifact_20240102000000.zip".to_string(),
        ];

        assert_eq!(
            descending_zip_keys(keys),
            vec![
                "proj/build_artifact_20240103000000.zip",
                "proj/build_artifact_20240102000000.zip",
                "proj/build_artifact_20240101000000.zip",
            ]
        );
    }

    #[test]
    fn relative_keys_use_forward_slashes() {
        let path = Path::new("assets").join("img").join("logo.png");
        assert_eq!(relative_key(&path), "assets/img/logo.png");
    }
}
