//! Remote refresh script: the fixed command sequence that
//! swaps the running application on the instance to a given
//! artifact.

/// Render the script executed over SSH on every non-first
/// deploy and on rollback: fetch the artifact from storage,
/// replace the application directory, rebuild the container
/// image, and restart it on the standard web port.
#[must_use]
pub fn refresh_script(bucket: &str, artifact_key: &str, app: &str) -> String {
    format!(
        "set -e\n\
         cd \"$HOME\"\n\
         aws s3 cp s3://{bucket}/{artifact_key} artifact.zip\n\
         sudo rm -rf app && unzip -o artifact.zip -d app\n\
         cd app\n\
         sudo docker rm -f {app} || true\n\
         sudo docker build -t {app} .\n\
         sudo docker run -d --name {app} -p 80:80 {app}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_fetches_and_restarts_on_port_80() {
        let script = refresh_script("my-bucket", "proj/build_artifact_20240101000000.zip", "shop");

        assert!(script.starts_with("set -e\n"));
        assert!(
            script.contains("aws s3 cp s3://my-bucket/proj/build_artifact_20240101000000.zip")
        );
        assert!(script.contains("unzip -o artifact.zip -d app"));
        assert!(script.contains("docker rm -f shop || true"));
        assert!(script.contains("docker run -d --name shop -p 80:80 shop"));
    }
}
