use slipway::framework::Framework;
use tempfile::TempDir;

fn project_with_manifest(json: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("package.json"), json).unwrap();
    dir
}

#[test]
fn no_manifest_means_static() {
    let dir = TempDir::new().unwrap();
    assert_eq!(Framework::detect(dir.path()).unwrap(), Framework::Static);
}

#[test]
fn next_dependency_means_nextjs() {
    let dir = project_with_manifest(r#"{"dependencies": {"next": "^14.0.0"}}"#);
    assert_eq!(Framework::detect(dir.path()).unwrap(), Framework::Nextjs);
}

#[test]
fn vite_dev_dependency_means_vite() {
    let dir = project_with_manifest(r#"{"devDependencies": {"vite": "^5.0.0"}}"#);
    assert_eq!(Framework::detect(dir.path()).unwrap(), Framework::Vite);
}

#[test]
fn react_scripts_means_react() {
    let dir = project_with_manifest(r#"{"dependencies": {"react-scripts": "5.0.1"}}"#);
    assert_eq!(Framework::detect(dir.path()).unwrap(), Framework::React);
}

#[test]
fn react_with_next_resolves_to_nextjs() {
    let dir =
        project_with_manifest(r#"{"dependencies": {"react": "^18.2.0", "next": "^14.0.0"}}"#);
    assert_eq!(Framework::detect(dir.path()).unwrap(), Framework::Nextjs);
}

#[test]
fn manifest_without_framework_dependencies_is_static() {
    let dir = project_with_manifest(r#"{"dependencies": {"express": "^4.18.0"}}"#);
    assert_eq!(Framework::detect(dir.path()).unwrap(), Framework::Static);
}

#[test]
fn invalid_manifest_is_an_error() {
    let dir = project_with_manifest("not json at all");
    assert!(Framework::detect(dir.path()).is_err());
}
