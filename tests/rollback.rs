use slipway::rollback::{MarkerStore, RollbackMarker};
use tempfile::TempDir;

fn store(dir: &TempDir) -> MarkerStore {
    MarkerStore::new(dir.path().join("rollback-info.yml"))
}

#[test]
fn consume_without_marker_is_absent() {
    let dir = TempDir::new().unwrap();
    assert_eq!(store(&dir).consume_if_present().unwrap(), None);
}

#[test]
fn plan_then_consume_returns_the_key_exactly_once() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    store.plan("proj/build_artifact_20240101000000.zip").unwrap();

    assert_eq!(
        store.consume_if_present().unwrap().as_deref(),
        Some("proj/build_artifact_20240101000000.zip")
    );
    assert_eq!(store.consume_if_present().unwrap(), None);
}

#[test]
fn consuming_deletes_the_marker_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rollback-info.yml");
    let store = MarkerStore::new(&path);

    store.plan("a").unwrap();
    assert!(path.exists());

    store.consume_if_present().unwrap();
    assert!(!path.exists());
}

#[test]
fn replanning_overwrites_the_previous_marker() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    store.plan("old").unwrap();
    store.plan("new").unwrap();

    assert_eq!(store.consume_if_present().unwrap().as_deref(), Some("new"));
    assert_eq!(store.consume_if_present().unwrap(), None);
}

#[test]
fn marker_file_records_key_and_timestamp() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rollback-info.yml");

    MarkerStore::new(&path).plan("proj/build_artifact_20240101000000.zip").unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let marker: RollbackMarker = serde_yaml::from_str(&content).unwrap();
    assert_eq!(marker.artifact_key, "proj/build_artifact_20240101000000.zip");
}
