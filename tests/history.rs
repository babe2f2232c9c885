use slipway::error::DeployError;
use slipway::history::{DeployStatus, HistoryStore, ReleaseHistory};
use tempfile::TempDir;

fn store(dir: &TempDir) -> HistoryStore {
    HistoryStore::new(dir.path().join("deploy_history.json"))
}

#[test]
fn missing_file_loads_as_empty_history() {
    let dir = TempDir::new().unwrap();
    let history = store(&dir).load().unwrap();

    assert_eq!(history.latest, None);
    assert_eq!(history.previous, None);
    assert_eq!(history.status, DeployStatus::Confirmed);
}

#[test]
fn first_deploy_sets_latest_and_reports_first() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    let first = store.record_deploy("proj/build_artifact_20240101000000.zip").unwrap();
    assert!(first);

    let history = store.load().unwrap();
    assert_eq!(
        history.latest.as_deref(),
        Some("proj/build_artifact_20240101000000.zip")
    );
    assert_eq!(history.previous, None);
}

#[test]
fn second_deploy_shifts_latest_into_previous() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    store.record_deploy("proj/build_artifact_20240101000000.zip").unwrap();
    let first = store.record_deploy("proj/build_artifact_20240102000000.zip").unwrap();
    assert!(!first);

    let history = store.load().unwrap();
    assert_eq!(
        history.latest.as_deref(),
        Some("proj/build_artifact_20240102000000.zip")
    );
    assert_eq!(
        history.previous.as_deref(),
        Some("proj/build_artifact_20240101000000.zip")
    );
}

#[test]
fn third_deploy_discards_the_oldest_artifact() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    store.record_deploy("a").unwrap();
    store.record_deploy("b").unwrap();
    store.record_deploy("c").unwrap();

    let history = store.load().unwrap();
    assert_eq!(history.latest.as_deref(), Some("c"));
    assert_eq!(history.previous.as_deref(), Some("b"));
}

#[test]
fn record_deploy_is_pending_until_confirmed() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    store.record_deploy("a").unwrap();
    assert_eq!(store.load().unwrap().status, DeployStatus::Pending);

    store.confirm().unwrap();
    assert_eq!(store.load().unwrap().status, DeployStatus::Confirmed);
}

#[test]
fn swap_for_rollback_exchanges_the_slots() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    store.record_deploy("a").unwrap();
    store.record_deploy("b").unwrap();

    let active = store.swap_for_rollback().unwrap();
    assert_eq!(active, "a");

    let history = store.load().unwrap();
    assert_eq!(history.latest.as_deref(), Some("a"));
    assert_eq!(history.previous.as_deref(), Some("b"));
    assert_eq!(history.status, DeployStatus::Confirmed);
}

#[test]
fn swap_without_previous_fails_and_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    store.record_deploy("a").unwrap();
    let before = store.load().unwrap();

    let err = store.swap_for_rollback().unwrap_err();
    assert!(matches!(err, DeployError::NoPreviousArtifact));
    assert_eq!(store.load().unwrap(), before);
}

#[test]
fn swap_on_empty_history_fails() {
    let dir = TempDir::new().unwrap();
    let err = store(&dir).swap_for_rollback().unwrap_err();
    assert!(matches!(err, DeployError::NoPreviousArtifact));
}

#[test]
fn legacy_document_without_status_reads_confirmed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deploy_history.json");
    std::fs::write(&path, r#"{"latest": "a", "previous": "b"}"#).unwrap();

    let history = HistoryStore::new(&path).load().unwrap();
    assert_eq!(history.latest.as_deref(), Some("a"));
    assert_eq!(history.status, DeployStatus::Confirmed);
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deploy_history.json");
    let store = HistoryStore::new(&path);

    store
        .save(&ReleaseHistory {
            latest: Some("a".to_string()),
            previous: None,
            status: DeployStatus::Confirmed,
        })
        .unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn unset_slots_are_omitted_from_the_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deploy_history.json");
    let store = HistoryStore::new(&path);

    store.record_deploy("a").unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("latest"));
    assert!(!content.contains("previous"));
}
