//! The pipeline over the JSON file store, across simulated restarts.

mod common;

use std::sync::Arc;

use appstate::adapters::{JsonFileStore, StaticBuildInfo};
use appstate::app::AppLifecycle;
use appstate::observable::Recorder;
use common::play_open_sequence;
use tempfile::TempDir;

fn launch(dir: &TempDir, version: &str) -> AppLifecycle {
    let store = JsonFileStore::open(dir.path().join("store.json")).unwrap();
    AppLifecycle::new(Arc::new(store), Arc::new(StaticBuildInfo::new(version)))
}

#[test]
fn test_state_survives_restart() {
    let dir = TempDir::new().unwrap();

    let first_run = launch(&dir, "1.0");
    let counts = Recorder::new();
    let first = Recorder::new();
    let _a = counts.record(&first_run.open_count());
    let _b = first.record(&first_run.is_first_launch());
    play_open_sequence(&first_run);
    drop(first_run);

    let second_run = launch(&dir, "1.0");
    let counts_again = Recorder::new();
    let first_again = Recorder::new();
    let _c = counts_again.record(&second_run.open_count());
    let _d = first_again.record(&second_run.is_first_launch());
    play_open_sequence(&second_run);

    assert_eq!(counts.values(), vec![1, 2, 3]);
    assert_eq!(first.values(), vec![true, false, false]);
    assert_eq!(counts_again.values(), vec![4, 5, 6]);
    assert_eq!(first_again.values(), vec![false, false, false]);
}

#[test]
fn test_upgrade_across_restart() {
    let dir = TempDir::new().unwrap();

    let old = launch(&dir, "3.2");
    let recorder = Recorder::new();
    let _a = recorder.record(&old.is_first_launch_of_new_version());
    play_open_sequence(&old);
    drop(old);

    let new = launch(&dir, "4.2");
    let only = Recorder::new();
    let _b = only.record(&new.first_launch_of_new_version_only());

    assert_eq!(recorder.values(), vec![false, false, false]);
    assert_eq!(only.values(), vec![()]);
}

#[test]
fn test_reset_removes_persisted_keys() {
    let dir = TempDir::new().unwrap();
    let run = launch(&dir, "1.0");
    let _sub = run.open_count().subscribe_next(|_| {});
    play_open_sequence(&run);

    run.reset().unwrap();
    drop(run);

    let store = JsonFileStore::open(dir.path().join("store.json")).unwrap();
    assert!(store.is_empty());
}
