//! Upgrade detection against the recorded app version.

mod common;

use std::sync::Arc;

use appstate::config::StorageKeys;
use appstate::events::AppNotification;
use appstate::observable::{Event, Recorder};
use common::{
    play_open_sequence, store_after_launch, InMemoryStore, KeyValueStore, TestLifecycleBuilder,
};

#[test]
fn test_fresh_install_is_never_an_upgrade() {
    let harness = TestLifecycleBuilder::new().with_version("1.0").build();
    let new_version = Recorder::new();
    let _sub = new_version.record(&harness.lifecycle.is_first_launch_of_new_version());

    play_open_sequence(&harness.lifecycle);

    assert_eq!(new_version.values(), vec![false, false, false]);
    assert_eq!(
        harness.store.get_string(&harness.keys.last_app_version).unwrap().as_deref(),
        Some("1.0")
    );
}

#[test]
fn test_upgrade_reported_on_first_open_only() {
    let harness = TestLifecycleBuilder::new()
        .with_store(store_after_launch("3.2", 5))
        .with_version("4.2")
        .build();
    let new_version = Recorder::new();
    let _sub = new_version.record(&harness.lifecycle.is_first_launch_of_new_version());

    play_open_sequence(&harness.lifecycle);

    assert_eq!(new_version.values(), vec![true, false, false]);
    assert_eq!(
        harness.store.get_string(&harness.keys.last_app_version).unwrap().as_deref(),
        Some("4.2")
    );
}

#[test]
fn test_same_version_is_never_an_upgrade() {
    let harness = TestLifecycleBuilder::new()
        .with_store(store_after_launch("4.2", 5))
        .with_version("4.2")
        .build();
    let new_version = Recorder::new();
    let _sub = new_version.record(&harness.lifecycle.is_first_launch_of_new_version());

    play_open_sequence(&harness.lifecycle);

    assert_eq!(new_version.values(), vec![false, false, false]);
}

#[test]
fn test_concurrent_subscriptions_see_the_same_values() {
    let harness = TestLifecycleBuilder::new()
        .with_store(store_after_launch("3.2", 5))
        .with_version("4.2")
        .build();
    let a = Recorder::new();
    let b = Recorder::new();
    let _a = a.record(&harness.lifecycle.is_first_launch_of_new_version());
    let _b = b.record(&harness.lifecycle.is_first_launch_of_new_version());

    play_open_sequence(&harness.lifecycle);

    assert_eq!(a.values(), vec![true, false, false]);
    assert_eq!(b.values(), a.values());
}

#[test]
fn test_upgrade_detected_after_relaunch_with_new_build() {
    let harness = TestLifecycleBuilder::new().with_version("1.0").build();
    let first = Recorder::new();
    let _sub = first.record(&harness.lifecycle.is_first_launch_of_new_version());
    harness.lifecycle.notify(AppNotification::DidBecomeActive);

    harness.build.set_version(Some("1.1"));
    let relaunched = harness.relaunch();
    let second = Recorder::new();
    let _second = second.record(&relaunched.is_first_launch_of_new_version());
    relaunched.notify(AppNotification::DidBecomeActive);

    assert_eq!(first.values(), vec![false]);
    assert_eq!(second.values(), vec![true]);
}

#[test]
fn test_only_variant_fresh_install() {
    let harness = TestLifecycleBuilder::new().with_version("1.0").build();
    let once = Recorder::new();
    let _sub = once.record(&harness.lifecycle.first_launch_of_new_version_only());

    assert_eq!(once.events(), vec![Event::Completed]);
    assert_eq!(harness.store.get_string(&harness.keys.last_app_version).unwrap(), None);
}

#[test]
fn test_only_variant_upgrade() {
    let harness = TestLifecycleBuilder::new()
        .with_store(store_after_launch("3.2", 5))
        .with_version("4.2")
        .build();
    let once = Recorder::new();
    let _sub = once.record(&harness.lifecycle.first_launch_of_new_version_only());

    assert_eq!(once.events(), vec![Event::Next(()), Event::Completed]);
    assert_eq!(
        harness.store.get_string(&harness.keys.last_app_version).unwrap().as_deref(),
        Some("4.2")
    );

    let again = Recorder::new();
    let _again = again.record(&harness.lifecycle.first_launch_of_new_version_only());
    assert_eq!(again.events(), vec![Event::Completed]);
}

#[test]
fn test_only_variant_current_version() {
    let harness = TestLifecycleBuilder::new()
        .with_store(store_after_launch("4.2", 5))
        .with_version("4.2")
        .build();
    let once = Recorder::new();
    let _sub = once.record(&harness.lifecycle.first_launch_of_new_version_only());

    assert_eq!(once.events(), vec![Event::Completed]);
}

#[test]
fn test_missing_build_version_counts_as_empty() {
    let harness = TestLifecycleBuilder::new()
        .with_store(store_after_launch("1.0", 1))
        .build();
    let new_version = Recorder::new();
    let _sub = new_version.record(&harness.lifecycle.is_first_launch_of_new_version());

    harness.lifecycle.notify(AppNotification::DidBecomeActive);
    harness.lifecycle.notify(AppNotification::DidEnterBackground);
    harness.lifecycle.notify(AppNotification::DidBecomeActive);

    assert_eq!(new_version.values(), vec![true, false]);
    assert_eq!(
        harness.store.get_string(&harness.keys.last_app_version).unwrap().as_deref(),
        Some("")
    );
}

fn store_with_empty_version() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store
        .set_string(&StorageKeys::default().last_app_version, "")
        .unwrap();
    store
}

#[test]
fn test_empty_recorded_version_is_not_an_upgrade() {
    let harness = TestLifecycleBuilder::new()
        .with_store(store_with_empty_version())
        .with_version("1.0")
        .build();
    let new_version = Recorder::new();
    let _sub = new_version.record(&harness.lifecycle.is_first_launch_of_new_version());

    harness.lifecycle.notify(AppNotification::DidBecomeActive);

    assert_eq!(new_version.values(), vec![false]);
    assert_eq!(
        harness.store.get_string(&harness.keys.last_app_version).unwrap().as_deref(),
        Some("1.0")
    );
}

#[test]
fn test_only_variant_ignores_empty_recorded_version() {
    let harness = TestLifecycleBuilder::new()
        .with_store(store_with_empty_version())
        .with_version("1.0")
        .build();
    let writes = harness.store.write_count();
    let once = Recorder::new();
    let _sub = once.record(&harness.lifecycle.first_launch_of_new_version_only());

    assert_eq!(once.events(), vec![Event::Completed]);
    assert_eq!(harness.store.write_count(), writes);
}
