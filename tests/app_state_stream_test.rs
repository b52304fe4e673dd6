//! Classification of raw notifications into app and view states.

mod common;

use appstate::events::{AppNotification, LifecycleEventSource, ViewNotification};
use appstate::observable::Recorder;
use appstate::state::{AppState, AppStateStream, ViewLifecycle, ViewState};
use appstate::traits::ViewLifecycleDelegate;
use common::{play_open_sequence, test_lifecycle, ScriptedHost, OPEN_SEQUENCE};

#[test]
fn test_one_state_per_notification_in_order() {
    let harness = test_lifecycle();
    let states = Recorder::new();
    let _sub = states.record(&harness.lifecycle.app_state());

    play_open_sequence(&harness.lifecycle);

    let expected: Vec<AppState> = OPEN_SEQUENCE
        .iter()
        .map(|n| AppState::from_notification(*n))
        .collect();
    assert_eq!(states.values(), expected);
}

#[test]
fn test_each_state_once() {
    let source = LifecycleEventSource::new();
    let stream = AppStateStream::new(&source);
    let states = Recorder::new();
    let _sub = states.record(&stream.app_state());

    for notification in AppNotification::ALL {
        source.notify(notification);
    }

    assert_eq!(
        states.values(),
        vec![
            AppState::Active,
            AppState::Inactive,
            AppState::Background,
            AppState::Terminated
        ]
    );
}

#[test]
fn test_per_state_streams_only_see_their_state() {
    let harness = test_lifecycle();
    let background = Recorder::new();
    let terminate = Recorder::new();
    let _a = background.record(&harness.lifecycle.did_enter_background());
    let _b = terminate.record(&harness.lifecycle.will_terminate());

    play_open_sequence(&harness.lifecycle);

    assert_eq!(background.values(), vec![AppState::Background; 2]);
    assert!(terminate.values().is_empty());
}

#[test]
fn test_late_subscriber_sees_no_history() {
    let harness = test_lifecycle();
    play_open_sequence(&harness.lifecycle);

    let states = Recorder::new();
    let _sub = states.record(&harness.lifecycle.app_state());
    assert!(states.values().is_empty());

    harness.lifecycle.notify(AppNotification::WillTerminate);
    assert_eq!(states.values(), vec![AppState::Terminated]);
}

#[test]
fn test_disposed_subscription_receives_nothing() {
    let harness = test_lifecycle();
    let states = Recorder::new();
    let sub = states.record(&harness.lifecycle.app_state());

    harness.lifecycle.notify(AppNotification::DidBecomeActive);
    sub.dispose();
    sub.dispose();
    harness.lifecycle.notify(AppNotification::WillResignActive);

    assert_eq!(states.values(), vec![AppState::Active]);
}

#[test]
fn test_view_state_stream() {
    let view = ViewLifecycle::new("detail");
    let states = Recorder::new();
    let _sub = states.record(&view.view_state());

    let host = ViewNotification::ALL
        .into_iter()
        .fold(ScriptedHost::new(), |host, n| host.then(n));
    host.play_view(&view);

    assert_eq!(
        states.values(),
        vec![
            ViewState::WillAppear,
            ViewState::DidAppear,
            ViewState::WillDisappear,
            ViewState::DidDisappear
        ]
    );
}

#[test]
fn test_views_do_not_share_streams() {
    let a = ViewLifecycle::new("a");
    let b = ViewLifecycle::new("b");
    let seen_by_b = Recorder::new();
    let _sub = seen_by_b.record(&b.view_state());

    a.view_did_appear();
    b.view_will_disappear();

    assert_eq!(seen_by_b.values(), vec![ViewState::WillDisappear]);
}
