//! View visibility classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::events::ViewNotification;
use crate::observable::{Observable, Subject};
use crate::traits::ViewLifecycleDelegate;

/// Canonical visibility state of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewState {
    WillAppear,
    DidAppear,
    WillDisappear,
    DidDisappear,
}

impl ViewState {
    pub fn from_notification(notification: ViewNotification) -> Self {
        match notification {
            ViewNotification::ViewWillAppear => ViewState::WillAppear,
            ViewNotification::ViewDidAppear => ViewState::DidAppear,
            ViewNotification::ViewWillDisappear => ViewState::WillDisappear,
            ViewNotification::ViewDidDisappear => ViewState::DidDisappear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::WillAppear => "will-appear",
            ViewState::DidAppear => "did-appear",
            ViewState::WillDisappear => "will-disappear",
            ViewState::DidDisappear => "did-disappear",
        }
    }

    /// True between did-appear and will-disappear.
    pub fn is_visible(&self) -> bool {
        matches!(self, ViewState::DidAppear)
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle streams of a single view.
///
/// Each instance owns its own slots; two views never observe each other's
/// notifications.
pub struct ViewLifecycle {
    name: String,
    will_appear: Subject<ViewState>,
    did_appear: Subject<ViewState>,
    will_disappear: Subject<ViewState>,
    did_disappear: Subject<ViewState>,
}

impl fmt::Debug for ViewLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewLifecycle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ViewLifecycle {
    /// `name` only appears in log output.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            will_appear: Subject::new(),
            did_appear: Subject::new(),
            will_disappear: Subject::new(),
            did_disappear: Subject::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Publish one notification for this view.
    pub fn notify(&self, notification: ViewNotification) {
        let state = ViewState::from_notification(notification);
        tracing::debug!(view = %self.name, state = %state, "view notification");
        self.subject(notification).on_next(state);
    }

    pub fn view_will_appear_events(&self) -> Observable<ViewState> {
        self.will_appear.as_observable()
    }

    pub fn view_did_appear_events(&self) -> Observable<ViewState> {
        self.did_appear.as_observable()
    }

    pub fn view_will_disappear_events(&self) -> Observable<ViewState> {
        self.will_disappear.as_observable()
    }

    pub fn view_did_disappear_events(&self) -> Observable<ViewState> {
        self.did_disappear.as_observable()
    }

    /// Every state of this view, one per notification, in order.
    pub fn view_state(&self) -> Observable<ViewState> {
        Observable::merge([
            self.view_will_appear_events(),
            self.view_did_appear_events(),
            self.view_will_disappear_events(),
            self.view_did_disappear_events(),
        ])
    }

    fn subject(&self, notification: ViewNotification) -> &Subject<ViewState> {
        match notification {
            ViewNotification::ViewWillAppear => &self.will_appear,
            ViewNotification::ViewDidAppear => &self.did_appear,
            ViewNotification::ViewWillDisappear => &self.will_disappear,
            ViewNotification::ViewDidDisappear => &self.did_disappear,
        }
    }
}

impl ViewLifecycleDelegate for ViewLifecycle {
    fn view_will_appear(&self) {
        self.notify(ViewNotification::ViewWillAppear);
    }

    fn view_did_appear(&self) {
        self.notify(ViewNotification::ViewDidAppear);
    }

    fn view_will_disappear(&self) {
        self.notify(ViewNotification::ViewWillDisappear);
    }

    fn view_did_disappear(&self) {
        self.notify(ViewNotification::ViewDidDisappear);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observable::Recorder;

    #[test]
    fn test_view_state_full_cycle() {
        let view = ViewLifecycle::new("main");
        let recorder = Recorder::new();
        let _sub = recorder.record(&view.view_state());

        view.view_will_appear();
        view.view_did_appear();
        view.view_will_disappear();
        view.view_did_disappear();

        assert_eq!(
            recorder.values(),
            vec![
                ViewState::WillAppear,
                ViewState::DidAppear,
                ViewState::WillDisappear,
                ViewState::DidDisappear
            ]
        );
    }

    #[test]
    fn test_views_are_independent() {
        let first = ViewLifecycle::new("first");
        let second = ViewLifecycle::new("second");
        let recorder = Recorder::new();
        let _sub = recorder.record(&first.view_state());

        second.view_did_appear();
        first.view_will_appear();

        assert_eq!(recorder.values(), vec![ViewState::WillAppear]);
    }

    #[test]
    fn test_single_slot_stream() {
        let view = ViewLifecycle::new("detail");
        let recorder = Recorder::new();
        let _sub = recorder.record(&view.view_did_disappear_events());

        for notification in ViewNotification::ALL {
            view.notify(notification);
        }

        assert_eq!(recorder.values(), vec![ViewState::DidDisappear]);
    }

    #[test]
    fn test_only_did_appear_is_visible() {
        assert!(ViewState::DidAppear.is_visible());
        assert!(!ViewState::WillAppear.is_visible());
        assert!(!ViewState::DidDisappear.is_visible());
    }
}
