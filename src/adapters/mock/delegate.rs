//! Delegate that records what it receives.

use std::sync::Mutex;

use crate::events::{AppNotification, ViewNotification};
use crate::observable::lock;
use crate::traits::{ApplicationDelegate, ViewLifecycleDelegate};

/// Records every application and view hook, in order.
///
/// Stands in for the host's original delegate when testing forwarding.
#[derive(Debug, Default)]
pub struct RecordingDelegate {
    app: Mutex<Vec<AppNotification>>,
    view: Mutex<Vec<ViewNotification>>,
}

impl RecordingDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app_notifications(&self) -> Vec<AppNotification> {
        lock(&self.app).clone()
    }

    pub fn view_notifications(&self) -> Vec<ViewNotification> {
        lock(&self.view).clone()
    }

    fn push_app(&self, notification: AppNotification) {
        lock(&self.app).push(notification);
    }

    fn push_view(&self, notification: ViewNotification) {
        lock(&self.view).push(notification);
    }
}

impl ApplicationDelegate for RecordingDelegate {
    fn did_become_active(&self) {
        self.push_app(AppNotification::DidBecomeActive);
    }

    fn will_resign_active(&self) {
        self.push_app(AppNotification::WillResignActive);
    }

    fn did_enter_background(&self) {
        self.push_app(AppNotification::DidEnterBackground);
    }

    fn will_terminate(&self) {
        self.push_app(AppNotification::WillTerminate);
    }
}

impl ViewLifecycleDelegate for RecordingDelegate {
    fn view_will_appear(&self) {
        self.push_view(ViewNotification::ViewWillAppear);
    }

    fn view_did_appear(&self) {
        self.push_view(ViewNotification::ViewDidAppear);
    }

    fn view_will_disappear(&self) {
        self.push_view(ViewNotification::ViewWillDisappear);
    }

    fn view_did_disappear(&self) {
        self.push_view(ViewNotification::ViewDidDisappear);
    }
}
