//! Scripted host that drives delegates.

use crate::events::{AppNotification, ViewNotification};
use crate::traits::{ApplicationDelegate, ViewLifecycleDelegate};

/// One step of a host script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    App(AppNotification),
    View(ViewNotification),
}

impl From<AppNotification> for HostEvent {
    fn from(notification: AppNotification) -> Self {
        HostEvent::App(notification)
    }
}

impl From<ViewNotification> for HostEvent {
    fn from(notification: ViewNotification) -> Self {
        HostEvent::View(notification)
    }
}

/// Replays a fixed sequence of host notifications.
///
/// # Example
///
/// ```
/// use appstate::adapters::mock::{RecordingDelegate, ScriptedHost};
///
/// let delegate = RecordingDelegate::new();
/// ScriptedHost::open_sequence().play(&delegate);
/// assert_eq!(delegate.app_notifications().len(), 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedHost {
    script: Vec<HostEvent>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one step.
    pub fn then(mut self, event: impl Into<HostEvent>) -> Self {
        self.script.push(event.into());
        self
    }

    /// Seven application steps producing three opens: the launch, then two
    /// returns from Background. The return from Inactive in between is not
    /// an open.
    pub fn open_sequence() -> Self {
        use AppNotification::*;

        [
            DidBecomeActive,
            WillResignActive,
            DidBecomeActive,
            DidEnterBackground,
            DidBecomeActive,
            DidEnterBackground,
            DidBecomeActive,
        ]
        .into_iter()
        .fold(Self::new(), |host, step| host.then(step))
    }

    pub fn script(&self) -> &[HostEvent] {
        &self.script
    }

    /// Deliver the application steps to `delegate`, skipping view steps.
    pub fn play(&self, delegate: &dyn ApplicationDelegate) {
        for event in &self.script {
            if let HostEvent::App(notification) = event {
                notification.deliver_to(delegate);
            }
        }
    }

    /// Deliver the view steps to `view`, skipping application steps.
    pub fn play_view(&self, view: &dyn ViewLifecycleDelegate) {
        for event in &self.script {
            if let HostEvent::View(notification) = event {
                notification.deliver_to(view);
            }
        }
    }
}
