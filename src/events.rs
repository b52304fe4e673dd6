//! Raw lifecycle notifications and the source that publishes them.
//!
//! [`LifecycleEventSource`] is the entry point of the pipeline: the host (a
//! platform binding, or a test double) calls its [`ApplicationDelegate`]
//! methods and each call is published on one of four independent slots. The
//! source does not reorder or validate anything; it publishes notifications
//! in the order the host delivers them.
//!
//! Every notification is stamped with a sequence number. Subscribers of the
//! public slots never see it; derivations use it to recognise that several
//! subscriptions are reacting to the same notification.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::CliError;
use crate::observable::{lock, Observable, Subject};
use crate::traits::{ApplicationDelegate, ViewLifecycleDelegate};

/// Sequence number of a delivered notification, starting at 1.
pub type Sequence = u64;

/// Application-level notification delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppNotification {
    DidBecomeActive,
    WillResignActive,
    DidEnterBackground,
    WillTerminate,
}

impl AppNotification {
    pub const ALL: [AppNotification; 4] = [
        AppNotification::DidBecomeActive,
        AppNotification::WillResignActive,
        AppNotification::DidEnterBackground,
        AppNotification::WillTerminate,
    ];

    /// Conventional kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppNotification::DidBecomeActive => "did-become-active",
            AppNotification::WillResignActive => "will-resign-active",
            AppNotification::DidEnterBackground => "did-enter-background",
            AppNotification::WillTerminate => "will-terminate",
        }
    }

    /// Invoke the matching hook on `delegate`.
    pub fn deliver_to(self, delegate: &dyn ApplicationDelegate) {
        match self {
            AppNotification::DidBecomeActive => delegate.did_become_active(),
            AppNotification::WillResignActive => delegate.will_resign_active(),
            AppNotification::DidEnterBackground => delegate.did_enter_background(),
            AppNotification::WillTerminate => delegate.will_terminate(),
        }
    }
}

impl fmt::Display for AppNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppNotification {
    type Err = CliError;

    /// Accepts the kebab-case name plus the short aliases `active`,
    /// `resign`/`inactive`, `background` and `terminate`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "did-become-active" | "active" => Ok(AppNotification::DidBecomeActive),
            "will-resign-active" | "resign" | "inactive" => Ok(AppNotification::WillResignActive),
            "did-enter-background" | "background" => Ok(AppNotification::DidEnterBackground),
            "will-terminate" | "terminate" => Ok(AppNotification::WillTerminate),
            _ => Err(CliError::UnknownNotification(s.to_string())),
        }
    }
}

/// View-level notification delivered by the host for one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewNotification {
    ViewWillAppear,
    ViewDidAppear,
    ViewWillDisappear,
    ViewDidDisappear,
}

impl ViewNotification {
    pub const ALL: [ViewNotification; 4] = [
        ViewNotification::ViewWillAppear,
        ViewNotification::ViewDidAppear,
        ViewNotification::ViewWillDisappear,
        ViewNotification::ViewDidDisappear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewNotification::ViewWillAppear => "view-will-appear",
            ViewNotification::ViewDidAppear => "view-did-appear",
            ViewNotification::ViewWillDisappear => "view-will-disappear",
            ViewNotification::ViewDidDisappear => "view-did-disappear",
        }
    }

    /// Invoke the matching hook on `delegate`.
    pub fn deliver_to(self, delegate: &dyn ViewLifecycleDelegate) {
        match self {
            ViewNotification::ViewWillAppear => delegate.view_will_appear(),
            ViewNotification::ViewDidAppear => delegate.view_did_appear(),
            ViewNotification::ViewWillDisappear => delegate.view_will_disappear(),
            ViewNotification::ViewDidDisappear => delegate.view_did_disappear(),
        }
    }
}

impl fmt::Display for ViewNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewNotification {
    type Err = CliError;

    /// Accepts the kebab-case name with or without the `view-` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let name = normalized.strip_prefix("view-").unwrap_or(&normalized);
        match name {
            "will-appear" => Ok(ViewNotification::ViewWillAppear),
            "did-appear" => Ok(ViewNotification::ViewDidAppear),
            "will-disappear" => Ok(ViewNotification::ViewWillDisappear),
            "did-disappear" => Ok(ViewNotification::ViewDidDisappear),
            _ => Err(CliError::UnknownNotification(s.to_string())),
        }
    }
}

/// Publishes host notifications on four independent slots.
///
/// Install it as the host's application delegate. If the host already had a
/// delegate, hand it to [`LifecycleEventSource::set_forward_delegate`]: every
/// notification is forwarded to it first, then published.
pub struct LifecycleEventSource {
    did_become_active: Subject<Sequence>,
    will_resign_active: Subject<Sequence>,
    did_enter_background: Subject<Sequence>,
    will_terminate: Subject<Sequence>,
    sequence: AtomicU64,
    forward_to: Mutex<Option<Arc<dyn ApplicationDelegate>>>,
}

impl Default for LifecycleEventSource {
    fn default() -> Self {
        Self {
            did_become_active: Subject::new(),
            will_resign_active: Subject::new(),
            did_enter_background: Subject::new(),
            will_terminate: Subject::new(),
            sequence: AtomicU64::new(0),
            forward_to: Mutex::new(None),
        }
    }
}

impl fmt::Debug for LifecycleEventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleEventSource")
            .field("sequence", &self.current_sequence())
            .field("forwarding", &lock(&self.forward_to).is_some())
            .finish()
    }
}

impl LifecycleEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward every notification to `delegate` before publishing it.
    pub fn set_forward_delegate(&self, delegate: Arc<dyn ApplicationDelegate>) {
        *lock(&self.forward_to) = Some(delegate);
    }

    /// Stop forwarding, returning the previous target.
    pub fn take_forward_delegate(&self) -> Option<Arc<dyn ApplicationDelegate>> {
        lock(&self.forward_to).take()
    }

    /// Publish one notification.
    pub fn notify(&self, notification: AppNotification) {
        let sequence = self.sequence.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::debug!(notification = %notification, sequence, "lifecycle notification");

        let forward = lock(&self.forward_to).clone();
        if let Some(delegate) = forward {
            notification.deliver_to(delegate.as_ref());
        }

        self.subject(notification).on_next(sequence);
    }

    /// Sequence number of the most recent notification (0 before any).
    pub fn current_sequence(&self) -> Sequence {
        self.sequence.load(Ordering::Acquire)
    }

    /// Payload-free stream of one slot.
    pub fn slot(&self, notification: AppNotification) -> Observable<()> {
        self.stamped(notification).map_to_unit()
    }

    /// Stream of one slot carrying each notification's sequence number.
    pub(crate) fn stamped(&self, notification: AppNotification) -> Observable<Sequence> {
        self.subject(notification).as_observable()
    }

    fn subject(&self, notification: AppNotification) -> &Subject<Sequence> {
        match notification {
            AppNotification::DidBecomeActive => &self.did_become_active,
            AppNotification::WillResignActive => &self.will_resign_active,
            AppNotification::DidEnterBackground => &self.did_enter_background,
            AppNotification::WillTerminate => &self.will_terminate,
        }
    }
}

impl ApplicationDelegate for LifecycleEventSource {
    fn did_become_active(&self) {
        self.notify(AppNotification::DidBecomeActive);
    }

    fn will_resign_active(&self) {
        self.notify(AppNotification::WillResignActive);
    }

    fn did_enter_background(&self) {
        self.notify(AppNotification::DidEnterBackground);
    }

    fn will_terminate(&self) {
        self.notify(AppNotification::WillTerminate);
    }
}
