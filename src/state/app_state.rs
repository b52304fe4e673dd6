//! Application state classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::events::{AppNotification, LifecycleEventSource, Sequence};
use crate::observable::Observable;

/// Canonical application state.
///
/// "Not running" and "suspended" have no host notification and are not
/// represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppState {
    /// Running in the foreground and receiving events.
    Active,
    /// In the foreground but not receiving events: an incoming call, a
    /// system prompt, the notification center.
    Inactive,
    /// In the background because the user left the app.
    Background,
    /// About to be terminated.
    Terminated,
}

impl AppState {
    /// The fixed 1:1 classification of raw notifications.
    pub fn from_notification(notification: AppNotification) -> Self {
        match notification {
            AppNotification::DidBecomeActive => AppState::Active,
            AppNotification::WillResignActive => AppState::Inactive,
            AppNotification::DidEnterBackground => AppState::Background,
            AppNotification::WillTerminate => AppState::Terminated,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::Active => "active",
            AppState::Inactive => "inactive",
            AppState::Background => "background",
            AppState::Terminated => "terminated",
        }
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified views of a [`LifecycleEventSource`].
///
/// All streams are hot: they deliver only notifications published after
/// subscription, in publication order, and never complete.
#[derive(Debug, Clone)]
pub struct AppStateStream {
    did_become_active: Observable<(Sequence, AppState)>,
    will_resign_active: Observable<(Sequence, AppState)>,
    did_enter_background: Observable<(Sequence, AppState)>,
    will_terminate: Observable<(Sequence, AppState)>,
}

impl AppStateStream {
    pub fn new(source: &LifecycleEventSource) -> Self {
        let classify = |notification: AppNotification| {
            let state = AppState::from_notification(notification);
            source.stamped(notification).map(move |sequence| (sequence, state))
        };
        Self {
            did_become_active: classify(AppNotification::DidBecomeActive),
            will_resign_active: classify(AppNotification::WillResignActive),
            did_enter_background: classify(AppNotification::DidEnterBackground),
            will_terminate: classify(AppNotification::WillTerminate),
        }
    }

    /// Every state, one per raw notification.
    pub fn app_state(&self) -> Observable<AppState> {
        unstamp(&self.stamped_app_state())
    }

    pub fn did_become_active(&self) -> Observable<AppState> {
        unstamp(&self.did_become_active)
    }

    pub fn will_resign_active(&self) -> Observable<AppState> {
        unstamp(&self.will_resign_active)
    }

    pub fn did_enter_background(&self) -> Observable<AppState> {
        unstamp(&self.did_enter_background)
    }

    pub fn will_terminate(&self) -> Observable<AppState> {
        unstamp(&self.will_terminate)
    }

    pub(crate) fn stamped_app_state(&self) -> Observable<(Sequence, AppState)> {
        Observable::merge([
            self.did_become_active.clone(),
            self.will_resign_active.clone(),
            self.did_enter_background.clone(),
            self.will_terminate.clone(),
        ])
    }

    /// Active and Background only, stamped. Input of the open detector.
    pub(crate) fn stamped_foreground_transitions(&self) -> Observable<(Sequence, AppState)> {
        Observable::merge([
            self.did_become_active.clone(),
            self.did_enter_background.clone(),
        ])
    }
}

fn unstamp(stamped: &Observable<(Sequence, AppState)>) -> Observable<AppState> {
    stamped.map(|(_, state)| state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observable::Recorder;

    #[test]
    fn test_classification_is_one_to_one() {
        let states: Vec<AppState> = AppNotification::ALL
            .iter()
            .map(|n| AppState::from_notification(*n))
            .collect();
        assert_eq!(
            states,
            vec![
                AppState::Active,
                AppState::Inactive,
                AppState::Background,
                AppState::Terminated
            ]
        );
    }

    #[test]
    fn test_app_state_follows_notification_order() {
        let source = LifecycleEventSource::new();
        let stream = AppStateStream::new(&source);
        let recorder = Recorder::new();
        let _sub = recorder.record(&stream.app_state());

        for notification in [
            AppNotification::WillTerminate,
            AppNotification::DidBecomeActive,
            AppNotification::DidBecomeActive,
            AppNotification::DidEnterBackground,
        ] {
            source.notify(notification);
        }

        assert_eq!(
            recorder.values(),
            vec![
                AppState::Terminated,
                AppState::Active,
                AppState::Active,
                AppState::Background
            ]
        );
    }

    #[test]
    fn test_per_state_streams_filter_their_slot() {
        let source = LifecycleEventSource::new();
        let stream = AppStateStream::new(&source);
        let resign = Recorder::new();
        let _sub = resign.record(&stream.will_resign_active());

        for notification in AppNotification::ALL {
            source.notify(notification);
        }

        assert_eq!(resign.values(), vec![AppState::Inactive]);
    }

    #[test]
    fn test_late_subscriber_sees_only_later_states() {
        let source = LifecycleEventSource::new();
        let stream = AppStateStream::new(&source);
        let early = Recorder::new();
        let late = Recorder::new();

        let _e = early.record(&stream.app_state());
        source.notify(AppNotification::DidBecomeActive);
        let _l = late.record(&stream.app_state());
        source.notify(AppNotification::DidEnterBackground);

        assert_eq!(early.values(), vec![AppState::Active, AppState::Background]);
        assert_eq!(late.values(), vec![AppState::Background]);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(AppState::Background.to_string(), "background");
    }
}
