//! Facade wiring the whole pipeline to one store and one build.
//!
//! [`AppLifecycle`] owns the event source and hands out every derived
//! stream. Install it (or [`AppLifecycle::event_source`]) as the host's
//! application delegate.

use std::sync::Arc;

use crate::config::StorageKeys;
use crate::error::StoreError;
use crate::events::{AppNotification, LifecycleEventSource, Sequence};
use crate::observable::Observable;
use crate::signals::{self, OpenDetector, Persistence, PulseMemo};
use crate::state::{AppState, AppStateStream};
use crate::traits::{ApplicationDelegate, BuildInfo, KeyValueStore};

/// Application lifecycle streams and the signals derived from them.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use appstate::adapters::mock::{InMemoryStore, ScriptedHost};
/// use appstate::adapters::StaticBuildInfo;
/// use appstate::app::AppLifecycle;
/// use appstate::observable::Recorder;
///
/// let lifecycle = AppLifecycle::new(
///     Arc::new(InMemoryStore::new()),
///     Arc::new(StaticBuildInfo::new("1.0")),
/// );
/// let counts = Recorder::new();
/// let _sub = counts.record(&lifecycle.open_count());
///
/// ScriptedHost::open_sequence().play(&lifecycle);
/// assert_eq!(counts.values(), vec![1, 2, 3]);
/// ```
pub struct AppLifecycle {
    source: Arc<LifecycleEventSource>,
    states: AppStateStream,
    opens: OpenDetector,
    persistence: Persistence,
    build: Arc<dyn BuildInfo>,
    first_launch_memo: Arc<PulseMemo<bool>>,
    new_version_memo: Arc<PulseMemo<bool>>,
    open_count_memo: Arc<PulseMemo<i64>>,
}

impl std::fmt::Debug for AppLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppLifecycle")
            .field("source", &self.source)
            .field("keys", self.persistence.keys())
            .finish_non_exhaustive()
    }
}

impl AppLifecycle {
    /// Pipeline with the default `RxAppState_*` keys.
    pub fn new(store: Arc<dyn KeyValueStore>, build: Arc<dyn BuildInfo>) -> Self {
        Self::with_keys(store, build, StorageKeys::default())
    }

    pub fn with_keys(
        store: Arc<dyn KeyValueStore>,
        build: Arc<dyn BuildInfo>,
        keys: StorageKeys,
    ) -> Self {
        let source = Arc::new(LifecycleEventSource::new());
        let states = AppStateStream::new(&source);
        let opens = OpenDetector::new(&states);
        Self {
            source,
            states,
            opens,
            persistence: Persistence::new(store, keys),
            build,
            first_launch_memo: Arc::new(PulseMemo::new()),
            new_version_memo: Arc::new(PulseMemo::new()),
            open_count_memo: Arc::new(PulseMemo::new()),
        }
    }

    /// Forward every notification to the host's previous delegate before
    /// publishing it.
    pub fn set_forward_delegate(&self, delegate: Arc<dyn ApplicationDelegate>) {
        self.source.set_forward_delegate(delegate);
    }

    pub fn event_source(&self) -> &Arc<LifecycleEventSource> {
        &self.source
    }

    pub fn notify(&self, notification: AppNotification) {
        self.source.notify(notification);
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        self.persistence.store()
    }

    pub fn keys(&self) -> &StorageKeys {
        self.persistence.keys()
    }

    pub fn app_state(&self) -> Observable<AppState> {
        self.states.app_state()
    }

    pub fn did_become_active(&self) -> Observable<AppState> {
        self.states.did_become_active()
    }

    pub fn will_resign_active(&self) -> Observable<AppState> {
        self.states.will_resign_active()
    }

    pub fn did_enter_background(&self) -> Observable<AppState> {
        self.states.did_enter_background()
    }

    pub fn will_terminate(&self) -> Observable<AppState> {
        self.states.will_terminate()
    }

    /// One `()` each time the user opens the app.
    pub fn did_open_app(&self) -> Observable<()> {
        self.opens.did_open_app()
    }

    /// Number of times the app has been opened, including this one.
    ///
    /// Every subscription increments the stored counter on its own; see
    /// [`AppLifecycle::shared_open_count`].
    pub fn open_count(&self) -> Observable<i64> {
        signals::open_count(self.pulses(), self.persistence.clone())
    }

    /// Like [`AppLifecycle::open_count`], but all subscriptions share one
    /// increment per open.
    pub fn shared_open_count(&self) -> Observable<i64> {
        signals::shared_open_count(
            self.pulses(),
            self.persistence.clone(),
            Arc::clone(&self.open_count_memo),
        )
    }

    /// `true` on the very first open, `false` afterwards.
    pub fn is_first_launch(&self) -> Observable<bool> {
        signals::is_first_launch(
            self.pulses(),
            self.persistence.clone(),
            Arc::clone(&self.first_launch_memo),
        )
    }

    /// Emits once, at subscription, if the app was never launched before.
    pub fn first_launch_only(&self) -> Observable<()> {
        signals::first_launch_only(self.persistence.clone())
    }

    /// `true` on the first open after a version change, `false` otherwise.
    pub fn is_first_launch_of_new_version(&self) -> Observable<bool> {
        signals::is_first_launch_of_new_version(
            self.pulses(),
            self.persistence.clone(),
            Arc::clone(&self.build),
            Arc::clone(&self.new_version_memo),
        )
    }

    /// Emits once, at subscription, if the app was upgraded since the last
    /// recorded launch.
    pub fn first_launch_of_new_version_only(&self) -> Observable<()> {
        signals::first_launch_of_new_version_only(
            self.persistence.clone(),
            Arc::clone(&self.build),
        )
    }

    /// Remove every persisted key and forget memoized pulse results.
    pub fn reset(&self) -> Result<(), StoreError> {
        self.persistence.critical_section(|store| {
            for key in self.persistence.keys().all() {
                store.remove(key)?;
            }
            Ok::<(), StoreError>(())
        })?;
        self.first_launch_memo.clear();
        self.new_version_memo.clear();
        self.open_count_memo.clear();
        tracing::info!("lifecycle keys reset");
        Ok(())
    }

    fn pulses(&self) -> &Observable<Sequence> {
        self.opens.pulses()
    }
}

impl ApplicationDelegate for AppLifecycle {
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
