//! Cold observables and their operators.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::event::{Event, Observer};
use super::subscription::Subscription;
use super::lock;
use crate::error::StreamError;

type SubscribeFn<T> = dyn Fn(Observer<T>) -> Subscription + Send + Sync;

/// A stream description.
///
/// Subscribing runs the operator chain from scratch: per-subscription state
/// (the last value seen by `distinct_until_changed`, side effects inside
/// `map`) is never shared between two subscriptions of the same observable.
/// Sharing only happens at the hot [`Subject`](super::Subject) at the root.
pub struct Observable<T> {
    subscribe_fn: Arc<SubscribeFn<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            subscribe_fn: Arc::clone(&self.subscribe_fn),
        }
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable").finish_non_exhaustive()
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// Build an observable from its subscribe function.
    ///
    /// The function attaches `observer` to some source and returns the
    /// subscription that detaches it.
    pub fn new<F>(subscribe: F) -> Self
    where
        F: Fn(Observer<T>) -> Subscription + Send + Sync + 'static,
    {
        Self {
            subscribe_fn: Arc::new(subscribe),
        }
    }

    /// Completes immediately without emitting.
    pub fn empty() -> Self {
        Self::new(|observer| {
            observer.on_completed();
            Subscription::empty()
        })
    }

    /// Emits `value` once, then completes.
    pub fn just(value: T) -> Self {
        Self::new(move |observer| {
            observer.on_next(value.clone());
            observer.on_completed();
            Subscription::empty()
        })
    }

    /// Single-shot stream evaluated at subscription time.
    ///
    /// `evaluate` runs once per subscription. `Ok(Some(v))` emits `v` and
    /// completes, `Ok(None)` completes without emitting, `Err` errors.
    pub fn deferred<F>(evaluate: F) -> Self
    where
        F: Fn() -> Result<Option<T>, StreamError> + Send + Sync + 'static,
    {
        Self::new(move |observer| {
            match evaluate() {
                Ok(Some(value)) => {
                    observer.on_next(value);
                    observer.on_completed();
                }
                Ok(None) => observer.on_completed(),
                Err(err) => observer.on_error(err),
            }
            Subscription::empty()
        })
    }

    /// Interleave several sources in arrival order.
    ///
    /// Errors are forwarded immediately; completion is forwarded once every
    /// source has completed.
    pub fn merge<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = Observable<T>>,
    {
        let sources: Vec<Observable<T>> = sources.into_iter().collect();
        Self::new(move |observer| {
            let remaining = Arc::new(AtomicUsize::new(sources.len()));
            if sources.is_empty() {
                observer.on_completed();
                return Subscription::empty();
            }
            let subscriptions = sources
                .iter()
                .map(|source| {
                    let observer = observer.clone();
                    let remaining = Arc::clone(&remaining);
                    source.attach(Observer::new(move |event| match event {
                        Event::Completed => {
                            if remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
                                observer.on_completed();
                            }
                        }
                        other => observer.on(other),
                    }))
                })
                .collect();
            Subscription::composite(subscriptions)
        })
    }

    /// Transform each value.
    pub fn map<U, F>(&self, f: F) -> Observable<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Observable::new(move |observer: Observer<U>| {
            let f = Arc::clone(&f);
            source.attach(Observer::new(move |event: Event<T>| {
                observer.on(event.map(|value| f(value)))
            }))
        })
    }

    /// Transform each value with a fallible function.
    ///
    /// The first `Err` is delivered as [`Event::Error`] and stops this
    /// subscription: `f` is never called again for it.
    pub fn try_map<U, F>(&self, f: F) -> Observable<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> Result<U, StreamError> + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Observable::new(move |observer: Observer<U>| {
            let f = Arc::clone(&f);
            let stopped = Arc::new(AtomicBool::new(false));
            source.attach(Observer::new(move |event: Event<T>| {
                if stopped.load(Ordering::Acquire) {
                    return;
                }
                match event {
                    Event::Next(value) => match f(value) {
                        Ok(mapped) => observer.on_next(mapped),
                        Err(err) => {
                            stopped.store(true, Ordering::Release);
                            observer.on_error(err);
                        }
                    },
                    Event::Error(err) => {
                        stopped.store(true, Ordering::Release);
                        observer.on_error(err);
                    }
                    Event::Completed => {
                        stopped.store(true, Ordering::Release);
                        observer.on_completed();
                    }
                }
            }))
        })
    }

    /// Keep only values matching `predicate`.
    pub fn filter<P>(&self, predicate: P) -> Observable<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let predicate = Arc::new(predicate);
        Observable::new(move |observer: Observer<T>| {
            let predicate = Arc::clone(&predicate);
            source.attach(Observer::new(move |event: Event<T>| match event {
                Event::Next(value) if !predicate(&value) => {}
                other => observer.on(other),
            }))
        })
    }

    /// Drop values whose key equals the key of the previous value seen by
    /// this subscription. The first value always passes.
    pub fn distinct_until_changed_by_key<K, F>(&self, key: F) -> Observable<T>
    where
        K: PartialEq + Send + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        let source = self.clone();
        let key = Arc::new(key);
        Observable::new(move |observer: Observer<T>| {
            let key = Arc::clone(&key);
            let last: Arc<Mutex<Option<K>>> = Arc::new(Mutex::new(None));
            source.attach(Observer::new(move |event: Event<T>| match event {
                Event::Next(value) => {
                    let current = key(&value);
                    let changed = {
                        let mut last = lock(&last);
                        let changed = last.as_ref() != Some(&current);
                        if changed {
                            *last = Some(current);
                        }
                        changed
                    };
                    if changed {
                        observer.on_next(value);
                    }
                }
                other => observer.on(other),
            }))
        })
    }

    /// Replace every value with `()`.
    pub fn map_to_unit(&self) -> Observable<()> {
        self.map(|_| ())
    }

    /// Subscribe with a handler receiving every event.
    ///
    /// After a terminal event the handler is never called again and the
    /// upstream chain is detached.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(Event<T>) + Send + Sync + 'static,
    {
        let upstream: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let outer = {
            let upstream = Arc::clone(&upstream);
            Subscription::new(move || {
                let taken = lock(&upstream).take();
                if let Some(subscription) = taken {
                    subscription.dispose();
                }
            })
        };

        let stopped = Arc::new(AtomicBool::new(false));
        let guard = outer.clone();
        let observer = Observer::new(move |event: Event<T>| {
            if guard.is_disposed() || stopped.load(Ordering::Acquire) {
                return;
            }
            let terminal = event.is_terminal();
            if terminal {
                stopped.store(true, Ordering::Release);
            }
            handler(event);
            if terminal {
                guard.dispose();
            }
        });

        let subscription = self.attach(observer);
        *lock(&upstream) = Some(subscription);
        if outer.is_disposed() {
            // Terminated (or disposed) while attaching: the teardown already
            // ran against an empty slot.
            let taken = lock(&upstream).take();
            if let Some(subscription) = taken {
                subscription.dispose();
            }
        }
        outer
    }

    /// Subscribe to values only, ignoring errors and completion.
    pub fn subscribe_next<F>(&self, on_next: F) -> Subscription
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if let Event::Next(value) = event {
                on_next(value);
            }
        })
    }

    fn attach(&self, observer: Observer<T>) -> Subscription {
        (self.subscribe_fn)(observer)
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Observable<T> {
    /// Suppress consecutive duplicate values, per subscription.
    pub fn distinct_until_changed(&self) -> Observable<T> {
        self.distinct_until_changed_by_key(T::clone)
    }
}
