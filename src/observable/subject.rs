//! Hot multicast source.

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use super::event::Observer;
use super::observable::Observable;
use super::subscription::Subscription;
use super::lock;

struct Entry<T> {
    id: u64,
    subscription: Subscription,
    observer: Observer<T>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            subscription: self.subscription.clone(),
            observer: self.observer.clone(),
        }
    }
}

struct SubjectState<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

/// A hot stream that multicasts pushed values to its current observers.
///
/// Delivery iterates over a snapshot of the observer list taken when the
/// value is pushed, with the internal lock released. Observers may therefore
/// subscribe, dispose or push re-entrantly. An observer attached during a
/// delivery first sees the next value; an observer disposed during a delivery
/// is skipped for the rest of it.
pub struct Subject<T> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }
}

impl<T> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("observers", &lock(&self.state).entries.len())
            .finish()
    }
}

impl<T: Clone + Send + Sync + 'static> Subject<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a value to every attached observer.
    pub fn on_next(&self, value: T) {
        let snapshot: Vec<Entry<T>> = lock(&self.state).entries.clone();
        for entry in snapshot {
            if entry.subscription.is_disposed() {
                continue;
            }
            entry.observer.on_next(value.clone());
        }
    }

    /// Number of currently attached observers.
    pub fn observer_count(&self) -> usize {
        lock(&self.state).entries.len()
    }

    /// View this subject as an observable.
    ///
    /// The observable only holds a weak reference: once the subject is
    /// dropped, new subscriptions attach to nothing.
    pub fn as_observable(&self) -> Observable<T> {
        let weak = Arc::downgrade(&self.state);
        Observable::new(move |observer| attach(&weak, observer))
    }
}

fn attach<T>(weak: &Weak<Mutex<SubjectState<T>>>, observer: Observer<T>) -> Subscription
where
    T: Send + Sync + 'static,
{
    let Some(state) = weak.upgrade() else {
        return Subscription::empty();
    };
    let mut guard = lock(&state);
    let id = guard.next_id;
    guard.next_id += 1;

    let detach = Weak::clone(weak);
    let subscription = Subscription::new(move || {
        if let Some(state) = detach.upgrade() {
            lock(&state).entries.retain(|entry| entry.id != id);
        }
    });
    guard.entries.push(Entry {
        id,
        subscription: subscription.clone(),
        observer,
    });
    subscription
}
