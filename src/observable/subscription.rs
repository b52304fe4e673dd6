//! Disposal handles.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::lock;

type Teardown = Box<dyn FnOnce() + Send>;

struct SubscriptionInner {
    disposed: AtomicBool,
    teardown: Mutex<Option<Teardown>>,
}

/// Handle to an attached observer.
///
/// Disposing stops delivery immediately: the disposed flag is set before the
/// teardown runs, and every source checks it before invoking an observer.
/// Disposing twice is a no-op. Clones share the same state.
#[derive(Clone)]
pub struct Subscription {
    inner: Arc<SubscriptionInner>,
}

impl Subscription {
    /// Create a subscription that runs `teardown` on first disposal.
    pub fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            inner: Arc::new(SubscriptionInner {
                disposed: AtomicBool::new(false),
                teardown: Mutex::new(Some(Box::new(teardown))),
            }),
        }
    }

    /// A subscription with nothing to tear down.
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(SubscriptionInner {
                disposed: AtomicBool::new(false),
                teardown: Mutex::new(None),
            }),
        }
    }

    /// A subscription that disposes all of `subscriptions` together.
    pub fn composite(subscriptions: Vec<Subscription>) -> Self {
        Self::new(move || {
            for subscription in subscriptions {
                subscription.dispose();
            }
        })
    }

    /// Detach the observer. Idempotent.
    pub fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        let teardown = lock(&self.inner.teardown).take();
        if let Some(teardown) = teardown {
            teardown();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }

    /// Hand the subscription to `bag`, tying its lifetime to the bag's.
    pub fn disposed_by(self, bag: &DisposeBag) {
        bag.insert(self);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// A group of subscriptions disposed together when the bag is dropped.
///
/// Replace a bag with a fresh one to detach everything it holds, the usual
/// pattern for view-scoped bindings.
#[derive(Default)]
pub struct DisposeBag {
    subscriptions: Mutex<Vec<Subscription>>,
}

impl DisposeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscription. If the bag has already been emptied by
    /// [`DisposeBag::dispose_all`], the subscription is kept until the next
    /// disposal or drop.
    pub fn insert(&self, subscription: Subscription) {
        lock(&self.subscriptions).push(subscription);
    }

    pub fn len(&self) -> usize {
        lock(&self.subscriptions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispose and forget every held subscription.
    pub fn dispose_all(&self) {
        let subscriptions = std::mem::take(&mut *lock(&self.subscriptions));
        for subscription in subscriptions {
            subscription.dispose();
        }
    }
}

impl Drop for DisposeBag {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

impl fmt::Debug for DisposeBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisposeBag").field("len", &self.len()).finish()
    }
}
