//! Push-based stream primitives.
//!
//! A small combinator library covering exactly what the lifecycle pipeline
//! needs: hot multicast sources, per-subscription operator chains and
//! idempotent disposal.
//!
//! ## Core Types
//!
//! - [`Subject<T>`]: a hot source. Values pushed with [`Subject::on_next`]
//!   are delivered synchronously to every attached observer, in attachment
//!   order. Nothing is replayed to late subscribers.
//! - [`Observable<T>`]: a description of how to subscribe. Operators such as
//!   [`Observable::map`] and [`Observable::distinct_until_changed`] run once
//!   per subscription, so their state and side effects are never shared.
//! - [`Subscription`]: disposal handle returned by every subscribe call.
//! - [`DisposeBag`]: disposes a group of subscriptions when dropped.
//!
//! ## Usage
//!
//! ```rust
//! use appstate::observable::{Observable, Subject};
//!
//! let subject = Subject::new();
//! let evens = subject.as_observable().filter(|n: &i32| n % 2 == 0);
//!
//! let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! let sub = evens.subscribe_next(move |n| sink.lock().unwrap().push(n));
//!
//! subject.on_next(1);
//! subject.on_next(2);
//! sub.dispose();
//! subject.on_next(4);
//!
//! assert_eq!(*seen.lock().unwrap(), vec![2]);
//! ```

mod event;
mod observable;
mod recorder;
mod subject;
mod subscription;

pub use event::{Event, Observer};
pub use observable::Observable;
pub use recorder::Recorder;
pub use subject::Subject;
pub use subscription::{DisposeBag, Subscription};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the guard if a panicking observer poisoned it.
///
/// Every mutex in this crate guards plain bookkeeping that stays consistent
/// across a panic, so the poison flag carries no information.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
