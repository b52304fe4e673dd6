//! Stream events and observers.

use std::fmt;
use std::sync::Arc;

use crate::error::StreamError;

/// A single notification delivered to an observer.
///
/// `Error` and `Completed` are terminal: once an observer receives one of
/// them, its subscription is disposed and nothing else is delivered to it.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<T> {
    /// A new value.
    Next(T),
    /// The subscription failed.
    Error(StreamError),
    /// The stream finished normally.
    Completed,
}

impl<T> Event<T> {
    /// Returns true for `Error` and `Completed`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Event::Next(_))
    }

    /// Transform the value of a `Next` event, passing terminal events through.
    pub fn map<U, F>(self, f: F) -> Event<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Event::Next(value) => Event::Next(f(value)),
            Event::Error(err) => Event::Error(err),
            Event::Completed => Event::Completed,
        }
    }

    /// The value of a `Next` event.
    pub fn into_value(self) -> Option<T> {
        match self {
            Event::Next(value) => Some(value),
            _ => None,
        }
    }
}

/// Receiving end of a stream.
///
/// Cheap to clone; clones share the same handler.
pub struct Observer<T> {
    handler: Arc<dyn Fn(Event<T>) + Send + Sync>,
}

impl<T> Clone for Observer<T> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T> fmt::Debug for Observer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer").finish_non_exhaustive()
    }
}

impl<T> Observer<T> {
    /// Wrap a handler closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(Event<T>) + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Deliver an event.
    pub fn on(&self, event: Event<T>) {
        (self.handler)(event);
    }

    pub fn on_next(&self, value: T) {
        self.on(Event::Next(value));
    }

    pub fn on_error(&self, error: StreamError) {
        self.on(Event::Error(error));
    }

    pub fn on_completed(&self) {
        self.on(Event::Completed);
    }
}
