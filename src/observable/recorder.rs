//! Event recorder for tests and examples.

use std::sync::{Arc, Mutex};

use super::event::Event;
use super::observable::Observable;
use super::subscription::Subscription;
use super::lock;
use crate::error::StreamError;

/// Collects every event delivered to its subscriptions.
#[derive(Debug)]
pub struct Recorder<T> {
    events: Arc<Mutex<Vec<Event<T>>>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `observable`, recording into this recorder.
    pub fn record(&self, observable: &Observable<T>) -> Subscription {
        let events = Arc::clone(&self.events);
        observable.subscribe(move |event| lock(&events).push(event))
    }

    pub fn events(&self) -> Vec<Event<T>> {
        lock(&self.events).clone()
    }

    /// Values of all recorded `Next` events, in order.
    pub fn values(&self) -> Vec<T> {
        lock(&self.events)
            .iter()
            .filter_map(|event| match event {
                Event::Next(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn is_completed(&self) -> bool {
        lock(&self.events)
            .iter()
            .any(|event| matches!(event, Event::Completed))
    }

    pub fn error(&self) -> Option<StreamError> {
        lock(&self.events).iter().find_map(|event| match event {
            Event::Error(err) => Some(err.clone()),
            _ => None,
        })
    }

    pub fn clear(&self) {
        lock(&self.events).clear();
    }
}
