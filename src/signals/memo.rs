//! Once-per-notification evaluation.

use std::fmt;
use std::sync::Mutex;

use crate::events::Sequence;
use crate::observable::lock;

/// Caches the result computed for the most recent notification.
///
/// Subscriptions reacting to the same notification share one evaluation:
/// the first caller runs the side effect, later callers with the same
/// sequence number get the cached value.
pub struct PulseMemo<T> {
    last: Mutex<Option<(Sequence, T)>>,
}

impl<T> Default for PulseMemo<T> {
    fn default() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }
}

impl<T> fmt::Debug for PulseMemo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sequence = lock(&self.last).as_ref().map(|(sequence, _)| *sequence);
        f.debug_struct("PulseMemo").field("sequence", &sequence).finish()
    }
}

impl<T: Clone> PulseMemo<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value cached for `sequence`, or compute and cache it.
    ///
    /// Errors are not cached: the next caller for the same sequence
    /// evaluates again.
    pub fn get_or_try_insert_with<E, F>(&self, sequence: Sequence, evaluate: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mut last = lock(&self.last);
        if let Some((cached, value)) = last.as_ref() {
            if *cached == sequence {
                return Ok(value.clone());
            }
        }
        let value = evaluate()?;
        *last = Some((sequence, value.clone()));
        Ok(value)
    }

    /// Forget the cached value.
    pub fn clear(&self) {
        *lock(&self.last) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_same_sequence_evaluates_once() {
        let memo = PulseMemo::new();
        let calls = Cell::new(0);
        let evaluate = || {
            calls.set(calls.get() + 1);
            Ok::<_, ()>(calls.get())
        };

        assert_eq!(memo.get_or_try_insert_with(1, evaluate), Ok(1));
        assert_eq!(memo.get_or_try_insert_with(1, evaluate), Ok(1));
        assert_eq!(memo.get_or_try_insert_with(2, evaluate), Ok(2));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let memo: PulseMemo<bool> = PulseMemo::new();
        assert_eq!(memo.get_or_try_insert_with(5, || Err("down")), Err("down"));
        assert_eq!(memo.get_or_try_insert_with(5, || Ok::<_, &str>(true)), Ok(true));
    }

    #[test]
    fn test_clear_forces_reevaluation() {
        let memo = PulseMemo::new();
        let _ = memo.get_or_try_insert_with(1, || Ok::<_, ()>("a"));
        memo.clear();
        assert_eq!(memo.get_or_try_insert_with(1, || Ok::<_, ()>("b")), Ok("b"));
    }
}
