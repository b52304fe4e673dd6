//! Persistent open counter.

use std::sync::Arc;

use super::memo::PulseMemo;
use super::{surface, Persistence};
use crate::error::StoreError;
use crate::events::Sequence;
use crate::observable::Observable;

/// The value stored after `previous`: one more, never negative, saturating
/// at `i64::MAX`.
pub fn next_count(previous: i64) -> i64 {
    previous.max(0).saturating_add(1)
}

/// Read `key`, store the next count and return it.
pub fn increment_counter(persistence: &Persistence, key: &str) -> Result<i64, StoreError> {
    persistence.critical_section(|store| {
        let previous = store.get_int(key)?;
        let next = next_count(previous);
        if next != previous {
            store.set_int(key, next)?;
        }
        Ok(next)
    })
}

/// Running open count, one value per open pulse.
///
/// The increment runs inside each subscription's mapping: with two
/// subscriptions attached, one pulse increments the stored counter twice
/// and the subscriptions observe consecutive values. Use
/// [`shared_open_count`] for one increment per pulse.
pub fn open_count(pulses: &Observable<Sequence>, persistence: Persistence) -> Observable<i64> {
    pulses.try_map(move |sequence| {
        let key = persistence.keys().open_count.as_str();
        let count = increment_counter(&persistence, key).map_err(surface("open_count"))?;
        tracing::debug!(sequence, count, "open count incremented");
        Ok(count)
    })
}

/// Running open count incremented once per pulse, whatever the number of
/// subscriptions sharing `memo`.
pub fn shared_open_count(
    pulses: &Observable<Sequence>,
    persistence: Persistence,
    memo: Arc<PulseMemo<i64>>,
) -> Observable<i64> {
    pulses.try_map(move |sequence| {
        memo.get_or_try_insert_with(sequence, || {
            increment_counter(&persistence, &persistence.keys().open_count)
        })
        .map_err(surface("shared_open_count"))
    })
}
