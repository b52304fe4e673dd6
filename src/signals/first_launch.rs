//! First launch detection.

use std::sync::Arc;

use super::memo::PulseMemo;
use super::{surface, Persistence};
use crate::error::StoreError;
use crate::events::Sequence;
use crate::observable::Observable;

/// Set the write-once flag at `key`. Returns true if this call set it.
pub fn claim_flag(persistence: &Persistence, key: &str) -> Result<bool, StoreError> {
    persistence.critical_section(|store| {
        if store.get_bool(key)? {
            return Ok(false);
        }
        store.set_bool(key, true)?;
        Ok(true)
    })
}

/// `true` on the first open pulse ever recorded in the store, `false` on
/// every later one.
///
/// Subscriptions sharing `memo` observe the same value for the same pulse.
pub fn is_first_launch(
    pulses: &Observable<Sequence>,
    persistence: Persistence,
    memo: Arc<PulseMemo<bool>>,
) -> Observable<bool> {
    pulses.try_map(move |sequence| {
        let first = memo
            .get_or_try_insert_with(sequence, || {
                claim_flag(&persistence, &persistence.keys().is_first_launch)
            })
            .map_err(surface("is_first_launch"))?;
        if first {
            tracing::info!(sequence, "first launch");
        }
        Ok(first)
    })
}

/// Emits once and completes if the app was never launched before;
/// completes without emitting otherwise.
///
/// Evaluated when subscribed, against its own flag; open pulses play no
/// part.
pub fn first_launch_only(persistence: Persistence) -> Observable<()> {
    Observable::deferred(move || {
        let first = claim_flag(&persistence, &persistence.keys().first_launch_only)
            .map_err(surface("first_launch_only"))?;
        Ok(first.then_some(()))
    })
}
