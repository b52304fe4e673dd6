//! "User opened the app" detection.

use crate::events::Sequence;
use crate::observable::Observable;
use crate::state::{AppState, AppStateStream};

/// Derives open pulses from the app state stream.
///
/// Only Active and Background feed the detector. Consecutive duplicates are
/// suppressed per subscription and only Active survives, so a pulse fires on
/// the first Active a subscription sees and on every Active that follows a
/// Background. An Active after a mere Inactive (control center, system
/// prompt, phone call) never fires: Inactive does not reach the detector,
/// so the detector sees Active twice in a row.
#[derive(Debug, Clone)]
pub struct OpenDetector {
    pulses: Observable<Sequence>,
}

impl OpenDetector {
    pub fn new(states: &AppStateStream) -> Self {
        let pulses = states
            .stamped_foreground_transitions()
            .distinct_until_changed_by_key(|(_, state)| *state)
            .filter(|(_, state)| *state == AppState::Active)
            .map(|(sequence, _)| {
                tracing::debug!(sequence, "app opened");
                sequence
            });
        Self { pulses }
    }

    /// One `()` per open.
    pub fn did_open_app(&self) -> Observable<()> {
        self.pulses.map_to_unit()
    }

    /// Open pulses stamped with the notification that triggered them.
    pub fn pulses(&self) -> &Observable<Sequence> {
        &self.pulses
    }
}
