//! Application upgrade detection.
//!
//! The last launched version is kept under one key. Each evaluation compares
//! it with the running build's version and overwrites it when they differ,
//! so a downgrade or an unversioned build is recorded too, but only a move
//! from one recorded version to another reports an upgrade.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::memo::PulseMemo;
use super::{surface, Persistence};
use crate::error::StoreError;
use crate::events::Sequence;
use crate::observable::Observable;
use crate::traits::{current_version, BuildInfo};

/// How the running version relates to the last recorded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    /// Nothing recorded yet (fresh install).
    NoRecord,
    SameVersion,
    /// A different version was recorded before.
    Upgraded,
}

impl VersionStatus {
    pub fn is_upgrade(&self) -> bool {
        matches!(self, VersionStatus::Upgraded)
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VersionStatus::NoRecord => "no record",
            VersionStatus::SameVersion => "same version",
            VersionStatus::Upgraded => "upgraded",
        };
        f.write_str(label)
    }
}

/// Compare the recorded version with the current one.
///
/// Versions are opaque strings compared for equality; `"2.0"` to `"1.0"`
/// counts as an upgrade. An empty record counts as no record, so a build
/// that gains a version after an unversioned one is not an upgrade.
pub fn classify(last: Option<&str>, current: &str) -> VersionStatus {
    match last {
        Some(last) if last == current => VersionStatus::SameVersion,
        None | Some("") => VersionStatus::NoRecord,
        Some(_) => VersionStatus::Upgraded,
    }
}

/// Classify the running version and record it if it changed.
pub fn record_current_version(
    persistence: &Persistence,
    build: &dyn BuildInfo,
) -> Result<VersionStatus, StoreError> {
    let key = &persistence.keys().last_app_version;
    let current = current_version(build);
    persistence.critical_section(|store| {
        let last = store.get_string(key)?;
        let status = classify(last.as_deref(), &current);
        if status != VersionStatus::SameVersion {
            store.set_string(key, &current)?;
        }
        if status.is_upgrade() {
            tracing::info!(from = ?last, to = %current, "new app version");
        }
        Ok(status)
    })
}

/// `true` on an open pulse that is the first since an upgrade, `false` on
/// every other pulse.
pub fn is_first_launch_of_new_version(
    pulses: &Observable<Sequence>,
    persistence: Persistence,
    build: Arc<dyn BuildInfo>,
    memo: Arc<PulseMemo<bool>>,
) -> Observable<bool> {
    pulses.try_map(move |sequence| {
        memo.get_or_try_insert_with(sequence, || {
            record_current_version(&persistence, build.as_ref()).map(|s| s.is_upgrade())
        })
        .map_err(surface("is_first_launch_of_new_version"))
    })
}

/// Emits once and completes if the app was upgraded since the last recorded
/// launch; completes without emitting otherwise.
///
/// Evaluated when subscribed. The recorded version is only rewritten on a
/// genuine upgrade: a fresh install leaves the record empty.
pub fn first_launch_of_new_version_only(
    persistence: Persistence,
    build: Arc<dyn BuildInfo>,
) -> Observable<()> {
    Observable::deferred(move || {
        let key = &persistence.keys().last_app_version;
        let current = current_version(build.as_ref());
        let upgraded = persistence
            .critical_section(|store| -> Result<bool, StoreError> {
                let last = store.get_string(key)?;
                let upgraded = classify(last.as_deref(), &current).is_upgrade();
                if upgraded {
                    store.set_string(key, &current)?;
                }
                Ok(upgraded)
            })
            .map_err(surface("first_launch_of_new_version_only"))?;
        Ok(upgraded.then_some(()))
    })
}
