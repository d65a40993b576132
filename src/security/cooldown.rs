//! Cooldown registry for roster action throttling.
//!
//! Provides keyed deadline tracking for:
//! - Per-(entity, notification kind) cooldowns armed after a dispatch
//! - The single global notification cooldown shared by every entity
//! - Per-entity anti-double-click debounce
//! - Per-entity payment toggle cooldown
//!
//! # Architecture
//!
//! Each key maps to the instant at which it clears. A key is `Cooling` while
//! `now < deadline` and `Idle` otherwise, so a check that runs late still
//! observes the key as cleared. No timer task is ever spawned; dropping the
//! registry is the whole teardown story.
//!
//! ```text
//!   Idle ──try_arm──▶ Cooling ──(now >= deadline)──▶ Idle
//!                       │
//!                       └─try_arm─▶ false (state untouched)
//! ```

use crate::state::NotifyKind;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Which cooldown dimension a per-entity key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CooldownKind {
    /// Post-dispatch cooldown for one notification kind.
    Notify(NotifyKind),
    /// Anti-double-click debounce, armed synchronously on click.
    Debounce,
    /// Payment toggle cooldown, armed on attempt.
    Payment,
}

impl fmt::Display for CooldownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Notify(kind) => write!(f, "{}", kind.as_str()),
            Self::Debounce => f.write_str("debounce"),
            Self::Payment => f.write_str("payment"),
        }
    }
}

/// Composite cooldown key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CooldownKey {
    /// A cooldown scoped to one roster entry.
    Entity { kind: CooldownKind, entity: String },
    /// The singleton key shared by every notification-class action.
    Global,
}

impl CooldownKey {
    /// Build a per-entity key.
    pub fn entity(kind: CooldownKind, entity: impl Into<String>) -> Self {
        Self::Entity {
            kind,
            entity: entity.into(),
        }
    }
}

impl fmt::Display for CooldownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity { kind, entity } => write!(f, "{kind}:{entity}"),
            Self::Global => f.write_str("global"),
        }
    }
}

/// Keyed cooldown store owned by one view session.
#[derive(Debug, Default)]
pub struct CooldownRegistry {
    deadlines: DashMap<CooldownKey, Instant>,
}

impl CooldownRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `key` for `duration` if it is idle.
    ///
    /// Returns `true` if the key transitioned to cooling, `false` if it was
    /// already cooling (in which case the deadline is left untouched).
    /// Check-and-arm is atomic per key.
    pub fn try_arm(&self, key: CooldownKey, duration: Duration) -> bool {
        let now = Instant::now();
        let deadline = now + duration;

        match self.deadlines.entry(key) {
            Entry::Occupied(mut slot) => {
                if now < *slot.get() {
                    debug!(key = %slot.key(), "cooldown already active");
                    false
                } else {
                    slot.insert(deadline);
                    true
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(deadline);
                true
            }
        }
    }

    /// Check whether `key` is currently cooling. Pure read.
    pub fn is_cooling(&self, key: &CooldownKey) -> bool {
        self.remaining(key).is_some()
    }

    /// Time left before `key` clears, or `None` if it is idle.
    pub fn remaining(&self, key: &CooldownKey) -> Option<Duration> {
        let now = Instant::now();
        self.deadlines
            .get(key)
            .and_then(|deadline| deadline.checked_duration_since(now))
            .filter(|left| !left.is_zero())
    }

    /// Drop keys whose deadline has passed. Returns how many were removed.
    ///
    /// Purely a memory bound; expired keys already read as idle.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let before = self.deadlines.len();
        self.deadlines.retain(|_, deadline| now < *deadline);
        let removed = before - self.deadlines.len();
        if removed > 0 {
            debug!(removed, "swept expired cooldowns");
        }
        removed
    }

    /// Number of keys currently cooling.
    pub fn active(&self) -> usize {
        let now = Instant::now();
        self.deadlines
            .iter()
            .filter(|entry| now < *entry.value())
            .count()
    }
}
