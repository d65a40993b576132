//! Cooldown windows for throttled roster actions.

use serde::Deserialize;
use std::time::Duration;

/// Cooldown configuration, in milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct CooldownConfig {
    /// Per-(entry, notification kind) cooldown after a dispatch (default: 15000).
    #[serde(default = "default_notify_ms")]
    pub notify_ms: u64,
    /// Global notification cooldown shared by all entries (default: 5000).
    #[serde(default = "default_global_ms")]
    pub global_ms: u64,
    /// Anti-double-click debounce per entry (default: 3000).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Payment toggle cooldown per entry (default: 3000).
    #[serde(default = "default_payment_ms")]
    pub payment_ms: u64,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            notify_ms: default_notify_ms(),
            global_ms: default_global_ms(),
            debounce_ms: default_debounce_ms(),
            payment_ms: default_payment_ms(),
        }
    }
}

impl CooldownConfig {
    pub fn notify(&self) -> Duration {
        Duration::from_millis(self.notify_ms)
    }

    pub fn global(&self) -> Duration {
        Duration::from_millis(self.global_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn payment(&self) -> Duration {
        Duration::from_millis(self.payment_ms)
    }
}

fn default_notify_ms() -> u64 {
    15_000
}

fn default_global_ms() -> u64 {
    5_000
}

fn default_debounce_ms() -> u64 {
    3_000
}

fn default_payment_ms() -> u64 {
    3_000
}
