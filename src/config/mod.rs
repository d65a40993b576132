//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level `Config` struct and loading
//! - [`identity`]: Shared decryption secret and token encoding (IdentityConfig)
//! - [`cooldowns`]: Cooldown windows for throttled actions (CooldownConfig)
//! - [`notify`]: Recipient routing and message templates (NotifyConfig)
//! - [`validation`]: Startup validation collecting every problem at once

mod cooldowns;
mod identity;
mod notify;
mod types;
pub mod validation;

pub use cooldowns::CooldownConfig;
pub use identity::{IdentityConfig, TokenEncoding};
pub use notify::{NotifyConfig, TemplateConfig};
pub use types::{Config, ConfigError, RolesConfig};
pub use validation::{ValidationError, validate};
