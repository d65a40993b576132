//! Security module for roster-engine.
//!
//! Provides the access-control primitives the action router composes:
//! - **Identity**: MD5 / AES-128-CFB decryption of obfuscated supervisor ids
//! - **Permissions**: supervisor / advertiser / financial capability derivation
//! - **Cooldowns**: keyed deadline store for per-entry, global and debounce windows
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Security Module                      │
//! ├──────────────────┬────────────────────┬──────────────────┤
//! │ IdentityResolver │ PermissionEvaluator│ CooldownRegistry │
//! │  MD5 → AES-CFB   │ Member/NotMember/? │ DashMap<Key, T>  │
//! │  base64 / hex    │ advertiser, money  │ arm / is_cooling │
//! └──────────────────┴────────────────────┴──────────────────┘
//! ```

pub mod cooldown;
pub mod identity;
pub mod permissions;

pub use cooldown::{CooldownKey, CooldownKind, CooldownRegistry};
pub use identity::{IdentityResolver, ResolveError};
pub use permissions::{Capabilities, Membership, PermissionEvaluator};
