//! roster-engine - Roster Action Control Engine
//!
//! Governs which actions a user may fire against a roster entry, throttles
//! them per entry and globally, and resolves obfuscated supervisor identities
//! with a decryption routine that interoperates with an external encryptor.
//!
//! The hosting view supplies transport through [`services::ActionExecutor`]
//! and [`services::MessageSender`] and talks to the engine through
//! [`handlers::ActionRouter`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod security;
pub mod services;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use error::{ActionError, ActionResult};
pub use handlers::{ActionOutcome, ActionRouter};
