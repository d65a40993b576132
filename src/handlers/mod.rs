//! Action handling.
//!
//! The [`ActionRouter`] is the single entry point a roster view calls when a
//! UI event names an action against an entry. It combines capability checks,
//! cooldowns, the injected executor and the notification dispatcher.
//!
//! ## Submission Pipeline
//!
//! ```text
//! locked? ─▶ capability ─▶ cooldowns ─▶ executor / dispatcher ─▶ arm cooldowns
//!   │            │             │               │
//!   Locked   Unauthorized  RateLimited    RemoteFailure
//!            Unresolvable
//! ```

mod router;

pub use router::{ActionOutcome, ActionRouter};
