//! Roster state module.
//!
//! Contains the data the engine reads per view load (entries, supervisors),
//! the action requests it receives, and the display ordering.

mod action;
mod roster;
mod sorter;
mod supervisor;
mod view;

pub use action::{Action, ActionKind, ActionRequest, NotifyKind};
pub use roster::{
    DisplayName, Money, PendingReconciliation, REDACTED_NAME, RosterEntry, RosterTotals, Status,
    roster_totals,
};
pub use sorter::{RosterSorter, StatusPriority};
pub use supervisor::{OBFUSCATED_ID, SupervisorRecord};
pub use view::{Column, ViewContext, ViewProfile};
