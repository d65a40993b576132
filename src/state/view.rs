//! View profiles and the per-session context a roster view hands the router.
//!
//! The same engine backs two roster views. They differ only in which actions
//! and columns are exposed; capability checks are shared.

use super::action::{ActionKind, NotifyKind};
use super::supervisor::SupervisorRecord;
use crate::security::Capabilities;
use serde::Deserialize;
use std::collections::HashSet;

/// Which roster view is hosting the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewProfile {
    /// Organizer view: every action and column.
    #[default]
    Manager,
    /// Participant-facing view: advertiser notifications only.
    Member,
}

/// Roster table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Slot,
    Name,
    Status,
    Owner,
    Collector,
    Price,
    Collected,
    Paid,
    Actions,
}

impl ViewProfile {
    /// Whether this view offers `kind` at all.
    pub fn exposes(self, kind: ActionKind) -> bool {
        match self {
            Self::Manager => true,
            Self::Member => matches!(
                kind,
                ActionKind::Notify(NotifyKind::Ready | NotifyKind::Logging | NotifyKind::Attention)
            ),
        }
    }

    /// Columns rendered for a viewer with `caps`.
    pub fn visible_columns(self, caps: &Capabilities) -> Vec<Column> {
        let mut columns = vec![Column::Slot, Column::Name, Column::Status];
        if self == Self::Manager {
            columns.extend([Column::Owner, Column::Collector]);
        }
        if caps.financials {
            columns.extend([Column::Price, Column::Collected, Column::Paid]);
        }
        columns.push(Column::Actions);
        columns
    }
}

/// Everything the router needs to know about the viewing session.
#[derive(Debug, Clone, Default)]
pub struct ViewContext {
    pub profile: ViewProfile,
    /// View-level write lock. Every submission is rejected while set.
    pub locked: bool,
    /// Role tags held by the acting user.
    pub roles: HashSet<String>,
    pub supervisors: Vec<SupervisorRecord>,
}

impl ViewContext {
    pub fn new(profile: ViewProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_supervisors(mut self, supervisors: Vec<SupervisorRecord>) -> Self {
        self.supervisors = supervisors;
        self
    }
}
