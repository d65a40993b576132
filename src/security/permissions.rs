//! Capability derivation for roster viewers.
//!
//! Everything here is a pure function of its inputs: the same user, records
//! and roles always produce the same answer, so results may be recomputed on
//! every call without caching.
//!
//! Supervisor status is tri-state. A record whose identifier is obfuscated
//! and whose token fails to decrypt makes the answer [`Membership::Indeterminate`]
//! unless another record matches outright.

use super::identity::IdentityResolver;
use crate::config::Config;
use crate::state::{RosterEntry, SupervisorRecord};
use std::collections::HashSet;
use tracing::warn;

/// Outcome of matching a user against the supervisor list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Membership {
    Member,
    #[default]
    NotMember,
    /// No record matched and at least one obfuscated record could not be resolved.
    Indeterminate,
}

/// Capabilities of one user against one entry (or the view as a whole).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub membership: Membership,
    /// The user introduced the entry.
    pub advertiser: bool,
    /// The user may see monetary fields and totals.
    pub financials: bool,
}

impl Capabilities {
    pub fn supervisor(&self) -> bool {
        self.membership == Membership::Member
    }
}

/// Derives capabilities from supervisor records and role tags.
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    resolver: IdentityResolver,
    finance_tag: String,
}

impl PermissionEvaluator {
    pub fn new(resolver: IdentityResolver, finance_tag: impl Into<String>) -> Self {
        Self {
            resolver,
            finance_tag: finance_tag.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            IdentityResolver::from_config(&config.identity),
            config.roles.finance_tag.clone(),
        )
    }

    /// Match `user_id` against `supervisors` in input order, stopping at the
    /// first match.
    pub fn membership(&self, user_id: &str, supervisors: &[SupervisorRecord]) -> Membership {
        if user_id.is_empty() {
            return Membership::NotMember;
        }

        let mut unresolved = false;
        for record in supervisors {
            if let Some(id) = record.plain_id() {
                if id == user_id {
                    return Membership::Member;
                }
                continue;
            }

            let token = record.comm_token.as_deref().unwrap_or_default();
            match self.resolver.resolve(token) {
                Ok(id) if id == user_id => return Membership::Member,
                Ok(_) => {}
                Err(e) => {
                    warn!(supervisor = %record.name, error = %e, "could not resolve supervisor identity");
                    unresolved = true;
                }
            }
        }

        if unresolved {
            Membership::Indeterminate
        } else {
            Membership::NotMember
        }
    }

    pub fn is_supervisor(&self, user_id: &str, supervisors: &[SupervisorRecord]) -> bool {
        self.membership(user_id, supervisors) == Membership::Member
    }

    pub fn is_advertiser_of(&self, user_id: &str, entry: &RosterEntry) -> bool {
        !user_id.is_empty() && entry.owner_id == user_id
    }

    pub fn has_finance_role(&self, roles: &HashSet<String>) -> bool {
        roles.contains(&self.finance_tag)
    }

    /// Supervisors and holders of the finance role tag see monetary fields.
    pub fn can_see_financials(
        &self,
        user_id: &str,
        supervisors: &[SupervisorRecord],
        roles: &HashSet<String>,
    ) -> bool {
        self.has_finance_role(roles) || self.is_supervisor(user_id, supervisors)
    }

    /// Derive every capability in one pass. Without an entry, `advertiser`
    /// is false.
    pub fn capabilities(
        &self,
        user_id: &str,
        supervisors: &[SupervisorRecord],
        roles: &HashSet<String>,
        entry: Option<&RosterEntry>,
    ) -> Capabilities {
        let membership = self.membership(user_id, supervisors);
        Capabilities {
            membership,
            advertiser: entry.is_some_and(|e| self.is_advertiser_of(user_id, e)),
            financials: membership == Membership::Member || self.has_finance_role(roles),
        }
    }
}
