//! The action router owned by one view session.
//!
//! # Cooldown Placement
//!
//! | Action            | Armed before the side effect      | Armed after      |
//! |-------------------|-----------------------------------|------------------|
//! | notify-*          | debounce (entry), global          | notify (entry)   |
//! | toggle-paid       | payment (entry)                   |                  |
//! | set-status/delete |                                   |                  |
//!
//! The debounce is armed synchronously, before any suspension point, so two
//! overlapping submissions for the same entry cannot both get through. The
//! post-dispatch notify cooldown is armed once the send loop completes, even
//! when every recipient failed.

use crate::config::{Config, CooldownConfig, TemplateConfig};
use crate::error::{ActionError, ActionResult};
use crate::metrics;
use crate::security::{
    Capabilities, CooldownKey, CooldownKind, CooldownRegistry, Membership, PermissionEvaluator,
};
use crate::services::{
    ActionExecutor, DispatchReport, MessageSender, NotificationDispatcher, RecipientResolver,
    compose_message,
};
use crate::state::{
    Action, ActionKind, ActionRequest, NotifyKind, RosterEntry, RosterSorter, RosterTotals,
    Status, ViewContext, roster_totals,
};
use crate::telemetry::spans;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{Instrument, debug, info, warn};

/// What a successful submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    StatusChanged { status: Status },
    /// `paid` is the optimistic value now shown locally.
    PaidToggled { paid: bool },
    Deleted,
    /// Individual recipient failures are in the report; they do not make the
    /// submission fail.
    Notified {
        kind: NotifyKind,
        report: DispatchReport,
    },
}

/// Routes roster actions for one view session.
///
/// Owns the session's cooldown state, including the global cooldown. Share
/// it with `Arc` inside the session; never across sessions.
pub struct ActionRouter {
    permissions: PermissionEvaluator,
    cooldowns: CooldownRegistry,
    windows: CooldownConfig,
    recipients: RecipientResolver,
    templates: TemplateConfig,
    dispatcher: NotificationDispatcher,
    executor: Arc<dyn ActionExecutor>,
    roster: Mutex<Vec<RosterEntry>>,
}

impl ActionRouter {
    pub fn new(
        config: &Config,
        executor: Arc<dyn ActionExecutor>,
        sender: Arc<dyn MessageSender>,
    ) -> Self {
        Self {
            permissions: PermissionEvaluator::from_config(config),
            cooldowns: CooldownRegistry::new(),
            windows: config.cooldowns.clone(),
            recipients: RecipientResolver::from_config(&config.notify),
            templates: config.notify.templates.clone(),
            dispatcher: NotificationDispatcher::new(sender),
            executor,
            roster: Mutex::new(Vec::new()),
        }
    }

    // ========================================================================
    // Roster state
    // ========================================================================

    /// Replace the local roster with a fresh read from the source.
    pub fn load(&self, entries: Vec<RosterEntry>) {
        debug!(count = entries.len(), "roster loaded");
        *self.roster.lock() = entries;
    }

    /// Replace the local roster after a refresh, dropping every pending
    /// reconciliation marker. Returns how many markers were cleared.
    pub fn reconcile(&self, fresh: Vec<RosterEntry>) -> usize {
        let mut roster = self.roster.lock();
        let cleared = roster.iter().filter(|e| e.is_pending_reconciliation()).count();
        *roster = fresh
            .into_iter()
            .map(|mut entry| {
                entry.pending = None;
                entry
            })
            .collect();
        if cleared > 0 {
            debug!(cleared, "optimistic changes reconciled");
        }
        cleared
    }

    /// Snapshot of the roster in source order.
    pub fn entries(&self) -> Vec<RosterEntry> {
        self.roster.lock().clone()
    }

    pub fn entry(&self, entry_id: &str) -> Option<RosterEntry> {
        self.roster.lock().iter().find(|e| e.id == entry_id).cloned()
    }

    /// Snapshot in display order with slot numbers.
    pub fn sorted(&self) -> Vec<(usize, RosterEntry)> {
        RosterSorter::numbered(self.entries())
    }

    pub fn cooldowns(&self) -> &CooldownRegistry {
        &self.cooldowns
    }

    pub fn permissions(&self) -> &PermissionEvaluator {
        &self.permissions
    }

    /// Capabilities of `user_id` in this view, optionally against one entry.
    pub fn capabilities(&self, user_id: &str, ctx: &ViewContext, entry_id: Option<&str>) -> Capabilities {
        let entry = entry_id.and_then(|id| self.entry(id));
        self.permissions
            .capabilities(user_id, &ctx.supervisors, &ctx.roles, entry.as_ref())
    }

    /// Monetary totals, or `None` when `user_id` may not see them.
    pub fn totals(&self, user_id: &str, ctx: &ViewContext) -> Option<RosterTotals> {
        let visible = self
            .permissions
            .can_see_financials(user_id, &ctx.supervisors, &ctx.roles);
        roster_totals(&self.roster.lock(), visible)
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Decide whether `request` is permitted right now and, if so, perform it.
    pub async fn submit(&self, request: ActionRequest, ctx: &ViewContext) -> ActionResult<ActionOutcome> {
        let kind = request.kind();
        let span = spans::action(&request.request_id, kind.as_str(), &request.entry_id, &request.user_id);

        let result = self.submit_inner(request, ctx).instrument(span).await;
        match &result {
            Ok(_) => metrics::record_action(kind.as_str()),
            Err(e) => {
                debug!(action = %kind, error_code = e.error_code(), error = %e, "action rejected");
                metrics::record_rejection(kind.as_str(), e.error_code());
            }
        }
        result
    }

    async fn submit_inner(&self, request: ActionRequest, ctx: &ViewContext) -> ActionResult<ActionOutcome> {
        if ctx.locked {
            return Err(ActionError::Locked);
        }

        let entry = self
            .entry(&request.entry_id)
            .ok_or_else(|| ActionError::UnknownEntry(request.entry_id.clone()))?;
        self.authorize(&request, &entry, ctx)?;

        match request.action {
            Action::SetStatus(status) => {
                self.executor.set_status(&entry.id, &status).await?;
                info!(entry = %entry.id, status = %status, "status changed");
                Ok(ActionOutcome::StatusChanged { status })
            }
            Action::TogglePaid => self.toggle_paid(&entry).await,
            Action::Delete => {
                self.executor.delete_entry(&entry.id).await?;
                self.roster.lock().retain(|e| e.id != entry.id);
                info!(entry = %entry.id, "entry deleted");
                Ok(ActionOutcome::Deleted)
            }
            Action::Notify { kind, note } => self.notify(&entry, kind, note.as_deref()).await,
        }
    }

    /// Capability check for the request's action kind.
    fn authorize(&self, request: &ActionRequest, entry: &RosterEntry, ctx: &ViewContext) -> ActionResult<()> {
        let kind = request.kind();
        let user = request.user_id.as_str();
        let unauthorized = |reason| ActionError::Unauthorized {
            action: kind.as_str(),
            reason,
        };

        if !ctx.profile.exposes(kind) {
            return Err(unauthorized("not offered in this view"));
        }

        match kind {
            ActionKind::SetStatus => {
                if entry.is_redacted() {
                    return Err(unauthorized("entry name is redacted"));
                }
                if entry.field_blocked {
                    return Err(unauthorized("entry is blocked"));
                }
                if self.permissions.is_advertiser_of(user, entry) {
                    return Ok(());
                }
                self.require_supervisor(user, ctx, unauthorized("supervisor or advertiser only"))
            }
            ActionKind::TogglePaid => {
                if self.permissions.has_finance_role(&ctx.roles) {
                    return Ok(());
                }
                self.require_supervisor(user, ctx, unauthorized("financial visibility required"))
            }
            ActionKind::Delete | ActionKind::Notify(NotifyKind::Afk | NotifyKind::Offline) => {
                self.require_supervisor(user, ctx, unauthorized("supervisor only"))
            }
            ActionKind::Notify(NotifyKind::Ready | NotifyKind::Logging | NotifyKind::Attention) => {
                if self.permissions.is_advertiser_of(user, entry) {
                    Ok(())
                } else {
                    Err(unauthorized("advertiser only"))
                }
            }
        }
    }

    /// An unresolved identity is reported as such, never as a plain denial.
    fn require_supervisor(&self, user: &str, ctx: &ViewContext, denied: ActionError) -> ActionResult<()> {
        match self.permissions.membership(user, &ctx.supervisors) {
            Membership::Member => Ok(()),
            Membership::NotMember => Err(denied),
            Membership::Indeterminate => Err(ActionError::Unresolvable),
        }
    }

    async fn toggle_paid(&self, entry: &RosterEntry) -> ActionResult<ActionOutcome> {
        let key = CooldownKey::entity(CooldownKind::Payment, entry.id.as_str());
        if !self.cooldowns.try_arm(key.clone(), self.windows.payment()) {
            return Err(ActionError::RateLimited { key });
        }

        let paid = {
            let mut roster = self.roster.lock();
            let local = roster
                .iter_mut()
                .find(|e| e.id == entry.id)
                .ok_or_else(|| ActionError::UnknownEntry(entry.id.clone()))?;
            local.apply_optimistic_paid()
        };

        // The optimistic value stays even on failure; the refresh cycle
        // reconciles it.
        self.executor.toggle_paid(&entry.id, paid).await?;
        info!(entry = %entry.id, paid, "paid flag toggled");
        Ok(ActionOutcome::PaidToggled { paid })
    }

    async fn notify(&self, entry: &RosterEntry, kind: NotifyKind, note: Option<&str>) -> ActionResult<ActionOutcome> {
        let debounce = CooldownKey::entity(CooldownKind::Debounce, entry.id.as_str());
        if !self.cooldowns.try_arm(debounce.clone(), self.windows.debounce()) {
            return Err(ActionError::RateLimited { key: debounce });
        }

        let notify_key = CooldownKey::entity(CooldownKind::Notify(kind), entry.id.as_str());
        if self.cooldowns.is_cooling(&notify_key) {
            return Err(ActionError::RateLimited { key: notify_key });
        }
        if !self.cooldowns.try_arm(CooldownKey::Global, self.windows.global()) {
            return Err(ActionError::RateLimited {
                key: CooldownKey::Global,
            });
        }

        let recipients = self.recipients.resolve(entry);
        let message = compose_message(self.templates.for_kind(kind), entry, note);
        let report = self
            .dispatcher
            .dispatch(&message, &recipients)
            .instrument(spans::dispatch(kind.as_str(), recipients.len()))
            .await;

        // Armed on completion of the send loop regardless of per-recipient results.
        if !self.cooldowns.try_arm(notify_key.clone(), self.windows.notify()) {
            debug!(key = %notify_key, "notify cooldown was armed concurrently");
        }

        if report.all_delivered() {
            info!(entry = %entry.id, kind = kind.as_str(), recipients = recipients.len(), "notification sent");
        } else {
            warn!(
                entry = %entry.id,
                kind = kind.as_str(),
                delivered = report.delivered(),
                recipients = recipients.len(),
                "notification partially failed"
            );
        }
        Ok(ActionOutcome::Notified { kind, report })
    }
}
