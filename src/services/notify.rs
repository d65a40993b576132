//! Notification fan-out.
//!
//! One logical notification becomes one send per resolved recipient. A
//! failed send is recorded in the [`DispatchReport`] and never stops the
//! remaining sends.

use super::{MessageSender, RemoteError};
use crate::config::NotifyConfig;
use crate::metrics;
use crate::state::RosterEntry;
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Placeholder replaced by the entry's display name in templates.
const NAME_PLACEHOLDER: &str = "{name}";

/// Result of sending to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub recipient: String,
    pub result: Result<(), RemoteError>,
}

/// Per-recipient outcome of one dispatch, in recipient order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub deliveries: Vec<Delivery>,
}

impl DispatchReport {
    pub fn all_delivered(&self) -> bool {
        self.deliveries.iter().all(|d| d.result.is_ok())
    }

    pub fn delivered(&self) -> usize {
        self.deliveries.iter().filter(|d| d.result.is_ok()).count()
    }

    /// Failed recipients with their error detail.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &RemoteError)> {
        self.deliveries.iter().filter_map(|d| match &d.result {
            Ok(()) => None,
            Err(e) => Some((d.recipient.as_str(), e)),
        })
    }
}

/// Sends a message to each recipient independently.
#[derive(Clone)]
pub struct NotificationDispatcher {
    sender: Arc<dyn MessageSender>,
}

impl NotificationDispatcher {
    pub fn new(sender: Arc<dyn MessageSender>) -> Self {
        Self { sender }
    }

    /// Send `message` to every recipient. Sends run concurrently; the report
    /// keeps recipient order.
    pub async fn dispatch(&self, message: &str, recipients: &[String]) -> DispatchReport {
        if recipients.is_empty() {
            warn!("dispatch called without recipients");
            return DispatchReport::default();
        }

        let sends = recipients.iter().map(|recipient| async move {
            let result = self.sender.send_message(recipient, message).await;
            match &result {
                Ok(()) => {
                    debug!(recipient = %recipient, "notification delivered");
                    metrics::record_delivery(true);
                }
                Err(e) => {
                    warn!(recipient = %recipient, error = %e, status = ?e.status, "notification delivery failed");
                    metrics::record_delivery(false);
                }
            }
            Delivery {
                recipient: recipient.clone(),
                result,
            }
        });

        DispatchReport {
            deliveries: join_all(sends).await,
        }
    }
}

/// Decides who receives notifications about an entry.
#[derive(Debug, Clone)]
pub struct RecipientResolver {
    staff_proxy: String,
    staff_recipients: Vec<String>,
    fallback_recipient: String,
}

impl RecipientResolver {
    pub fn new(
        staff_proxy: impl Into<String>,
        staff_recipients: Vec<String>,
        fallback_recipient: impl Into<String>,
    ) -> Self {
        Self {
            staff_proxy: staff_proxy.into(),
            staff_recipients,
            fallback_recipient: fallback_recipient.into(),
        }
    }

    pub fn from_config(config: &NotifyConfig) -> Self {
        Self::new(
            config.staff_proxy.clone(),
            config.staff_recipients.clone(),
            config.fallback_recipient.clone(),
        )
    }

    /// Recipients for an entry, evaluated in priority order:
    /// staff proxy advertiser, then any advertiser, then the owner.
    pub fn resolve(&self, entry: &RosterEntry) -> Vec<String> {
        match entry.advertiser() {
            Some(advertiser) if advertiser == self.staff_proxy => self.staff_recipients.clone(),
            Some(_) => vec![self.fallback_recipient.clone()],
            None => vec![entry.owner_id.clone()],
        }
    }
}

/// Fill a template for an entry and append an optional note.
pub fn compose_message(template: &str, entry: &RosterEntry, note: Option<&str>) -> String {
    let mut message = template.replace(NAME_PLACEHOLDER, entry.name.as_str());
    if let Some(note) = note.map(str::trim).filter(|n| !n.is_empty()) {
        message.push('\n');
        message.push_str(note);
    }
    message
}
