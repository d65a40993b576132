//! Notification routing and message template configuration.

use crate::state::NotifyKind;
use serde::Deserialize;

/// Notification routing configuration.
///
/// Recipient resolution looks at the advertiser attributed to an entry:
/// the staff proxy fans out to `staff_recipients`, any other advertiser goes
/// to `fallback_recipient`, and an entry without an advertiser notifies its
/// owner directly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifyConfig {
    /// Recipient used when the entry has a non-proxy advertiser.
    #[serde(default)]
    pub fallback_recipient: String,
    /// Advertiser identifier that stands in for the staff team.
    #[serde(default)]
    pub staff_proxy: String,
    /// The staff pair notified for proxy-advertised entries.
    #[serde(default)]
    pub staff_recipients: Vec<String>,
    /// Message templates per notification kind.
    #[serde(default)]
    pub templates: TemplateConfig,
}

/// Message templates. `{name}` is replaced with the entry's display name.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    #[serde(default = "default_afk")]
    pub afk: String,
    #[serde(default = "default_offline")]
    pub offline: String,
    #[serde(default = "default_ready")]
    pub ready: String,
    #[serde(default = "default_logging")]
    pub logging: String,
    #[serde(default = "default_attention")]
    pub attention: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            afk: default_afk(),
            offline: default_offline(),
            ready: default_ready(),
            logging: default_logging(),
            attention: default_attention(),
        }
    }
}

impl TemplateConfig {
    /// Template for a notification kind.
    pub fn for_kind(&self, kind: NotifyKind) -> &str {
        match kind {
            NotifyKind::Afk => &self.afk,
            NotifyKind::Offline => &self.offline,
            NotifyKind::Ready => &self.ready,
            NotifyKind::Logging => &self.logging,
            NotifyKind::Attention => &self.attention,
        }
    }
}

fn default_afk() -> String {
    "{name} has been marked AFK. Please check in with the group.".to_string()
}

fn default_offline() -> String {
    "{name} appears to be offline. The slot may be released if there is no reply.".to_string()
}

fn default_ready() -> String {
    "The group for {name} is ready. Please get online.".to_string()
}

fn default_logging() -> String {
    "The group is logging in for {name} now.".to_string()
}

fn default_attention() -> String {
    "The organizer needs attention on the booking for {name}.".to_string()
}
