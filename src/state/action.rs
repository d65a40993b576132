//! Action requests submitted against roster entries.

use super::roster::Status;
use std::fmt;
use uuid::Uuid;

/// Notification-class actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyKind {
    Afk,
    Offline,
    Ready,
    Logging,
    Attention,
}

impl NotifyKind {
    pub const ALL: [NotifyKind; 5] = [
        Self::Afk,
        Self::Offline,
        Self::Ready,
        Self::Logging,
        Self::Attention,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Afk => "notify-afk",
            Self::Offline => "notify-offline",
            Self::Ready => "notify-ready",
            Self::Logging => "notify-logging",
            Self::Attention => "notify-attention",
        }
    }
}

/// Every action the router understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    SetStatus,
    TogglePaid,
    Delete,
    Notify(NotifyKind),
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SetStatus => "set-status",
            Self::TogglePaid => "toggle-paid",
            Self::Delete => "delete",
            Self::Notify(kind) => kind.as_str(),
        }
    }

    pub fn is_notification(self) -> bool {
        matches!(self, Self::Notify(_))
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetStatus(Status),
    /// The new value is derived from the entry's current flag.
    TogglePaid,
    Delete,
    Notify {
        kind: NotifyKind,
        /// Optional free text appended to the templated message.
        note: Option<String>,
    },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::SetStatus(_) => ActionKind::SetStatus,
            Self::TogglePaid => ActionKind::TogglePaid,
            Self::Delete => ActionKind::Delete,
            Self::Notify { kind, .. } => ActionKind::Notify(*kind),
        }
    }
}

/// One UI event naming an action, a target entry and the acting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    /// Correlation id for logs.
    pub request_id: Uuid,
    pub entry_id: String,
    pub user_id: String,
    pub action: Action,
}

impl ActionRequest {
    pub fn new(entry_id: impl Into<String>, user_id: impl Into<String>, action: Action) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            entry_id: entry_id.into(),
            user_id: user_id.into(),
            action,
        }
    }

    pub fn notify(entry_id: impl Into<String>, user_id: impl Into<String>, kind: NotifyKind) -> Self {
        Self::new(entry_id, user_id, Action::Notify { kind, note: None })
    }

    pub fn set_status(
        entry_id: impl Into<String>,
        user_id: impl Into<String>,
        status: Status,
    ) -> Self {
        Self::new(entry_id, user_id, Action::SetStatus(status))
    }

    pub fn toggle_paid(entry_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::new(entry_id, user_id, Action::TogglePaid)
    }

    pub fn delete(entry_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::new(entry_id, user_id, Action::Delete)
    }

    /// Attach a free-text note. Ignored for non-notification actions.
    pub fn with_note(mut self, text: impl Into<String>) -> Self {
        if let Action::Notify { note, .. } = &mut self.action {
            *note = Some(text.into());
        }
        self
    }

    pub fn kind(&self) -> ActionKind {
        self.action.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(ActionKind::SetStatus.as_str(), "set-status");
        assert_eq!(ActionKind::TogglePaid.to_string(), "toggle-paid");
        assert_eq!(ActionKind::Notify(NotifyKind::Attention).as_str(), "notify-attention");
        assert!(ActionKind::Notify(NotifyKind::Afk).is_notification());
        assert!(!ActionKind::Delete.is_notification());
    }

    #[test]
    fn test_note_only_attaches_to_notifications() {
        let req = ActionRequest::notify("e1", "u1", NotifyKind::Ready).with_note("table 4");
        assert_eq!(
            req.action,
            Action::Notify {
                kind: NotifyKind::Ready,
                note: Some("table 4".into())
            }
        );

        let req = ActionRequest::delete("e1", "u1").with_note("ignored");
        assert_eq!(req.action, Action::Delete);
    }

    #[test]
    fn test_requests_get_distinct_ids() {
        let a = ActionRequest::toggle_paid("e1", "u1");
        let b = ActionRequest::toggle_paid("e1", "u1");
        assert_ne!(a.request_id, b.request_id);
        assert_eq!(a.kind(), ActionKind::TogglePaid);
    }
}
