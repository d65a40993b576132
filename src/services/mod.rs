//! External collaborators the engine calls through narrow interfaces.
//!
//! The engine never speaks HTTP itself. Remote mutations go through an
//! [`ActionExecutor`], messages through a [`MessageSender`]; both are injected
//! by the hosting view and may be backed by any transport.

pub mod notify;

pub use notify::{Delivery, DispatchReport, NotificationDispatcher, RecipientResolver, compose_message};

use crate::state::Status;
use async_trait::async_trait;
use thiserror::Error;

/// Failure detail reported by a remote collaborator, surfaced unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    pub message: String,
    /// Transport status code, when there was one.
    pub status: Option<u16>,
    /// Raw response body, when there was one.
    pub body: Option<String>,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            body: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Remote roster mutations.
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    async fn set_status(&self, entry_id: &str, status: &Status) -> Result<(), RemoteError>;

    /// Persist the paid flag. `paid` is the new value, not a toggle request.
    async fn toggle_paid(&self, entry_id: &str, paid: bool) -> Result<(), RemoteError>;

    async fn delete_entry(&self, entry_id: &str) -> Result<(), RemoteError>;
}

/// Per-recipient message delivery.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_message(&self, recipient_id: &str, text: &str) -> Result<(), RemoteError>;
}
