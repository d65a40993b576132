//! Telemetry utilities for action tracing.

/// Standardized span constructors for roster observability.
pub mod spans {
    use tracing::{Span, info_span};
    use uuid::Uuid;

    /// Create a span for one action submission.
    pub fn action(request_id: &Uuid, action: &str, entry: &str, user: &str) -> Span {
        info_span!("action", request_id = %request_id, action = %action, entry = %entry, user = %user)
    }

    /// Create a span for a notification dispatch.
    pub fn dispatch(kind: &str, recipients: usize) -> Span {
        info_span!("dispatch", kind = %kind, recipients)
    }
}
