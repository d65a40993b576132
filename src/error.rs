//! Unified error handling for roster-engine.
//!
//! Every rejection produced by [`ActionRouter::submit`](crate::handlers::ActionRouter::submit)
//! is an [`ActionError`]. Errors are returned as values, never raised, and each
//! variant carries a static code used for metrics labeling.

use crate::security::CooldownKey;
use crate::services::RemoteError;
use thiserror::Error;

// ============================================================================
// Action Errors (router rejections)
// ============================================================================

/// Errors that can occur while submitting a roster action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The view is write-locked. Nothing was armed or mutated.
    #[error("roster is locked")]
    Locked,

    /// A cooldown blocks the action.
    #[error("rate limited by {key}")]
    RateLimited { key: CooldownKey },

    #[error("{action} not permitted: {reason}")]
    Unauthorized {
        action: &'static str,
        reason: &'static str,
    },

    /// Supervisor status could not be proven because an obfuscated
    /// identity failed to decrypt.
    #[error("supervisor identity could not be resolved")]
    Unresolvable,

    #[error("no such roster entry: {0}")]
    UnknownEntry(String),

    /// The injected executor or sender reported an error.
    #[error("remote call failed: {0}")]
    RemoteFailure(#[from] RemoteError),
}

impl ActionError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::RateLimited { .. } => "rate_limited",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Unresolvable => "unresolvable",
            Self::UnknownEntry(_) => "unknown_entry",
            Self::RemoteFailure(_) => "remote_failure",
        }
    }

    /// Whether the rejection happened before any side effect could run.
    ///
    /// Only `RemoteFailure` is reported after the executor was reached.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::RemoteFailure(_))
    }
}

/// Result type for router submissions.
pub type ActionResult<T> = Result<T, ActionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::CooldownKind;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ActionError::Locked.error_code(), "locked");
        assert_eq!(
            ActionError::RateLimited {
                key: CooldownKey::Global
            }
            .error_code(),
            "rate_limited"
        );
        assert_eq!(ActionError::Unresolvable.error_code(), "unresolvable");
        assert_eq!(
            ActionError::UnknownEntry("e1".into()).error_code(),
            "unknown_entry"
        );
    }

    #[test]
    fn test_remote_failure_keeps_detail() {
        let err: ActionError = RemoteError::new("bad gateway")
            .with_status(502)
            .with_body("<html>upstream</html>")
            .into();
        assert!(!err.is_rejection());
        match err {
            ActionError::RemoteFailure(remote) => {
                assert_eq!(remote.message, "bad gateway");
                assert_eq!(remote.status, Some(502));
                assert_eq!(remote.body.as_deref(), Some("<html>upstream</html>"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rate_limited_display_names_key() {
        let err = ActionError::RateLimited {
            key: CooldownKey::entity(CooldownKind::Debounce, "e7"),
        };
        assert_eq!(err.to_string(), "rate limited by debounce:e7");
    }
}
