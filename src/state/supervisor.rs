//! Supervisor records attached to a roster view.

use serde::{Deserialize, Serialize};

/// Identifier the source uses when a supervisor's real id is withheld.
pub const OBFUSCATED_ID: &str = "obfuscated";

/// A user with elevated rights over the roster.
///
/// When `id` is [`OBFUSCATED_ID`] the plain identifier has to be recovered
/// from `comm_token` through the identity resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Communication token; ciphertext input when the id is obfuscated.
    #[serde(default)]
    pub comm_token: Option<String>,
}

impl SupervisorRecord {
    pub fn plain(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            comm_token: None,
        }
    }

    pub fn obfuscated(name: impl Into<String>, comm_token: impl Into<String>) -> Self {
        Self {
            id: OBFUSCATED_ID.to_string(),
            name: name.into(),
            comm_token: Some(comm_token.into()),
        }
    }

    pub fn is_obfuscated(&self) -> bool {
        self.id == OBFUSCATED_ID
    }

    /// The identifier when it is not obfuscated.
    pub fn plain_id(&self) -> Option<&str> {
        (!self.is_obfuscated()).then_some(self.id.as_str())
    }
}
