//! Identity decryption configuration.

use serde::Deserialize;

/// Textual encoding of identity tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenEncoding {
    /// Standard base64 with padding.
    #[default]
    Base64,
    /// Lowercase or uppercase hex.
    Hex,
}

/// Identity decryption configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityConfig {
    /// Shared passphrase. MUST match the external system that encrypts tokens.
    /// When absent every obfuscated identity is unresolved.
    pub secret: Option<String>,
    /// How tokens are encoded on the wire (default: base64).
    #[serde(default)]
    pub token_encoding: TokenEncoding,
}
