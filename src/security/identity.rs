//! Identity token resolution - decrypting obfuscated supervisor identifiers.
//!
//! Supervisor records may carry an obfuscated identifier whose plain form is
//! recovered from the record's communication token. The token is produced by
//! an external system, so the routine here must match it byte for byte.
//!
//! # Scheme
//!
//! - Key: MD5 of the UTF-8 bytes of the shared secret (128 bits)
//! - IV: the same MD5 digest (key and IV are identical, externally mandated)
//! - Cipher: AES-128 in CFB mode with full-block feedback, no padding
//! - Plaintext: must be valid UTF-8
//!
//! Tokens travel as text; [`TokenEncoding`] says how to turn them into
//! ciphertext bytes before decryption.
//!
//! # Failure Policy
//!
//! Every failure is reported as a [`ResolveError`]. Callers must treat an
//! unresolved identity as indeterminate, never as proof either way.

use crate::config::{IdentityConfig, TokenEncoding};
use aes::Aes128;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};
use md5::{Digest, Md5};
use thiserror::Error;
use zeroize::Zeroizing;

type Aes128CfbDec = cfb_mode::Decryptor<Aes128>;

/// Why a token could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no decryption secret configured")]
    MissingSecret,
    #[error("empty identity token")]
    MissingToken,
    #[error("malformed identity token: {0}")]
    Malformed(String),
    #[error("decrypted identity is not valid UTF-8")]
    InvalidUtf8,
}

/// Derive the shared key/IV block from the secret.
fn derive_key(secret: &str) -> Zeroizing<[u8; 16]> {
    let digest = Md5::digest(secret.as_bytes());
    let mut key = Zeroizing::new([0u8; 16]);
    key.copy_from_slice(&digest);
    key
}

/// Decrypt raw ciphertext bytes with the fixed MD5 / AES-128-CFB scheme.
pub fn decrypt_identity(ciphertext: &[u8], secret: &str) -> Result<String, ResolveError> {
    if secret.is_empty() {
        return Err(ResolveError::MissingSecret);
    }
    if ciphertext.is_empty() {
        return Err(ResolveError::MissingToken);
    }

    let key = derive_key(secret);
    let mut buf = ciphertext.to_vec();
    Aes128CfbDec::new(&(*key).into(), &(*key).into()).decrypt(&mut buf);

    String::from_utf8(buf).map_err(|_| ResolveError::InvalidUtf8)
}

/// Decode a textual token into ciphertext bytes.
fn decode_token(token: &str, encoding: TokenEncoding) -> Result<Vec<u8>, ResolveError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ResolveError::MissingToken);
    }
    match encoding {
        TokenEncoding::Base64 => BASE64
            .decode(token)
            .map_err(|e| ResolveError::Malformed(e.to_string())),
        TokenEncoding::Hex => hex::decode(token).map_err(|e| ResolveError::Malformed(e.to_string())),
    }
}

/// Resolve a textual token with an explicit secret.
pub fn resolve_token(
    token: &str,
    secret: &str,
    encoding: TokenEncoding,
) -> Result<String, ResolveError> {
    let ciphertext = decode_token(token, encoding)?;
    decrypt_identity(&ciphertext, secret)
}

/// Resolver bound to the process-wide shared secret.
#[derive(Clone)]
pub struct IdentityResolver {
    secret: Option<Zeroizing<String>>,
    encoding: TokenEncoding,
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl IdentityResolver {
    /// Create a resolver. An empty secret is treated as absent.
    pub fn new(secret: Option<&str>, encoding: TokenEncoding) -> Self {
        Self {
            secret: secret
                .filter(|s| !s.is_empty())
                .map(|s| Zeroizing::new(s.to_owned())),
            encoding,
        }
    }

    pub fn from_config(config: &IdentityConfig) -> Self {
        Self::new(config.secret.as_deref(), config.token_encoding)
    }

    /// Resolve a textual token into a plain identifier.
    pub fn resolve(&self, token: &str) -> Result<String, ResolveError> {
        let secret = self.secret.as_ref().ok_or(ResolveError::MissingSecret)?;
        resolve_token(token, secret, self.encoding)
    }

    /// Resolve already-decoded ciphertext bytes.
    pub fn resolve_bytes(&self, ciphertext: &[u8]) -> Result<String, ResolveError> {
        let secret = self.secret.as_ref().ok_or(ResolveError::MissingSecret)?;
        decrypt_identity(ciphertext, secret)
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }
}

/// Check if a secret looks like a placeholder that should be changed.
pub fn is_weak_secret(secret: &str) -> bool {
    secret.is_empty()
        || secret == "changeme"
        || secret.contains("default")
        || secret.contains("changeme")
        || secret.len() < 16
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "roster-shared-secret";

    type Aes128CfbEnc = cfb_mode::Encryptor<Aes128>;

    fn encrypt(plaintext: &str, secret: &str) -> Vec<u8> {
        let key = derive_key(secret);
        let mut buf = plaintext.as_bytes().to_vec();
        Aes128CfbEnc::new(&(*key).into(), &(*key).into()).encrypt(&mut buf);
        buf
    }

    #[test]
    fn test_key_derivation_is_md5() {
        assert_eq!(
            hex::encode(*derive_key(TEST_SECRET)),
            "129c004d54e052bd339f73e2d3772b8e"
        );
    }

    #[test]
    fn test_fixed_vectors() {
        let resolver = IdentityResolver::new(Some(TEST_SECRET), TokenEncoding::Base64);
        assert_eq!(resolver.resolve("O3jcd3HnPp0=").unwrap(), "sup-4821");
        assert_eq!(
            resolver
                .resolve("J2vKMya6fpZv3pHTG11qyscIamUIEC7Yj/XDgarV/kM=")
                .unwrap(),
            "officer:Valen#2231 leads tonight"
        );
    }

    #[test]
    fn test_fixed_vector_hex() {
        let resolver = IdentityResolver::new(Some(TEST_SECRET), TokenEncoding::Hex);
        assert_eq!(resolver.resolve("3b78dc7771e73e9d").unwrap(), "sup-4821");
    }

    #[test]
    fn test_non_ascii_secret_and_plaintext() {
        assert_eq!(
            resolve_token("OWnkMilXJg==", "clé-partagée", TokenEncoding::Base64).unwrap(),
            "Zoë-77"
        );
    }

    #[test]
    fn test_round_trip_partial_blocks() {
        for plaintext in ["a", "exactly-16-bytes", "seventeen-bytes!!", "sup-000000000000000000000001"] {
            let ciphertext = encrypt(plaintext, TEST_SECRET);
            assert_eq!(ciphertext.len(), plaintext.len());
            assert_eq!(decrypt_identity(&ciphertext, TEST_SECRET).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_wrong_secret_does_not_round_trip() {
        let ciphertext = encrypt("sup-4821", TEST_SECRET);
        let result = decrypt_identity(&ciphertext, "another-secret-value");
        assert_ne!(result, Ok("sup-4821".to_string()));
    }

    #[test]
    fn test_invalid_utf8_is_failure() {
        assert_eq!(
            resolve_token("t/NR", TEST_SECRET, TokenEncoding::Base64),
            Err(ResolveError::InvalidUtf8)
        );
    }

    #[test]
    fn test_missing_secret() {
        let resolver = IdentityResolver::new(None, TokenEncoding::Base64);
        assert!(!resolver.has_secret());
        assert_eq!(resolver.resolve("O3jcd3HnPp0="), Err(ResolveError::MissingSecret));

        let empty = IdentityResolver::new(Some(""), TokenEncoding::Base64);
        assert_eq!(empty.resolve("O3jcd3HnPp0="), Err(ResolveError::MissingSecret));
    }

    #[test]
    fn test_malformed_and_empty_tokens() {
        let resolver = IdentityResolver::new(Some(TEST_SECRET), TokenEncoding::Base64);
        assert!(matches!(resolver.resolve("not base64!!"), Err(ResolveError::Malformed(_))));
        assert_eq!(resolver.resolve("   "), Err(ResolveError::MissingToken));
        assert_eq!(resolver.resolve_bytes(&[]), Err(ResolveError::MissingToken));

        let hex_resolver = IdentityResolver::new(Some(TEST_SECRET), TokenEncoding::Hex);
        assert!(matches!(hex_resolver.resolve("zz"), Err(ResolveError::Malformed(_))));
    }

    #[test]
    fn test_token_whitespace_is_trimmed() {
        let resolver = IdentityResolver::new(Some(TEST_SECRET), TokenEncoding::Base64);
        assert_eq!(resolver.resolve(" O3jcd3HnPp0=\n").unwrap(), "sup-4821");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let resolver = IdentityResolver::new(Some(TEST_SECRET), TokenEncoding::Base64);
        let rendered = format!("{resolver:?}");
        assert!(!rendered.contains(TEST_SECRET));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_is_weak_secret() {
        assert!(is_weak_secret(""));
        assert!(is_weak_secret("changeme"));
        assert!(is_weak_secret("default-secret-value"));
        assert!(is_weak_secret("short"));
        assert!(!is_weak_secret("this-is-a-secure-production-key-2024"));
    }
}
