//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use crate::security::identity::is_weak_secret;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("identity.secret is required")]
    MissingSecret,
    #[error("roles.finance_tag must not be empty")]
    EmptyFinanceTag,
    #[error("notify.fallback_recipient is required")]
    MissingFallbackRecipient,
    #[error("notify.staff_proxy is required")]
    MissingStaffProxy,
    #[error("notify.staff_recipients must name exactly 2 recipients, got {0}")]
    StaffRecipientCount(usize),
    #[error("notify.staff_recipients must not contain empty identifiers")]
    EmptyStaffRecipient,
    #[error("cooldowns.{0} must be greater than zero")]
    ZeroCooldown(&'static str),
}

/// Validate a configuration, returning all errors found.
///
/// A weak (but present) secret is only warned about: the value is dictated
/// by the external system that produces the tokens.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.identity.secret.as_deref() {
        None | Some("") => errors.push(ValidationError::MissingSecret),
        Some(secret) if is_weak_secret(secret) => {
            tracing::warn!("identity.secret looks like a placeholder; obfuscated identities may not resolve");
        }
        Some(_) => {}
    }

    if config.roles.finance_tag.is_empty() {
        errors.push(ValidationError::EmptyFinanceTag);
    }

    let notify = &config.notify;
    if notify.fallback_recipient.is_empty() {
        errors.push(ValidationError::MissingFallbackRecipient);
    }
    if notify.staff_proxy.is_empty() {
        errors.push(ValidationError::MissingStaffProxy);
    }
    if notify.staff_recipients.len() != 2 {
        errors.push(ValidationError::StaffRecipientCount(
            notify.staff_recipients.len(),
        ));
    }
    if notify.staff_recipients.iter().any(String::is_empty) {
        errors.push(ValidationError::EmptyStaffRecipient);
    }

    let cooldowns = &config.cooldowns;
    for (name, value) in [
        ("notify_ms", cooldowns.notify_ms),
        ("global_ms", cooldowns.global_ms),
        ("debounce_ms", cooldowns.debounce_ms),
        ("payment_ms", cooldowns.payment_ms),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroCooldown(name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_valid_config() -> String {
        r#"
[identity]
secret = "roster-shared-secret"

[notify]
fallback_recipient = "desk-7"
staff_proxy = "proxy-1"
staff_recipients = ["staff-a", "staff-b"]
"#
        .to_string()
    }

    #[test]
    fn test_valid_config_passes() {
        let config = Config::from_toml_str(&minimal_valid_config()).unwrap();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_config_reports_every_problem() {
        let config = Config::from_toml_str("").unwrap();
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingSecret)));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingFallbackRecipient)));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingStaffProxy)));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::StaffRecipientCount(0))));
    }

    #[test]
    fn test_staff_pair_must_be_two() {
        let toml = minimal_valid_config().replace(
            r#"["staff-a", "staff-b"]"#,
            r#"["staff-a", "staff-b", "staff-c"]"#,
        );
        let config = Config::from_toml_str(&toml).unwrap();
        let errors = validate(&config).unwrap_err();
        assert!(matches!(errors.as_slice(), [ValidationError::StaffRecipientCount(3)]));
    }

    #[test]
    fn test_empty_staff_identifier_fails() {
        let toml = minimal_valid_config().replace(r#""staff-b""#, r#""""#);
        let config = Config::from_toml_str(&toml).unwrap();
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::EmptyStaffRecipient)));
    }

    #[test]
    fn test_zero_cooldown_fails() {
        let toml = format!("{}\n[cooldowns]\nglobal_ms = 0\n", minimal_valid_config());
        let config = Config::from_toml_str(&toml).unwrap();
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::ZeroCooldown("global_ms"))));
    }

    #[test]
    fn test_weak_secret_is_not_an_error() {
        let toml = minimal_valid_config().replace("roster-shared-secret", "changeme");
        let config = Config::from_toml_str(&toml).unwrap();
        assert!(validate(&config).is_ok());
    }
}
