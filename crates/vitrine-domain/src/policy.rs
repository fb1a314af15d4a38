//! Password and email policy shared by registration, reset, and profile flows.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// A password rule that failed validation.
///
/// `Display` produces the exact message returned to the client, naming the
/// failed rule. Flows that validate passwords (register, reset, profile
/// password change) all surface these messages the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordPolicyViolation {
    #[error("password must be at least 8 characters")]
    TooShort,
    #[error("password must contain a lowercase letter")]
    MissingLowercase,
    #[error("password must contain an uppercase letter")]
    MissingUppercase,
    #[error("password must contain a digit")]
    MissingDigit,
}

/// Validate a password against the fixed policy:
/// at least [`MIN_PASSWORD_LEN`] characters, one lowercase, one uppercase,
/// one digit. Returns the first rule that fails.
pub fn validate_password(password: &str) -> Result<(), PasswordPolicyViolation> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PasswordPolicyViolation::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordPolicyViolation::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordPolicyViolation::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordPolicyViolation::MissingDigit);
    }
    Ok(())
}

/// Canonical form of an email address: trimmed and lowercased.
///
/// All lookups and uniqueness checks go through this; the raw form is never
/// stored.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Shallow shape check: one `@`, a dot in the domain part, no whitespace.
/// Deliverability is not verified here.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
