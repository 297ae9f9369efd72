//! Field-shape validation for signup input.
//!
//! Each check returns a [`CoreError::Validation`] naming the offending field,
//! so HTTP responses can point the user at the exact problem. Emails and
//! usernames are normalized before storage to keep lookups consistent.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Simplified RFC 5322 email shape: something@something.tld, no whitespace.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Letters, digits, hyphens, and underscores only.
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"));

/// Maximum accepted email length (RFC 5321 path limit).
const EMAIL_MAX_LEN: usize = 254;

/// Username length bounds.
const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 30;

/// Password length bounds.
const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_MAX_LEN: usize = 128;

/// Validate the shape of an email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err(CoreError::validation("email", "Email is required"));
    }
    if trimmed.len() > EMAIL_MAX_LEN {
        return Err(CoreError::validation("email", "Email is too long"));
    }
    if !EMAIL_RE.is_match(trimmed) {
        return Err(CoreError::validation("email", "Invalid email format"));
    }
    Ok(())
}

/// Validate the shape of a username.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let trimmed = username.trim();

    if trimmed.len() < USERNAME_MIN_LEN {
        return Err(CoreError::validation(
            "username",
            format!("Username must be at least {USERNAME_MIN_LEN} characters"),
        ));
    }
    if trimmed.len() > USERNAME_MAX_LEN {
        return Err(CoreError::validation(
            "username",
            format!("Username must be at most {USERNAME_MAX_LEN} characters"),
        ));
    }
    if !USERNAME_RE.is_match(trimmed) {
        return Err(CoreError::validation(
            "username",
            "Username can only contain letters, numbers, hyphens, and underscores",
        ));
    }
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::validation(
            "username",
            "Username cannot be only numbers",
        ));
    }
    Ok(())
}

/// Validate password strength: length bounds plus at least one uppercase
/// letter, one lowercase letter, and one digit.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.len() < PASSWORD_MIN_LEN {
        return Err(CoreError::validation(
            "password",
            format!("Password must be at least {PASSWORD_MIN_LEN} characters"),
        ));
    }
    if password.len() > PASSWORD_MAX_LEN {
        return Err(CoreError::validation("password", "Password is too long"));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(CoreError::validation(
            "password",
            "Password must contain at least one uppercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(CoreError::validation(
            "password",
            "Password must contain at least one lowercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(CoreError::validation(
            "password",
            "Password must contain at least one number",
        ));
    }
    Ok(())
}

/// Validate all three signup fields, failing on the first problem.
pub fn validate_signup(email: &str, username: &str, password: &str) -> Result<(), CoreError> {
    validate_email(email)?;
    validate_username(username)?;
    validate_password(password)?;
    Ok(())
}

/// Lowercase and trim an email for storage and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim a username for storage.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_string()
}
