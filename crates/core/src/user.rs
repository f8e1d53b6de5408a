//! User account constants and helpers.

use validator::ValidationError;

/// Entity name used in `NotFound` errors and log lines.
pub const USER_ENTITY: &str = "User";

/// Minimum accepted password length at registration and profile update.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Canonical form of an email address for storage and lookup.
///
/// Emails are unique case-insensitively, so they are trimmed and lower-cased
/// before they touch the store.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Custom `validator` rule: at least [`MIN_PASSWORD_LENGTH`] characters.
pub fn long_enough_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new("password_too_short"));
    }
    Ok(())
}
