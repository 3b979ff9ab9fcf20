//! Client-side input checks that run before any request is sent.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // An optional leading `+`, then 10 to 15 ASCII digits.
    Regex::new(r"^\+?[0-9]{10,15}$").expect("phone pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneNumberError {
    #[error("Please enter a phone number")]
    Empty,
    #[error("Please enter a valid phone number (10-15 digits, optional leading +)")]
    Invalid,
}

/// Validates a phone number and returns it without spaces or hyphens.
///
/// # Errors
/// Returns [`PhoneNumberError`] when the number is blank or does not match
/// the accepted shape.
pub fn validate_phone_number(input: &str) -> Result<String, PhoneNumberError> {
    let normalized: String = input
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();

    if normalized.is_empty() {
        return Err(PhoneNumberError::Empty);
    }
    if !PHONE_PATTERN.is_match(&normalized) {
        return Err(PhoneNumberError::Invalid);
    }
    Ok(normalized)
}
