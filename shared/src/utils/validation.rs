//! Input shape validation for contact channels.
//!
//! These checks only guard the shape of caller input; uniqueness and
//! existence are the account store's concern.

use once_cell::sync::Lazy;
use regex::Regex;

/// Digits with an optional leading `+`, 7 to 15 digits total.
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("invalid phone regex"));

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("invalid email regex")
});

/// Check whether a phone number has a plausible shape.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Check whether an email address has a plausible shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
