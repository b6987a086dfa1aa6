//! Report recipient validation.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)] // pattern is a constant
fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[a-zA-Z0-9]+$").expect("email regex is valid")
    })
}

/// Returns true for `local@domain.tld` shaped addresses.
///
/// Local part and domain may not contain whitespace or `@`; the domain must end
/// in a dot followed by an alphanumeric suffix.
pub fn is_valid_email(address: &str) -> bool {
    email_regex().is_match(address)
}

/// Keep the valid addresses in order, dropping invalid entries and repeats.
pub fn filter_valid_emails(addresses: Vec<String>) -> Vec<String> {
    let mut valid: Vec<String> = Vec::with_capacity(addresses.len());
    for address in addresses {
        if !is_valid_email(&address) {
            debug!("Dropping invalid report address '{}'", address);
            continue;
        }
        if !valid.contains(&address) {
            valid.push(address);
        }
    }
    valid
}
