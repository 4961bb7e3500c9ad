//! Format checks for domain-typed fields: phone, email, date.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Checks a Brazilian phone number: 10 digits (fixed line) or 11 digits
/// (mobile) after stripping every non-digit character.
pub fn is_valid_phone(candidate: &str) -> bool {
    let digit_count = candidate.chars().filter(|c| c.is_ascii_digit()).count();
    let non_digit_ok = candidate
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '(' | ')' | '-' | '+' | '.'));
    non_digit_ok && (digit_count == 10 || digit_count == 11)
}

/// Checks an email address against a standard address grammar.
pub fn is_valid_email(candidate: &str) -> bool {
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
            .expect("email regex is valid")
    });
    re.is_match(candidate)
}

/// Checks that a string parses to a valid calendar date.
///
/// Accepted forms: ISO `2024-03-01`, day-first `01/03/2024` (the form the
/// backing sheets use), and RFC 3339 timestamps.
pub fn is_valid_date(candidate: &str) -> bool {
    NaiveDate::parse_from_str(candidate, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(candidate, "%d/%m/%Y").is_ok()
        || DateTime::parse_from_rfc3339(candidate).is_ok()
}
