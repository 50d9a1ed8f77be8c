//! Currency amount normalization.
//!
//! Extracted amounts are kept verbatim on the record. This module turns them
//! into numbers for reporting.
//!
//! A comma is always a thousands separator, which covers both Western
//! grouping (`1,234,567.89`) and Indian grouping (`12,34,567.89`). Decimal
//! commas (`1.234,56`) are ambiguous with that rule and are rejected.

use once_cell::sync::Lazy;
use regex::Regex;

fn currency_prefix() -> &'static Regex {
    static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)^(?:[$₹€£]|rs\.?|inr|usd)\s*").expect("Valid currency regex")
    });
    &PATTERN
}

fn debit_credit_suffix() -> &'static Regex {
    static PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)\s*(?:dr|cr)\.?$").expect("Valid suffix regex"));
    &PATTERN
}

fn plain_number() -> &'static Regex {
    static PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("Valid number regex"));
    &PATTERN
}

fn decimal_comma() -> &'static Regex {
    static PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r",\d{1,2}$").expect("Valid decimal comma regex"));
    &PATTERN
}

/// Parses a currency-formatted string into a number.
///
/// Returns `None` for empty input, European decimal commas, or anything
/// that is not a plain amount once symbols and separators are removed.
///
/// ```
/// use statement_parser::domain::parse_amount;
///
/// assert_eq!(parse_amount("$1,234.56"), Some(1234.56));
/// assert_eq!(parse_amount("Rs. 1,32,000"), Some(132000.0));
/// assert_eq!(parse_amount("1.234,56"), None);
/// ```
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let without_prefix = currency_prefix().replace(trimmed, "");
    let without_suffix = debit_credit_suffix().replace(&without_prefix, "");
    let candidate = without_suffix.trim();

    if decimal_comma().is_match(candidate) {
        return None;
    }

    let digits: String = candidate.chars().filter(|c| *c != ',').collect();
    if !plain_number().is_match(&digits) {
        return None;
    }
    digits.parse().ok()
}
