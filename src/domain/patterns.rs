//! Ordered candidate patterns for each statement field.
//!
//! Each field owns a list of regular expressions tried in order against the
//! whole document. The first pattern that matches wins, even if a later
//! pattern would match earlier in the text. Statements from different issuers
//! label the same value differently, so the lists run from the most specific
//! phrasing to the loosest.
//!
//! All patterns are compiled case-insensitive. Separators between a label and
//! its value accept `:`, `-`, `*` and any whitespace, including the newlines
//! and form feeds that PDF text extraction leaves at line and page breaks.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use super::record::Field;

/// Month name, abbreviated or full.
const MONTH: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?";

/// Separator between a label and its value.
const SEP: &str = r"\s*[:\-]?\s*\*?\s*";

/// Currency amount, symbol included: `$1,234.56`, `Rs. 5,000`, `₹ 78,708.38`.
const AMOUNT: &str = r"((?:[$₹€£]|rs\.?|inr|usd)?\s*\d[\d,]*(?:\.\d+)?)";

fn date() -> String {
    format!(
        r"(?:\b\d{{1,2}}[/.\-]\d{{1,2}}[/.\-](?:\d{{4}}|\d{{2}})\b|{MONTH}\s+\d{{1,2}},?\s+\d{{4}}|\d{{1,2}}[\s\-]{MONTH}[\s\-,]*\d{{4}})"
    )
}

fn date_range() -> String {
    let d = date();
    format!(r"{d}\s*(?:-|–|to)\s*{d}")
}

fn card_sources() -> Vec<String> {
    vec![
        // "Card ending in 1234", "ending with XX1234"
        r"\bending(?:\s+(?:in|with))?\s*[:\-]?\s*(?:[x*•]+\s*)?(\d{4})\b".to_string(),
        // BIN-masked: 123456******1234
        r"\b\d{6}[x*•]+(\d{4})\b".to_string(),
        // First and last four: 1234 XXXX XXXX 5678
        r"\b\d{4}[\s\-][x*•]{4}[\s\-][x*•]{4}[\s\-](\d{4})\b".to_string(),
        // Masked groups: XXXX XXXX XXXX 1234, ****-****-****-1234
        r"(?:[x*•]{4}[\s\-]?){3}(\d{4})\b".to_string(),
        // Long mask run: ************1234
        r"[x*•]{8,}(\d{4})\b".to_string(),
        // Labelled card number, last group of four wins
        r"card\s+(?:number|no\.?|#)\s*[:\-]?[ \t]*[\dx*• \t\-]*(\d{4})\b".to_string(),
    ]
}

fn period_sources() -> Vec<String> {
    let d = date();
    let range = date_range();
    vec![
        format!(
            r"(?:statement\s+period|statement\s+cycle|billing\s+(?:cycle|period)){SEP}(?:from\s+)?({range})"
        ),
        // From <date> To <date>, joined as "<date> - <date>"
        format!(r"\bfrom\s+({d})\s+to\s+({d})"),
        r"\b(\d{1,2}/\d{1,2}/\d{4}\s*-\s*\d{1,2}/\d{1,2}/\d{4})\b".to_string(),
        r"\b(\d{1,2}-\d{1,2}-\d{4}\s+to\s+\d{1,2}-\d{1,2}-\d{4})\b".to_string(),
    ]
}

fn due_date_sources() -> Vec<String> {
    let d = date();
    vec![
        format!(r"payment\s+due\s+date{SEP}({d})"),
        format!(r"due\s+date{SEP}({d})"),
        format!(r"pay(?:ment)?\s+by{SEP}({d})"),
        format!(r"payment\s+deadline{SEP}({d})"),
        format!(r"last\s+date[^\n]*?payment{SEP}({d})"),
        format!(r"due\s+on{SEP}({d})"),
    ]
}

fn amount_sources() -> Vec<String> {
    [
        r"total\s+payment\s+due",
        r"total\s+amount\s+due",
        r"amount\s+payable",
        r"outstanding\s+(?:amount|balance)",
        r"new\s+balance",
        r"total\s+due",
        r"amount\s+due",
        r"minimum\s+(?:payment|amount)\s+due",
    ]
    .iter()
    .map(|label| format!(r"{label}{SEP}{AMOUNT}"))
    .collect()
}

fn credit_limit_sources() -> Vec<String> {
    [
        r"total\s+credit\s+limit",
        r"credit\s+limit",
        r"card\s+limit",
        r"\blimit",
    ]
    .iter()
    .map(|label| format!(r"{label}{SEP}{AMOUNT}"))
    .collect()
}

/// Compiles a list of pattern sources case-insensitively.
fn compile(sources: Vec<String>) -> Vec<Regex> {
    sources
        .iter()
        .map(|src| {
            RegexBuilder::new(src)
                .case_insensitive(true)
                .build()
                .expect("Valid statement field regex")
        })
        .collect()
}

static CARD_LAST4: Lazy<Vec<Regex>> = Lazy::new(|| compile(card_sources()));
static STATEMENT_PERIOD: Lazy<Vec<Regex>> = Lazy::new(|| compile(period_sources()));
static PAYMENT_DUE_DATE: Lazy<Vec<Regex>> = Lazy::new(|| compile(due_date_sources()));
static TOTAL_AMOUNT_DUE: Lazy<Vec<Regex>> = Lazy::new(|| compile(amount_sources()));
static CREDIT_LIMIT: Lazy<Vec<Regex>> = Lazy::new(|| compile(credit_limit_sources()));

/// Returns the ordered candidate patterns for a field.
pub fn patterns_for(field: Field) -> &'static [Regex] {
    match field {
        Field::CardLast4 => &CARD_LAST4,
        Field::StatementPeriod => &STATEMENT_PERIOD,
        Field::PaymentDueDate => &PAYMENT_DUE_DATE,
        Field::TotalAmountDue => &TOTAL_AMOUNT_DUE,
        Field::CreditLimit => &CREDIT_LIMIT,
    }
}

/// A value found by one of a field's patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// Position of the winning pattern in the field's list.
    pub pattern_index: usize,
    pub value: String,
}

/// Tries `patterns` in order and returns the first capture.
///
/// Participating capture groups are joined with `" - "`, so a two-group
/// pattern such as `From <a> To <b>` yields `"<a> - <b>"`. A pattern whose
/// groups capture only whitespace or separators is skipped.
pub fn first_match(patterns: &[Regex], text: &str) -> Option<PatternMatch> {
    patterns.iter().enumerate().find_map(|(pattern_index, re)| {
        let caps = re.captures(text)?;
        let parts: Vec<&str> = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| clean_capture(m.as_str()))
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            return None;
        }
        Some(PatternMatch {
            pattern_index,
            value: parts.join(" - "),
        })
    })
}

fn clean_capture(raw: &str) -> &str {
    raw.trim().trim_end_matches(',').trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        for field in Field::ALL {
            assert!(!patterns_for(field).is_empty(), "{field} has no patterns");
        }
    }

    #[test]
    fn test_ending_must_start_a_word() {
        let patterns = patterns_for(Field::CardLast4);
        assert!(first_match(&patterns[..1], "spending in 2024").is_none());
        assert!(first_match(&patterns[..1], "pending 1234").is_none());
        assert_eq!(
            first_match(&patterns[..1], "Card ending in 1234").unwrap().value,
            "1234"
        );
    }

    #[test]
    fn test_first_listed_pattern_wins() {
        // "Pay By" appears first in the text, but "Payment Due Date" is listed first.
        let text = "Pay By: 03/01/2024\nPayment Due Date: 02/15/2024";
        let found = first_match(patterns_for(Field::PaymentDueDate), text).unwrap();
        assert_eq!(found.pattern_index, 0);
        assert_eq!(found.value, "02/15/2024");
    }

    #[test]
    fn test_two_group_pattern_is_joined() {
        let text = "Activity From 17/09/2021 To 15/10/2021";
        let found = first_match(patterns_for(Field::StatementPeriod), text).unwrap();
        assert_eq!(found.value, "17/09/2021 - 15/10/2021");
    }

    #[test]
    fn test_month_name_dates() {
        let text = "PAYMENT DUE DATE\nFebruary 15, 2024";
        let found = first_match(patterns_for(Field::PaymentDueDate), text).unwrap();
        assert_eq!(found.value, "February 15, 2024");

        let text = "Due on 04 Nov 2021";
        let found = first_match(patterns_for(Field::PaymentDueDate), text).unwrap();
        assert_eq!(found.value, "04 Nov 2021");
    }

    #[test]
    fn test_amount_keeps_currency_symbol() {
        let text = "Total Payment Due *$78,708.38 Dr";
        let found = first_match(patterns_for(Field::TotalAmountDue), text).unwrap();
        assert_eq!(found.value, "$78,708.38");
    }

    #[test]
    fn test_trailing_comma_is_trimmed() {
        let text = "Credit Limit 1,32,000, Cash Limit 40,000";
        let found = first_match(patterns_for(Field::CreditLimit), text).unwrap();
        assert_eq!(found.value, "1,32,000");
    }

    #[test]
    fn test_no_match() {
        assert!(first_match(patterns_for(Field::CreditLimit), "nothing here").is_none());
    }
}
