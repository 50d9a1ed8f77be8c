//! Language-model assisted extraction.
//!
//! Sends the statement text to an [`LlmProvider`] with an instruction asking
//! for the five fields as a JSON object, then maps the reply onto a
//! [`StatementRecord`]. Every failure (no credential, transport error,
//! non-success status, unusable reply) surfaces as
//! [`ParserError::AssistedExtractionUnavailable`] so the caller can fall back
//! to pattern extraction.

use serde_json::{Map, Value};

use super::strategy::FieldExtractor;
use crate::domain::{Field, StatementRecord};
use crate::error::{ParserError, ParserResult};
use crate::providers::LlmProvider;

/// Default number of document characters sent to the model.
pub const DEFAULT_MAX_CHARS: usize = 5000;

/// Extractor backed by a remote language model.
pub struct AssistedExtractor {
    provider: Box<dyn LlmProvider>,
    credential: Option<String>,
    max_chars: usize,
}

impl AssistedExtractor {
    /// Creates an extractor. `credential` is passed to the provider as-is;
    /// `None` or a blank key makes every call unavailable.
    pub fn new(provider: Box<dyn LlmProvider>, credential: Option<String>) -> Self {
        Self {
            provider,
            credential,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// Sets how many characters of the document are sent.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    fn unavailable(&self, reason: impl Into<String>) -> ParserError {
        ParserError::unavailable(self.provider.name(), reason)
    }
}

impl FieldExtractor for AssistedExtractor {
    fn extract(&self, text: &str) -> ParserResult<StatementRecord> {
        let credential = self
            .credential
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| self.unavailable("no API key configured"))?;

        if text.trim().is_empty() {
            log::info!("Document has no text; skipping {} request", self.provider.name());
            return Ok(StatementRecord::default());
        }

        let excerpt = truncate_chars(text, self.max_chars);
        log::info!(
            "Requesting extraction from {} ({} of {} chars)",
            self.provider.name(),
            excerpt.chars().count(),
            text.chars().count()
        );

        let reply = self
            .provider
            .generate(&instruction(), excerpt, credential)
            .map_err(|e| self.unavailable(e.to_string()))?;

        map_response(&reply).map_err(|reason| self.unavailable(reason))
    }

    fn method(&self) -> String {
        format!("assisted_{}", self.provider.name())
    }
}

fn field_hint(field: Field) -> &'static str {
    match field {
        Field::CardLast4 => "last 4 digits of the card number",
        Field::StatementPeriod => "statement date range",
        Field::PaymentDueDate => "payment due date",
        Field::TotalAmountDue => "total amount due",
        Field::CreditLimit => "total credit limit",
    }
}

/// Instruction sent ahead of the document text.
pub fn instruction() -> String {
    let mut s = String::from(
        "Extract these fields from the credit card statement text. \
         Reply with a single JSON object containing exactly these keys, \
         using null for any field that is not present:\n",
    );
    for field in Field::ALL {
        s.push_str(&format!("- {}: {}\n", field.key(), field_hint(field)));
    }
    s
}

/// Accepted reply keys per field, canonical key first.
fn aliases(field: Field) -> &'static [&'static str] {
    match field {
        Field::CardLast4 => &["card_last_4", "card_last4", "cardLast4", "last4", "last_4"],
        Field::StatementPeriod => &["statement_period", "statementPeriod", "billing_period"],
        Field::PaymentDueDate => &["due_date", "payment_due_date", "paymentDueDate", "dueDate"],
        Field::TotalAmountDue => &["amount_due", "total_amount_due", "totalAmountDue", "amountDue"],
        Field::CreditLimit => &["credit_limit", "creditLimit", "total_credit_limit"],
    }
}

/// Maps a model reply onto a record.
///
/// The reply may wrap the JSON object in Markdown fences or prose; the
/// outermost `{...}` is used. Individual values that are missing, `null`,
/// blank or of an unexpected type become absent fields. Only a reply with no
/// JSON object at all is an error.
pub fn map_response(reply: &str) -> Result<StatementRecord, String> {
    let object = parse_object(reply)?;
    let mut record = StatementRecord::default();

    for field in Field::ALL {
        let value = aliases(field)
            .iter()
            .find_map(|key| object.get(*key))
            .and_then(value_text);
        let value = match field {
            Field::CardLast4 => value.and_then(|v| last_four_digits(&v)),
            _ => value,
        };
        record.set(field, value);
    }

    Ok(record)
}

fn parse_object(reply: &str) -> Result<Map<String, Value>, String> {
    let start = reply.find('{');
    let end = reply.rfind('}');
    let body = match (start, end) {
        (Some(s), Some(e)) if s < e => &reply[s..=e],
        _ => return Err("response did not contain a JSON object".to_string()),
    };

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("response JSON is not an object".to_string()),
        Err(e) => Err(format!("response is not valid JSON: {e}")),
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            let placeholder = ["", "null", "none", "n/a", "not found"]
                .iter()
                .any(|p| s.eq_ignore_ascii_case(p));
            (!placeholder).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn last_four_digits(value: &str) -> Option<String> {
    let digits: Vec<char> = value.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 4 {
        return None;
    }
    Some(digits[digits.len() - 4..].iter().collect())
}

/// Returns at most `max_chars` characters of `text`.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
