//! The statement record and its field vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five fields pulled from a statement.
///
/// Serializes under the same name as the matching [`StatementRecord`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CardLast4,
    StatementPeriod,
    PaymentDueDate,
    TotalAmountDue,
    CreditLimit,
}

impl Field {
    /// All fields in canonical order.
    pub const ALL: [Field; 5] = [
        Field::CardLast4,
        Field::StatementPeriod,
        Field::PaymentDueDate,
        Field::TotalAmountDue,
        Field::CreditLimit,
    ];

    /// Key requested from language-model replies.
    pub fn key(self) -> &'static str {
        match self {
            Field::CardLast4 => "card_last_4",
            Field::StatementPeriod => "statement_period",
            Field::PaymentDueDate => "due_date",
            Field::TotalAmountDue => "amount_due",
            Field::CreditLimit => "credit_limit",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Field::CardLast4 => "Card Last 4",
            Field::StatementPeriod => "Statement Period",
            Field::PaymentDueDate => "Due Date",
            Field::TotalAmountDue => "Amount Due",
            Field::CreditLimit => "Credit Limit",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fields extracted from a single statement.
///
/// Every field is independently optional; `None` means no candidate pattern
/// (or model reply) produced a value. A record with some or all fields absent
/// is a normal outcome, not a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRecord {
    /// Exactly four ASCII digits.
    pub card_last4: Option<String>,
    pub statement_period: Option<String>,
    pub payment_due_date: Option<String>,
    /// Currency-formatted, as it appeared in the source.
    pub total_amount_due: Option<String>,
    /// Currency-formatted, as it appeared in the source.
    pub credit_limit: Option<String>,
}

impl StatementRecord {
    /// Returns the value of a field, if present.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::CardLast4 => self.card_last4.as_deref(),
            Field::StatementPeriod => self.statement_period.as_deref(),
            Field::PaymentDueDate => self.payment_due_date.as_deref(),
            Field::TotalAmountDue => self.total_amount_due.as_deref(),
            Field::CreditLimit => self.credit_limit.as_deref(),
        }
    }

    /// Sets a field. Card values that are not exactly four digits are dropped.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        let value = match field {
            Field::CardLast4 => value.filter(|v| is_last4(v)),
            _ => value,
        };
        match field {
            Field::CardLast4 => self.card_last4 = value,
            Field::StatementPeriod => self.statement_period = value,
            Field::PaymentDueDate => self.payment_due_date = value,
            Field::TotalAmountDue => self.total_amount_due = value,
            Field::CreditLimit => self.credit_limit = value,
        }
    }

    /// Number of populated fields (0..=5).
    pub fn fields_extracted(&self) -> usize {
        Field::ALL
            .iter()
            .filter(|field| self.get(**field).is_some())
            .count()
    }

    /// Fields that were not found.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_none())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields_extracted() == 0
    }

    pub fn confidence(&self) -> Confidence {
        Confidence::from_count(self.fields_extracted())
    }
}

fn is_last4(value: &str) -> bool {
    value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Coarse quality signal derived from how many fields were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// `High` for 4+ fields, `Medium` for 2-3, `Low` otherwise.
    pub fn from_count(fields: usize) -> Self {
        match fields {
            n if n >= 4 => Confidence::High,
            n if n >= 2 => Confidence::Medium,
            _ => Confidence::Low,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        };
        f.write_str(s)
    }
}
