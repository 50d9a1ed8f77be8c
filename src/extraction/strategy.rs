//! Extractor trait and report types.
//!
//! Both extraction paths produce the same [`StatementRecord`]; the service
//! wraps it in an [`ExtractionReport`] with quality metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::{parse_amount, Confidence, StatementRecord};
use crate::error::ParserResult;

/// How the caller wants fields extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Deterministic pattern matching.
    #[default]
    Pattern,
    /// Remote language model.
    Assisted,
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMode::Pattern => f.write_str("pattern"),
            ExtractionMode::Assisted => f.write_str("assisted"),
        }
    }
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pattern" | "regex" => Ok(ExtractionMode::Pattern),
            "assisted" | "llm" | "ai" => Ok(ExtractionMode::Assisted),
            other => Err(format!("Unknown mode: {other}. Use 'pattern' or 'assisted'.")),
        }
    }
}

/// A way of turning statement text into a record.
pub trait FieldExtractor: Send + Sync {
    /// Extracts the five fields from `text`.
    ///
    /// Fields that cannot be found are `None`; errors are reserved for the
    /// extractor being unable to run at all.
    fn extract(&self, text: &str) -> ParserResult<StatementRecord>;

    /// Label recorded as `extraction_method` in reports.
    fn method(&self) -> String;
}

/// Numeric values of the currency fields, when they parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAmounts {
    pub amount_due: Option<f64>,
    pub credit_limit: Option<f64>,
}

impl NormalizedAmounts {
    pub fn from_record(record: &StatementRecord) -> Self {
        Self {
            amount_due: record.total_amount_due.as_deref().and_then(parse_amount),
            credit_limit: record.credit_limit.as_deref().and_then(parse_amount),
        }
    }
}

/// Result of one extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    #[serde(flatten)]
    pub record: StatementRecord,
    pub confidence: Confidence,
    pub fields_extracted: usize,
    pub extraction_method: String,
    /// File the text came from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub normalized: NormalizedAmounts,
    /// Why the primary extractor was skipped, when a fallback ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl ExtractionReport {
    pub fn new(record: StatementRecord, method: impl Into<String>) -> Self {
        Self {
            confidence: record.confidence(),
            fields_extracted: record.fields_extracted(),
            normalized: NormalizedAmounts::from_record(&record),
            extraction_method: method.into(),
            source: None,
            fallback_reason: None,
            record,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn to_json(&self) -> ParserResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
