//! Deterministic pattern-based extraction.

use super::strategy::FieldExtractor;
use crate::domain::{first_match, patterns_for, Field, StatementRecord};
use crate::error::{ParserError, ParserResult};

/// Extracts fields by trying each field's candidate patterns in order.
///
/// Never fails on content: text with no recognizable labels yields a record
/// with every field absent. Irregular whitespace, line breaks and page-break
/// artifacts only lower the chance of a match.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts a record from document text.
    pub fn extract_record(&self, text: &str) -> StatementRecord {
        let mut record = StatementRecord::default();

        for field in Field::ALL {
            match first_match(patterns_for(field), text) {
                Some(found) => {
                    log::debug!(
                        "{}: pattern #{} matched '{}'",
                        field,
                        found.pattern_index,
                        found.value
                    );
                    record.set(field, Some(found.value));
                }
                None => log::debug!("{}: no pattern matched", field),
            }
        }

        record
    }

    /// Extracts a record from raw bytes, which must be UTF-8 text.
    pub fn extract_bytes(&self, bytes: &[u8]) -> ParserResult<StatementRecord> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            ParserError::invalid_input("text", format!("input is not UTF-8 text: {e}"))
        })?;
        Ok(self.extract_record(text))
    }
}

impl FieldExtractor for PatternExtractor {
    fn extract(&self, text: &str) -> ParserResult<StatementRecord> {
        Ok(self.extract_record(text))
    }

    fn method(&self) -> String {
        "pattern".to_string()
    }
}
