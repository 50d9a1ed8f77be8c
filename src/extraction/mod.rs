//! Extraction strategies and the service that runs them.
//!
//! [`PatternExtractor`] and [`AssistedExtractor`] share the
//! [`FieldExtractor`] trait. [`ExtractionService`] runs one of them against a
//! document and builds the [`ExtractionReport`], optionally falling back to a
//! second extractor when the first is unavailable.

pub mod assisted;
pub mod pattern;
pub mod strategy;

pub use assisted::AssistedExtractor;
pub use pattern::PatternExtractor;
pub use strategy::{ExtractionMode, ExtractionReport, FieldExtractor, NormalizedAmounts};

use crate::error::ParserResult;
use crate::pdf;
use std::path::Path;

/// Extraction service coordinating text acquisition and extractor execution.
pub struct ExtractionService {
    extractor: Box<dyn FieldExtractor>,
    fallback: Option<Box<dyn FieldExtractor>>,
}

impl ExtractionService {
    /// Creates a new service with the specified extractor.
    pub fn new(extractor: Box<dyn FieldExtractor>) -> Self {
        Self {
            extractor,
            fallback: None,
        }
    }

    /// Creates a service with pattern extraction.
    pub fn with_patterns() -> Self {
        Self::new(Box::new(PatternExtractor::new()))
    }

    /// Runs `fallback` whenever the primary extractor reports a recoverable
    /// failure.
    pub fn with_fallback(mut self, fallback: Box<dyn FieldExtractor>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Extracts fields from already-acquired text.
    pub fn extract_text(&self, text: &str) -> ParserResult<ExtractionReport> {
        let method = self.extractor.method();
        match self.extractor.extract(text) {
            Ok(record) => {
                let report = ExtractionReport::new(record, method);
                log::info!(
                    "Extracted {}/5 fields via {} ({} confidence)",
                    report.fields_extracted,
                    report.extraction_method,
                    report.confidence
                );
                Ok(report)
            }
            Err(err) if err.is_recoverable() => match &self.fallback {
                Some(fallback) => {
                    log::warn!("{err}; falling back to {}", fallback.method());
                    let record = fallback.extract(text)?;
                    let mut report = ExtractionReport::new(record, fallback.method());
                    report.fallback_reason = Some(err.to_string());
                    Ok(report)
                }
                None => Err(err),
            },
            Err(err) => Err(err),
        }
    }

    /// Reads a PDF and extracts fields from its text.
    pub fn extract_file(&self, input: &Path) -> ParserResult<ExtractionReport> {
        let text = pdf::extract_text_from_pdf(input)?;
        let report = self.extract_text(&text)?;
        Ok(match input.file_name() {
            Some(name) => report.with_source(name.to_string_lossy()),
            None => report,
        })
    }

    /// Label of the primary extractor.
    pub fn method(&self) -> String {
        self.extractor.method()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatementRecord;
    use crate::error::ParserError;

    struct Unavailable;

    impl FieldExtractor for Unavailable {
        fn extract(&self, _text: &str) -> ParserResult<StatementRecord> {
            Err(ParserError::unavailable("stub", "offline"))
        }

        fn method(&self) -> String {
            "assisted_stub".to_string()
        }
    }

    #[test]
    fn test_service_creation() {
        let service = ExtractionService::with_patterns();
        assert_eq!(service.method(), "pattern");
    }

    #[test]
    fn test_unavailable_without_fallback() {
        let service = ExtractionService::new(Box::new(Unavailable));
        let err = service.extract_text("Card ending in 1234").unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_fallback_to_patterns() {
        let service = ExtractionService::new(Box::new(Unavailable))
            .with_fallback(Box::new(PatternExtractor::new()));
        let report = service.extract_text("Card ending in 1234").unwrap();

        assert_eq!(report.extraction_method, "pattern");
        assert_eq!(report.record.card_last4.as_deref(), Some("1234"));
        assert!(report.fallback_reason.unwrap().contains("offline"));
    }
}
