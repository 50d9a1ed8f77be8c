//! Credit card statement field extraction.
//!
//! Pulls five fields out of a credit card statement PDF: the card's last
//! four digits, the statement period, the payment due date, the total amount
//! due and the credit limit. Two interchangeable extractors produce the same
//! [`StatementRecord`]:
//!
//! - **Pattern**: ordered, case-insensitive regular expressions per field;
//!   the first listed pattern that matches wins. Deterministic and offline.
//! - **Assisted**: asks a remote language model (Groq or Gemini) for the
//!   fields as JSON. Needs a credential and network access; any failure is
//!   reported as [`ParserError::AssistedExtractionUnavailable`] so callers
//!   can fall back to patterns.
//!
//! Missing fields are `None`, never errors.
//!
//! # Architecture
//!
//! - [`domain`]: the record, per-field pattern tables, amount parsing
//! - [`extraction`]: extractors and the service coordinating them
//! - [`providers`]: language-model backends
//! - [`pdf`]: text acquisition from PDF files
//! - [`config`]: sample statements, output paths, provider settings
//! - [`error`]: error types
//!
//! # Quick Start
//!
//! ```no_run
//! use statement_parser::ExtractionService;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ExtractionService::with_patterns();
//! let report = service.extract_file(Path::new("statement.pdf"))?;
//! println!("{}", report.to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! # Pattern Matching
//!
//! ```
//! use statement_parser::PatternExtractor;
//!
//! let text = "Card Number: XXXX-XXXX-XXXX-4321\nPayment Due Date: 02/15/2024";
//! let record = PatternExtractor::new().extract_record(text);
//! assert_eq!(record.card_last4.as_deref(), Some("4321"));
//! assert_eq!(record.payment_due_date.as_deref(), Some("02/15/2024"));
//! assert_eq!(record.credit_limit, None);
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod extraction;
pub mod pdf;
pub mod providers;

pub use config::Config;
pub use domain::{Confidence, Field, StatementRecord};
pub use error::{ParserError, ParserResult};
pub use extraction::{
    AssistedExtractor, ExtractionMode, ExtractionReport, ExtractionService, FieldExtractor,
    PatternExtractor,
};
pub use pdf::{extract_text_from_bytes, extract_text_from_pdf};
pub use providers::{create_provider, LlmProvider, ProviderError, ProviderKind};
