//! Domain models and field-matching rules.
//!
//! This module holds the statement record, the per-field pattern tables
//! used by the pattern extractor, and amount normalization.

pub mod amount;
pub mod patterns;
pub mod record;

pub use amount::parse_amount;
pub use patterns::{first_match, patterns_for, PatternMatch};
pub use record::{Confidence, Field, StatementRecord};
