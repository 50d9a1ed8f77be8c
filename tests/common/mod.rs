//! Common test utilities and helpers.
//!
//! Shared by the integration and CLI tests:
//! - Statement PDF builders and fixture text
//! - PDF inspection helpers
//! - Record assertions

pub mod assertions;
pub mod fixtures;
pub mod pdf_helpers;

pub use assertions::*;
pub use fixtures::*;
pub use pdf_helpers::*;
