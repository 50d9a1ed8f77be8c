//! PDF inspection helpers.

use anyhow::Result;
use std::path::Path;

/// Extracts text from a PDF, returning an error instead of panicking.
pub fn extract_text(pdf_path: &Path) -> Result<String> {
    statement_parser::extract_text_from_pdf(pdf_path)
        .map_err(|e| anyhow::anyhow!("Failed to extract text: {}", e))
}

/// Checks if a PDF contains all of the given snippets.
pub fn pdf_contains_all(pdf_path: &Path, snippets: &[&str]) -> Result<bool> {
    let text = extract_text(pdf_path)?;
    Ok(snippets.iter().all(|s| text.contains(s)))
}

/// Number of pages in a PDF.
pub fn page_count(pdf_path: &Path) -> Result<usize> {
    Ok(::lopdf::Document::load(pdf_path)?.get_pages().len())
}

/// Validates that a PDF is loadable and has basic structure.
pub fn is_valid_pdf(pdf_path: &Path) -> bool {
    ::lopdf::Document::load(pdf_path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fixtures::StatementPdfBuilder;
    use tempfile::TempDir;

    #[test]
    fn test_page_count() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("two_pages.pdf");
        StatementPdfBuilder::new()
            .with_line("page one")
            .new_page()
            .with_line("page two")
            .build(&path)?;

        assert!(is_valid_pdf(&path));
        assert_eq!(page_count(&path)?, 2);
        Ok(())
    }
}
