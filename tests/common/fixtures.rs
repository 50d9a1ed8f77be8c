//! Test fixtures and statement PDF builders.
//!
//! Provides a builder for creating statement PDFs with specific content,
//! one text line per row so extracted text keeps the line structure.

use anyhow::Result;
use printpdf::*;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// The labelled statement used throughout the tests.
pub const LABELLED_STATEMENT: &str = "Card Number: XXXX-XXXX-XXXX-4321\n\
                                      Statement Period: 01/01/2024 - 01/31/2024\n\
                                      Payment Due Date: 02/15/2024\n\
                                      Total Amount Due: $1,234.56\n\
                                      Credit Limit: $5,000.00";

/// Builder for creating test PDFs with statement content.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// let pdf = StatementPdfBuilder::new()
///     .with_title("Axis Bank Credit Card Statement")
///     .with_line("Card ending in 7381")
///     .new_page()
///     .with_line("Credit Limit: $5,000.00")
///     .build(Path::new("/tmp/statement.pdf"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StatementPdfBuilder {
    title: String,
    pages: Vec<Vec<String>>,
    page_width: Mm,
    page_height: Mm,
}

impl StatementPdfBuilder {
    /// Creates a builder with a single empty A4 page.
    pub fn new() -> Self {
        Self {
            title: "Credit Card Statement".to_string(),
            pages: vec![Vec::new()],
            page_width: Mm(210.0),
            page_height: Mm(297.0),
        }
    }

    /// Sets the document title, also written as the first line.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Adds a line of text to the current page.
    pub fn with_line(mut self, line: &str) -> Self {
        if let Some(page) = self.pages.last_mut() {
            page.push(line.to_string());
        }
        self
    }

    /// Adds each line of a text block to the current page.
    pub fn with_text(self, text: &str) -> Self {
        text.lines().fold(self, |builder, line| builder.with_line(line))
    }

    /// Starts a new page.
    pub fn new_page(mut self) -> Self {
        self.pages.push(Vec::new());
        self
    }

    /// Builds the PDF and writes it to the specified path.
    pub fn build(self, output_path: &Path) -> Result<PathBuf> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(&self.title, self.page_width, self.page_height, "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        for (index, lines) in self.pages.iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(self.page_width, self.page_height, "Layer 1")
            };
            let current_layer = doc.get_page(page).get_layer(layer);

            let mut y = 270.0;
            if index == 0 && !lines.is_empty() {
                current_layer.use_text(&self.title, 14.0, Mm(20.0), Mm(y), &font);
                y -= 10.0;
            }
            for line in lines {
                current_layer.use_text(line, 11.0, Mm(20.0), Mm(y), &font);
                y -= 7.0;
            }
        }

        doc.save(&mut BufWriter::new(fs::File::create(output_path)?))?;

        Ok(output_path.to_path_buf())
    }
}

impl Default for StatementPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a PDF carrying the labelled statement text.
pub fn create_labelled_statement(path: &Path) -> Result<PathBuf> {
    StatementPdfBuilder::new()
        .with_title("Sample Bank Credit Card Statement")
        .with_text(LABELLED_STATEMENT)
        .build(path)
}

/// Creates a PDF whose only page carries no text, like a scanned image.
pub fn create_blank_pdf(path: &Path) -> Result<PathBuf> {
    StatementPdfBuilder::new().build(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builder_pattern() {
        let builder = StatementPdfBuilder::new()
            .with_title("Test")
            .with_line("Card ending in 1234")
            .new_page()
            .with_text("a\nb");

        assert_eq!(builder.title, "Test");
        assert_eq!(builder.pages.len(), 2);
        assert_eq!(builder.pages[1], vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_create_labelled_statement() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let pdf_path = temp_dir.path().join("statement.pdf");

        create_labelled_statement(&pdf_path)?;

        assert!(pdf_path.exists());
        Ok(())
    }
}
