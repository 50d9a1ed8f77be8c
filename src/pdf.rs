//! Text acquisition from PDF documents.
//!
//! Wraps [`pdf_extract`] and concatenates page text in page order. Pages
//! without a text layer (scanned images) contribute an empty string, so a
//! scanned statement yields little or no text instead of an error.
//!
//! `pdf_extract` can panic on malformed input rather than returning an error;
//! calls are wrapped in [`std::panic::catch_unwind`] and reported as
//! [`ParserError::TextExtraction`].

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::error::{ParserError, ParserResult};

/// The PDF header may be preceded by junk; readers scan this many bytes.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Placeholder path used in errors for in-memory documents.
const IN_MEMORY: &str = "<memory>";

/// Reads a PDF from disk and returns its text.
pub fn extract_text_from_pdf(path: &Path) -> ParserResult<String> {
    if !path.exists() {
        return Err(ParserError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "Input file does not exist"),
        });
    }

    let bytes = fs::read(path).map_err(|e| ParserError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    extract_pages(&bytes, path).map(|pages| join_pages(&pages))
}

/// Extracts text from an in-memory PDF.
pub fn extract_text_from_bytes(bytes: &[u8]) -> ParserResult<String> {
    extract_pages(bytes, Path::new(IN_MEMORY)).map(|pages| join_pages(&pages))
}

/// Returns true if the buffer carries a `%PDF-` header.
pub fn has_pdf_signature(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    window.windows(5).any(|w| w == b"%PDF-")
}

fn extract_pages(bytes: &[u8], path: &Path) -> ParserResult<Vec<String>> {
    if !has_pdf_signature(bytes) {
        return Err(ParserError::invalid_input(
            "input",
            format!("'{}' is not a PDF document", path.display()),
        ));
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    match result {
        Ok(Ok(pages)) => {
            log::debug!("Extracted {} page(s) from {}", pages.len(), path.display());
            Ok(pages)
        }
        Ok(Err(e)) => Err(ParserError::TextExtraction {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
        Err(_) => Err(ParserError::TextExtraction {
            path: path.to_path_buf(),
            reason: "PDF library panicked (malformed document)".to_string(),
        }),
    }
}

fn join_pages(pages: &[String]) -> String {
    pages.join("\n")
}

/// Writes extracted text to `<output_dir>/<stem>_raw_text.txt`.
pub fn save_raw_text(output_dir: &Path, stem: &str, text: &str) -> ParserResult<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|e| ParserError::Io {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let path = output_dir.join(format!("{stem}_raw_text.txt"));
    fs::write(&path, text).map_err(|e| ParserError::Io {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}
