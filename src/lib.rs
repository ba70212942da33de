//! # pdfdiff
//!
//! Line-level PDF comparison library for Rust.
//!
//! This library extracts the text of two PDF documents (falling back to
//! OCR for pages without direct text) and produces a categorized, ordered
//! list of line differences plus aggregate counts.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfdiff::compare_files;
//!
//! fn main() -> pdfdiff::Result<()> {
//!     let result = compare_files("old.pdf", "new.pdf")?;
//!
//!     for entry in &result.differences {
//!         println!("{:?}", entry);
//!     }
//!     println!(
//!         "{} additions, {} deletions, {} modifications",
//!         result.summary.additions,
//!         result.summary.deletions,
//!         result.summary.modifications
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Direct text extraction**: per-page content-stream decoding
//! - **OCR fallback**: image-only pages go through Tesseract (`ocr` feature)
//! - **Categorized diff**: unchanged / added / removed / modified entries,
//!   with adjacent removal+addition pairs merged into single-line
//!   replacements
//! - **Size guard**: inputs over 10 MB are rejected before extraction
//! - **JSON output**: results serialize with serde

pub mod detect;
pub mod diff;
pub mod error;
pub mod extract;
pub mod pipeline;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf_bytes, PdfFormat};
pub use diff::{compare, Comparison, DiffEntry, DiffKind, Summary};
pub use error::{Error, Result};
pub use extract::{OcrBackend, PageImage, PdfTextExtractor, TextExtractor};
pub use pipeline::{Pipeline, MAX_DOCUMENT_SIZE};

#[cfg(feature = "ocr")]
pub use extract::TesseractOcr;

use std::path::Path;

/// Compare two PDF files and return the classified differences.
///
/// # Example
///
/// ```no_run
/// use pdfdiff::compare_files;
///
/// let result = compare_files("a.pdf", "b.pdf").unwrap();
/// println!("{} modifications", result.summary.modifications);
/// ```
pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(first: P, second: Q) -> Result<Comparison> {
    Pipeline::new().process_files(first.as_ref(), second.as_ref())
}

/// Compare two in-memory PDF documents.
pub fn compare_bytes(first: &[u8], second: &[u8]) -> Result<Comparison> {
    Pipeline::new().process_bytes(first, second)
}

/// Extract plain text from a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfdiff::extract_text;
///
/// let text = extract_text("document.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    PdfTextExtractor::new().extract_file(path.as_ref())
}

/// Extract plain text from an in-memory PDF document.
pub fn extract_text_from_bytes(data: &[u8]) -> Result<String> {
    PdfTextExtractor::new().extract_bytes(data)
}
