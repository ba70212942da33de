//! Error types for the pdfdiff library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfdiff operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while comparing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is missing, empty, or cannot be parsed as a PDF document.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// The document parsed correctly but yielded no extractable text at all.
    #[error("no text could be extracted from the document (empty or unsupported format)")]
    EmptyContent,

    /// An input document exceeds the size ceiling.
    #[error("document size {size} exceeds {limit} byte limit")]
    SizeExceeded { size: u64, limit: u64 },

    /// Uncategorized failure during the extraction stage.
    #[error("text extraction failed: {0}")]
    Extraction(String),

    /// Uncategorized failure during the classification stage.
    #[error("text comparison failed: {0}")]
    Comparison(String),

    /// Error from an OCR backend for a single image. Recovered at the
    /// per-image level by the extractor; callers only see this through
    /// [`crate::extract::OcrBackend::recognize`].
    #[error("OCR error: {0}")]
    Ocr(String),
}

impl Error {
    /// Prefix message-carrying variants with a label identifying which
    /// document failed. Used by the pipeline so extraction errors name
    /// their source without changing category; variants without a message
    /// pass through unchanged.
    pub(crate) fn for_document(self, label: &str) -> Error {
        match self {
            Error::InvalidDocument(msg) => Error::InvalidDocument(format!("{}: {}", label, msg)),
            Error::Extraction(msg) => Error::Extraction(format!("{}: {}", label, msg)),
            other => other,
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::InvalidDocument(err.to_string()),
        }
    }
}
