//! Comparison pipeline: validate sizes, extract both documents, classify.

use std::fs;
use std::path::Path;

use crate::diff::{self, Comparison};
use crate::error::{Error, Result};
use crate::extract::{PdfTextExtractor, TextExtractor};

/// Maximum accepted size for a single input document, in bytes (10 MB).
pub const MAX_DOCUMENT_SIZE: u64 = 10 * 1024 * 1024;

/// Compares two documents end to end.
///
/// Generic over the extractor so callers (and tests) can substitute one;
/// the default is [`PdfTextExtractor`].
pub struct Pipeline<E = PdfTextExtractor> {
    extractor: E,
}

impl Pipeline<PdfTextExtractor> {
    /// Pipeline with the default PDF extractor.
    pub fn new() -> Self {
        Self {
            extractor: PdfTextExtractor::new(),
        }
    }
}

impl Default for Pipeline<PdfTextExtractor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: TextExtractor> Pipeline<E> {
    /// Pipeline with a specific extractor.
    pub fn with_extractor(extractor: E) -> Self {
        Self { extractor }
    }

    /// Compare two in-memory documents.
    ///
    /// Both sizes are validated against [`MAX_DOCUMENT_SIZE`] before any
    /// extraction work; extraction failures carry a label naming which
    /// document failed. The two extractions are independent and run in
    /// parallel.
    pub fn process_bytes(&self, first: &[u8], second: &[u8]) -> Result<Comparison> {
        check_size(first.len() as u64)?;
        check_size(second.len() as u64)?;

        let (first_text, second_text) = rayon::join(
            || {
                self.extractor
                    .extract_bytes(first)
                    .map_err(|e| e.for_document("first document"))
            },
            || {
                self.extractor
                    .extract_bytes(second)
                    .map_err(|e| e.for_document("second document"))
            },
        );
        let (first_text, second_text) = (first_text?, second_text?);

        Ok(diff::compare(&first_text, &second_text))
    }

    /// Compare two documents on disk.
    ///
    /// File sizes are checked from metadata before either file's content
    /// is read.
    pub fn process_files(&self, first: &Path, second: &Path) -> Result<Comparison> {
        check_size(file_size(first)?)?;
        check_size(file_size(second)?)?;

        let first_data = read_document(first)?;
        let second_data = read_document(second)?;

        log::info!(
            "starting comparison of {} and {}",
            first.display(),
            second.display()
        );
        self.process_bytes(&first_data, &second_data)
    }
}

fn check_size(size: u64) -> Result<()> {
    if size > MAX_DOCUMENT_SIZE {
        return Err(Error::SizeExceeded {
            size,
            limit: MAX_DOCUMENT_SIZE,
        });
    }
    Ok(())
}

fn file_size(path: &Path) -> Result<u64> {
    let meta = fs::metadata(path)
        .map_err(|e| Error::InvalidDocument(format!("cannot stat {}: {}", path.display(), e)))?;
    Ok(meta.len())
}

fn read_document(path: &Path) -> Result<Vec<u8>> {
    fs::read(path)
        .map_err(|e| Error::InvalidDocument(format!("cannot read {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub extractor that records how often it runs.
    struct CountingExtractor {
        calls: AtomicUsize,
        output: &'static str,
    }

    impl CountingExtractor {
        fn new(output: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                output,
            }
        }
    }

    impl TextExtractor for CountingExtractor {
        fn extract_bytes(&self, _data: &[u8]) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.output.to_string())
        }
    }

    #[test]
    fn test_oversize_document_fails_before_extraction() {
        let pipeline = Pipeline::with_extractor(CountingExtractor::new("text\n"));
        let oversized = vec![0u8; (MAX_DOCUMENT_SIZE + 1) as usize];

        let result = pipeline.process_bytes(&oversized, b"%PDF-1.4");
        assert!(matches!(result, Err(Error::SizeExceeded { .. })));
        assert_eq!(pipeline.extractor.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_second_document_oversize_also_fails_fast() {
        let pipeline = Pipeline::with_extractor(CountingExtractor::new("text\n"));
        let oversized = vec![0u8; (MAX_DOCUMENT_SIZE + 1) as usize];

        let result = pipeline.process_bytes(b"%PDF-1.4", &oversized);
        assert!(matches!(result, Err(Error::SizeExceeded { .. })));
        assert_eq!(pipeline.extractor.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_documents_at_limit_are_processed() {
        let pipeline = Pipeline::with_extractor(CountingExtractor::new("same\n"));
        let at_limit = vec![0u8; MAX_DOCUMENT_SIZE as usize];

        let result = pipeline.process_bytes(&at_limit, &at_limit).unwrap();
        assert!(result.summary.is_empty());
        assert_eq!(pipeline.extractor.calls.load(Ordering::SeqCst), 2);
    }

    /// Failing extractor identifying itself through the error message.
    struct FailingExtractor;

    impl TextExtractor for FailingExtractor {
        fn extract_bytes(&self, _data: &[u8]) -> Result<String> {
            Err(Error::InvalidDocument("corrupt xref table".to_string()))
        }
    }

    #[test]
    fn test_extraction_error_names_the_document() {
        let pipeline = Pipeline::with_extractor(FailingExtractor);
        let err = pipeline.process_bytes(b"a", b"b").unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(ref m) if m.contains("first document")));
    }

    #[test]
    fn test_missing_file_is_invalid_document() {
        let pipeline = Pipeline::with_extractor(CountingExtractor::new("text\n"));
        let err = pipeline
            .process_files(
                Path::new("/nonexistent/a.pdf"),
                Path::new("/nonexistent/b.pdf"),
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
    }
}
