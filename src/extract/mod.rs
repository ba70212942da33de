//! Document-to-text extraction.
//!
//! Converts one PDF document into a linear text blob. Each page is tried
//! for direct text first; pages that yield none fall back to OCR over
//! their embedded raster images. Per-image OCR failures are logged and
//! skipped. Only a document with no extractable text anywhere is an error.
//!
//! # Example
//!
//! ```no_run
//! use pdfdiff::extract::{PdfTextExtractor, TextExtractor};
//!
//! fn main() -> pdfdiff::Result<()> {
//!     let extractor = PdfTextExtractor::new();
//!     let text = extractor.extract_file("document.pdf".as_ref())?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

mod images;
mod ocr;
mod text;

pub use images::PageImage;
pub use ocr::OcrBackend;

#[cfg(feature = "ocr")]
pub use ocr::TesseractOcr;

use std::path::Path;

use lopdf::Document;

use crate::detect;
use crate::error::{Error, Result};

/// Trait for document text extraction.
///
/// The pipeline depends on this seam rather than on a concrete extractor,
/// so tests can substitute stubs.
pub trait TextExtractor: Send + Sync {
    /// Extract all text from an in-memory document.
    ///
    /// Guaranteed non-empty (and not whitespace-only) on success.
    fn extract_bytes(&self, data: &[u8]) -> Result<String>;

    /// Extract all text from a document on disk.
    fn extract_file(&self, path: &Path) -> Result<String> {
        let data = std::fs::read(path).map_err(|e| {
            Error::InvalidDocument(format!("cannot read {}: {}", path.display(), e))
        })?;
        self.extract_bytes(&data)
    }
}

/// PDF text extractor with optional OCR fallback for image-only pages.
pub struct PdfTextExtractor {
    ocr: Option<Box<dyn OcrBackend>>,
}

impl PdfTextExtractor {
    /// Extractor with the default OCR backend (Tesseract when the `ocr`
    /// feature is enabled, none otherwise).
    pub fn new() -> Self {
        #[cfg(feature = "ocr")]
        {
            Self {
                ocr: Some(Box::new(TesseractOcr::new())),
            }
        }
        #[cfg(not(feature = "ocr"))]
        {
            Self { ocr: None }
        }
    }

    /// Extractor without any OCR fallback; image-only pages contribute
    /// nothing.
    pub fn without_ocr() -> Self {
        Self { ocr: None }
    }

    /// Extractor with a specific OCR backend.
    pub fn with_ocr_backend(backend: Box<dyn OcrBackend>) -> Self {
        Self { ocr: Some(backend) }
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_bytes(&self, data: &[u8]) -> Result<String> {
        if data.is_empty() {
            return Err(Error::InvalidDocument("document is empty".to_string()));
        }
        detect::detect_format_from_bytes(data)?;

        let doc = Document::load_mem(data)?;

        let mut accumulated = String::new();
        for (page_num, page_id) in doc.get_pages() {
            let page_text = match text::page_text(&doc, page_id) {
                Ok(t) => t,
                Err(e) => {
                    log::warn!("page {}: direct text extraction failed: {}", page_num, e);
                    String::new()
                }
            };

            if !page_text.trim().is_empty() {
                log::debug!("page {}: extracted {} characters", page_num, page_text.len());
                push_terminated(&mut accumulated, &page_text);
            } else if let Some(ocr) = &self.ocr {
                log::info!(
                    "page {}: no text found, attempting OCR via {}",
                    page_num,
                    ocr.name()
                );
                for (img_idx, img) in images::page_images(&doc, page_id).iter().enumerate() {
                    match img.decode().and_then(|decoded| ocr.recognize(&decoded)) {
                        Ok(ocr_text) => {
                            log::debug!(
                                "page {}, image {}: OCR extracted {} chars",
                                page_num,
                                img_idx + 1,
                                ocr_text.len()
                            );
                            push_terminated(&mut accumulated, &ocr_text);
                        }
                        Err(e) => log::warn!(
                            "{} failed for image {} on page {}: {}",
                            ocr.name(),
                            img_idx + 1,
                            page_num,
                            e
                        ),
                    }
                }
            }
        }

        if accumulated.trim().is_empty() {
            return Err(Error::EmptyContent);
        }

        log::debug!("total text extracted: {} characters", accumulated.len());
        Ok(accumulated)
    }
}

/// Append one page or image contribution, newline-terminated.
fn push_terminated(accumulated: &mut String, contribution: &str) {
    accumulated.push_str(contribution);
    if !contribution.ends_with('\n') {
        accumulated.push('\n');
    }
}
