//! OCR backend abstraction.
//!
//! The extractor only needs one operation from an OCR engine: turn a
//! decoded raster image into text. The trait keeps the engine pluggable
//! and lets tests substitute a stub.

use image::DynamicImage;

use crate::error::Result;

/// Optical character recognition over a decoded image.
pub trait OcrBackend: Send + Sync {
    /// Name of this backend, for log messages.
    fn name(&self) -> &str;

    /// Recognize text in the image. Errors are recovered per image by the
    /// extractor; they never fail a whole document on their own.
    fn recognize(&self, image: &DynamicImage) -> Result<String>;
}

#[cfg(feature = "ocr")]
pub use tesseract::TesseractOcr;

#[cfg(feature = "ocr")]
mod tesseract {
    use super::*;
    use crate::error::Error;

    /// OCR backend driving the Tesseract CLI via `rusty-tesseract`.
    #[derive(Debug, Clone)]
    pub struct TesseractOcr {
        lang: String,
    }

    impl TesseractOcr {
        /// Backend using the default language pack (`eng`).
        pub fn new() -> Self {
            Self {
                lang: "eng".to_string(),
            }
        }

        /// Set the Tesseract language code (e.g., `deu`, `kor`).
        pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
            self.lang = lang.into();
            self
        }
    }

    impl Default for TesseractOcr {
        fn default() -> Self {
            Self::new()
        }
    }

    impl OcrBackend for TesseractOcr {
        fn name(&self) -> &str {
            "tesseract"
        }

        fn recognize(&self, image: &DynamicImage) -> Result<String> {
            let img = rusty_tesseract::Image::from_dynamic_image(image)
                .map_err(|e| Error::Ocr(e.to_string()))?;

            let mut args = rusty_tesseract::Args::default();
            args.lang = self.lang.clone();

            rusty_tesseract::image_to_string(&img, &args).map_err(|e| Error::Ocr(e.to_string()))
        }
    }
}
