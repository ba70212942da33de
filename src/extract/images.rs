//! Enumeration and decoding of raster images embedded in PDF pages.
//!
//! Images live in a page's `/Resources → /XObject` dictionary as streams
//! with `/Subtype /Image`. Enumeration is best-effort: a malformed entry
//! is logged and skipped, never fatal.

use image::DynamicImage;
use lopdf::{Document, Object, ObjectId};

use crate::error::{Error, Result};

/// A raster image embedded in a page, with enough stream metadata to
/// decode it.
#[derive(Debug, Clone)]
pub struct PageImage {
    /// XObject resource name (e.g., "Im1").
    pub name: String,
    /// Stream data: raw for self-contained encodings (JPEG, JPEG 2000),
    /// decompressed for filterless or Flate-compressed pixel data.
    pub data: Vec<u8>,
    /// First entry of the stream's `/Filter`, if any.
    pub filter: Option<String>,
    /// Width in pixels.
    pub width: Option<u32>,
    /// Height in pixels.
    pub height: Option<u32>,
    /// Color space name (e.g., "DeviceRGB", "DeviceGray").
    pub color_space: Option<String>,
    /// Bits per component.
    pub bits_per_component: Option<u8>,
}

impl PageImage {
    /// Decode the stream into a pixel image.
    ///
    /// JPEG and JPEG 2000 streams decode directly. Filterless or
    /// Flate-compressed streams are reinterpreted as raw 8-bit grayscale
    /// or RGB buffers based on the color space.
    pub fn decode(&self) -> Result<DynamicImage> {
        match self.filter.as_deref() {
            Some("DCTDecode") | Some("JPXDecode") => image::load_from_memory(&self.data)
                .map_err(|e| Error::Extraction(format!("image decode failed: {}", e))),
            _ => self.decode_raw(),
        }
    }

    fn decode_raw(&self) -> Result<DynamicImage> {
        let (width, height) = match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                // Without dimensions the buffer cannot be interpreted;
                // last resort is a format sniff.
                return image::load_from_memory(&self.data)
                    .map_err(|e| Error::Extraction(format!("image decode failed: {}", e)));
            }
        };

        if self.bits_per_component.unwrap_or(8) != 8 {
            return Err(Error::Extraction(format!(
                "unsupported bits per component: {:?}",
                self.bits_per_component
            )));
        }

        match self.color_space.as_deref() {
            Some("DeviceGray") | Some("CalGray") => {
                image::GrayImage::from_raw(width, height, self.data.clone())
                    .map(DynamicImage::ImageLuma8)
                    .ok_or_else(|| {
                        Error::Extraction("grayscale buffer size mismatch".to_string())
                    })
            }
            Some("DeviceRGB") | Some("CalRGB") => {
                image::RgbImage::from_raw(width, height, self.data.clone())
                    .map(DynamicImage::ImageRgb8)
                    .ok_or_else(|| Error::Extraction("RGB buffer size mismatch".to_string()))
            }
            other => Err(Error::Extraction(format!(
                "unsupported color space: {:?}",
                other
            ))),
        }
    }
}

/// Enumerate the raster images on a page, in resource-dictionary order.
pub(crate) fn page_images(doc: &Document, page_id: ObjectId) -> Vec<PageImage> {
    let mut images = Vec::new();

    let Ok(page_dict) = doc.get_dictionary(page_id) else {
        return images;
    };
    let Ok(res) = page_dict.get(b"Resources") else {
        return images;
    };

    let res_dict = match res {
        Object::Reference(r) => doc.get_dictionary(*r).ok(),
        Object::Dictionary(d) => Some(d),
        _ => None,
    };
    let Some(res_dict) = res_dict else {
        return images;
    };

    let xobjects = match res_dict.get(b"XObject") {
        Ok(Object::Reference(r)) => doc.get_dictionary(*r).ok(),
        Ok(Object::Dictionary(d)) => Some(d),
        _ => None,
    };
    let Some(xobj_dict) = xobjects else {
        return images;
    };

    for (name, obj) in xobj_dict.iter() {
        let name_str = String::from_utf8_lossy(name).to_string();
        if let Ok(obj_ref) = obj.as_reference() {
            match extract_image(doc, &name_str, obj_ref) {
                Ok(Some(img)) => images.push(img),
                Ok(None) => {} // not an image XObject (e.g., a form)
                Err(e) => log::warn!("skipping unreadable XObject {}: {}", name_str, e),
            }
        }
    }

    images
}

/// Read one XObject stream; `Ok(None)` when it is not an image.
fn extract_image(doc: &Document, name: &str, obj_ref: ObjectId) -> Result<Option<PageImage>> {
    let object = doc
        .get_object(obj_ref)
        .map_err(|e| Error::Extraction(e.to_string()))?;

    let Object::Stream(stream) = object else {
        return Err(Error::Extraction("XObject is not a stream".to_string()));
    };
    let dict = &stream.dict;

    let is_image = dict
        .get(b"Subtype")
        .ok()
        .and_then(|s| s.as_name().ok())
        .map(|n| n == b"Image".as_slice())
        .unwrap_or(false);
    if !is_image {
        return Ok(None);
    }

    let width = dict
        .get(b"Width")
        .ok()
        .and_then(|w| w.as_i64().ok())
        .map(|w| w as u32);
    let height = dict
        .get(b"Height")
        .ok()
        .and_then(|h| h.as_i64().ok())
        .map(|h| h as u32);
    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|b| b.as_i64().ok())
        .map(|b| b as u8);

    // Filter can be a single name or an array of names; the first entry
    // decides how the data is handled.
    let filter = match dict.get(b"Filter") {
        Ok(Object::Name(n)) => Some(String::from_utf8_lossy(n).to_string()),
        Ok(Object::Array(arr)) => arr
            .first()
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string()),
        _ => None,
    };

    let color_space = match dict.get(b"ColorSpace") {
        Ok(Object::Name(n)) => Some(String::from_utf8_lossy(n).to_string()),
        Ok(Object::Array(arr)) => arr
            .first()
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string()),
        _ => None,
    };

    let data = match filter.as_deref() {
        // Self-contained image formats keep their raw stream bytes.
        Some("DCTDecode") | Some("JPXDecode") => stream.content.clone(),
        _ => stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone()),
    };

    Ok(Some(PageImage {
        name: name.to_string(),
        data,
        filter,
        width,
        height,
        color_space,
        bits_per_component: bits,
    }))
}
