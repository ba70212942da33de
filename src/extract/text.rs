//! Direct text extraction from PDF content streams.
//!
//! Walks a page's content operations, decoding show-text operators with
//! the active font's encoding. Layout reconstruction is deliberately
//! minimal: text-positioning operators that move to a new line emit a
//! line break, nothing more.

use lopdf::{Document, Object, ObjectId};

use crate::error::{Error, Result};

/// Extract the text of a single page.
///
/// Returns an empty string for pages without a content stream or without
/// any show-text operators; structural errors inside the stream propagate
/// so the caller can decide whether to fall back to OCR.
pub(crate) fn page_text(doc: &Document, page_id: ObjectId) -> Result<String> {
    let data = match page_content(doc, page_id) {
        Ok(data) => data,
        // No Contents entry at all: an empty page, not an error.
        Err(_) => return Ok(String::new()),
    };

    let content = lopdf::content::Content::decode(&data)
        .map_err(|e| Error::Extraction(format!("content stream decode failed: {}", e)))?;

    let mut text = String::new();
    let mut current_font: Vec<u8> = Vec::new();

    for op in &content.operations {
        match op.operator.as_str() {
            "Tf" => {
                if let Some(Object::Name(name)) = op.operands.first() {
                    current_font = name.clone();
                }
            }
            "Tj" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    text.push_str(&decode_text(doc, page_id, &current_font, bytes));
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    for item in items {
                        match item {
                            Object::String(bytes, _) => {
                                text.push_str(&decode_text(doc, page_id, &current_font, bytes));
                            }
                            // Large negative adjustments usually stand in
                            // for inter-word spacing.
                            Object::Integer(i) if *i <= -100 => text.push(' '),
                            Object::Real(r) if *r <= -100.0 => text.push(' '),
                            _ => {}
                        }
                    }
                }
            }
            "'" => {
                push_line_break(&mut text);
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    text.push_str(&decode_text(doc, page_id, &current_font, bytes));
                }
            }
            "\"" => {
                push_line_break(&mut text);
                if let Some(Object::String(bytes, _)) = op.operands.get(2) {
                    text.push_str(&decode_text(doc, page_id, &current_font, bytes));
                }
            }
            // Moves of the text position to a new line.
            "Td" | "TD" => {
                if let Some(ty) = op.operands.get(1).and_then(as_number) {
                    if ty != 0.0 {
                        push_line_break(&mut text);
                    }
                }
            }
            "T*" | "ET" => push_line_break(&mut text),
            _ => {}
        }
    }

    Ok(text)
}

/// Append a line break unless the accumulator is empty or already ends
/// with one.
fn push_line_break(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

/// Collect the raw (decompressed) content stream bytes for a page.
fn page_content(doc: &Document, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::Extraction(e.to_string()))?;

    let contents = page_dict
        .get(b"Contents")
        .map_err(|e| Error::Extraction(e.to_string()))?;

    match contents {
        Object::Reference(r) => {
            if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                return Ok(stream_data(s));
            }
            Err(Error::Extraction("invalid content stream".to_string()))
        }
        Object::Stream(s) => Ok(stream_data(s)),
        Object::Array(arr) => {
            let mut content = Vec::new();
            for obj in arr {
                if let Object::Reference(r) = obj {
                    if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                        content.extend_from_slice(&stream_data(s));
                        content.push(b' ');
                    }
                }
            }
            Ok(content)
        }
        _ => Err(Error::Extraction("invalid content stream".to_string())),
    }
}

/// Stream bytes, decompressed when a filter applies. Filterless streams
/// make `decompressed_content` fail; their raw content is already the
/// data.
fn stream_data(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

/// Decode a text byte sequence using the font's encoding on the given page,
/// falling back to simple decoding when the font or encoding is unavailable.
fn decode_text(doc: &Document, page_id: ObjectId, font_name: &[u8], bytes: &[u8]) -> String {
    if let Ok(fonts) = doc.get_page_fonts(page_id) {
        if let Some(font_dict) = fonts.get(font_name) {
            if let Ok(encoding) = font_dict.get_font_encoding(doc) {
                if let Ok(text) = Document::decode_text(&encoding, bytes) {
                    return text;
                }
            }
        }
    }
    decode_text_simple(bytes)
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM marker
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Latin-1 fallback
    bytes.iter().map(|&b| b as char).collect()
}

fn as_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}
