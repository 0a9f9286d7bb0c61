//! PDF text and metadata extraction.
//!
//! `pdf-extract` produces the body text; `lopdf` reads the page tree and
//! the trailer `Info` dictionary. Both are synchronous and CPU bound, so
//! callers on the async runtime go through `spawn_blocking`.

use crate::error::FileProcessingError;
use lopdf::{Dictionary, Document, Object};
use std::collections::BTreeMap;

/// Key under which the header version is reported in the info map.
pub const FORMAT_VERSION_KEY: &str = "PDFFormatVersion";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfContent {
    pub text: String,
    pub pages: u32,
    pub info: BTreeMap<String, String>,
}

pub fn extract_pdf(bytes: &[u8]) -> Result<PdfContent, FileProcessingError> {
    let document =
        Document::load_mem(bytes).map_err(|e| FileProcessingError::Pdf(e.to_string()))?;
    let pages = u32::try_from(document.get_pages().len()).unwrap_or(u32::MAX);

    let mut info = document_info(&document);
    info.insert(FORMAT_VERSION_KEY.to_string(), document.version.clone());

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| FileProcessingError::Pdf(e.to_string()))?;

    tracing::debug!(pages, chars = text.len(), "Extracted PDF text");
    Ok(PdfContent { text, pages, info })
}

/// String-valued entries of the trailer `Info` dictionary.
fn document_info(document: &Document) -> BTreeMap<String, String> {
    let Ok(info) = document.trailer.get(b"Info") else {
        return BTreeMap::new();
    };
    let dictionary: Option<&Dictionary> = match info {
        Object::Reference(id) => document.get_dictionary(*id).ok(),
        Object::Dictionary(dictionary) => Some(dictionary),
        _ => None,
    };

    dictionary
        .map(|dictionary| {
            dictionary
                .iter()
                .filter_map(|(key, value)| {
                    let value = match value {
                        Object::String(bytes, _) => decode_text_string(bytes),
                        Object::Name(name) => String::from_utf8_lossy(name).into_owned(),
                        _ => return None,
                    };
                    Some((String::from_utf8_lossy(key).into_owned(), value))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// PDF text strings are UTF-16BE when they carry a byte order mark and
/// single-byte otherwise. The single-byte case is read as Latin-1, which
/// matches PDFDocEncoding for printable ASCII and most accented letters.
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&byte| char::from(byte)).collect()
}
