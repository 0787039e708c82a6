//! Text extraction: pull plain text from one page of the PDF.
//!
//! ## Why spawn_blocking?
//!
//! lopdf parses the cross-reference table and decodes content streams
//! synchronously on the calling thread. Page extraction on a large document
//! is CPU-bound work, so it runs under `tokio::task::spawn_blocking` to keep
//! the async executor's worker threads free. The `Document` handle lives only
//! inside the blocking closure and is dropped on every exit path.

use crate::error::Pdf2SpeechError;
use crate::output::DocumentMetadata;
use lopdf::{Dictionary, Document, Object};
use std::path::Path;
use tracing::{debug, info};

/// Extract the plain text of a single page (1-indexed).
///
/// An empty string is a valid result — a page with no extractable text
/// (images, vector art) is not an error.
pub async fn extract_page_text(
    pdf_path: &Path,
    page: usize,
) -> Result<String, Pdf2SpeechError> {
    let path = pdf_path.to_path_buf();
    tokio::task::spawn_blocking(move || extract_blocking(&path, page))
        .await
        .map_err(|e| Pdf2SpeechError::Internal(format!("Extraction task panicked: {}", e)))?
}

fn extract_blocking(path: &Path, page: usize) -> Result<String, Pdf2SpeechError> {
    let doc = load_document(path)?;

    let total = doc.get_pages().len();
    info!("PDF loaded: {} pages", total);

    if page > total {
        return Err(Pdf2SpeechError::PageOutOfRange { page, total });
    }

    let text =
        doc.extract_text(&[page as u32])
            .map_err(|e| Pdf2SpeechError::ExtractionFailed {
                page,
                detail: e.to_string(),
            })?;

    debug!("Extracted {} chars from page {}", text.chars().count(), page);
    Ok(text)
}

/// Read document-level metadata without extracting any text.
pub async fn extract_metadata(pdf_path: &Path) -> Result<DocumentMetadata, Pdf2SpeechError> {
    let path = pdf_path.to_path_buf();
    tokio::task::spawn_blocking(move || metadata_blocking(&path))
        .await
        .map_err(|e| Pdf2SpeechError::Internal(format!("Metadata task panicked: {}", e)))?
}

fn metadata_blocking(path: &Path) -> Result<DocumentMetadata, Pdf2SpeechError> {
    let doc = load_document(path)?;

    let info = info_dictionary(&doc);
    Ok(DocumentMetadata {
        title: info.and_then(|d| info_string(d, b"Title")),
        author: info.and_then(|d| info_string(d, b"Author")),
        subject: info.and_then(|d| info_string(d, b"Subject")),
        creator: info.and_then(|d| info_string(d, b"Creator")),
        producer: info.and_then(|d| info_string(d, b"Producer")),
        page_count: doc.get_pages().len(),
        pdf_version: doc.version.clone(),
    })
}

fn load_document(path: &Path) -> Result<Document, Pdf2SpeechError> {
    let doc = Document::load(path).map_err(|e| Pdf2SpeechError::CorruptPdf {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    if doc.is_encrypted() {
        return Err(Pdf2SpeechError::EncryptedPdf {
            path: path.to_path_buf(),
        });
    }

    Ok(doc)
}

/// The trailer's Info dictionary, if present and resolvable.
fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    let info = doc.trailer.get(b"Info").ok()?;
    match info {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Decode a string entry from the Info dictionary.
///
/// PDF text strings are either UTF-16BE with a BOM or PDFDocEncoding, which
/// is close enough to Latin-1 for metadata fields. Empty values collapse to
/// `None` so callers never print a blank "Title:" line.
fn info_string(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => {
            let decoded = decode_pdf_string(bytes);
            let trimmed = decoded.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => None,
    }
}

fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        // UTF-16BE with BOM
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_plain_latin1() {
        assert_eq!(decode_pdf_string(b"Annual Report"), "Annual Report");
    }

    #[test]
    fn decode_utf16be_with_bom() {
        // "Hi" as UTF-16BE with BOM
        let bytes = [0xFE, 0xFF, 0x00, b'H', 0x00, b'i'];
        assert_eq!(decode_pdf_string(&bytes), "Hi");
    }

    #[test]
    fn info_string_skips_blank_values() {
        let mut dict = Dictionary::new();
        dict.set("Title", Object::string_literal("   "));
        assert_eq!(info_string(&dict, b"Title"), None);

        dict.set("Title", Object::string_literal("Quarterly Review"));
        assert_eq!(
            info_string(&dict, b"Title"),
            Some("Quarterly Review".to_string())
        );
    }

    #[tokio::test]
    async fn corrupt_file_is_a_controlled_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-1.4\nthis is not a real body").unwrap();

        let err = extract_page_text(&path, 1).await.unwrap_err();
        assert!(matches!(err, Pdf2SpeechError::CorruptPdf { .. }));
    }
}
