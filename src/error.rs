//! Error types for the pdf2speech library.
//!
//! Every failure the pipeline can hit maps to exactly one variant of
//! [`Pdf2SpeechError`]. The early stages (locating and parsing the input)
//! historically crashed out of the original tool; here they are first-class
//! variants so every stage fails the same way: a typed error the caller can
//! match on, with a message that tells the user what to do next.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2speech library.
#[derive(Debug, Error)]
pub enum Pdf2SpeechError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input directory contained no PDF files.
    #[error("No PDF files found in '{dir}'\nDrop a .pdf file there, or pass an explicit input path.")]
    NoInputFound { dir: PathBuf },

    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file or directory.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a valid file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { path: PathBuf, detail: String },

    /// The document is encrypted; text extraction needs the decrypted form.
    #[error("PDF '{path}' is encrypted.\nDecrypt it first: qpdf --decrypt --password=PW input.pdf output.pdf")]
    EncryptedPdf { path: PathBuf },

    /// The requested page number exceeds the actual page count.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// lopdf failed while decoding the page's content streams.
    #[error("Text extraction failed for page {page}: {detail}")]
    ExtractionFailed { page: usize, detail: String },

    // ── Synthesis errors ─────────────────────────────────────────────────
    /// Polly rejected the request, or the call failed at the transport level.
    ///
    /// Missing/invalid AWS credentials also surface here: credentials are
    /// resolved lazily by the SDK, so the first place they can fail is the
    /// synthesis call itself.
    #[error("Speech synthesis failed: {detail}")]
    SynthesisFailed { detail: String },

    /// The call nominally succeeded but the audio stream could not be drained.
    #[error("Could not stream audio: {detail}")]
    AudioStreamUnavailable { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output audio file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_input_found_display() {
        let e = Pdf2SpeechError::NoInputFound {
            dir: PathBuf::from("text-input"),
        };
        let msg = e.to_string();
        assert!(msg.contains("text-input"), "got: {msg}");
        assert!(msg.contains("No PDF files"), "got: {msg}");
    }

    #[test]
    fn page_out_of_range_display() {
        let e = Pdf2SpeechError::PageOutOfRange { page: 7, total: 3 };
        let msg = e.to_string();
        assert!(msg.contains("Page 7"));
        assert!(msg.contains("3 pages"));
    }

    #[test]
    fn audio_stream_display_matches_contract() {
        // The CLI surfaces this line verbatim; keep the prefix stable.
        let e = Pdf2SpeechError::AudioStreamUnavailable {
            detail: "connection reset".into(),
        };
        assert!(e.to_string().starts_with("Could not stream audio"));
    }

    #[test]
    fn synthesis_failed_display() {
        let e = Pdf2SpeechError::SynthesisFailed {
            detail: "TextLengthExceededException".into(),
        };
        assert!(e.to_string().contains("TextLengthExceededException"));
    }

    #[test]
    fn output_write_failed_keeps_source() {
        use std::error::Error as _;
        let e = Pdf2SpeechError::OutputWriteFailed {
            path: PathBuf::from("audio-output/doc.mp3"),
            source: std::io::Error::other("disk full"),
        };
        assert!(e.to_string().contains("doc.mp3"));
        assert!(e.source().is_some());
    }
}
