//! Output types: synthesised audio, run statistics, and document metadata.

use serde::{Deserialize, Serialize};

/// Result of a successful synthesis run.
pub struct SynthesisOutput {
    /// The encoded audio payload, fully drained from the provider stream.
    pub audio: Vec<u8>,
    /// The text that was sent to the provider (after preparation, if enabled).
    pub text: String,
    /// Metadata read from the source document.
    pub metadata: DocumentMetadata,
    /// Timing and size statistics.
    pub stats: SynthesisStats,
}

/// Statistics for one synthesis run.
///
/// `Serialize` so the CLI can emit them under `--json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthesisStats {
    /// Characters in the synthesised text (as counted locally).
    pub text_chars: usize,
    /// Characters Polly billed for, as reported in the response.
    pub request_characters: i32,
    /// Size of the audio payload in bytes.
    pub audio_bytes: usize,
    /// Wall-clock time spent extracting text from the PDF.
    pub extract_duration_ms: u64,
    /// Wall-clock time spent in the synthesis call (including stream drain).
    pub synth_duration_ms: u64,
    /// Total wall-clock time for the run.
    pub total_duration_ms: u64,
}

/// Document-level metadata from the PDF's Info dictionary and page tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    /// Total number of pages in the document.
    pub page_count: usize,
    /// PDF version string from the header, e.g. "1.7".
    pub pdf_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_serialise_to_json() {
        let stats = SynthesisStats {
            text_chars: 1200,
            request_characters: 1200,
            audio_bytes: 48_000,
            ..Default::default()
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"text_chars\":1200"));
        assert!(json.contains("\"audio_bytes\":48000"));
    }
}
