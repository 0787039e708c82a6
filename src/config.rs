//! Configuration types for PDF-to-speech synthesis.
//!
//! All behaviour is controlled through [`SynthesisConfig`], built via its
//! [`SynthesisConfigBuilder`]. The original tool this crate replaces kept
//! every tunable as an inlined constant; lifting them into one struct means
//! tests can substitute directories and voices without touching global state,
//! and two runs can be diffed by diffing their configs.

use crate::error::Pdf2SpeechError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Polly engines this crate accepts.
///
/// Free-form strings would defer a typo like "genrative" to a runtime API
/// rejection; validating at build time keeps the failure local and instant.
const KNOWN_ENGINES: &[&str] = &["standard", "neural", "long-form", "generative"];

/// Audio container format requested from Polly.
///
/// Polly also offers `json` (speech marks), which is not audio and has no
/// place in this pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    /// MP3 audio (default).
    #[default]
    Mp3,
    /// Ogg container with Vorbis audio.
    OggVorbis,
    /// Raw signed 16-bit little-endian PCM.
    Pcm,
}

impl AudioFormat {
    /// File extension used for the derived output filename.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::OggVorbis => "ogg",
            AudioFormat::Pcm => "pcm",
        }
    }
}

/// Configuration for a PDF-to-speech run.
///
/// Built via [`SynthesisConfig::builder()`] or [`SynthesisConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2speech::SynthesisConfig;
///
/// let config = SynthesisConfig::builder()
///     .voice("Joanna")
///     .engine("neural")
///     .page(2)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Directory scanned for `*.pdf` when no explicit input is given.
    /// Default: `text-input`.
    pub input_dir: PathBuf,

    /// Directory the derived audio file is written into. Default: `audio-output`.
    ///
    /// Created on demand by the writer, so a fresh checkout works without a
    /// `mkdir` step.
    pub output_dir: PathBuf,

    /// AWS region the Polly client targets. Default: `us-east-1`.
    pub region: String,

    /// Polly voice identity. Default: `Matthew`.
    ///
    /// Kept as a string rather than the SDK enum: Polly adds voices regularly
    /// and the SDK's `VoiceId` accepts unknown values, so an exhaustive local
    /// list would only go stale.
    pub voice: String,

    /// Polly synthesis engine: `standard`, `neural`, `long-form`, or
    /// `generative`. Default: `generative`.
    ///
    /// Not every voice supports every engine; Polly rejects unsupported
    /// combinations at request time.
    pub engine: String,

    /// Audio container format. Default: [`AudioFormat::Mp3`].
    pub format: AudioFormat,

    /// Which page to read, 1-indexed. Default: 1.
    ///
    /// The pipeline deliberately reads a single page per run; this knob picks
    /// which one rather than widening the scope.
    pub page: usize,

    /// Normalise whitespace before synthesis. Default: false.
    ///
    /// PDF extraction preserves layout line breaks that make Polly pause
    /// mid-sentence. Off by default so the payload matches the extracted text
    /// byte-for-byte unless the caller opts in.
    pub clean_text: bool,

    /// Truncate the text to at most this many characters before synthesis.
    /// Default: None (no local limit; Polly enforces its own).
    ///
    /// Polly caps requests at a few thousand characters depending on engine.
    /// Set this below the cap to guarantee a dense page cannot fail the call.
    pub max_chars: Option<usize>,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("text-input"),
            output_dir: PathBuf::from("audio-output"),
            region: "us-east-1".to_string(),
            voice: "Matthew".to_string(),
            engine: "generative".to_string(),
            format: AudioFormat::default(),
            page: 1,
            clean_text: false,
            max_chars: None,
            download_timeout_secs: 120,
        }
    }
}

impl SynthesisConfig {
    /// Create a new builder for `SynthesisConfig`.
    pub fn builder() -> SynthesisConfigBuilder {
        SynthesisConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`SynthesisConfig`].
#[derive(Debug)]
pub struct SynthesisConfigBuilder {
    config: SynthesisConfig,
}

impl SynthesisConfigBuilder {
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config.region = region.into();
        self
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.config.voice = voice.into();
        self
    }

    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.config.engine = engine.into();
        self
    }

    pub fn format(mut self, format: AudioFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.config.page = page.max(1);
        self
    }

    pub fn clean_text(mut self, v: bool) -> Self {
        self.config.clean_text = v;
        self
    }

    pub fn max_chars(mut self, n: usize) -> Self {
        self.config.max_chars = Some(n.max(1));
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SynthesisConfig, Pdf2SpeechError> {
        let c = &self.config;
        if c.page == 0 {
            return Err(Pdf2SpeechError::InvalidConfig(
                "Pages are 1-indexed, minimum is 1".into(),
            ));
        }
        if c.voice.trim().is_empty() {
            return Err(Pdf2SpeechError::InvalidConfig("Voice must not be empty".into()));
        }
        if !KNOWN_ENGINES.contains(&c.engine.as_str()) {
            return Err(Pdf2SpeechError::InvalidConfig(format!(
                "Unknown engine '{}', expected one of: {}",
                c.engine,
                KNOWN_ENGINES.join(", ")
            )));
        }
        Ok(self.config)
    }
}
