//! # pdf2speech
//!
//! Read one page of a PDF aloud with Amazon Polly.
//!
//! ## Why this crate?
//!
//! "Skim the first page" is a listening task as often as a reading one:
//! triaging a stack of papers, proofing a report on a commute, accessibility.
//! This crate wires the shortest useful path — extract one page's text, send
//! it to Polly once, save the audio — behind a typed config so none of the
//! knobs (voice, engine, region, directories) live in constants.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Locate   deterministic first *.pdf in the input directory
//!  │              (or an explicit path / URL)
//!  ├─ 2. Extract  one page's plain text via lopdf (spawn_blocking)
//!  ├─ 3. Prepare  opt-in whitespace cleanup and length capping
//!  ├─ 4. Polly    a single SynthesizeSpeech call, stream fully drained
//!  └─ 5. Write    <input stem>.mp3 in the output directory, atomic
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2speech::{synthesize_to_file, SynthesisConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credentials from AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY
//!     let config = SynthesisConfig::default();
//!     let stats = synthesize_to_file("document.pdf", "document.mp3", &config).await?;
//!     eprintln!("{} chars -> {} bytes", stats.text_chars, stats.audio_bytes);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2speech` binary (clap + anyhow + tracing-subscriber + dotenvy) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf2speech = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod synthesize;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{AudioFormat, SynthesisConfig, SynthesisConfigBuilder};
pub use error::Pdf2SpeechError;
pub use output::{DocumentMetadata, SynthesisOutput, SynthesisStats};
pub use pipeline::locate::locate_pdf;
pub use pipeline::write::derive_output_path;
pub use synthesize::{inspect, run, synthesize, synthesize_sync, synthesize_to_file};
