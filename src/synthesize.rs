//! Top-level entry points: the locate → extract → synthesize → write pipeline.
//!
//! [`synthesize`] is the library's primary call: give it a path or URL and a
//! config, get back audio bytes plus stats. [`run`] reproduces the original
//! tool's whole behaviour — scan the input directory, derive the output
//! filename, persist — in one call. Control flows strictly forward through
//! the stages; the first error aborts the run.

use crate::config::SynthesisConfig;
use crate::error::Pdf2SpeechError;
use crate::output::{DocumentMetadata, SynthesisOutput, SynthesisStats};
use crate::pipeline::{extract, input, locate, prepare, tts, write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Synthesize speech for one page of a PDF file or URL.
///
/// # Arguments
/// * `input_str` — local file path or HTTP/HTTPS URL to a PDF
/// * `config` — synthesis configuration
///
/// # Errors
/// Any stage failure: unresolvable input, corrupt/encrypted PDF, page out of
/// range, Polly rejection, or an undrainable audio stream.
pub async fn synthesize(
    input_str: impl AsRef<str>,
    config: &SynthesisConfig,
) -> Result<SynthesisOutput, Pdf2SpeechError> {
    let total_start = Instant::now();
    let input_str = input_str.as_ref();
    info!("Starting synthesis: {}", input_str);

    // ── Step 1: Resolve input ────────────────────────────────────────────
    let resolved = input::resolve_input(input_str, config).await?;
    let pdf_path = resolved.path();

    // ── Step 2: Extract metadata and page text ───────────────────────────
    let extract_start = Instant::now();
    let metadata = extract::extract_metadata(pdf_path).await?;
    let raw_text = extract::extract_page_text(pdf_path, config.page).await?;
    let extract_duration_ms = extract_start.elapsed().as_millis() as u64;

    // ── Step 3: Prepare text ─────────────────────────────────────────────
    let text = prepare::prepare_text(&raw_text, config);
    if text.is_empty() {
        // Not an error locally; Polly decides what to do with nothing.
        info!("Page {} has no extractable text", config.page);
    }

    // ── Step 4: Synthesize ───────────────────────────────────────────────
    let synth_start = Instant::now();
    let synthesizer = tts::SpeechSynthesizer::from_config(config).await;
    let audio = synthesizer.synthesize(&text).await?;
    let synth_duration_ms = synth_start.elapsed().as_millis() as u64;

    let stats = SynthesisStats {
        text_chars: text.chars().count(),
        request_characters: audio.request_characters,
        audio_bytes: audio.bytes.len(),
        extract_duration_ms,
        synth_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Synthesis complete: {} chars -> {} bytes in {}ms",
        stats.text_chars, stats.audio_bytes, stats.total_duration_ms
    );

    Ok(SynthesisOutput {
        audio: audio.bytes,
        text,
        metadata,
        stats,
    })
}

/// Synthesize and write the audio directly to `output_path`.
pub async fn synthesize_to_file(
    input_str: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &SynthesisConfig,
) -> Result<SynthesisStats, Pdf2SpeechError> {
    let output = synthesize(input_str, config).await?;
    write::write_audio(output_path.as_ref(), &output.audio).await?;
    Ok(output.stats)
}

/// The whole original pipeline in one call: locate the PDF in
/// `config.input_dir`, synthesize its configured page, and write the audio
/// under `config.output_dir` with the input's stem and the format's
/// extension.
///
/// Returns the written path and the run's stats.
pub async fn run(
    config: &SynthesisConfig,
) -> Result<(PathBuf, SynthesisStats), Pdf2SpeechError> {
    let pdf_path = locate::locate_pdf(&config.input_dir)?;
    let output_path = write::derive_output_path(
        &pdf_path,
        &config.output_dir,
        config.format.extension(),
    );

    let input_str = pdf_path.to_string_lossy().into_owned();
    let stats = synthesize_to_file(&input_str, &output_path, config).await?;
    Ok((output_path, stats))
}

/// Synchronous wrapper around [`synthesize`].
///
/// Creates a temporary tokio runtime internally.
pub fn synthesize_sync(
    input_str: impl AsRef<str>,
    config: &SynthesisConfig,
) -> Result<SynthesisOutput, Pdf2SpeechError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2SpeechError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(synthesize(input_str, config))
}

/// Read PDF metadata without synthesizing anything.
///
/// Does not touch AWS; no credentials required.
pub async fn inspect(input_str: impl AsRef<str>) -> Result<DocumentMetadata, Pdf2SpeechError> {
    let resolved = input::resolve_input(input_str.as_ref(), &SynthesisConfig::default()).await?;
    extract::extract_metadata(resolved.path()).await
}
