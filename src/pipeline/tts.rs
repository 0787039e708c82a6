//! Speech synthesis: one Polly `SynthesizeSpeech` call per run.
//!
//! ## Credentials and region
//!
//! The client is built from the default AWS provider chain, so credentials
//! come from `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` (the CLI preloads
//! these from a local `.env` first), shared config files, or an instance
//! profile. Nothing is validated up front — a missing key surfaces as a
//! [`Pdf2SpeechError::SynthesisFailed`] on the call itself, which is the
//! first moment the SDK actually resolves credentials.
//!
//! ## Stream discipline
//!
//! Polly throttles on the number of parallel connections, so the audio
//! stream is drained to completion here, inside the synthesis stage, rather
//! than handed upward as an open handle. By the time the writer runs the
//! connection is already closed; a later write failure cannot leak it.

use crate::config::{AudioFormat, SynthesisConfig};
use crate::error::Pdf2SpeechError;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_polly::error::DisplayErrorContext;
use aws_sdk_polly::types::{Engine, OutputFormat, VoiceId};
use aws_sdk_polly::Client;
use tracing::{debug, info};

/// Fully drained audio from one synthesis call.
pub struct SynthesizedAudio {
    /// The encoded audio payload.
    pub bytes: Vec<u8>,
    /// Characters Polly billed for, as reported in the response.
    pub request_characters: i32,
    /// Content type of the payload, e.g. `audio/mpeg`.
    pub content_type: Option<String>,
}

/// A configured Polly client plus the fixed synthesis parameters.
pub struct SpeechSynthesizer {
    client: Client,
    voice: VoiceId,
    engine: Engine,
    format: OutputFormat,
}

impl SpeechSynthesizer {
    /// Build a client from the default AWS provider chain and the config's
    /// region, voice, engine, and format.
    pub async fn from_config(config: &SynthesisConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
            voice: VoiceId::from(config.voice.as_str()),
            engine: Engine::from(config.engine.as_str()),
            format: polly_format(config.format),
        }
    }

    /// Wrap an existing Polly client (tests, custom middleware).
    pub fn with_client(client: Client, config: &SynthesisConfig) -> Self {
        Self {
            client,
            voice: VoiceId::from(config.voice.as_str()),
            engine: Engine::from(config.engine.as_str()),
            format: polly_format(config.format),
        }
    }

    /// Issue a single synthesis request and drain the returned audio stream.
    ///
    /// No retry and no explicit timeout: one request per run, bounded by the
    /// SDK's own defaults. Text length and content limits are Polly's to
    /// enforce; an over-length page comes back as `SynthesisFailed` with the
    /// service's own message.
    pub async fn synthesize(&self, text: &str) -> Result<SynthesizedAudio, Pdf2SpeechError> {
        info!(
            "Synthesizing {} chars with voice={:?} engine={:?}",
            text.chars().count(),
            self.voice,
            self.engine
        );

        let response = self
            .client
            .synthesize_speech()
            .text(text)
            .voice_id(self.voice.clone())
            .engine(self.engine.clone())
            .output_format(self.format.clone())
            .send()
            .await
            .map_err(|e| Pdf2SpeechError::SynthesisFailed {
                detail: format!("{}", DisplayErrorContext(&e)),
            })?;

        let request_characters = response.request_characters;
        let content_type = response.content_type;

        let audio = response.audio_stream.collect().await.map_err(|e| {
            Pdf2SpeechError::AudioStreamUnavailable {
                detail: e.to_string(),
            }
        })?;
        let bytes = audio.to_vec();

        debug!(
            "Synthesis complete: {} bytes, {} billed characters",
            bytes.len(),
            request_characters
        );

        Ok(SynthesizedAudio {
            bytes,
            request_characters,
            content_type,
        })
    }
}

fn polly_format(format: AudioFormat) -> OutputFormat {
    match format {
        AudioFormat::Mp3 => OutputFormat::Mp3,
        AudioFormat::OggVorbis => OutputFormat::OggVorbis,
        AudioFormat::Pcm => OutputFormat::Pcm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mapping_covers_all_variants() {
        assert_eq!(polly_format(AudioFormat::Mp3), OutputFormat::Mp3);
        assert_eq!(polly_format(AudioFormat::OggVorbis), OutputFormat::OggVorbis);
        assert_eq!(polly_format(AudioFormat::Pcm), OutputFormat::Pcm);
    }

    #[test]
    fn default_config_maps_to_original_deployment_parameters() {
        let config = SynthesisConfig::default();
        assert_eq!(VoiceId::from(config.voice.as_str()), VoiceId::Matthew);
        assert_eq!(Engine::from(config.engine.as_str()), Engine::Generative);
        assert_eq!(polly_format(config.format), OutputFormat::Mp3);
    }
}
