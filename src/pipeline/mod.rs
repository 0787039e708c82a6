//! Pipeline stages for PDF-to-speech synthesis.
//!
//! Each submodule implements exactly one stage. Keeping stages separate
//! makes each independently testable and lets us swap implementations
//! (e.g. a different PDF backend or TTS provider) without touching the
//! others.
//!
//! ## Data Flow
//!
//! ```text
//! locate ──▶ input ──▶ extract ──▶ prepare ──▶ tts ──▶ write
//! (dir scan)  (path/URL)  (lopdf)    (cleanup)  (Polly)  (atomic)
//! ```
//!
//! 1. [`locate`]  — pick the PDF from the input directory (deterministic,
//!    lexicographic first match)
//! 2. [`input`]   — canonicalise an explicit path or URL to a local file
//! 3. [`extract`] — pull one page's plain text; runs in `spawn_blocking`
//!    because lopdf is synchronous
//! 4. [`prepare`] — opt-in whitespace cleanup and length capping
//! 5. [`tts`]     — the single Polly call; the only stage with network I/O,
//!    drains the audio stream before returning
//! 6. [`write`]   — derive the output filename and persist atomically

pub mod extract;
pub mod input;
pub mod locate;
pub mod prepare;
pub mod tts;
pub mod write;
