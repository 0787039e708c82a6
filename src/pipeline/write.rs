//! Output persistence: derive the audio filename and write it atomically.
//!
//! The filename invariant is the pipeline's only cross-entity relationship:
//! the output stem equals the input stem, with the extension replaced by the
//! audio format's. Writes go through a `.tmp` sibling and a rename so an
//! interrupted run never leaves a half-written audio file a media player
//! would choke on.

use crate::error::Pdf2SpeechError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Derive the output path: `out_dir / <input stem>.<ext>`.
///
/// The extension is appended with `format!` rather than `with_extension`:
/// a stem like `report.v2` contains a dot, and `with_extension` would chop
/// it down to `report`, breaking the stem equality.
///
/// Inputs without a stem (unlikely, but `..` qualifies) fall back to
/// `output.<ext>` rather than failing the run.
pub fn derive_output_path(input: &Path, out_dir: &Path, ext: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    out_dir.join(format!("{stem}.{ext}"))
}

/// Write the audio payload to `path`, creating the parent directory if needed.
///
/// The temp-then-rename dance keeps the visible file either absent or
/// complete; the rename also clobbers a previous run's output in one step.
pub async fn write_audio(path: &Path, bytes: &[u8]) -> Result<(), Pdf2SpeechError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Pdf2SpeechError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }
    }

    let tmp_path = path.with_extension("tmp");
    tokio::fs::write(&tmp_path, bytes)
        .await
        .map_err(|e| Pdf2SpeechError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Pdf2SpeechError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_stem_matches_input_stem() {
        let path = derive_output_path(
            Path::new("text-input/quarterly report.pdf"),
            Path::new("audio-output"),
            "mp3",
        );
        assert_eq!(path, Path::new("audio-output/quarterly report.mp3"));
    }

    #[test]
    fn dotted_stem_survives_intact() {
        let path = derive_output_path(
            Path::new("text-input/report.v2.pdf"),
            Path::new("audio-output"),
            "mp3",
        );
        assert_eq!(path, Path::new("audio-output/report.v2.mp3"));
    }

    #[test]
    fn extension_is_replaced_not_appended() {
        let path = derive_output_path(Path::new("doc.PDF"), Path::new("out"), "ogg");
        assert_eq!(path, Path::new("out/doc.ogg"));
    }

    #[test]
    fn stemless_input_falls_back() {
        let path = derive_output_path(Path::new(".."), Path::new("out"), "mp3");
        assert_eq!(path, Path::new("out/output.mp3"));
    }

    #[tokio::test]
    async fn write_creates_parent_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/doc.mp3");

        write_audio(&path, b"fake mp3 bytes").await.unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written, b"fake mp3 bytes");
        // No .tmp sibling left behind
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn write_overwrites_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.mp3");

        write_audio(&path, b"first run").await.unwrap();
        write_audio(&path, b"second run").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second run");
    }

    #[tokio::test]
    async fn unwritable_destination_is_controlled() {
        // A path whose parent is a regular file cannot be created.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not dir").unwrap();

        let err = write_audio(&blocker.join("doc.mp3"), b"audio")
            .await
            .unwrap_err();
        assert!(matches!(err, Pdf2SpeechError::OutputWriteFailed { .. }));
    }
}
