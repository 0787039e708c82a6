//! Input location: pick the PDF to read from a fixed directory.
//!
//! ## Why sort?
//!
//! Directory enumeration order is filesystem-dependent; "the first *.pdf in
//! the folder" would silently change meaning between ext4, APFS, and NTFS.
//! Sorting candidates lexicographically makes the choice deterministic across
//! platforms, and a run with several PDFs present always picks the same one
//! (and says so in the log).

use crate::error::Pdf2SpeechError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Find the PDF to process in `dir`.
///
/// Matching is by extension, ASCII case-insensitive (`report.PDF` counts).
/// Returns the lexicographically first match.
///
/// # Errors
/// - [`Pdf2SpeechError::NoInputFound`] when the directory has no PDFs
/// - [`Pdf2SpeechError::FileNotFound`] / [`Pdf2SpeechError::PermissionDenied`]
///   when the directory itself cannot be read
pub fn locate_pdf(dir: &Path) -> Result<PathBuf, Pdf2SpeechError> {
    let entries = std::fs::read_dir(dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Pdf2SpeechError::FileNotFound {
            path: dir.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => Pdf2SpeechError::PermissionDenied {
            path: dir.to_path_buf(),
        },
        _ => Pdf2SpeechError::Internal(format!("Failed to read '{}': {}", dir.display(), e)),
    })?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    candidates.sort();

    if candidates.len() > 1 {
        warn!(
            "{} PDFs in '{}'; using the lexicographically first: {}",
            candidates.len(),
            dir.display(),
            candidates[0].display()
        );
    }

    candidates
        .into_iter()
        .next()
        .inspect(|p| debug!("Located input PDF: {}", p.display()))
        .ok_or_else(|| Pdf2SpeechError::NoInputFound {
            dir: dir.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"%PDF-1.4\n").unwrap();
    }

    #[test]
    fn empty_dir_is_a_controlled_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = locate_pdf(dir.path()).unwrap_err();
        assert!(matches!(err, Pdf2SpeechError::NoInputFound { .. }));
    }

    #[test]
    fn missing_dir_is_file_not_found() {
        let err = locate_pdf(Path::new("/nonexistent/text-input")).unwrap_err();
        assert!(matches!(err, Pdf2SpeechError::FileNotFound { .. }));
    }

    #[test]
    fn picks_lexicographically_first() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "zebra.pdf");
        touch(dir.path(), "alpha.pdf");
        touch(dir.path(), "middle.pdf");

        let found = locate_pdf(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "alpha.pdf");
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "REPORT.PDF");

        let found = locate_pdf(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "REPORT.PDF");
    }

    #[test]
    fn non_pdf_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "notes.txt");
        std::fs::write(dir.path().join("data.pdf.bak"), b"x").unwrap();

        let err = locate_pdf(dir.path()).unwrap_err();
        assert!(matches!(err, Pdf2SpeechError::NoInputFound { .. }));
    }
}
