//! Input resolution: turn an explicit path or URL into a local PDF file.
//!
//! The locator (see [`crate::pipeline::locate`]) handles the no-argument
//! case; this module handles an explicit input. Local paths are opened and
//! sniffed for the `%PDF` magic so a mislabeled file fails with a clear
//! error instead of a parser backtrace. URL inputs are fetched with the
//! config's timeout, screened for the obvious failure modes of "a server
//! said 200 but meant no" (an HTML error page, an absurd payload size), and
//! staged in a `TempDir` that lives as long as the run — cleanup happens on
//! drop even if the process panics.

use crate::config::SynthesisConfig;
use crate::error::Pdf2SpeechError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

/// Hard cap on downloaded inputs.
///
/// A single page gets synthesised per run, so a multi-hundred-megabyte
/// "PDF" is a misconfigured URL, not a use case worth buffering in memory.
const MAX_DOWNLOAD_BYTES: u64 = 64 * 1024 * 1024;

/// A local PDF ready for extraction.
///
/// When the input was a URL, `_staging` holds the temp directory the
/// download landed in; dropping the `ResolvedInput` removes it.
#[derive(Debug)]
pub struct ResolvedInput {
    path: PathBuf,
    _staging: Option<TempDir>,
}

impl ResolvedInput {
    /// Path to the PDF file regardless of how it was resolved.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve the input string to a local PDF file path.
pub async fn resolve_input(
    input: &str,
    config: &SynthesisConfig,
) -> Result<ResolvedInput, Pdf2SpeechError> {
    if is_url(input) {
        fetch_remote(input, config).await
    } else {
        open_local(Path::new(input))
    }
}

fn open_local(path: &Path) -> Result<ResolvedInput, Pdf2SpeechError> {
    if !path.is_file() {
        return Err(Pdf2SpeechError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => Pdf2SpeechError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Pdf2SpeechError::FileNotFound {
            path: path.to_path_buf(),
        },
    })?;

    let mut magic = [0u8; 4];
    // A file too short to hold the header is as much "not a PDF" as one
    // with the wrong bytes.
    if file.read_exact(&mut magic).is_err() {
        return Err(Pdf2SpeechError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        });
    }
    check_magic(path, magic)?;

    debug!("Resolved local PDF: {}", path.display());
    Ok(ResolvedInput {
        path: path.to_path_buf(),
        _staging: None,
    })
}

fn check_magic(path: &Path, magic: [u8; 4]) -> Result<(), Pdf2SpeechError> {
    if &magic == b"%PDF" {
        Ok(())
    } else {
        Err(Pdf2SpeechError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        })
    }
}

/// Fetch a URL into a staging directory and validate it is a plausible PDF.
async fn fetch_remote(
    url: &str,
    config: &SynthesisConfig,
) -> Result<ResolvedInput, Pdf2SpeechError> {
    info!("Downloading PDF from: {}", url);
    let timeout_secs = config.download_timeout_secs;

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| Pdf2SpeechError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            Pdf2SpeechError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            Pdf2SpeechError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(Pdf2SpeechError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    // Paywalls and expired share links love to answer 200 with an HTML
    // login page; catch that before wasting a download.
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    if content_type.starts_with("text/html") {
        return Err(Pdf2SpeechError::DownloadFailed {
            url: url.to_string(),
            reason: format!("server answered with '{content_type}', not a PDF"),
        });
    }

    if let Some(declared) = response.content_length() {
        if declared > MAX_DOWNLOAD_BYTES {
            return Err(Pdf2SpeechError::DownloadFailed {
                url: url.to_string(),
                reason: format!(
                    "{} bytes declared, cap is {} bytes",
                    declared, MAX_DOWNLOAD_BYTES
                ),
            });
        }
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Pdf2SpeechError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    // Servers are free to omit Content-Length; re-check the actual size.
    if bytes.len() as u64 > MAX_DOWNLOAD_BYTES {
        return Err(Pdf2SpeechError::DownloadFailed {
            url: url.to_string(),
            reason: format!(
                "{} bytes received, cap is {} bytes",
                bytes.len(),
                MAX_DOWNLOAD_BYTES
            ),
        });
    }

    let staging = TempDir::new().map_err(|e| Pdf2SpeechError::Internal(e.to_string()))?;
    let file_path = staging.path().join(filename_from_url(url));

    let mut magic = [0u8; 4];
    let header = bytes.get(..4).unwrap_or_default();
    magic[..header.len()].copy_from_slice(header);
    check_magic(&file_path, magic)?;

    tokio::fs::write(&file_path, &bytes)
        .await
        .map_err(|e| Pdf2SpeechError::Internal(format!("Failed to write staging file: {}", e)))?;

    info!("Downloaded {} bytes to {}", bytes.len(), file_path.display());

    Ok(ResolvedInput {
        path: file_path,
        _staging: Some(staging),
    })
}

/// Last path segment of the URL if it carries an extension, else a fallback.
fn filename_from_url(url: &str) -> String {
    if let Ok(parsed) = reqwest::Url::parse(url) {
        if let Some(mut segments) = parsed.path_segments() {
            if let Some(last) = segments.next_back() {
                if !last.is_empty() && last.contains('.') {
                    return last.to_string();
                }
            }
        }
    }
    "downloaded.pdf".to_string()
}
