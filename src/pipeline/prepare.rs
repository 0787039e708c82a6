//! Text preparation: optional cleanup of extracted text before synthesis.
//!
//! PDF text extraction is faithful to layout, not to prose: hard line breaks
//! mid-sentence, runs of spaces from justified columns, stray control
//! characters from broken encodings. Polly reads all of that literally, so
//! cleanup audibly improves the result. Both passes are opt-in — with
//! everything off, the synthesised payload is byte-identical to the
//! extracted text, which keeps the default behaviour predictable.

use crate::config::SynthesisConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+").expect("static regex"));
static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("static regex"));

/// Apply the configured preparation passes to the extracted text.
pub fn prepare_text(text: &str, config: &SynthesisConfig) -> String {
    let mut s = text.to_string();

    if config.clean_text {
        s = normalise_whitespace(&s);
    }
    if let Some(limit) = config.max_chars {
        s = truncate_chars(&s, limit);
    }

    if s.len() != text.len() {
        debug!("Prepared text: {} bytes -> {} bytes", text.len(), s.len());
    }
    s
}

/// Collapse layout whitespace while keeping paragraph breaks.
///
/// Single newlines become spaces (they are line-wrap artefacts, not
/// sentence boundaries); blank lines are kept as paragraph breaks so Polly
/// still pauses naturally between paragraphs.
fn normalise_whitespace(input: &str) -> String {
    let unified = input.replace("\r\n", "\n").replace('\r', "\n");
    let paragraph_marked = BLANK_LINES.replace_all(&unified, "\u{1}");
    let unwrapped = paragraph_marked.replace('\n', " ");
    let collapsed = WHITESPACE_RUN.replace_all(&unwrapped, " ");
    collapsed
        .split('\u{1}')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Truncate to at most `limit` characters, on a char boundary.
fn truncate_chars(input: &str, limit: usize) -> String {
    match input.char_indices().nth(limit) {
        Some((byte_idx, _)) => input[..byte_idx].to_string(),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SynthesisConfig;

    #[test]
    fn default_config_leaves_text_untouched() {
        let config = SynthesisConfig::default();
        let text = "line one\nline  two\r\n\r\nnext   paragraph";
        assert_eq!(prepare_text(text, &config), text);
    }

    #[test]
    fn clean_text_unwraps_lines_but_keeps_paragraphs() {
        let config = SynthesisConfig::builder().clean_text(true).build().unwrap();
        let text = "The quick\nbrown fox\n\njumps  over\nthe lazy dog";
        assert_eq!(
            prepare_text(text, &config),
            "The quick brown fox\n\njumps over the lazy dog"
        );
    }

    #[test]
    fn clean_text_normalises_crlf() {
        let config = SynthesisConfig::builder().clean_text(true).build().unwrap();
        assert_eq!(prepare_text("a\r\nb\r\n\r\nc", &config), "a b\n\nc");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let config = SynthesisConfig::builder().max_chars(3).build().unwrap();
        assert_eq!(prepare_text("héllo", &config), "hél");
    }

    #[test]
    fn truncation_is_a_noop_under_limit() {
        let config = SynthesisConfig::builder().max_chars(100).build().unwrap();
        assert_eq!(prepare_text("short", &config), "short");
    }

    #[test]
    fn empty_text_stays_empty() {
        let config = SynthesisConfig::builder().clean_text(true).build().unwrap();
        assert_eq!(prepare_text("", &config), "");
    }
}
