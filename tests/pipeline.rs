//! Integration tests for the pdf2speech pipeline.
//!
//! Fixture PDFs are generated on the fly with lopdf, so the tests need no
//! checked-in binaries and no network. The one test that actually calls
//! Amazon Polly is gated behind the `E2E_ENABLED` environment variable so it
//! never runs in CI by accident.
//!
//! Run everything including the live call:
//!   E2E_ENABLED=1 AWS_ACCESS_KEY_ID=... AWS_SECRET_ACCESS_KEY=... \
//!     cargo test --test pipeline -- --nocapture

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use pdf2speech::{
    derive_output_path, inspect, locate_pdf, synthesize_to_file, Pdf2SpeechError, SynthesisConfig,
};
use std::path::{Path, PathBuf};

// ── Fixture helpers ──────────────────────────────────────────────────────────

/// Write a minimal one-page PDF containing `text` (empty string for a blank
/// page) to `path`.
fn write_fixture_pdf(path: &Path, text: &str) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = Vec::new();
    if !text.is_empty() {
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]);
    }
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode content stream"),
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    doc.save(path).expect("save fixture PDF");
}

/// Skip the live-Polly test unless explicitly enabled.
macro_rules! e2e_skip_unless_enabled {
    () => {
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 (and AWS credentials) to run live-Polly tests");
            return;
        }
    };
}

// ── Extraction ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn extracts_text_from_generated_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.pdf");
    write_fixture_pdf(&path, "Hello from the first page");

    let text = pdf2speech::pipeline::extract::extract_page_text(&path, 1)
        .await
        .expect("extraction should succeed");
    assert!(text.contains("Hello"), "got: {text:?}");
}

#[tokio::test]
async fn empty_page_extracts_to_empty_text_without_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.pdf");
    write_fixture_pdf(&path, "");

    let text = pdf2speech::pipeline::extract::extract_page_text(&path, 1)
        .await
        .expect("a blank page is not an error");
    assert!(text.trim().is_empty(), "got: {text:?}");
}

#[tokio::test]
async fn page_out_of_range_is_controlled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("one-page.pdf");
    write_fixture_pdf(&path, "only page");

    let err = pdf2speech::pipeline::extract::extract_page_text(&path, 5)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Pdf2SpeechError::PageOutOfRange { page: 5, total: 1 }
    ));
}

#[tokio::test]
async fn inspect_reports_page_count_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meta.pdf");
    write_fixture_pdf(&path, "metadata test");

    let meta = inspect(path.to_str().unwrap()).await.unwrap();
    assert_eq!(meta.page_count, 1);
    assert_eq!(meta.pdf_version, "1.5");
}

// ── Locator + output derivation (the stem invariant end to end) ──────────────

#[test]
fn located_input_derives_matching_output_stem() {
    let input_dir = tempfile::tempdir().unwrap();
    let path = input_dir.path().join("quarterly-report.pdf");
    write_fixture_pdf(&path, "report body");

    let located = locate_pdf(input_dir.path()).unwrap();
    let output = derive_output_path(&located, Path::new("audio-output"), "mp3");
    assert_eq!(output, PathBuf::from("audio-output/quarterly-report.mp3"));
}

#[test]
fn locator_is_deterministic_across_insertion_order() {
    let input_dir = tempfile::tempdir().unwrap();
    // Insertion order deliberately differs from lexicographic order.
    for name in ["c.pdf", "a.pdf", "b.pdf"] {
        write_fixture_pdf(&input_dir.path().join(name), "x");
    }

    let first = locate_pdf(input_dir.path()).unwrap();
    assert_eq!(first.file_name().unwrap(), "a.pdf");
}

// ── Failure paths that must not write output ─────────────────────────────────

#[tokio::test]
async fn failed_synthesis_leaves_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("doc.pdf");
    write_fixture_pdf(&pdf, "some text");
    let out = dir.path().join("out/doc.mp3");

    // Bogus static credentials and a blank-name region make the call fail
    // fast without real AWS access.
    std::env::set_var("AWS_ACCESS_KEY_ID", "AKIA_TEST_INVALID");
    std::env::set_var("AWS_SECRET_ACCESS_KEY", "invalid");
    std::env::set_var("AWS_EC2_METADATA_DISABLED", "true");

    let config = SynthesisConfig::builder()
        .region("us-east-1")
        .build()
        .unwrap();

    let result = synthesize_to_file(pdf.to_str().unwrap(), &out, &config).await;
    assert!(result.is_err(), "bogus credentials must fail the call");
    assert!(
        !out.exists(),
        "a failed synthesis must not leave an output file"
    );
}

#[tokio::test]
async fn unresolvable_input_is_controlled() {
    let config = SynthesisConfig::default();
    let err = synthesize_to_file("/nonexistent/doc.pdf", "/tmp/never.mp3", &config)
        .await
        .unwrap_err();
    assert!(matches!(err, Pdf2SpeechError::FileNotFound { .. }));
}

// ── Live Polly (opt-in) ──────────────────────────────────────────────────────

#[tokio::test]
async fn live_polly_round_trip() {
    e2e_skip_unless_enabled!();

    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("spoken.pdf");
    write_fixture_pdf(&pdf, "This sentence was read aloud by Amazon Polly.");
    let out = dir.path().join("spoken.mp3");

    let config = SynthesisConfig::builder()
        .engine("neural") // cheaper than generative for a smoke test
        .build()
        .unwrap();

    let stats = synthesize_to_file(pdf.to_str().unwrap(), &out, &config)
        .await
        .expect("live synthesis should succeed");

    assert!(stats.audio_bytes > 0);
    assert!(out.exists());
    let written = std::fs::read(&out).unwrap();
    assert_eq!(written.len(), stats.audio_bytes);
    println!("live round trip: {} bytes of mp3", written.len());
}
