//! CLI binary for pdf2speech.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `SynthesisConfig` and prints a summary line.

use anyhow::{Context, Result};
use clap::Parser;
use pdf2speech::{
    derive_output_path, inspect, locate_pdf, synthesize_to_file, AudioFormat, SynthesisConfig,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Read the first PDF found in ./text-input, write ./audio-output/<stem>.mp3
  pdf2speech

  # Explicit input file
  pdf2speech report.pdf

  # Explicit output path, different voice and engine
  pdf2speech report.pdf -o narration.mp3 --voice Joanna --engine neural

  # Read page 3, clean up layout whitespace first
  pdf2speech report.pdf --page 3 --clean-text

  # Synthesize a paper straight from the web
  pdf2speech https://arxiv.org/pdf/1706.03762 -o attention.mp3

  # Inspect PDF metadata (no AWS credentials needed)
  pdf2speech --inspect-only report.pdf

VOICES & ENGINES:
  Engine       Example voices                      Notes
  ──────────   ─────────────────────────────────   ─────────────────────────
  generative   Matthew, Joanna, Ruth, Stephen      most natural (default)
  long-form    Gregory, Danielle, Ruth             narration-tuned
  neural       Matthew, Joanna, Amy, Brian, Emma   wide language coverage
  standard     all classic voices                  cheapest

  Not every voice supports every engine; Polly rejects unsupported pairs.

ENVIRONMENT VARIABLES:
  AWS_ACCESS_KEY_ID       AWS credential (also read from ./.env)
  AWS_SECRET_ACCESS_KEY   AWS credential (also read from ./.env)
  AWS_REGION              Overrides --region

SETUP:
  1. Put credentials in the environment or a local .env file.
  2. Drop a PDF into ./text-input (or pass a path).
  3. Run: pdf2speech
"#;

/// Read a page of a PDF aloud with Amazon Polly.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2speech",
    version,
    about = "Read a page of a PDF aloud with Amazon Polly",
    long_about = "Extract the text of one PDF page (local file or URL), synthesize it with \
Amazon Polly, and save the audio. With no input argument, the first PDF (sorted) in the \
input directory is used.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path or HTTP/HTTPS URL. Defaults to the first PDF in --input-dir.
    input: Option<String>,

    /// Write audio to this file instead of deriving <stem>.<format> in --output-dir.
    #[arg(short, long, env = "PDF2SPEECH_OUTPUT")]
    output: Option<PathBuf>,

    /// Directory scanned for PDFs when no input argument is given.
    #[arg(long, env = "PDF2SPEECH_INPUT_DIR", default_value = "text-input")]
    input_dir: PathBuf,

    /// Directory the derived audio file is written into.
    #[arg(long, env = "PDF2SPEECH_OUTPUT_DIR", default_value = "audio-output")]
    output_dir: PathBuf,

    /// Polly voice identity.
    #[arg(long, env = "PDF2SPEECH_VOICE", default_value = "Matthew")]
    voice: String,

    /// Polly engine: standard, neural, long-form, generative.
    #[arg(long, env = "PDF2SPEECH_ENGINE", default_value = "generative")]
    engine: String,

    /// Audio format.
    #[arg(long, env = "PDF2SPEECH_FORMAT", value_enum, default_value = "mp3")]
    format: FormatArg,

    /// AWS region for the Polly client.
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    region: String,

    /// Page to read (1-indexed).
    #[arg(long, env = "PDF2SPEECH_PAGE", default_value_t = 1)]
    page: usize,

    /// Normalise layout whitespace before synthesis.
    #[arg(long, env = "PDF2SPEECH_CLEAN_TEXT")]
    clean_text: bool,

    /// Truncate the text to at most this many characters before synthesis.
    #[arg(long, env = "PDF2SPEECH_MAX_CHARS")]
    max_chars: Option<usize>,

    /// HTTP download timeout in seconds (URL inputs).
    #[arg(long, env = "PDF2SPEECH_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Print PDF metadata only, no synthesis.
    #[arg(long)]
    inspect_only: bool,

    /// Emit metadata/stats as JSON.
    #[arg(long, env = "PDF2SPEECH_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2SPEECH_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2SPEECH_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum FormatArg {
    Mp3,
    Ogg,
    Pcm,
}

impl From<FormatArg> for AudioFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Mp3 => AudioFormat::Mp3,
            FormatArg::Ogg => AudioFormat::OggVorbis,
            FormatArg::Pcm => AudioFormat::Pcm,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Populate AWS credentials from a local .env before anything reads the
    // environment. Missing .env is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Resolve the input ────────────────────────────────────────────────
    let input = match cli.input.clone() {
        Some(input) => input,
        None => locate_pdf(&cli.input_dir)
            .context("No input given and the input directory scan failed")?
            .to_string_lossy()
            .into_owned(),
    };

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&input).await.context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialize metadata")?
            );
        } else {
            println!("File:         {}", input);
            if let Some(ref t) = meta.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = meta.author {
                println!("Author:       {}", a);
            }
            if let Some(ref s) = meta.subject {
                println!("Subject:      {}", s);
            }
            println!("Pages:        {}", meta.page_count);
            println!("PDF Version:  {}", meta.pdf_version);
            if let Some(ref p) = meta.producer {
                println!("Producer:     {}", p);
            }
            if let Some(ref c) = meta.creator {
                println!("Creator:      {}", c);
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let format: AudioFormat = cli.format.clone().into();
    let config = build_config(&cli, format)?;

    let output_path = cli.output.clone().unwrap_or_else(|| {
        derive_output_path(PathBuf::from(&input).as_path(), &cli.output_dir, format.extension())
    });

    // ── Run the pipeline ─────────────────────────────────────────────────
    let stats = synthesize_to_file(&input, &output_path, &config)
        .await
        .context("Synthesis failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
        );
    } else if !cli.quiet {
        eprintln!(
            "{}  {} chars  →  {}  {}",
            green("✔"),
            stats.text_chars,
            bold(&output_path.display().to_string()),
            dim(&format!(
                "{} bytes, {}ms",
                stats.audio_bytes, stats.total_duration_ms
            )),
        );
    }

    Ok(())
}

/// Map CLI args to `SynthesisConfig`.
fn build_config(cli: &Cli, format: AudioFormat) -> Result<SynthesisConfig> {
    let mut builder = SynthesisConfig::builder()
        .input_dir(cli.input_dir.clone())
        .output_dir(cli.output_dir.clone())
        .region(cli.region.clone())
        .voice(cli.voice.clone())
        .engine(cli.engine.clone())
        .format(format)
        .page(cli.page)
        .clean_text(cli.clean_text)
        .download_timeout_secs(cli.download_timeout);

    if let Some(n) = cli.max_chars {
        builder = builder.max_chars(n);
    }

    builder.build().context("Invalid configuration")
}
