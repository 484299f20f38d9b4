//! CLI binary for intellicv.
//!
//! A thin shim over the library crate: it maps CLI flags to an
//! `OptimizeRequest` and an `OptimizerConfig`, prints the Markdown and writes
//! the DOCX.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use intellicv::{
    optimize, IntellicvError, OptimizeRequest, OptimizerConfig, ProgressCallback, ResumeUpload,
    SubmissionProgressCallback, DEFAULT_DOCUMENT_FILE_NAME, DEFAULT_ENDPOINT,
};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal spinner shown while the service works. The request is a single
/// blocking round trip, so there is no bar to fill, only a status line.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Preparing");
        Arc::new(Self { bar })
    }
}

impl SubmissionProgressCallback for CliProgressCallback {
    fn on_submit_start(&self, endpoint: &str, upload_bytes: usize) {
        self.bar.set_prefix("Optimizing");
        self.bar.set_message(format!(
            "{} uploaded to {}",
            format_size(upload_bytes),
            host_of(endpoint)
        ));
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_response(&self, status: u16, elapsed_ms: u64) {
        self.bar.set_prefix("Formatting");
        self.bar.set_message(format!(
            "HTTP {status} after {:.1}s",
            elapsed_ms as f64 / 1000.0
        ));
    }

    fn on_complete(&self, _markdown_len: usize, _document_bytes: usize) {
        self.bar.finish_and_clear();
    }

    fn on_failure(&self, _error: &str) {
        self.bar.finish_and_clear();
    }
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

fn host_of(endpoint: &str) -> &str {
    let rest = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"))
        .unwrap_or(endpoint);
    rest.split('/').next().unwrap_or(rest)
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Job description inline, Markdown to stdout, Optimized_Resume.docx in cwd
  intellicv resume.docx -j "Senior Rust engineer, async networking"

  # Job description from a file, document into a directory
  intellicv resume.docx -f job.txt -o out/

  # Job description from stdin
  pbpaste | intellicv resume.docx -f -

  # Self-hosted backend, longer timeout
  intellicv resume.docx -f job.txt --endpoint http://localhost:8000/optimize_resume --timeout 300

  # Machine-readable output, no document
  intellicv resume.docx -f job.txt --json --no-docx > result.json

ENVIRONMENT VARIABLES:
  INTELLICV_ENDPOINT         Optimisation service URL
  INTELLICV_TIMEOUT          Request timeout in seconds
  INTELLICV_OUTPUT           Where to write the generated .docx
  RUST_LOG                   Override log filter (e.g. intellicv=debug)
"#;

/// Tailor a resume to a job description using the optimisation service.
#[derive(Parser, Debug)]
#[command(
    name = "intellicv",
    version,
    about = "Tailor a .docx resume to a job description and get Markdown + DOCX back",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP,
    group(ArgGroup::new("jd").required(true).args(["job_description", "job_description_file"]))
)]
struct Cli {
    /// Resume to upload (.docx).
    resume: PathBuf,

    /// Job description text.
    #[arg(short = 'j', long, env = "INTELLICV_JOB_DESCRIPTION")]
    job_description: Option<String>,

    /// Read the job description from this file ('-' for stdin).
    #[arg(short = 'f', long, env = "INTELLICV_JOB_DESCRIPTION_FILE")]
    job_description_file: Option<PathBuf>,

    /// Optimisation service URL.
    #[arg(long, env = "INTELLICV_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Whole-request timeout in seconds.
    #[arg(long, env = "INTELLICV_TIMEOUT", default_value_t = 120)]
    timeout: u64,

    /// Connect timeout in seconds.
    #[arg(long, env = "INTELLICV_CONNECT_TIMEOUT", default_value_t = 15)]
    connect_timeout: u64,

    /// Where to write the generated .docx (a directory gets the default name).
    #[arg(short, long, env = "INTELLICV_OUTPUT", default_value = DEFAULT_DOCUMENT_FILE_NAME)]
    output: PathBuf,

    /// Do not write the .docx.
    #[arg(long, env = "INTELLICV_NO_DOCX")]
    no_docx: bool,

    /// Print the result as JSON instead of Markdown.
    #[arg(long, env = "INTELLICV_JSON")]
    json: bool,

    /// Print the raw service response before the Markdown.
    #[arg(long, env = "INTELLICV_SHOW_RAW")]
    show_raw: bool,

    /// Disable the spinner.
    #[arg(long, env = "INTELLICV_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "INTELLICV_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the result itself.
    #[arg(short, long, env = "INTELLICV_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner owns the terminal while it runs; INFO lines would tear it.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Collect inputs ───────────────────────────────────────────────────
    let job_description = read_job_description(&cli)?;
    let resume = ResumeUpload::from_path(&cli.resume)
        .await
        .context("Failed to load resume")?;
    let request = OptimizeRequest::new(resume, job_description);

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn SubmissionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Submit ───────────────────────────────────────────────────────────
    let output = match optimize(&request, &config).await {
        Ok(output) => output,
        Err(IntellicvError::MissingInput { input }) => {
            if !cli.quiet {
                eprintln!("{} nothing submitted: the {input} is empty", yellow("⚠"));
            }
            return Ok(());
        }
        Err(e) => return Err(e).context("Optimisation failed"),
    };

    // ── Present ──────────────────────────────────────────────────────────
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        writeln!(handle, "{json}").context("Failed to write to stdout")?;
    } else {
        if cli.show_raw {
            let raw = serde_json::to_string_pretty(&output.raw_response)
                .context("Failed to serialise raw response")?;
            writeln!(handle, "Raw AI Response:\n{raw}\n").context("Failed to write to stdout")?;
        }
        handle
            .write_all(output.markdown.as_bytes())
            .context("Failed to write to stdout")?;
    }
    drop(handle);

    // ── Offer download ───────────────────────────────────────────────────
    if !cli.no_docx {
        let path = resolve_output_path(&cli.output, &output.document.file_name);
        output
            .document
            .write_to(&path)
            .await
            .context("Failed to save document")?;

        if !cli.quiet {
            eprintln!(
                "{}  {}  {}  {}",
                green("✔"),
                bold(&path.display().to_string()),
                dim(&format_size(output.document.size_bytes)),
                dim(&format!("{}ms", output.stats.total_duration_ms)),
            );
        }
    }

    Ok(())
}

/// Map CLI args to `OptimizerConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<OptimizerConfig> {
    let mut builder = OptimizerConfig::builder()
        .endpoint(cli.endpoint.clone())
        .timeout_secs(cli.timeout)
        .connect_timeout_secs(cli.connect_timeout);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Inline text wins; otherwise read the file, `-` meaning stdin.
fn read_job_description(cli: &Cli) -> Result<String> {
    if let Some(ref text) = cli.job_description {
        return Ok(text.clone());
    }

    match cli.job_description_file.as_deref() {
        Some(path) if path == Path::new("-") => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read job description from stdin")?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job description from {:?}", path)),
        None => Ok(String::new()),
    }
}

/// A directory (existing, or spelled with a trailing slash) gets the
/// document's own file name appended.
fn resolve_output_path(output: &Path, file_name: &str) -> PathBuf {
    let looks_like_dir = output.is_dir()
        || output
            .to_str()
            .is_some_and(|s| s.ends_with('/') || s.ends_with(std::path::MAIN_SEPARATOR));
    if looks_like_dir {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}
