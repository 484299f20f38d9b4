//! Top-level submission API.
//!
//! [`optimize`] runs the whole pipeline for one [`OptimizeRequest`]:
//! check inputs, post them, validate the answer, render both outputs. It
//! either returns the complete [`OptimizedResume`] or a single error; nothing
//! is rendered from a half-valid response and nothing is retried.

use crate::config::OptimizerConfig;
use crate::error::IntellicvError;
use crate::output::{DocxArtifact, OptimizedResume, SubmissionStats};
use crate::pipeline::docx::render_docx;
use crate::pipeline::input::OptimizeRequest;
use crate::pipeline::markdown::render_markdown;
use crate::pipeline::payload::{decode_response, extract_record};
use crate::pipeline::submit::{HttpOptimizer, ResumeOptimizer};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Longest error body quoted back in [`IntellicvError::TransportFailure`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Submit a request to the configured endpoint and render the result.
///
/// A request with an empty input fails with
/// [`IntellicvError::MissingInput`] before any connection is opened.
///
/// # Example
/// ```rust,no_run
/// use intellicv::{optimize, OptimizeRequest, OptimizerConfig, ResumeUpload};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let resume = ResumeUpload::from_path("resume.docx").await?;
/// let request = OptimizeRequest::new(resume, "Senior Rust engineer, distributed systems");
/// let output = optimize(&request, &OptimizerConfig::default()).await?;
/// println!("{}", output.markdown);
/// # Ok(())
/// # }
/// ```
pub async fn optimize(
    request: &OptimizeRequest,
    config: &OptimizerConfig,
) -> Result<OptimizedResume, IntellicvError> {
    check_inputs(request)?;
    let backend = HttpOptimizer::new(config)?;
    optimize_with(&backend, request, config).await
}

/// Like [`optimize`], but through a caller-supplied backend.
pub async fn optimize_with(
    backend: &dyn ResumeOptimizer,
    request: &OptimizeRequest,
    config: &OptimizerConfig,
) -> Result<OptimizedResume, IntellicvError> {
    check_inputs(request)?;

    let result = run(backend, request, config).await;
    if let (Err(e), Some(cb)) = (&result, &config.progress_callback) {
        cb.on_failure(&e.to_string());
    }
    result
}

/// Synchronous wrapper around [`optimize`].
///
/// Creates a temporary tokio runtime internally.
pub fn optimize_sync(
    request: &OptimizeRequest,
    config: &OptimizerConfig,
) -> Result<OptimizedResume, IntellicvError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| IntellicvError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(optimize(request, config))
}

/// Run [`optimize`] and write the generated document to `path`.
pub async fn optimize_to_file(
    request: &OptimizeRequest,
    path: impl AsRef<Path>,
    config: &OptimizerConfig,
) -> Result<OptimizedResume, IntellicvError> {
    let output = optimize(request, config).await?;
    output.document.write_to(path).await?;
    Ok(output)
}

fn check_inputs(request: &OptimizeRequest) -> Result<(), IntellicvError> {
    match request.missing_input() {
        Some(input) => {
            warn!("Skipping submission: the {} is empty", input);
            Err(IntellicvError::MissingInput { input })
        }
        None => Ok(()),
    }
}

async fn run(
    backend: &dyn ResumeOptimizer,
    request: &OptimizeRequest,
    config: &OptimizerConfig,
) -> Result<OptimizedResume, IntellicvError> {
    let start = Instant::now();
    let upload_bytes = request.resume.bytes.len();

    if let Some(ref cb) = config.progress_callback {
        cb.on_submit_start(&config.endpoint, upload_bytes);
    }

    // ── Submit ───────────────────────────────────────────────────────────
    let response = backend.submit(request).await?;
    let round_trip_ms = start.elapsed().as_millis() as u64;

    if let Some(ref cb) = config.progress_callback {
        cb.on_response(response.status, round_trip_ms);
    }

    if response.status != 200 {
        return Err(IntellicvError::TransportFailure {
            status: response.status,
            body: truncate_chars(response.body.trim(), MAX_ERROR_BODY_CHARS),
        });
    }

    // ── Validate ─────────────────────────────────────────────────────────
    let raw_response = decode_response(&response.body)?;
    let record = extract_record(&raw_response)?;

    // ── Render ───────────────────────────────────────────────────────────
    let markdown = render_markdown(&record);
    let document = DocxArtifact::new(config.document_file_name.clone(), render_docx(&record)?);

    if let Some(ref cb) = config.progress_callback {
        cb.on_complete(markdown.len(), document.size_bytes);
    }

    let stats = SubmissionStats {
        upload_bytes,
        status: response.status,
        round_trip_ms,
        total_duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Optimized resume for '{}': {} positions, {} skills, {}ms",
        record.name,
        record.experience.len(),
        record.skills.len(),
        stats.total_duration_ms
    );

    Ok(OptimizedResume {
        record,
        markdown,
        document,
        raw_response,
        stats,
    })
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push('\u{2026}');
    out
}
