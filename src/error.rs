//! Error types for the intellicv library.
//!
//! Every public entry point returns [`IntellicvError`]. A submission either
//! produces the full rendered output or exactly one of these errors; there
//! is no partial result and nothing is retried.
//!
//! The variants fall into the same stages as the pipeline itself:
//! input collection, transport, payload validation, and output.

use std::path::PathBuf;
use thiserror::Error;

/// Which of the two user inputs was empty at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// The uploaded `.docx` resume.
    Resume,
    /// The pasted job description.
    JobDescription,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Resume => f.write_str("resume"),
            InputKind::JobDescription => f.write_str("job description"),
        }
    }
}

/// All errors returned by the intellicv library.
#[derive(Debug, Error)]
pub enum IntellicvError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// One of the two inputs was empty; no request was sent.
    #[error("Nothing to submit: the {input} is empty")]
    MissingInput { input: InputKind },

    /// Resume file was not found at the given path.
    #[error("Resume file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The upload is not a `.docx` file.
    #[error("Unsupported resume file '{path}': only .docx uploads are accepted")]
    UnsupportedResumeType { path: PathBuf },

    // ── Transport errors ──────────────────────────────────────────────────
    /// The service answered with something other than `200 OK`.
    #[error("Optimisation service returned HTTP {status}: {body}")]
    TransportFailure { status: u16, body: String },

    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("Request to '{endpoint}' failed: {reason}\nCheck your internet connection.")]
    RequestFailed { endpoint: String, reason: String },

    /// The request exceeded the configured timeout.
    #[error("Request to '{endpoint}' timed out after {secs}s\nIncrease --timeout.")]
    Timeout { endpoint: String, secs: u64 },

    // ── Payload errors ────────────────────────────────────────────────────
    /// The response body is not a JSON object.
    #[error("Invalid response from optimisation service: {reason}")]
    InvalidResponse { reason: String },

    /// The response object has no `optimized_resume` field.
    #[error("Response has no 'optimized_resume' field")]
    MissingPayload,

    /// `optimized_resume` could not be decoded into a resume record.
    #[error("Failed to parse AI response: {reason}\nPlease try again.")]
    MalformedPayload { reason: String },

    /// The decoded record lacks required keys. `missing` is never empty and
    /// lists keys in declaration order; the message names the first one.
    #[error("Missing key '{}' in AI response", .missing.first().map(String::as_str).unwrap_or("?"))]
    IncompleteRecord { missing: Vec<String> },

    // ── Output errors ─────────────────────────────────────────────────────
    /// docx-rs failed to pack the generated document.
    #[error("Failed to build DOCX document: {0}")]
    DocumentBuildFailed(String),

    /// Could not create or write the output document.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntellicvError {
    /// The first missing key of an [`IntellicvError::IncompleteRecord`].
    pub fn missing_field(&self) -> Option<&str> {
        match self {
            IntellicvError::IncompleteRecord { missing } => missing.first().map(String::as_str),
            _ => None,
        }
    }
}
