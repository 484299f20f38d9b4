//! # intellicv
//!
//! Send a resume and a job description to a resume-optimisation service and
//! render what comes back as Markdown (for the screen) and DOCX (for download).
//!
//! The optimisation itself happens remotely. This crate is the client side:
//! it collects the two inputs, posts them once, checks that the answer really
//! is a complete resume, and formats it.
//!
//! ## Pipeline Overview
//!
//! ```text
//! OptimizeRequest
//!  │
//!  ├─ 1. Input     resume bytes + job description, both non-empty
//!  ├─ 2. Submit    one multipart POST (resume, job_description)
//!  ├─ 3. Validate  optimized_resume → ResumeRecord, all five keys present
//!  ├─ 4. Render    Markdown + DOCX
//!  └─ 5. Output    OptimizedResume (record, markdown, document, raw response)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use intellicv::{optimize, OptimizeRequest, OptimizerConfig, ResumeUpload};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resume = ResumeUpload::from_path("resume.docx").await?;
//!     let request = OptimizeRequest::new(resume, std::fs::read_to_string("job.txt")?);
//!
//!     let output = optimize(&request, &OptimizerConfig::default()).await?;
//!     println!("{}", output.markdown);
//!     output.document.write_to("Optimized_Resume.docx").await?;
//!     Ok(())
//! }
//! ```
//!
//! The renderers are usable on their own:
//!
//! ```rust
//! use intellicv::{parse_record, render_markdown};
//!
//! let value = serde_json::json!({
//!     "name": "Ada Lovelace",
//!     "contact_info": "ada@example.com",
//!     "experience": [],
//!     "education": {"degree": "Self-taught", "year": "1840"},
//!     "skills": ["Mathematics"]
//! });
//! let record = parse_record(&value).unwrap();
//! assert!(render_markdown(&record).contains("- Mathematics"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `intellicv` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod optimize;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod record;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    OptimizerConfig, OptimizerConfigBuilder, DEFAULT_DOCUMENT_FILE_NAME, DEFAULT_ENDPOINT, DOCX_MIME,
};
pub use error::{InputKind, IntellicvError};
pub use optimize::{optimize, optimize_sync, optimize_to_file, optimize_with};
pub use output::{DocxArtifact, OptimizedResume, SubmissionStats};
pub use pipeline::docx::render_docx;
pub use pipeline::input::{OptimizeRequest, ResumeUpload};
pub use pipeline::markdown::render_markdown;
pub use pipeline::payload::extract_record;
pub use pipeline::submit::{HttpOptimizer, ResumeOptimizer, ServiceResponse};
pub use progress::{NoopProgressCallback, ProgressCallback, SubmissionProgressCallback};
pub use record::{parse_record, Education, ExperienceEntry, ResumeRecord, REQUIRED_FIELDS};
