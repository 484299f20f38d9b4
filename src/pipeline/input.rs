//! Input collection: the resume upload and the job description.
//!
//! An [`OptimizeRequest`] is everything a front end has gathered when the
//! user presses submit. It is a plain value so the rest of the pipeline can
//! run without any UI around it. [`OptimizeRequest::missing_input`] decides
//! whether a submission may go out at all.

use crate::error::{InputKind, IntellicvError};
use std::path::Path;
use tracing::debug;

/// The uploaded resume document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    /// File name sent in the multipart part, e.g. `"resume.docx"`.
    pub file_name: String,
    /// Raw file bytes. Not inspected.
    pub bytes: Vec<u8>,
}

impl ResumeUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a `.docx` resume from disk.
    ///
    /// Only the extension is checked, matching the upload control's type
    /// filter; the package itself is passed through untouched.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, IntellicvError> {
        let path = path.as_ref().to_path_buf();

        if !has_docx_extension(&path) {
            return Err(IntellicvError::UnsupportedResumeType { path });
        }

        let bytes = match tokio::fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(IntellicvError::PermissionDenied { path });
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(IntellicvError::FileNotFound { path });
            }
            Err(e) => {
                return Err(IntellicvError::Internal(format!(
                    "failed to read '{}': {e}",
                    path.display()
                )));
            }
        };

        let file_name = upload_file_name(&path);
        debug!("Loaded resume {} ({} bytes)", path.display(), bytes.len());
        Ok(Self { file_name, bytes })
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// One submission: the resume plus the job description it is tailored to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeRequest {
    pub resume: ResumeUpload,
    pub job_description: String,
}

impl OptimizeRequest {
    pub fn new(resume: ResumeUpload, job_description: impl Into<String>) -> Self {
        Self {
            resume,
            job_description: job_description.into(),
        }
    }

    /// The first empty input, if any. A request with a missing input must
    /// not reach the network.
    pub fn missing_input(&self) -> Option<InputKind> {
        if self.resume.is_empty() {
            Some(InputKind::Resume)
        } else if self.job_description.trim().is_empty() {
            Some(InputKind::JobDescription)
        } else {
            None
        }
    }
}

fn has_docx_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("docx"))
}

fn upload_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "resume.docx".to_string())
}
