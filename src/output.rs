//! Output types: what a successful submission hands back.

use crate::config::DOCX_MIME;
use crate::error::IntellicvError;
use crate::record::ResumeRecord;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Everything produced by one successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizedResume {
    /// The validated record both renderings were built from.
    pub record: ResumeRecord,
    /// On-screen rendering.
    pub markdown: String,
    /// Downloadable rendering.
    pub document: DocxArtifact,
    /// The decoded response body exactly as the service sent it.
    pub raw_response: serde_json::Value,
    pub stats: SubmissionStats,
}

/// A generated `.docx` ready to be offered for download.
#[derive(Debug, Clone, Serialize)]
pub struct DocxArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub size_bytes: usize,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl DocxArtifact {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: DOCX_MIME,
            size_bytes: bytes.len(),
            bytes,
        }
    }

    /// Write the document to `path`.
    ///
    /// Writes to a sibling `.tmp` file first and renames it into place, so
    /// an interrupted write never leaves a truncated `.docx` behind.
    pub async fn write_to(&self, path: impl AsRef<Path>) -> Result<(), IntellicvError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    IntellicvError::OutputWriteFailed {
                        path: path.to_path_buf(),
                        source: e,
                    }
                })?;
            }
        }

        let tmp_path = path.with_extension("docx.tmp");
        tokio::fs::write(&tmp_path, &self.bytes)
            .await
            .map_err(|e| IntellicvError::OutputWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(IntellicvError::OutputWriteFailed {
                path: path.to_path_buf(),
                source: e,
            });
        }

        info!("Wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(())
    }
}

/// Timing and size figures for one submission.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubmissionStats {
    /// Size of the uploaded resume.
    pub upload_bytes: usize,
    /// HTTP status of the service response.
    pub status: u16,
    /// Time from sending the request to having the full body.
    pub round_trip_ms: u64,
    /// Wall-clock time for the whole submission including rendering.
    pub total_duration_ms: u64,
}
