//! Transport: post the request to the optimisation service.
//!
//! The pipeline only talks to the service through [`ResumeOptimizer`], so a
//! front end or a test can swap in its own backend. [`HttpOptimizer`] is the
//! real one: a single multipart `POST` with no retries.
//!
//! Status handling lives in the caller, not here. A backend reports what
//! came back; deciding that a 503 is fatal belongs to the pipeline.

use crate::config::{OptimizerConfig, DOCX_MIME};
use crate::error::IntellicvError;
use crate::pipeline::input::OptimizeRequest;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, info};

/// Multipart part carrying the resume file.
pub const RESUME_FIELD: &str = "resume";

/// Multipart text field carrying the job description.
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// What the service sent back, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: String,
}

/// Something that can turn an [`OptimizeRequest`] into a service response.
#[async_trait]
pub trait ResumeOptimizer: Send + Sync {
    /// Send exactly one request. Implementations must not retry.
    async fn submit(&self, request: &OptimizeRequest) -> Result<ServiceResponse, IntellicvError>;
}

/// The HTTP backend.
#[derive(Debug, Clone)]
pub struct HttpOptimizer {
    client: reqwest::Client,
    endpoint: String,
    timeout_secs: u64,
}

impl HttpOptimizer {
    pub fn new(config: &OptimizerConfig) -> Result<Self, IntellicvError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| IntellicvError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(&self, request: &OptimizeRequest) -> Result<Form, IntellicvError> {
        let part = Part::bytes(request.resume.bytes.clone())
            .file_name(request.resume.file_name.clone())
            .mime_str(DOCX_MIME)
            .map_err(|e| IntellicvError::Internal(format!("invalid multipart MIME type: {e}")))?;

        Ok(Form::new()
            .part(RESUME_FIELD, part)
            .text(JOB_DESCRIPTION_FIELD, request.job_description.clone()))
    }

    fn classify(&self, e: reqwest::Error) -> IntellicvError {
        if e.is_timeout() {
            IntellicvError::Timeout {
                endpoint: self.endpoint.clone(),
                secs: self.timeout_secs,
            }
        } else {
            IntellicvError::RequestFailed {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl ResumeOptimizer for HttpOptimizer {
    async fn submit(&self, request: &OptimizeRequest) -> Result<ServiceResponse, IntellicvError> {
        info!("Submitting resume '{}' to {}", request.resume.file_name, self.endpoint);
        debug!(
            "Upload: {} bytes resume, {} chars job description",
            request.resume.bytes.len(),
            request.job_description.len()
        );

        let form = self.build_form(request)?;
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.classify(e))?;
        debug!("Service answered HTTP {} with {} bytes", status, body.len());

        Ok(ServiceResponse { status, body })
    }
}
