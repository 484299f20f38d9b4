//! Configuration for a resume submission.
//!
//! All transport behaviour is controlled through [`OptimizerConfig`], built
//! via its [`OptimizerConfigBuilder`]. The builder lets callers set only the
//! knobs they care about and rely on documented defaults for the rest.

use crate::error::IntellicvError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Endpoint of the hosted optimisation service.
pub const DEFAULT_ENDPOINT: &str = "https://ai-resume-writer-backend.onrender.com/optimize_resume";

/// File name offered for the generated document.
pub const DEFAULT_DOCUMENT_FILE_NAME: &str = "Optimized_Resume.docx";

/// MIME type of a WordprocessingML package.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Configuration for one resume submission.
///
/// # Example
/// ```rust
/// use intellicv::OptimizerConfig;
///
/// let config = OptimizerConfig::builder()
///     .endpoint("http://localhost:8000/optimize_resume")
///     .timeout_secs(30)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct OptimizerConfig {
    /// URL the multipart form is posted to. Default: [`DEFAULT_ENDPOINT`].
    pub endpoint: String,

    /// Whole-request timeout in seconds. Default: 120.
    ///
    /// The hosted backend sleeps when idle and the first request after a
    /// cold start routinely takes close to a minute, on top of the model call.
    pub timeout_secs: u64,

    /// TCP/TLS connect timeout in seconds. Default: 15.
    pub connect_timeout_secs: u64,

    /// `User-Agent` header sent with the request.
    pub user_agent: String,

    /// Name given to the generated `.docx`. Default: [`DEFAULT_DOCUMENT_FILE_NAME`].
    pub document_file_name: String,

    /// Optional progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 120,
            connect_timeout_secs: 15,
            user_agent: concat!("intellicv/", env!("CARGO_PKG_VERSION")).to_string(),
            document_file_name: DEFAULT_DOCUMENT_FILE_NAME.to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for OptimizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimizerConfig")
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("document_file_name", &self.document_file_name)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn SubmissionProgressCallback>"),
            )
            .finish()
    }
}

impl OptimizerConfig {
    /// Create a new builder for `OptimizerConfig`.
    pub fn builder() -> OptimizerConfigBuilder {
        OptimizerConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`OptimizerConfig`].
#[derive(Debug)]
pub struct OptimizerConfigBuilder {
    config: OptimizerConfig,
}

impl OptimizerConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.config.connect_timeout_secs = secs;
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    pub fn document_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.document_file_name = name.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<OptimizerConfig, IntellicvError> {
        let c = &self.config;
        if !is_http_url(&c.endpoint) {
            return Err(IntellicvError::InvalidConfig(format!(
                "endpoint must be an http:// or https:// URL, got '{}'",
                c.endpoint
            )));
        }
        if c.timeout_secs == 0 {
            return Err(IntellicvError::InvalidConfig(
                "timeout must be ≥ 1 second".into(),
            ));
        }
        if c.connect_timeout_secs == 0 {
            return Err(IntellicvError::InvalidConfig(
                "connect timeout must be ≥ 1 second".into(),
            ));
        }
        if !c.document_file_name.to_ascii_lowercase().ends_with(".docx") {
            return Err(IntellicvError::InvalidConfig(format!(
                "document file name must end in .docx, got '{}'",
                c.document_file_name
            )));
        }
        Ok(self.config)
    }
}

/// Check if the string looks like an HTTP(S) URL.
pub fn is_http_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}
