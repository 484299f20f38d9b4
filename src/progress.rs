//! Progress-callback trait for submission events.
//!
//! Inject an [`Arc<dyn SubmissionProgressCallback>`] via
//! [`crate::config::OptimizerConfigBuilder::progress_callback`] to be told
//! when the request leaves, when the service answers, and how the
//! submission ended. The call to the service is the only slow step, so
//! these events are what a front end needs to keep a spinner honest.
//!
//! # Example
//!
//! ```rust
//! use intellicv::{OptimizerConfig, SubmissionProgressCallback};
//! use std::sync::Arc;
//!
//! struct Log;
//!
//! impl SubmissionProgressCallback for Log {
//!     fn on_response(&self, status: u16, elapsed_ms: u64) {
//!         eprintln!("service answered {status} after {elapsed_ms}ms");
//!     }
//! }
//!
//! let config = OptimizerConfig::builder()
//!     .progress_callback(Arc::new(Log) as Arc<dyn SubmissionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the pipeline as a submission progresses.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait SubmissionProgressCallback: Send + Sync {
    /// Called right before the request is sent.
    ///
    /// # Arguments
    /// * `endpoint`: URL the form is posted to
    /// * `upload_bytes`: size of the resume file
    fn on_submit_start(&self, endpoint: &str, upload_bytes: usize) {
        let _ = (endpoint, upload_bytes);
    }

    /// Called once the service has answered, whatever the status.
    fn on_response(&self, status: u16, elapsed_ms: u64) {
        let _ = (status, elapsed_ms);
    }

    /// Called once both renderings are done.
    fn on_complete(&self, markdown_len: usize, document_bytes: usize) {
        let _ = (markdown_len, document_bytes);
    }

    /// Called when the submission is abandoned with an error.
    fn on_failure(&self, error: &str) {
        let _ = error;
    }
}

/// Shared handle to a progress callback.
pub type ProgressCallback = Arc<dyn SubmissionProgressCallback>;

/// A no-op implementation. Useful as a default or in tests.
pub struct NoopProgressCallback;

impl SubmissionProgressCallback for NoopProgressCallback {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl SubmissionProgressCallback for Recorder {
        fn on_response(&self, status: u16, _elapsed_ms: u64) {
            self.events.lock().unwrap().push(format!("response {status}"));
        }
    }

    #[test]
    fn defaults_are_noops() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_submit_start("http://localhost", 10);
        cb.on_response(200, 5);
        cb.on_complete(1, 2);
        cb.on_failure("boom");
    }

    #[test]
    fn overridden_method_is_called() {
        let rec = Arc::new(Recorder::default());
        let cb: ProgressCallback = rec.clone();
        cb.on_submit_start("http://localhost", 10);
        cb.on_response(502, 7);
        assert_eq!(*rec.events.lock().unwrap(), vec!["response 502".to_string()]);
    }
}
