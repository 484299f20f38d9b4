//! Pipeline stages for a resume submission.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ submit ──▶ payload ──▶ markdown
//! (request)  (HTTP)    (validate)  └─▶ docx
//! ```
//!
//! 1. [`input`]   : the uploaded file and job description as a plain value
//! 2. [`submit`]  : one multipart `POST`; the only stage with network I/O
//! 3. [`payload`] : decode the response and validate it into a `ResumeRecord`
//! 4. [`markdown`]: on-screen rendering
//! 5. [`docx`]    : downloadable rendering

pub mod docx;
pub mod input;
pub mod markdown;
pub mod payload;
pub mod submit;
