//! End-to-end tests for intellicv.
//!
//! Most tests run the full pipeline against a one-shot HTTP stub bound to
//! `127.0.0.1:0`, so they need no network. The stub captures the raw request
//! so the multipart layout can be checked byte for byte.
//!
//! One test talks to the real service. It is gated behind `E2E_ENABLED` and
//! needs a resume at `INTELLICV_E2E_RESUME`:
//!   E2E_ENABLED=1 INTELLICV_E2E_RESUME=cv.docx cargo test --test e2e -- --nocapture

use intellicv::{
    optimize, optimize_sync, optimize_to_file, IntellicvError, OptimizeRequest, OptimizerConfig,
    ResumeUpload, DOCX_MIME,
};
use serde_json::json;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Accept one connection, answer it with `status_line` + `body`, and hand
/// back the raw request bytes.
async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{addr}/optimize_resume"), handle)
}

async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if request_complete(&buf) {
            break;
        }
    }
    buf
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok());

    match content_length {
        Some(len) => buf.len() >= header_end + 4 + len,
        None => buf.ends_with(b"0\r\n\r\n"),
    }
}

fn config_for(endpoint: &str) -> OptimizerConfig {
    OptimizerConfig::builder()
        .endpoint(endpoint)
        .timeout_secs(10)
        .build()
        .unwrap()
}

fn ada() -> serde_json::Value {
    json!({
        "name": "Ada Lovelace",
        "contact_info": "ada@example.com",
        "experience": [{
            "company": "Analytical Eng Co",
            "job_title": "Engineer",
            "dates": "1840-1850",
            "achievements": ["Designed first algorithm"]
        }],
        "education": {"degree": "Self-taught", "year": "1840"},
        "skills": ["Mathematics", "Logic"]
    })
}

fn request(job_description: &str) -> OptimizeRequest {
    OptimizeRequest::new(
        ResumeUpload::new("cv.docx", b"PK\x03\x04fake-docx".to_vec()),
        job_description,
    )
}

// ── Transport ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn posts_multipart_form_and_renders_result() {
    let body = json!({ "optimized_resume": ada().to_string() }).to_string();
    let (endpoint, server) = serve_once("200 OK", body).await;

    let output = optimize(&request("Rust engineer, async I/O"), &config_for(&endpoint))
        .await
        .expect("optimize should succeed");

    let raw = String::from_utf8_lossy(&server.await.unwrap()).to_string();
    assert!(raw.starts_with("POST /optimize_resume "), "got: {raw}");
    assert!(raw.contains(r#"name="resume"; filename="cv.docx""#), "got: {raw}");
    assert!(raw
        .to_ascii_lowercase()
        .contains(&format!("content-type: {DOCX_MIME}")));
    assert!(raw.contains("PK\u{3}\u{4}fake-docx"));
    assert!(raw.contains(r#"name="job_description""#));
    assert!(raw.contains("Rust engineer, async I/O"));

    for needle in [
        "Ada Lovelace",
        "ada@example.com",
        "Analytical Eng Co",
        "Designed first algorithm",
        "Self-taught",
        "1840",
        "Mathematics",
        "Logic",
    ] {
        assert!(output.markdown.contains(needle), "markdown lacks {needle:?}");
    }
    assert_eq!(output.document.file_name, "Optimized_Resume.docx");
    assert_eq!(output.stats.status, 200);
}

#[tokio::test]
async fn inline_object_payload_is_accepted() {
    let body = json!({ "optimized_resume": ada() }).to_string();
    let (endpoint, server) = serve_once("200 OK", body).await;

    let output = optimize(&request("Engineer"), &config_for(&endpoint))
        .await
        .unwrap();
    server.await.unwrap();

    assert_eq!(output.record.skills, vec!["Mathematics", "Logic"]);
}

#[tokio::test]
async fn server_error_is_transport_failure() {
    let (endpoint, server) =
        serve_once("500 Internal Server Error", r#"{"detail":"model overloaded"}"#.into()).await;

    let err = optimize(&request("Engineer"), &config_for(&endpoint))
        .await
        .unwrap_err();
    server.await.unwrap();

    match err {
        IntellicvError::TransportFailure { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("model overloaded"));
        }
        other => panic!("expected TransportFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_invalid_response() {
    let (endpoint, server) = serve_once("200 OK", "<html>hello</html>".into()).await;

    let err = optimize(&request("Engineer"), &config_for(&endpoint))
        .await
        .unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, IntellicvError::InvalidResponse { .. }), "got {err:?}");
}

#[tokio::test]
async fn incomplete_record_names_missing_key() {
    let mut resume = ada();
    resume.as_object_mut().unwrap().remove("education");
    let body = json!({ "optimized_resume": resume.to_string() }).to_string();
    let (endpoint, server) = serve_once("200 OK", body).await;

    let err = optimize(&request("Engineer"), &config_for(&endpoint))
        .await
        .unwrap_err();
    server.await.unwrap();

    assert_eq!(err.missing_field(), Some("education"));
    assert_eq!(err.to_string(), "Missing key 'education' in AI response");
}

#[tokio::test]
async fn empty_job_description_opens_no_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/optimize_resume", listener.local_addr().unwrap());

    let err = optimize(&request("   "), &config_for(&endpoint))
        .await
        .unwrap_err();
    assert!(matches!(err, IntellicvError::MissingInput { .. }));

    let accepted = tokio::time::timeout(Duration::from_millis(200), listener.accept()).await;
    assert!(accepted.is_err(), "no connection should have been made");
}

// ── Output ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn optimize_to_file_writes_docx() {
    let body = json!({ "optimized_resume": ada().to_string() }).to_string();
    let (endpoint, server) = serve_once("200 OK", body).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Optimized_Resume.docx");

    let output = optimize_to_file(&request("Engineer"), &path, &config_for(&endpoint))
        .await
        .unwrap();
    server.await.unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, output.document.bytes);
    assert_eq!(&written[..2], b"PK");
}

#[test]
fn sync_wrapper_skips_empty_input() {
    let config = OptimizerConfig::default();
    let empty = OptimizeRequest::new(ResumeUpload::new("cv.docx", Vec::new()), "Engineer");
    let err = optimize_sync(&empty, &config).unwrap_err();
    assert!(matches!(err, IntellicvError::MissingInput { .. }));
}

// ── Live service ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn live_service_round_trip() {
    if std::env::var("E2E_ENABLED").is_err() {
        println!("SKIP: set E2E_ENABLED=1 to run e2e tests");
        return;
    }
    let Ok(path) = std::env::var("INTELLICV_E2E_RESUME") else {
        println!("SKIP: set INTELLICV_E2E_RESUME=/path/to/resume.docx");
        return;
    };

    let resume = ResumeUpload::from_path(&path).await.expect("resume should load");
    let request = OptimizeRequest::new(
        resume,
        "Backend engineer. Rust, PostgreSQL, Kubernetes. 5+ years building APIs.",
    );
    let config = OptimizerConfig::builder().timeout_secs(300).build().unwrap();

    let output = optimize(&request, &config).await.expect("live call should succeed");
    assert!(!output.record.name.is_empty());
    assert!(output.markdown.contains("### **Skills**"));
    println!("{}", output.markdown);
}
