//! Failures reported by the CLI before or instead of an install

use super::common::TestContext;
use predicates::prelude::*;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Marketplace that fails the test if it receives any request
async fn untouched_marketplace() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_identifier_makes_no_request() {
    let server = untouched_marketplace().await;
    let ctx = TestContext::new();
    ctx.write_config(&format!(
        "editor_path: {}\nmarketplace_url: {}\n",
        ctx.path().join("trae").display(),
        server.uri()
    ));

    ctx.helper()
        .args(["install", "python"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed extension identifier"))
        .stderr(predicate::str::contains("help: Use the full marketplace ID"));
}

#[test]
fn test_error_is_reported_once() {
    let ctx = TestContext::new();

    let output = ctx.helper().args(["install", "python"]).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Malformed extension identifier").count(), 1);
    assert!(!stderr.contains('\u{1b}'));
    // The full error still reaches the log file
    assert!(ctx
        .log_contents()
        .contains("Malformed extension identifier 'python'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_remote_without_host() {
    let server = untouched_marketplace().await;
    let ctx = TestContext::new();
    ctx.write_config(&format!("marketplace_url: {}\n", server.uri()));

    ctx.helper()
        .args(["install-remote", "ms-python.python"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("active remote connection"))
        .stderr(predicate::str::contains("VSPLUGIN_REMOTE_HOST"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_without_editor_path() {
    let server = untouched_marketplace().await;
    let ctx = TestContext::new();
    ctx.write_config(&format!("marketplace_url: {}\n", server.uri()));

    ctx.helper()
        .args(["install", "ms-python.python"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TRAE_HOME"))
        .stderr(predicate::str::contains("config set-editor-path"));
}

#[test]
fn test_unknown_command() {
    let ctx = TestContext::new();

    ctx.helper().arg("publish").assert().failure();
}
