//! Tests for `vsplugin-helper install`
#![cfg(unix)]

use super::common::{install_fake_editor, TestContext, PAGE_PATH};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PACKAGE_PATH: &str =
    "/_apis/public/gallery/publishers/ms-python/vsextensions/python/2024.1.0/vspackage";

async fn marketplace() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PAGE_PATH))
        .and(query_param("itemName", "ms-python.python"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<script>{"Versions":[{"VersionValue":"2024.1.0"}]}</script>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(PACKAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04vsix".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn configure(ctx: &TestContext, server: &MockServer, editor_path: Option<&Path>) {
    let mut config = format!(
        "marketplace_url: {}\nstaging_dir: {}\n",
        server.uri(),
        ctx.path().join("staging").display()
    );
    if let Some(editor) = editor_path {
        config.push_str(&format!("editor_path: {}\n", editor.display()));
    }
    ctx.write_config(&config);
}

fn read_trimmed(path: &Path) -> String {
    fs::read_to_string(path).unwrap().trim().to_string()
}

fn same_dir(a: &str, b: &Path) -> bool {
    fs::canonicalize(a).unwrap() == fs::canonicalize(b).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_end_to_end() {
    let server = marketplace().await;
    let ctx = TestContext::new();
    let editor = ctx.path().join("trae");
    install_fake_editor(&editor, None);
    configure(&ctx, &server, Some(&editor));

    ctx.helper()
        .args(["install", "ms-python.python"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed ms-python.python"));

    let staged = ctx.path().join("staging").join("ms-python.python.vsix");
    assert_eq!(
        read_trimmed(&editor.join("bin").join("args.txt")),
        format!("--install-extension {}", staged.display())
    );
    assert!(same_dir(
        &read_trimmed(&editor.join("bin").join("cwd.txt")),
        &editor.join("bin")
    ));
    assert!(!staged.exists());

    let log = ctx.log_contents();
    assert!(log.contains("Extension ms-python.python installed"));
    assert!(log.contains("removed temporary file"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_stderr_is_failure() {
    let server = marketplace().await;
    let ctx = TestContext::new();
    let editor = ctx.path().join("trae");
    install_fake_editor(&editor, Some("Failed Installing Extensions"));
    configure(&ctx, &server, Some(&editor));

    let output = ctx.helper().args(["install", "ms-python.python"]).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Install failed: Failed Installing Extensions"));
    assert_eq!(stderr.matches("Failed Installing Extensions").count(), 1);

    assert!(!ctx.path().join("staging").join("ms-python.python.vsix").exists());
    assert!(ctx.log_contents().contains("Install failed, removed temporary file"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_unknown_extension() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PAGE_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    let ctx = TestContext::new();
    let editor = ctx.path().join("trae");
    install_fake_editor(&editor, None);
    configure(&ctx, &server, Some(&editor));

    ctx.helper()
        .args(["install", "nobody.nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Extension not found"));

    assert!(!editor.join("bin").join("args.txt").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_in_remote_context_uses_working_directory() {
    let server = marketplace().await;
    let ctx = TestContext::new();
    // The working directory doubles as the editor root
    install_fake_editor(ctx.path(), None);
    configure(&ctx, &server, None);

    ctx.helper()
        .env("VSPLUGIN_REMOTE_HOST", "devbox")
        .args(["install", "ms-python.python"])
        .assert()
        .success();

    let args = read_trimmed(&ctx.path().join("bin").join("args.txt"));
    assert!(args.starts_with("--install-extension "));
    assert!(args.ends_with(" --remote"));
}
