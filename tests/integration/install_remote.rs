//! Tests for `vsplugin-helper install-remote`
//!
//! A fake `ssh` on PATH runs the remote commands locally, so the "remote"
//! editor and staging directory live in the test's temp directory.
#![cfg(unix)]

use super::common::{install_fake_editor, write_script, TestContext, PAGE_PATH};
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PACKAGE_PATH: &str =
    "/_apis/public/gallery/publishers/redhat/vsextensions/vscode-yaml/1.15.0/vspackage";
const PACKAGE_BYTES: &[u8] = b"PK\x03\x04remote-vsix";

async fn marketplace() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#""VersionValue":"1.15.0""#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(PACKAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PACKAGE_BYTES.to_vec()))
        .mount(&server)
        .await;
    server
}

struct RemoteSetup {
    ctx: TestContext,
    remote_editor: PathBuf,
    remote_staging: PathBuf,
    local_staging: PathBuf,
}

impl RemoteSetup {
    /// `ssh_body` is the fake ssh client's script
    fn new(server: &MockServer, ssh_body: &str) -> Self {
        let ctx = TestContext::new();
        let remote_editor = ctx.path().join("remote-trae");
        let remote_staging = ctx.path().join("remote-staging");
        let local_staging = ctx.path().join("staging");

        write_script(&ctx.path().join("fakebin").join("ssh"), ssh_body);
        install_fake_editor(&remote_editor, None);
        ctx.write_config(&format!(
            "marketplace_url: {}\nstaging_dir: {}\nremote_editor_path: {}\nremote_staging_dir: {}\n",
            server.uri(),
            local_staging.display(),
            remote_editor.display(),
            remote_staging.display()
        ));

        Self {
            ctx,
            remote_editor,
            remote_staging,
            local_staging,
        }
    }

    fn helper(&self) -> assert_cmd::Command {
        let path = format!(
            "{}:{}",
            self.ctx.path().join("fakebin").display(),
            std::env::var("PATH").unwrap_or_default()
        );
        let mut cmd = self.ctx.helper();
        cmd.env("PATH", path);
        cmd
    }
}

/// Drops `-o BatchMode=yes <host>` and runs the command locally
const LOCAL_SSH: &str = "shift 3\nexec /bin/sh -c \"$1\"\n";

#[tokio::test(flavor = "multi_thread")]
async fn test_install_remote_end_to_end() {
    let server = marketplace().await;
    let setup = RemoteSetup::new(&server, LOCAL_SSH);

    setup
        .helper()
        .args(["install-remote", "redhat.vscode-yaml", "--host", "devbox"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed redhat.vscode-yaml on devbox"));

    let remote_package = setup.remote_staging.join("redhat.vscode-yaml.vsix");
    let args = fs::read_to_string(setup.remote_editor.join("bin").join("args.txt")).unwrap();
    assert_eq!(
        args.trim(),
        format!("--install-extension {} --remote", remote_package.display())
    );

    assert!(setup.remote_staging.is_dir());
    assert!(!remote_package.exists());
    assert!(!setup.local_staging.join("redhat.vscode-yaml.vsix").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_remote_host_from_env() {
    let server = marketplace().await;
    let setup = RemoteSetup::new(&server, LOCAL_SSH);

    setup
        .helper()
        .env("VSPLUGIN_REMOTE_HOST", "devbox")
        .args(["install-remote", "redhat.vscode-yaml"])
        .assert()
        .success();

    assert!(setup.remote_editor.join("bin").join("args.txt").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_remote_unreachable_host() {
    let server = marketplace().await;
    let setup = RemoteSetup::new(
        &server,
        "echo 'ssh: connect to host devbox port 22: Connection refused' >&2\nexit 255\n",
    );

    setup
        .helper()
        .args(["install-remote", "redhat.vscode-yaml", "--host", "devbox"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Remote transfer failed"));

    assert!(!setup.remote_editor.join("bin").join("args.txt").exists());
    assert!(!setup.local_staging.join("redhat.vscode-yaml.vsix").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_remote_uses_remote_trae_home() {
    let server = marketplace().await;
    let setup = RemoteSetup::new(&server, LOCAL_SSH);
    // No remote_editor_path: the remote shell's TRAE_HOME decides
    setup.ctx.write_config(&format!(
        "marketplace_url: {}\nstaging_dir: {}\nremote_staging_dir: {}\n",
        server.uri(),
        setup.local_staging.display(),
        setup.remote_staging.display()
    ));

    setup
        .helper()
        .env("TRAE_HOME", &setup.remote_editor)
        .args(["install-remote", "redhat.vscode-yaml", "--host", "devbox"])
        .assert()
        .success();

    assert!(setup.remote_editor.join("bin").join("args.txt").exists());
}
