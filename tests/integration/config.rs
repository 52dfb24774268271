//! Tests for `vsplugin-helper config`

use super::common::TestContext;
use predicates::prelude::*;

#[test]
fn test_set_then_get_editor_path() {
    let ctx = TestContext::new();
    let editor = ctx.path().join("trae");
    std::fs::create_dir_all(editor.join("bin")).unwrap();

    ctx.helper()
        .args(["config", "set-editor-path"])
        .arg(&editor)
        .assert()
        .success()
        .stdout(predicate::str::contains("Editor path set to"));

    let saved = std::fs::read_to_string(ctx.config_file()).unwrap();
    assert!(saved.contains(&*editor.to_string_lossy()));

    ctx.helper()
        .args(["config", "get-editor-path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&*editor.to_string_lossy()))
        .stdout(predicate::str::contains("set in config"));

    assert!(ctx
        .log_contents()
        .contains("Editor path configuration changed"));
}

#[test]
fn test_get_editor_path_unset() {
    let ctx = TestContext::new();

    ctx.helper()
        .args(["config", "get-editor-path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not set"));

    // First load writes the default config
    assert!(ctx.config_file().exists());
}

#[test]
fn test_get_editor_path_from_env() {
    let ctx = TestContext::new();

    ctx.helper()
        .env("TRAE_HOME", "/srv/trae")
        .args(["config", "get-editor-path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/srv/trae"))
        .stdout(predicate::str::contains("TRAE_HOME"));
}

#[test]
fn test_invalid_config_reports_hint() {
    let ctx = TestContext::new();
    ctx.write_config("editor_path: [unclosed");

    ctx.helper()
        .args(["config", "get-editor-path"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}
