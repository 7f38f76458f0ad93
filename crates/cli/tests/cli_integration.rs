//! CLI integration tests for the `hexconf` binary.
//!
//! All tests set `current_dir` to the workspace root so that relative
//! paths to conformance fixtures resolve correctly.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn hexconf() -> Command {
    let mut cmd = cargo_bin_cmd!("hexconf");
    cmd.current_dir(workspace_root());
    cmd
}

fn write_source(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    hexconf()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Convert hexconf configuration files to XML",
        ));
}

#[test]
fn version_exits_0() {
    hexconf()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hexconf"));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    hexconf().assert().failure();
}

// ──────────────────────────────────────────────
// 2. convert
// ──────────────────────────────────────────────

#[test]
fn convert_prints_expected_xml() {
    let expected = fs::read_to_string(
        workspace_root().join("conformance/positive/constants.expected.xml"),
    )
    .unwrap();
    let assert = hexconf()
        .args(["convert", "conformance/positive/constants.hconf"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.trim_end(), expected.trim_end());
}

#[test]
fn convert_emit_json_prints_value_tree() {
    hexconf()
        .args([
            "convert",
            "conformance/positive/constants.hconf",
            "--emit",
            "json",
            "--indent",
            "0",
        ])
        .assert()
        .success()
        .stdout("{\"x\":5}\n");
}

#[test]
fn convert_without_declaration_starts_at_root() {
    hexconf()
        .args([
            "convert",
            "conformance/positive/constants.hconf",
            "--no-declaration",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<config>"));
}

#[test]
fn convert_missing_file_exits_1() {
    hexconf()
        .args(["convert", "no/such/file.hconf"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: cannot read"));
}

#[test]
fn convert_semantic_error_reports_and_exits_1() {
    hexconf()
        .args(["convert", "conformance/negative/semantic/forward_reference.hconf"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Error: Undefined constant 'A' at line 1",
        ));
}

#[test]
fn convert_reports_every_semantic_error() {
    let tmp = TempDir::new().unwrap();
    let path = write_source(&tmp, "two.hconf", "a: A;\nb: (pow 0x2);\n");
    hexconf()
        .arg("convert")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Undefined constant 'A' at line 1"))
        .stderr(predicate::str::contains(
            "Operator 'pow' at line 2 expects exactly 2 operands, found 1",
        ));
}

#[test]
fn convert_syntax_error_shows_position() {
    hexconf()
        .args(["convert", "conformance/negative/syntax/missing_semicolon.hconf"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: expected ';', got identifier 'b' at line 2, column 1",
        ));
}

#[test]
fn convert_json_diagnostics_are_an_array() {
    let assert = hexconf()
        .args([
            "--output",
            "json",
            "convert",
            "conformance/negative/semantic/forward_reference.hconf",
        ])
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stderr).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "kind": "semantic",
            "line": 1,
            "message": "Undefined constant 'A' at line 1"
        }])
    );
}

#[test]
fn quiet_suppresses_text_diagnostics() {
    hexconf()
        .args([
            "--quiet",
            "convert",
            "conformance/negative/semantic/forward_reference.hconf",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::is_empty());
}

// ──────────────────────────────────────────────
// 3. Settings file
// ──────────────────────────────────────────────

#[test]
fn config_file_controls_rendering() {
    let tmp = TempDir::new().unwrap();
    let config = write_source(
        &tmp,
        "hexconf.toml",
        "[output]\nindent = 0\ndeclaration = false\n",
    );
    hexconf()
        .arg("--config")
        .arg(&config)
        .args(["convert", "conformance/positive/constants.hconf"])
        .assert()
        .success()
        .stdout("<config><entry name=\"x\">5</entry></config>\n");
}

#[test]
fn flags_override_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = write_source(&tmp, "hexconf.toml", "[output]\nformat = \"xml\"\n");
    hexconf()
        .arg("--config")
        .arg(&config)
        .args([
            "convert",
            "conformance/positive/constants.hconf",
            "--emit",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"x\": 5"));
}

#[test]
fn invalid_config_file_exits_1() {
    let tmp = TempDir::new().unwrap();
    let config = write_source(&tmp, "hexconf.toml", "[output]\nindent = \"wide\"\n");
    hexconf()
        .arg("--config")
        .arg(&config)
        .args(["check", "conformance/positive/constants.hconf"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid config file"));
}

// ──────────────────────────────────────────────
// 4. check
// ──────────────────────────────────────────────

#[test]
fn check_valid_file_prints_summary() {
    hexconf()
        .args(["check", "conformance/positive/constants.hconf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok (1 entries, 2 constants)"));
}

#[test]
fn check_without_constants_omits_their_count() {
    hexconf()
        .args(["check", "conformance/positive/flat_entries.hconf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok (3 entries)\n"));
}

#[test]
fn convert_deeply_nested_file_reports_syntax_error() {
    let tmp = TempDir::new().unwrap();
    let depth = 100_000;
    let path = write_source(
        &tmp,
        "deep.hconf",
        &format!("a: {}0x1{};\n", "{".repeat(depth), "}".repeat(depth)),
    );
    hexconf()
        .arg("convert")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: nesting too deep"));
}

#[test]
fn check_quiet_prints_nothing() {
    hexconf()
        .args(["--quiet", "check", "conformance/positive/constants.hconf"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn check_invalid_file_exits_1() {
    hexconf()
        .args(["check", "conformance/negative/semantic/pow_arity.hconf"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Operator 'pow'"));
}

// ──────────────────────────────────────────────
// 5. test (conformance suite)
// ──────────────────────────────────────────────

#[test]
fn conformance_suite_passes() {
    hexconf()
        .args(["test", "conformance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TAP version 14"))
        .stdout(predicate::str::contains("# fail  0"));
}

#[test]
fn test_missing_suite_dir_exits_1() {
    hexconf()
        .args(["test", "no/such/suite"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("conformance suite directory not found"));
}

#[test]
fn test_reports_failing_fixture() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("positive")).unwrap();
    write_source(&tmp, "positive/bad.hconf", "x: 0x1;\n");
    write_source(&tmp, "positive/bad.expected.xml", "<config/>\n");
    hexconf()
        .arg("test")
        .arg(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("not ok 1 - positive/bad"));
}
