//! Conformance suite runner.
//!
//! Convention:
//!   positive/           -- *.hconf + *.expected.xml (no error expected)
//!   negative/syntax/    -- *.hconf + *.expected-error.json (recognition fails)
//!   negative/semantic/  -- *.hconf + *.expected-error.json (evaluation errors)

use crate::tap::Tap;
use hexconf_core::{compile, to_xml, ConvertError, RenderOptions, SourceProvider};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

pub(crate) struct RunResult {
    pub failed: usize,
}

pub(crate) fn run_suite(suite_dir: &Path, provider: &dyn SourceProvider) -> RunResult {
    let mut tap = Tap::new();
    collect_suite(suite_dir, provider, &mut tap);
    let failed = tap.failure_count();
    tap.finish();
    RunResult { failed }
}

fn collect_suite(suite_dir: &Path, provider: &dyn SourceProvider, tap: &mut Tap) {
    run_positive_dir(suite_dir, "positive", provider, tap);
    for kind in ["syntax", "semantic"] {
        run_negative_dir(suite_dir, &format!("negative/{}", kind), provider, tap);
    }
}

fn run_positive_dir(suite_dir: &Path, subdir: &str, provider: &dyn SourceProvider, tap: &mut Tap) {
    let dir = suite_dir.join(subdir);
    for source_path in list_fixtures(provider, &dir) {
        let name = format!("{}/{}", subdir, stem(&source_path));
        let expected_path = dir.join(format!("{}.expected.xml", stem(&source_path)));
        let expected = match provider.read_source(&expected_path) {
            Ok(text) => text,
            Err(e) => {
                tap.not_ok(
                    &name,
                    format!("missing expected file: {}: {}", expected_path.display(), e),
                );
                continue;
            }
        };
        run_positive_test(&source_path, &expected, &name, provider, tap);
    }
}

fn run_negative_dir(suite_dir: &Path, subdir: &str, provider: &dyn SourceProvider, tap: &mut Tap) {
    let dir = suite_dir.join(subdir);
    for source_path in list_fixtures(provider, &dir) {
        let name = format!("{}/{}", subdir, stem(&source_path));
        let expected_path = dir.join(format!("{}.expected-error.json", stem(&source_path)));
        let expected_error = match read_json(provider, &expected_path) {
            Ok(v) => v,
            Err(e) => {
                tap.not_ok(&name, format!("missing expected-error file: {}", e));
                continue;
            }
        };
        run_negative_test(&source_path, &expected_error, &name, provider, tap);
    }
}

fn run_positive_test(
    source_path: &Path,
    expected: &str,
    name: &str,
    provider: &dyn SourceProvider,
    tap: &mut Tap,
) {
    debug!(test = name, "running positive fixture");
    let src = match provider.read_source(source_path) {
        Ok(s) => s,
        Err(e) => {
            tap.not_ok(name, format!("failed to read fixture: {}", e));
            return;
        }
    };

    let outcome = compile(&src)
        .map_err(ConvertError::from)
        .and_then(|compiled| compiled.into_result());
    match outcome {
        Ok(doc) => match to_xml(&doc, &RenderOptions::default()) {
            Ok(got) if got.trim_end() == expected.trim_end() => tap.ok(name),
            Ok(got) => tap.not_ok(
                name,
                format!("output mismatch:\n--- expected\n{}\n+++ got\n{}", expected.trim_end(), got),
            ),
            Err(e) => tap.not_ok(name, format!("render failed: {}", e)),
        },
        Err(e) => tap.not_ok(
            name,
            format!("unexpected error:\n{}", e.messages().join("\n")),
        ),
    }
}

fn run_negative_test(
    source_path: &Path,
    expected_error: &Value,
    name: &str,
    provider: &dyn SourceProvider,
    tap: &mut Tap,
) {
    debug!(test = name, "running negative fixture");
    let src = match provider.read_source(source_path) {
        Ok(s) => s,
        Err(e) => {
            tap.not_ok(name, format!("failed to read fixture: {}", e));
            return;
        }
    };

    let outcome = compile(&src)
        .map_err(ConvertError::from)
        .and_then(|compiled| compiled.into_result());
    match outcome {
        Err(got_error) => {
            let got_json = got_error.to_json_value();
            if &got_json == expected_error {
                tap.ok(name);
            } else {
                tap.not_ok(
                    name,
                    format!("error mismatch:\n{}", json_diff(expected_error, &got_json)),
                );
            }
        }
        Ok(_) => tap.not_ok(name, "expected an error but conversion succeeded"),
    }
}

// -- Helpers --

// A missing directory is an empty one.
fn list_fixtures(provider: &dyn SourceProvider, dir: &Path) -> Vec<PathBuf> {
    match provider.list_sources(dir, "hconf") {
        Ok(paths) => paths,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "skipping fixture directory");
            Vec::new()
        }
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn read_json(provider: &dyn SourceProvider, path: &Path) -> Result<Value, String> {
    let src = provider
        .read_source(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&src).map_err(|e| format!("invalid JSON in {}: {}", path.display(), e))
}

fn json_diff(expected: &Value, got: &Value) -> String {
    let exp_str = serde_json::to_string_pretty(expected).unwrap_or_default();
    let got_str = serde_json::to_string_pretty(got).unwrap_or_default();
    format!("--- expected\n{}\n+++ got\n{}", exp_str, got_str)
}
