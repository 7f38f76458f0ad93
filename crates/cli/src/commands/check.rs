use std::path::Path;
use std::process;

use hexconf_core::{compile, ConvertError};

use super::{read_source_or_exit, report_convert_error};
use crate::config::{Config, OutputFormat};

pub(crate) fn cmd_check(file: &Path, config: &Config, quiet: bool) {
    let output = config.diagnostics.format;
    let src = read_source_or_exit(file, output, quiet);

    let compiled = match compile(&src) {
        Ok(c) => c,
        Err(e) => {
            report_convert_error(&ConvertError::from(e), output, quiet);
            process::exit(1);
        }
    };
    let evaluation = compiled.evaluation;
    if !evaluation.is_clean() {
        report_convert_error(&ConvertError::Semantic(evaluation.errors), output, quiet);
        process::exit(1);
    }

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "file": file.display().to_string(),
                "entries": evaluation.entries.len(),
                "constants": evaluation.constants.len(),
            });
            let text = serde_json::to_string_pretty(&summary).unwrap_or_default();
            println!("{}", text);
        }
        OutputFormat::Text if evaluation.constants.is_empty() => {
            println!(
                "{}: ok ({} entries)",
                file.display(),
                evaluation.entries.len()
            );
        }
        OutputFormat::Text => {
            println!(
                "{}: ok ({} entries, {} constants)",
                file.display(),
                evaluation.entries.len(),
                evaluation.constants.len()
            );
        }
    }
}
