use std::path::Path;
use std::process;

use hexconf_core::{compile, to_json, to_xml, ConvertError};
use tracing::info;

use super::{read_source_or_exit, report_convert_error};
use crate::config::{Config, EmitFormat};
use crate::report_error;

pub(crate) fn cmd_convert(file: &Path, config: &Config, quiet: bool) {
    let output = config.diagnostics.format;
    let src = read_source_or_exit(file, output, quiet);

    let compiled = match compile(&src) {
        Ok(c) => c,
        Err(e) => {
            report_convert_error(&ConvertError::from(e), output, quiet);
            process::exit(1);
        }
    };
    if !compiled.is_clean() {
        let err = ConvertError::Semantic(compiled.evaluation.errors);
        report_convert_error(&err, output, quiet);
        process::exit(1);
    }
    info!(
        file = %file.display(),
        entries = compiled.evaluation.entries.len(),
        "converted"
    );

    let rendered = match config.output.format {
        EmitFormat::Xml => {
            to_xml(&compiled.document, &config.output.render_options()).map_err(|e| e.to_string())
        }
        EmitFormat::Json => {
            to_json(&compiled.evaluation.entries, config.output.indent > 0)
                .map_err(|e| e.to_string())
        }
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}
