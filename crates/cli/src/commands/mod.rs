pub(crate) mod check;
pub(crate) mod convert;

use std::path::Path;
use std::process;

use hexconf_core::{ConvertError, FileSystemProvider, SourceProvider};

use crate::config::OutputFormat;
use crate::report_error;

/// Read a source file or report the failure and exit.
pub(crate) fn read_source_or_exit(file: &Path, output: OutputFormat, quiet: bool) -> String {
    match FileSystemProvider.read_source(file) {
        Ok(src) => src,
        Err(e) => {
            let msg = format!("cannot read '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

/// Print every error of a failed conversion.
///
/// Text mode writes one `Error: <message>` line per error and honors
/// `--quiet`; JSON mode always writes the error array.
pub(crate) fn report_convert_error(err: &ConvertError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => eprintln!("{}", convert_error_json(err)),
        OutputFormat::Text => {
            if !quiet {
                for message in err.messages() {
                    eprintln!("Error: {}", message);
                }
            }
        }
    }
}

fn convert_error_json(err: &ConvertError) -> String {
    serde_json::to_string_pretty(&err.to_json_value())
        .unwrap_or_else(|_| serde_json::json!({ "error": err.to_string() }).to_string())
}
