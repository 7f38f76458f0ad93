mod commands;
mod config;
mod logging;
mod runner;
mod tap;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::{Config, EmitFormat, OutputFormat, Overrides};

/// hexconf configuration language toolchain.
#[derive(Parser)]
#[command(
    name = "hexconf",
    version,
    about = "Convert hexconf configuration files to XML"
)]
struct Cli {
    /// Diagnostic format (text or json); overrides the config file
    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a hexconf.toml settings file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a .hconf file and print the resulting document
    Convert {
        /// Path to the .hconf source file
        file: PathBuf,
        /// Document format to print
        #[arg(long, value_enum)]
        emit: Option<EmitFormat>,
        /// Spaces per nesting level (0 prints a single line)
        #[arg(long)]
        indent: Option<usize>,
        /// Omit the <?xml ...?> declaration
        #[arg(long)]
        no_declaration: bool,
    },

    /// Check a .hconf file for errors without printing the document
    Check {
        /// Path to the .hconf source file
        file: PathBuf,
    },

    /// Run the conformance suite
    Test {
        /// Path to the conformance suite directory
        #[arg(default_value = "conformance")]
        suite_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut overrides = Overrides {
        diagnostics: cli.output,
        ..Overrides::default()
    };
    if let Commands::Convert {
        emit,
        indent,
        no_declaration,
        ..
    } = &cli.command
    {
        overrides.emit = *emit;
        overrides.indent = *indent;
        overrides.no_declaration = *no_declaration;
    }

    let config = match Config::resolve(cli.config.as_deref(), &overrides) {
        Ok(c) => c,
        Err(e) => {
            let output = cli.output.unwrap_or_default();
            report_error(&e.to_string(), output, cli.quiet);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Convert { file, .. } => {
            commands::convert::cmd_convert(&file, &config, cli.quiet);
        }
        Commands::Check { file } => {
            commands::check::cmd_check(&file, &config, cli.quiet);
        }
        Commands::Test { suite_dir } => {
            commands::test::cmd_test(&suite_dir, cli.quiet);
        }
    }
}

/// Print a single driver-level error in the selected diagnostic format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("Error: {}", msg),
        OutputFormat::Json => {
            let value = serde_json::json!([{ "kind": "driver", "message": msg }]);
            let text = serde_json::to_string_pretty(&value).unwrap_or_default();
            eprintln!("{}", text);
        }
    }
}
