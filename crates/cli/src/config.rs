//! Settings file format for the `hexconf` driver.
//!
//! Loaded from the TOML file passed via `hexconf --config hexconf.toml`.
//! Every section and field is optional; command-line flags win over file
//! values.
//!
//! # Example
//!
//! ```toml
//! [output]
//! format = "xml"
//! indent = 4
//! declaration = false
//!
//! [diagnostics]
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use hexconf_core::RenderOptions;
use serde::{Deserialize, Serialize};

// ── Types ─────────────────────────────────────────────────────────────────────

/// Format for diagnostics and other CLI responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Format of the converted document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum EmitFormat {
    #[default]
    Xml,
    Json,
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub output: OutputSettings,
    pub diagnostics: DiagnosticsSettings,
}

/// `[output]` section: how converted documents are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct OutputSettings {
    pub format: EmitFormat,
    /// Spaces per nesting level; 0 writes a single line.
    pub indent: usize,
    /// Emit the `<?xml ...?>` header (XML only).
    pub declaration: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        let render = RenderOptions::default();
        OutputSettings {
            format: EmitFormat::Xml,
            indent: render.indent,
            declaration: render.declaration,
        }
    }
}

impl OutputSettings {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            indent: self.indent,
            declaration: self.declaration,
        }
    }
}

/// `[diagnostics]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DiagnosticsSettings {
    pub format: OutputFormat,
}

/// Command-line values that take precedence over the settings file.
#[derive(Debug, Clone, Default)]
pub(crate) struct Overrides {
    pub diagnostics: Option<OutputFormat>,
    pub emit: Option<EmitFormat>,
    pub indent: Option<usize>,
    pub no_declaration: bool,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Settings file (if any) with command-line overrides applied on top.
    pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        config.apply(overrides);
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(format) = overrides.diagnostics {
            self.diagnostics.format = format;
        }
        if let Some(emit) = overrides.emit {
            self.output.format = emit;
        }
        if let Some(indent) = overrides.indent {
            self.output.indent = indent;
        }
        if overrides.no_declaration {
            self.output.declaration = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output.indent, 2);
        assert!(config.output.declaration);
        assert_eq!(config.output.format, EmitFormat::Xml);
        assert_eq!(config.diagnostics.format, OutputFormat::Text);
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let config = Config::from_toml("[output]\nindent = 4\n").unwrap();
        assert_eq!(config.output.indent, 4);
        assert!(config.output.declaration);
    }

    #[test]
    fn full_file_parses() {
        let config = Config::from_toml(
            r#"
[output]
format = "json"
indent = 0
declaration = false

[diagnostics]
format = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.output.format, EmitFormat::Json);
        assert_eq!(config.output.indent, 0);
        assert!(!config.output.declaration);
        assert_eq!(config.diagnostics.format, OutputFormat::Json);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml("[output]\ncolour = true\n").is_err());
        assert!(Config::from_toml("[output]\nformat = \"yaml\"\n").is_err());
    }

    #[test]
    fn overrides_win_over_file_values() {
        let mut config = Config::from_toml("[output]\nindent = 8\nformat = \"json\"\n").unwrap();
        config.apply(&Overrides {
            diagnostics: Some(OutputFormat::Json),
            emit: Some(EmitFormat::Xml),
            indent: Some(1),
            no_declaration: true,
        });
        assert_eq!(config.output.format, EmitFormat::Xml);
        assert_eq!(config.output.indent, 1);
        assert!(!config.output.declaration);
        assert_eq!(config.diagnostics.format, OutputFormat::Json);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Path::new("/no/such/hexconf.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("cannot read config file"));
    }
}
