use serde::{Deserialize, Serialize};

/// A recognition failure. Aborts the pipeline; no parse tree is produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
#[error("{message} at line {line}, column {column}\n{excerpt}")]
pub struct SyntaxError {
    pub line: u32,
    pub column: u32,
    pub message: String,
    /// The offending source line followed by a caret under the column.
    #[serde(default, skip_serializing)]
    pub excerpt: String,
}

impl SyntaxError {
    /// Build an error at `line`/`column` (both 1-based) and cut the excerpt
    /// out of `src`.
    pub fn at(src: &str, line: u32, column: u32, message: impl Into<String>) -> Self {
        let text = src
            .lines()
            .nth(line.saturating_sub(1) as usize)
            .unwrap_or_default();
        let pad = " ".repeat(column.saturating_sub(1) as usize);
        SyntaxError {
            line,
            column,
            message: message.into(),
            excerpt: format!("{}\n{}^", text, pad),
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "kind":    "syntax",
            "line":    self.line,
            "column":  self.column,
            "message": self.message,
        })
    }
}

/// A non-fatal evaluation failure. The evaluator records it, substitutes the
/// null sentinel at the failure point, and keeps going.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SemanticError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl SemanticError {
    pub fn new(line: Option<u32>, message: impl Into<String>) -> Self {
        SemanticError {
            message: message.into(),
            line,
        }
    }

    pub fn undefined_constant(name: &str, line: u32) -> Self {
        SemanticError::new(
            Some(line),
            format!("Undefined constant '{}' at line {}", name, line),
        )
    }

    pub fn literal_out_of_range(literal: &str, line: u32) -> Self {
        SemanticError::new(
            Some(line),
            format!(
                "Hex literal '{}' at line {} does not fit in a 64-bit signed integer",
                literal, line
            ),
        )
    }

    pub fn operand_kind(op: &str, found: &str, line: u32) -> Self {
        SemanticError::new(
            Some(line),
            format!(
                "Operator '{}' at line {} expects integer operands, found {}",
                op, line, found
            ),
        )
    }

    pub fn arity(op: &str, expected: usize, found: usize, line: u32) -> Self {
        SemanticError::new(
            Some(line),
            format!(
                "Operator '{}' at line {} expects exactly {} operands, found {}",
                op, line, expected, found
            ),
        )
    }

    pub fn negative_exponent(exponent: i64, line: u32) -> Self {
        SemanticError::new(
            Some(line),
            format!("Negative exponent {} in 'pow' at line {}", exponent, line),
        )
    }

    pub fn overflow(op: &str, line: u32) -> Self {
        SemanticError::new(
            Some(line),
            format!("Integer overflow in '{}' expression at line {}", op, line),
        )
    }

    /// Serialize with every field present (null for a missing line).
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "kind":    "semantic",
            "line":    self.line,
            "message": self.message,
        })
    }
}

/// Why a source text could not be turned into a valid document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("{} semantic error(s)", .0.len())]
    Semantic(Vec<SemanticError>),
}

impl ConvertError {
    /// One human-readable message per underlying error, in report order.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ConvertError::Syntax(e) => vec![e.to_string()],
            ConvertError::Semantic(errors) => errors.iter().map(ToString::to_string).collect(),
        }
    }

    /// JSON array of error objects, the format of `*.expected-error.json`.
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            ConvertError::Syntax(e) => serde_json::Value::Array(vec![e.to_json_value()]),
            ConvertError::Semantic(errors) => {
                serde_json::Value::Array(errors.iter().map(SemanticError::to_json_value).collect())
            }
        }
    }
}

/// Failure while writing a document out as text.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write XML: {0}")]
    Xml(String),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rendered document is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
