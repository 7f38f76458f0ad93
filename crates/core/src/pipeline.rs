//! Three-stage pipeline: text -> parse tree -> value tree -> document.
//!
//! This is a thin orchestrator over the stage modules. A syntax error stops
//! everything; semantic errors still yield a fully formed document, which is
//! only considered valid when the error list is empty.

use crate::ast::RawStatement;
use crate::document::{self, Document};
use crate::error::{ConvertError, SyntaxError};
use crate::evaluate::{self, Evaluation};
use crate::lexer;
use crate::parser;
use tracing::debug;

/// Output of a pipeline run that got past recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub evaluation: Evaluation,
    pub document: Document,
}

impl Compiled {
    pub fn is_clean(&self) -> bool {
        self.evaluation.is_clean()
    }

    /// The document, or every semantic error if there were any.
    pub fn into_result(self) -> Result<Document, ConvertError> {
        if self.evaluation.is_clean() {
            Ok(self.document)
        } else {
            Err(ConvertError::Semantic(self.evaluation.errors))
        }
    }
}

/// Recognize `src` into a parse tree.
pub fn parse_source(src: &str) -> Result<Vec<RawStatement>, SyntaxError> {
    let tokens = lexer::lex(src)?;
    debug!(tokens = tokens.len(), "lexed source");
    let statements = parser::parse(&tokens, src)?;
    debug!(statements = statements.len(), "parsed source");
    Ok(statements)
}

/// Run all three stages, keeping semantic errors alongside the document.
pub fn compile(src: &str) -> Result<Compiled, SyntaxError> {
    let statements = parse_source(src)?;
    let evaluation = evaluate::evaluate(&statements);
    let document = document::serialize(&evaluation.entries);
    Ok(Compiled {
        evaluation,
        document,
    })
}

/// Run all three stages and accept only an error-free result.
pub fn convert(src: &str) -> Result<Document, ConvertError> {
    compile(src)?.into_result()
}
