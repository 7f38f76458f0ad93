#![allow(clippy::result_large_err)]
//! hexconf-core: compiler core for the hexconf configuration language.
//!
//! Turns `.hconf` source text into an XML document in three stages:
//! recognition (lexer + parser), evaluation (constants and prefix
//! arithmetic) and serialization (value tree -> document tree).
//!
//! # Public API
//!
//! - [`compile()`] -- run the pipeline, keeping semantic errors next to the
//!   best-effort document
//! - [`convert()`] -- run the pipeline, failing on any error
//! - [`to_xml()`] / [`to_json()`] -- text renderings
//! - [`Value`], [`Dict`], [`Document`] -- the value and document trees
//! - [`SyntaxError`], [`SemanticError`], [`ConvertError`] -- diagnostics

pub mod ast;
pub mod document;
pub mod error;
pub mod evaluate;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod value;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{Operator, RawDictEntry, RawStatement, RawValue};
pub use document::{Content, Document, Element, Tag, NULL_TEXT};
pub use error::{ConvertError, RenderError, SemanticError, SyntaxError};
pub use evaluate::{ConstantTable, Diagnostics, Evaluation};
pub use render::RenderOptions;
pub use source::{FileSystemProvider, InMemoryProvider, SourceProvider};
pub use value::{Dict, Value};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use evaluate::evaluate;
pub use pipeline::{compile, convert, parse_source, Compiled};
pub use render::{to_json, to_xml};
