//! Parse tree types for hexconf sources.
//!
//! Produced by the parser and consumed once by the evaluator. Nodes carry
//! the 1-based line where they start so that evaluation diagnostics can be
//! attributed to source positions.

use std::fmt;

// ──────────────────────────────────────────────
// Operators
// ──────────────────────────────────────────────

/// The fixed operator set of prefix expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Pow,
}

impl Operator {
    /// The operator as written in source.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Pow => "pow",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ──────────────────────────────────────────────
// Values
// ──────────────────────────────────────────────

/// A value node as it appears in the DSL, before evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Hex literal text, `0x` prefix included.
    Number { literal: String, line: u32 },
    Array { items: Vec<RawValue>, line: u32 },
    Dict { entries: Vec<RawDictEntry>, line: u32 },
    ConstantRef { name: String, line: u32 },
    PrefixExpr {
        op: Operator,
        operands: Vec<RawValue>,
        line: u32,
    },
}

/// One `key: value` pair inside `$[ ... ]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDictEntry {
    pub key: String,
    pub value: RawValue,
    pub line: u32,
}

// ──────────────────────────────────────────────
// Statements
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawStatement {
    /// `set NAME = value ;`
    SetDeclaration {
        name: String,
        value: RawValue,
        line: u32,
    },
    /// `KEY : value ;`
    DictEntry {
        key: String,
        value: RawValue,
        line: u32,
    },
}

