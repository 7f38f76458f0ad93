//! Evaluation: constant binding, constant dereferencing and prefix
//! arithmetic over the parse tree, producing the resolved value tree.
//!
//! Statements are processed strictly in source order. A `set` binding is
//! visible only to statements after it. Failures never abort evaluation:
//! each one is recorded in the [`Diagnostics`] accumulator and the null
//! sentinel takes the place of the failed value, so sibling values are
//! unaffected.

use crate::ast::{Operator, RawStatement, RawValue};
use crate::error::SemanticError;
use crate::value::{Dict, Value};
use std::collections::BTreeMap;
use tracing::{debug, trace};

// ──────────────────────────────────────────────
// Constant table
// ──────────────────────────────────────────────

/// Bindings made by `set` declarations during one evaluation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantTable {
    bindings: BTreeMap<String, Value>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, silently replacing any earlier binding.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.bindings.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ──────────────────────────────────────────────
// Diagnostics accumulator
// ──────────────────────────────────────────────

/// Ordered collection of non-fatal evaluation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    errors: Vec<SemanticError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: SemanticError) {
        debug!(line = ?error.line, message = %error.message, "semantic error");
        self.errors.push(error);
    }

    pub fn into_vec(self) -> Vec<SemanticError> {
        self.errors
    }
}

// ──────────────────────────────────────────────
// Evaluation
// ──────────────────────────────────────────────

/// Everything one evaluation run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Top-level `KEY : value ;` entries in source order.
    pub entries: Dict,
    /// The constant table as it stands after the last statement.
    pub constants: ConstantTable,
    pub errors: Vec<SemanticError>,
}

impl Evaluation {
    /// True when no semantic error was recorded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn evaluate(statements: &[RawStatement]) -> Evaluation {
    let mut constants = ConstantTable::new();
    let mut diagnostics = Diagnostics::new();
    let mut entries = Dict::new();

    for stmt in statements {
        match stmt {
            RawStatement::SetDeclaration { name, value, line } => {
                let resolved = eval_value(value, &constants, &mut diagnostics);
                trace!(name = %name, line, kind = resolved.kind(), "bind constant");
                constants.bind(name.as_str(), resolved);
            }
            RawStatement::DictEntry { key, value, .. } => {
                let resolved = eval_value(value, &constants, &mut diagnostics);
                entries.insert(key.as_str(), resolved);
            }
        }
    }

    let errors = diagnostics.into_vec();
    debug!(
        entries = entries.len(),
        constants = constants.len(),
        errors = errors.len(),
        "evaluation finished"
    );
    Evaluation {
        entries,
        constants,
        errors,
    }
}

/// Resolve one value node against the current constant table.
pub fn eval_value(
    node: &RawValue,
    constants: &ConstantTable,
    diagnostics: &mut Diagnostics,
) -> Value {
    match node {
        RawValue::Number { literal, line } => match parse_hex(literal) {
            Some(n) => Value::Integer(n),
            None => {
                diagnostics.push(SemanticError::literal_out_of_range(literal, *line));
                Value::Null
            }
        },
        RawValue::Array { items, .. } => Value::Array(
            items
                .iter()
                .map(|item| eval_value(item, constants, diagnostics))
                .collect(),
        ),
        RawValue::Dict { entries, .. } => {
            let mut dict = Dict::new();
            for entry in entries {
                let resolved = eval_value(&entry.value, constants, diagnostics);
                dict.insert(entry.key.as_str(), resolved);
            }
            Value::Dict(dict)
        }
        RawValue::ConstantRef { name, line } => match constants.get(name) {
            Some(v) => v.clone(),
            None => {
                diagnostics.push(SemanticError::undefined_constant(name, *line));
                Value::Null
            }
        },
        RawValue::PrefixExpr { op, operands, line } => {
            eval_prefix(*op, operands, *line, constants, diagnostics)
        }
    }
}

fn eval_prefix(
    op: Operator,
    operands: &[RawValue],
    line: u32,
    constants: &ConstantTable,
    diagnostics: &mut Diagnostics,
) -> Value {
    let mut ints = Vec::with_capacity(operands.len());
    let mut unresolved = false;
    for operand in operands {
        match eval_value(operand, constants, diagnostics) {
            Value::Integer(n) => ints.push(n),
            // Already reported where it failed to resolve.
            Value::Null => unresolved = true,
            other => {
                diagnostics.push(SemanticError::operand_kind(op.symbol(), other.kind(), line));
                unresolved = true;
            }
        }
    }

    if let Some(e) = check_arity(op, operands.len(), line) {
        diagnostics.push(e);
        return Value::Null;
    }
    if unresolved {
        return Value::Null;
    }
    match apply(op, &ints, line) {
        Ok(n) => Value::Integer(n),
        Err(e) => {
            diagnostics.push(e);
            Value::Null
        }
    }
}

/// Hex literal (`0x`/`0X` prefix) to a signed integer, or `None` when the
/// magnitude does not fit.
fn parse_hex(literal: &str) -> Option<i64> {
    let digits = literal.get(2..)?;
    let magnitude = u64::from_str_radix(digits, 16).ok()?;
    i64::try_from(magnitude).ok()
}

fn check_arity(op: Operator, count: usize, line: u32) -> Option<SemanticError> {
    match op {
        Operator::Pow if count != 2 => Some(SemanticError::arity(op.symbol(), 2, count, line)),
        _ => None,
    }
}

/// Checked integer arithmetic for one operator over resolved operands.
pub fn apply(op: Operator, operands: &[i64], line: u32) -> Result<i64, SemanticError> {
    let overflow = || SemanticError::overflow(op.symbol(), line);
    match op {
        Operator::Add => operands
            .iter()
            .try_fold(0i64, |acc, n| acc.checked_add(*n))
            .ok_or_else(overflow),
        Operator::Sub => match operands {
            [only] => only.checked_neg().ok_or_else(overflow),
            [first, rest @ ..] => rest
                .iter()
                .try_fold(0i64, |acc, n| acc.checked_add(*n))
                .and_then(|sum| first.checked_sub(sum))
                .ok_or_else(overflow),
            [] => Err(SemanticError::arity(op.symbol(), 1, 0, line)),
        },
        Operator::Mul => operands
            .iter()
            .try_fold(1i64, |acc, n| acc.checked_mul(*n))
            .ok_or_else(overflow),
        Operator::Pow => match operands {
            [base, exponent] => power(*base, *exponent, line),
            _ => Err(SemanticError::arity(op.symbol(), 2, operands.len(), line)),
        },
    }
}

fn power(base: i64, exponent: i64, line: u32) -> Result<i64, SemanticError> {
    if exponent < 0 {
        return Err(SemanticError::negative_exponent(exponent, line));
    }
    match u32::try_from(exponent) {
        Ok(e) => base
            .checked_pow(e)
            .ok_or_else(|| SemanticError::overflow("pow", line)),
        // Only bases with magnitude <= 1 survive an exponent this large.
        Err(_) => match base {
            0 => Ok(0),
            1 => Ok(1),
            -1 => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
            _ => Err(SemanticError::overflow("pow", line)),
        },
    }
}
