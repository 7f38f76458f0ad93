//! Recursive-descent recognizer for hexconf sources.
//! One token of lookahead, no backtracking; the first violation aborts with
//! a single `SyntaxError`. No evaluation happens here.

use crate::ast::RawStatement;
use crate::error::SyntaxError;
use crate::lexer::{Spanned, Token};

mod values;

/// Deepest allowed nesting of arrays, dicts and prefix expressions.
pub const MAX_NESTING_DEPTH: usize = 256;

pub use crate::ast::{Operator, RawDictEntry, RawValue};

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    src: &'a str,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned], src: &'a str) -> Self {
        Parser {
            tokens,
            pos: 0,
            src,
            depth: 0,
        }
    }

    fn cur(&self) -> &Spanned {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.cur().token
    }

    fn cur_line(&self) -> u32 {
        self.cur().line
    }

    fn advance(&mut self) -> &Spanned {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn err(&self, msg: impl Into<String>) -> SyntaxError {
        let cur = self.cur();
        SyntaxError::at(self.src, cur.line, cur.column, msg)
    }

    fn expect(&mut self, expected: Token) -> Result<(), SyntaxError> {
        if self.peek() == &expected {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected {}, got {}", expected, self.peek())))
        }
    }

    fn is_word(&self, w: &str) -> bool {
        matches!(self.peek(), Token::Word(x) if x == w)
    }

    fn take_word(&mut self) -> Result<String, SyntaxError> {
        if let Token::Word(w) = self.peek().clone() {
            self.advance();
            Ok(w)
        } else {
            Err(self.err(format!("expected identifier, got {}", self.peek())))
        }
    }

    // -- Statements ----------------------------------------------

    fn parse_file(&mut self) -> Result<Vec<RawStatement>, SyntaxError> {
        let mut statements = Vec::new();
        while self.peek() != &Token::Eof {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<RawStatement, SyntaxError> {
        let line = self.cur_line();
        if self.is_word("set") {
            self.advance();
            let name = self.take_word()?;
            self.expect(Token::Eq)?;
            let value = self.parse_value()?;
            self.expect(Token::Semi)?;
            return Ok(RawStatement::SetDeclaration { name, value, line });
        }
        match self.peek() {
            Token::Word(_) => {
                let key = self.take_word()?;
                self.expect(Token::Colon)?;
                let value = self.parse_value()?;
                self.expect(Token::Semi)?;
                Ok(RawStatement::DictEntry { key, value, line })
            }
            other => Err(self.err(format!("expected statement, got {}", other))),
        }
    }
}

pub fn parse(tokens: &[Spanned], src: &str) -> Result<Vec<RawStatement>, SyntaxError> {
    // No tokens at all, not even Eof: nothing to recognize.
    if tokens.is_empty() {
        return Ok(Vec::new());
    }
    let mut p = Parser::new(tokens, src);
    p.parse_file()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
