use super::{Parser, MAX_NESTING_DEPTH};
use crate::ast::{Operator, RawDictEntry, RawValue};
use crate::error::SyntaxError;
use crate::lexer::Token;

impl<'a> Parser<'a> {
    pub(super) fn parse_value(&mut self) -> Result<RawValue, SyntaxError> {
        let line = self.cur_line();
        match self.peek().clone() {
            Token::Hex(literal) => {
                self.advance();
                Ok(RawValue::Number { literal, line })
            }
            Token::Word(name) => {
                self.advance();
                Ok(RawValue::ConstantRef { name, line })
            }
            Token::LBrace => self.nested(|p| p.parse_array(line)),
            Token::DictOpen => self.nested(|p| p.parse_dict(line)),
            Token::LParen => self.nested(|p| p.parse_prefix_expr(line)),
            other => Err(self.err(format!("expected value, got {}", other))),
        }
    }

    // Recursion guard; the error points at the opening token.
    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<RawValue, SyntaxError>,
    ) -> Result<RawValue, SyntaxError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.err(format!(
                "nesting too deep (more than {} levels)",
                MAX_NESTING_DEPTH
            )));
        }
        self.depth += 1;
        let node = parse(self);
        self.depth -= 1;
        node
    }

    // { value (, value)* }
    fn parse_array(&mut self, line: u32) -> Result<RawValue, SyntaxError> {
        self.advance();
        let mut items = Vec::new();
        if self.peek() != &Token::RBrace {
            loop {
                items.push(self.parse_value()?);
                if self.peek() == &Token::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(Token::RBrace)?;
        Ok(RawValue::Array { items, line })
    }

    // $[ IDENT : value (, IDENT : value)* ]
    fn parse_dict(&mut self, line: u32) -> Result<RawValue, SyntaxError> {
        self.advance();
        let mut entries = Vec::new();
        if self.peek() != &Token::RBracket {
            loop {
                let entry_line = self.cur_line();
                let key = self.take_word()?;
                self.expect(Token::Colon)?;
                let value = self.parse_value()?;
                entries.push(RawDictEntry {
                    key,
                    value,
                    line: entry_line,
                });
                if self.peek() == &Token::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(Token::RBracket)?;
        Ok(RawValue::Dict { entries, line })
    }

    // ( OPERATOR value value* )
    fn parse_prefix_expr(&mut self, line: u32) -> Result<RawValue, SyntaxError> {
        self.advance();
        let op = match self.peek() {
            Token::Plus => Operator::Add,
            Token::Minus => Operator::Sub,
            Token::Star => Operator::Mul,
            Token::Word(w) if w == "pow" => Operator::Pow,
            other => {
                return Err(self.err(format!(
                    "expected operator ('+', '-', '*' or 'pow'), got {}",
                    other
                )))
            }
        };
        self.advance();
        if self.peek() == &Token::RParen {
            return Err(self.err(format!(
                "prefix expression '{}' requires at least one operand",
                op
            )));
        }
        let mut operands = Vec::new();
        while self.peek() != &Token::RParen {
            operands.push(self.parse_value()?);
        }
        self.expect(Token::RParen)?;
        Ok(RawValue::PrefixExpr { op, operands, line })
    }
}
