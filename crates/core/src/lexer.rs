use crate::error::SyntaxError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Identifiers and keywords (`set`, `pow`); the parser tells them apart
    Word(String),
    /// Hexadecimal literal exactly as written, prefix included
    Hex(String),
    // Punctuation
    LBrace,
    RBrace,
    DictOpen, // $[
    RBracket,
    LParen,
    RParen,
    Colon,
    Semi,
    Comma,
    Eq,
    // Arithmetic operators
    Plus,
    Minus,
    Star,
    // End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "identifier '{}'", w),
            Token::Hex(h) => write!(f, "hex literal '{}'", h),
            Token::LBrace => f.write_str("'{'"),
            Token::RBrace => f.write_str("'}'"),
            Token::DictOpen => f.write_str("'$['"),
            Token::RBracket => f.write_str("']'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::Colon => f.write_str("':'"),
            Token::Semi => f.write_str("';'"),
            Token::Comma => f.write_str("','"),
            Token::Eq => f.write_str("'='"),
            Token::Plus => f.write_str("'+'"),
            Token::Minus => f.write_str("'-'"),
            Token::Star => f.write_str("'*'"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub line: u32,
    pub column: u32,
}

pub fn lex(src: &str) -> Result<Vec<Spanned>, SyntaxError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut pos = 0usize;
    let mut line: u32 = 1;
    let mut line_start = 0usize;

    let at = |pos: usize, off: usize| chars.get(pos + off).copied();

    while pos < chars.len() {
        let c = chars[pos];
        let column = (pos - line_start + 1) as u32;

        // Block comment: --[[ ... ]] (shortest match)
        if c == '-' && at(pos, 1) == Some('-') && at(pos, 2) == Some('[') && at(pos, 3) == Some('[')
        {
            let (open_line, open_column) = (line, column);
            pos += 4;
            loop {
                if pos >= chars.len() {
                    return Err(SyntaxError::at(
                        src,
                        open_line,
                        open_column,
                        "unterminated comment",
                    ));
                }
                if chars[pos] == '\n' {
                    line += 1;
                    line_start = pos + 1;
                }
                if chars[pos] == ']' && at(pos, 1) == Some(']') {
                    pos += 2;
                    break;
                }
                pos += 1;
            }
            continue;
        }

        // Whitespace
        if c.is_whitespace() {
            if c == '\n' {
                line += 1;
                line_start = pos + 1;
            }
            pos += 1;
            continue;
        }

        // Number: only 0x / 0X hexadecimal literals exist
        if c.is_ascii_digit() {
            let start = pos;
            let is_hex = c == '0'
                && matches!(at(pos, 1), Some('x' | 'X'))
                && at(pos, 2).is_some_and(|d| d.is_ascii_hexdigit());
            if is_hex {
                pos += 2;
                while pos < chars.len() && chars[pos].is_ascii_hexdigit() {
                    pos += 1;
                }
                tokens.push(Spanned {
                    token: Token::Hex(chars[start..pos].iter().collect()),
                    line,
                    column,
                });
                continue;
            }
            while pos < chars.len() && (chars[pos].is_ascii_alphanumeric() || chars[pos] == '_') {
                pos += 1;
            }
            let text: String = chars[start..pos].iter().collect();
            return Err(SyntaxError::at(
                src,
                line,
                column,
                format!(
                    "invalid number literal '{}': only hexadecimal literals such as 0x1F are allowed",
                    text
                ),
            ));
        }

        // Identifier / keyword
        if c.is_ascii_alphabetic() || c == '_' {
            let start = pos;
            while pos < chars.len() && (chars[pos].is_ascii_alphanumeric() || chars[pos] == '_') {
                pos += 1;
            }
            tokens.push(Spanned {
                token: Token::Word(chars[start..pos].iter().collect()),
                line,
                column,
            });
            continue;
        }

        let token = match c {
            '$' if at(pos, 1) == Some('[') => {
                pos += 1;
                Token::DictOpen
            }
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            ']' => Token::RBracket,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ':' => Token::Colon,
            ';' => Token::Semi,
            ',' => Token::Comma,
            '=' => Token::Eq,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            _ => {
                return Err(SyntaxError::at(
                    src,
                    line,
                    column,
                    format!("unexpected character '{}'", c),
                ));
            }
        };
        pos += 1;
        tokens.push(Spanned {
            token,
            line,
            column,
        });
    }

    tokens.push(Spanned {
        token: Token::Eof,
        line,
        column: (pos - line_start + 1) as u32,
    });
    Ok(tokens)
}
