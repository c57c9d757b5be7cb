//! Recursive-descent JSON parser.
//!
//! The parser is total: every input either yields a [`Value`] or a
//! [`JsonError`] naming what was expected and where. Recursion is capped at
//! [`MAX_DEPTH`] nested containers so hostile input cannot exhaust the stack.

use thiserror::Error;

use super::{Array, Object, Value};

/// Maximum nesting of arrays/objects accepted by [`parse`].
pub const MAX_DEPTH: usize = 128;

/// Errors produced by [`parse`]. Offsets are byte offsets into the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonError {
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },

    #[error("expected '\"' at beginning of string at offset {offset}")]
    ExpectedString { offset: usize },

    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("expected escape character after '\\' at offset {offset}")]
    BadEscape { offset: usize },

    #[error("expected number at offset {offset}")]
    ExpectedNumber { offset: usize },

    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("expected ':' after key in object at offset {offset}")]
    ExpectedColon { offset: usize },

    #[error("expected ',' or '}}' in object at offset {offset}")]
    ExpectedObjectSeparator { offset: usize },

    #[error("expected ',' or ']' in array at offset {offset}")]
    ExpectedArraySeparator { offset: usize },

    #[error("expected literal '{literal}' at offset {offset}")]
    BadLiteral {
        literal: &'static str,
        offset: usize,
    },

    #[error("expected a JSON value at offset {offset}")]
    InvalidValue { offset: usize },

    #[error("nesting deeper than {max} levels at offset {offset}")]
    TooDeep { max: usize, offset: usize },

    #[error("extra data after valid JSON at offset {offset}")]
    TrailingData { offset: usize },
}

/// Parse `text` into a [`Value`]. Trailing non-whitespace is an error.
pub fn parse(text: &str) -> Result<Value, JsonError> {
    let mut lexer = Lexer::new(text);
    let value = lexer.parse_value(0)?;
    lexer.skip_ws();
    if !lexer.at_end() {
        return Err(JsonError::TrailingData { offset: lexer.pos });
    }
    Ok(value)
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek() {
            self.pos += 1;
        }
    }

    /// Skip whitespace and consume `c` if it is next.
    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, JsonError> {
        self.skip_ws();
        let Some(c) = self.peek() else {
            return Err(JsonError::UnexpectedEnd { offset: self.pos });
        };
        match c {
            '{' => self.parse_object(depth + 1),
            '[' => self.parse_array(depth + 1),
            '"' => self.parse_string().map(Value::String),
            '0'..='9' | '-' | '+' => self.parse_number().map(Value::Number),
            't' => self.parse_literal("true").map(|_| Value::Bool(true)),
            'f' => self.parse_literal("false").map(|_| Value::Bool(false)),
            'n' => self.parse_literal("null").map(|_| Value::Null),
            _ => Err(JsonError::InvalidValue { offset: self.pos }),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), JsonError> {
        if depth > MAX_DEPTH {
            return Err(JsonError::TooDeep {
                max: MAX_DEPTH,
                offset: self.pos,
            });
        }
        Ok(())
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value, JsonError> {
        self.check_depth(depth)?;
        // caller saw '{'
        self.pos += 1;
        let mut fields = Object::new();
        if self.eat('}') {
            return Ok(Value::Object(fields));
        }
        loop {
            let key = self.parse_string()?;
            if !self.eat(':') {
                return Err(JsonError::ExpectedColon { offset: self.pos });
            }
            let value = self.parse_value(depth)?;
            fields.entry(key).or_insert(value);
            if self.eat('}') {
                return Ok(Value::Object(fields));
            }
            if !self.eat(',') {
                return Err(if self.at_end() {
                    JsonError::UnexpectedEnd { offset: self.pos }
                } else {
                    JsonError::ExpectedObjectSeparator { offset: self.pos }
                });
            }
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value, JsonError> {
        self.check_depth(depth)?;
        self.pos += 1;
        let mut items = Array::new();
        if self.eat(']') {
            return Ok(Value::Array(items));
        }
        loop {
            items.push(self.parse_value(depth)?);
            if self.eat(']') {
                return Ok(Value::Array(items));
            }
            if !self.eat(',') {
                return Err(if self.at_end() {
                    JsonError::UnexpectedEnd { offset: self.pos }
                } else {
                    JsonError::ExpectedArraySeparator { offset: self.pos }
                });
            }
        }
    }

    fn parse_string(&mut self) -> Result<String, JsonError> {
        self.skip_ws();
        let start = self.pos;
        if self.peek() != Some('"') {
            return Err(JsonError::ExpectedString { offset: start });
        }
        self.pos += 1;
        let mut out = String::new();
        while let Some(c) = self.bump() {
            match c {
                '"' => return Ok(out),
                '\\' => {
                    let Some(e) = self.bump() else {
                        return Err(JsonError::BadEscape { offset: self.pos });
                    };
                    match e {
                        'b' => out.push('\u{8}'),
                        'f' => out.push('\u{c}'),
                        'n' => out.push('\n'),
                        'r' => out.push('\r'),
                        't' => out.push('\t'),
                        'u' => {
                            // manifests are ASCII; the code point is not decoded
                            for _ in 0..4 {
                                if self.bump().is_none() {
                                    break;
                                }
                            }
                            out.push('?');
                        }
                        other => out.push(other),
                    }
                }
                other => out.push(other),
            }
        }
        Err(JsonError::UnterminatedString { offset: start })
    }

    fn parse_number(&mut self) -> Result<f64, JsonError> {
        self.skip_ws();
        let start = self.pos;
        let bytes = self.src.as_bytes();
        let digits = |pos: &mut usize| {
            while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
                *pos += 1;
            }
        };
        let mut pos = self.pos;
        if pos < bytes.len() && matches!(bytes[pos], b'-' | b'+') {
            pos += 1;
        }
        digits(&mut pos);
        if pos < bytes.len() && bytes[pos] == b'.' {
            pos += 1;
            digits(&mut pos);
        }
        if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
            pos += 1;
            if pos < bytes.len() && matches!(bytes[pos], b'-' | b'+') {
                pos += 1;
            }
            digits(&mut pos);
        }
        if pos == start {
            return Err(JsonError::ExpectedNumber { offset: start });
        }
        self.pos = pos;
        let text = &self.src[start..pos];
        text.parse::<f64>().map_err(|_| JsonError::InvalidNumber {
            text: text.to_string(),
            offset: start,
        })
    }

    fn parse_literal(&mut self, literal: &'static str) -> Result<(), JsonError> {
        if self.src[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(())
        } else {
            Err(JsonError::BadLiteral {
                literal,
                offset: self.pos,
            })
        }
    }
}
