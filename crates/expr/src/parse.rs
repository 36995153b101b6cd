//! Formula parsing.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary | power)*     // `2x`, `3(x + 1)`
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?                   // right-associative
//! primary := number | constant | variable | function '(' sum ')' | '(' sum ')'
//! ```
//!
//! `**` is accepted as `^`, and the variable followed by `(` multiplies.
//! Since `^` binds tighter than a leading minus, `-x^2` parses as `-(x^2)`.

use thiserror::Error;

use crate::node::{Constant, Func, Node};

/// Errors that can occur when parsing a formula.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty formula")]
    Empty,

    #[error("unexpected character `{ch}` at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number `{text}` at position {pos}")]
    InvalidNumber { text: String, pos: usize },

    #[error("unknown identifier `{name}` at position {pos}")]
    UnknownIdentifier { name: String, pos: usize },

    #[error("unknown function `{name}` at position {pos}")]
    UnknownFunction { name: String, pos: usize },

    #[error("unexpected `{found}` at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of formula")]
    UnexpectedEnd,
}

/// Parses `text` as a formula over the variable `var`.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first problem found.
pub fn parse(text: &str, var: &str) -> Result<Node, ParseError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser {
        tokens,
        index: 0,
        var,
    };
    let node = parser.sum()?;

    match parser.peek() {
        None => Ok(node),
        Some((token, pos)) => Err(ParseError::UnexpectedToken {
            found: token.to_string(),
            pos,
        }),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{value}"),
            Token::Ident(name) => f.write_str(name),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::Caret => f.write_str("^"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let ch = chars[pos];
        let start = pos;

        let token = match ch {
            c if c.is_whitespace() => {
                pos += 1;
                continue;
            }
            '0'..='9' | '.' => {
                pos = scan_number(&chars, pos);
                let literal: String = chars[start..pos].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or(ParseError::InvalidNumber {
                        text: literal,
                        pos: start,
                    })?;
                tokens.push((Token::Number(value), start));
                continue;
            }
            c if c.is_alphabetic() || c == '_' => {
                while pos < chars.len() && (chars[pos].is_alphanumeric() || chars[pos] == '_') {
                    pos += 1;
                }
                let name: String = chars[start..pos].iter().collect();
                tokens.push((Token::Ident(name), start));
                continue;
            }
            '*' if chars.get(pos + 1) == Some(&'*') => {
                pos += 1;
                Token::Caret
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ch => return Err(ParseError::UnexpectedChar { ch, pos }),
        };

        pos += 1;
        tokens.push((token, start));
    }

    Ok(tokens)
}

/// Returns the end of the number literal starting at `pos`.
///
/// An `e` only starts an exponent when digits follow, so `2e` and `2exp(x)`
/// scan as the number `2` followed by an identifier.
fn scan_number(chars: &[char], mut pos: usize) -> usize {
    let digits = |chars: &[char], mut pos: usize| {
        while pos < chars.len() && chars[pos].is_ascii_digit() {
            pos += 1;
        }
        pos
    };

    pos = digits(chars, pos);
    if chars.get(pos) == Some(&'.') {
        pos = digits(chars, pos + 1);
    }

    if matches!(chars.get(pos).copied(), Some('e' | 'E')) {
        let mut exp = pos + 1;
        if matches!(chars.get(exp).copied(), Some('+' | '-')) {
            exp += 1;
        }
        if chars.get(exp).is_some_and(char::is_ascii_digit) {
            pos = digits(chars, exp);
        }
    }

    pos
}

struct Parser<'a> {
    tokens: Vec<(Token, usize)>,
    index: usize,
    var: &'a str,
}

impl Parser<'_> {
    fn peek(&self) -> Option<(&Token, usize)> {
        self.tokens.get(self.index).map(|(token, pos)| (token, *pos))
    }

    fn next(&mut self) -> Result<(Token, usize), ParseError> {
        let item = self
            .tokens
            .get(self.index)
            .cloned()
            .ok_or(ParseError::UnexpectedEnd)?;
        self.index += 1;
        Ok(item)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek().is_some_and(|(token, _)| token == expected) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn sum(&mut self) -> Result<Node, ParseError> {
        let mut node = self.product()?;
        loop {
            if self.eat(&Token::Plus) {
                node = Node::Add(Box::new(node), Box::new(self.product()?));
            } else if self.eat(&Token::Minus) {
                node = Node::Sub(Box::new(node), Box::new(self.product()?));
            } else {
                return Ok(node);
            }
        }
    }

    fn product(&mut self) -> Result<Node, ParseError> {
        let mut node = self.unary()?;
        loop {
            if self.eat(&Token::Star) {
                node = Node::Mul(Box::new(node), Box::new(self.unary()?));
            } else if self.eat(&Token::Slash) {
                node = Node::Div(Box::new(node), Box::new(self.unary()?));
            } else if matches!(self.peek(), Some((Token::Ident(_) | Token::LParen, _))) {
                node = Node::Mul(Box::new(node), Box::new(self.power()?));
            } else {
                return Ok(node);
            }
        }
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        if self.eat(&Token::Minus) {
            return Ok(Node::Neg(Box::new(self.unary()?)));
        }
        if self.eat(&Token::Plus) {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<Node, ParseError> {
        let base = self.primary()?;
        if self.eat(&Token::Caret) {
            let exponent = self.unary()?;
            return Ok(Node::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let (token, pos) = self.next()?;
        match token {
            Token::Number(value) => Ok(Node::Num(value)),
            Token::LParen => {
                let inner = self.sum()?;
                self.close(pos)?;
                Ok(inner)
            }
            Token::Ident(name) => self.identifier(name, pos),
            other => Err(ParseError::UnexpectedToken {
                found: other.to_string(),
                pos,
            }),
        }
    }

    fn identifier(&mut self, name: String, pos: usize) -> Result<Node, ParseError> {
        // The variable is never called, so `x(x + 1)` multiplies.
        if name == self.var {
            return Ok(Node::Var(name));
        }
        if self.peek().is_some_and(|(token, _)| *token == Token::LParen) {
            let func = Func::from_name(&name).ok_or(ParseError::UnknownFunction { name, pos })?;
            let (_, open) = self.next()?;
            let arg = self.sum()?;
            self.close(open)?;
            return Ok(Node::call(func, arg));
        }

        if let Some(constant) = Constant::from_name(&name) {
            return Ok(Node::Const(constant));
        }
        if Func::from_name(&name).is_some() {
            return Err(ParseError::UnexpectedToken {
                found: name,
                pos,
            });
        }
        Err(ParseError::UnknownIdentifier { name, pos })
    }

    /// Consumes the `)` matching the `(` at `open`.
    fn close(&mut self, open: usize) -> Result<(), ParseError> {
        match self.next() {
            Ok((Token::RParen, _)) => Ok(()),
            Ok((token, pos)) => Err(ParseError::UnexpectedToken {
                found: token.to_string(),
                pos,
            }),
            Err(_) => Err(ParseError::UnexpectedToken {
                found: "(".to_string(),
                pos: open,
            }),
        }
    }
}
