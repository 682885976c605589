//! Recursive-descent parser for infix expressions.
//!
//! Grammar (loosest to tightest): `+ -`, `* /`, unary `-`, `^`/`**` (right
//! associative), then numbers, names, calls and parenthesised groups.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use crate::error::SymbolicError;
use crate::expr::{Constant, Expr, Func};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(BigRational),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(text: &str) -> Result<Vec<(usize, Token)>, SymbolicError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let ch = bytes[pos];
        let start = pos;
        match ch {
            b' ' | b'\t' | b'\n' | b'\r' => {
                pos += 1;
                continue;
            }
            b'+' => tokens.push((start, Token::Plus)),
            b'-' => tokens.push((start, Token::Minus)),
            b'/' => tokens.push((start, Token::Slash)),
            b'^' => tokens.push((start, Token::Caret)),
            b'(' => tokens.push((start, Token::LParen)),
            b')' => tokens.push((start, Token::RParen)),
            b'*' => {
                if bytes.get(pos + 1) == Some(&b'*') {
                    pos += 1;
                    tokens.push((start, Token::Caret));
                } else {
                    tokens.push((start, Token::Star));
                }
            }
            b'0'..=b'9' | b'.' => {
                while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
                    pos += 1;
                }
                let literal = &text[start..pos];
                tokens.push((start, Token::Number(decimal(literal, start)?)));
                continue;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_')
                {
                    pos += 1;
                }
                tokens.push((start, Token::Ident(text[start..pos].to_string())));
                continue;
            }
            _ => {
                let found = text[start..].chars().next().unwrap_or('?');
                return Err(SymbolicError::parse(
                    start,
                    format!("unexpected character `{found}`"),
                ));
            }
        }
        pos += 1;
    }
    Ok(tokens)
}

/// Converts a decimal literal into an exact rational.
fn decimal(literal: &str, offset: usize) -> Result<BigRational, SymbolicError> {
    let mut parts = literal.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let frac = parts.next().unwrap_or("");
    if frac.contains('.') || (whole.is_empty() && frac.is_empty()) {
        return Err(SymbolicError::parse(
            offset,
            format!("malformed number `{literal}`"),
        ));
    }
    let digits = format!("{whole}{frac}");
    let numer: BigInt = digits
        .parse()
        .map_err(|_| SymbolicError::parse(offset, format!("malformed number `{literal}`")))?;
    let denom = num_traits::pow(BigInt::from(10), frac.len());
    Ok(BigRational::new(numer, denom))
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, token)| token)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(offset, _)| *offset)
            .unwrap_or(self.end)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(_, token)| token.clone());
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<(), SymbolicError> {
        let offset = self.offset();
        match self.bump() {
            Some(token) if token == expected => Ok(()),
            _ => Err(SymbolicError::parse(offset, format!("expected {what}"))),
        }
    }

    fn sum(&mut self) -> Result<Expr, SymbolicError> {
        let mut lhs = self.product()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.bump();
                    let rhs = self.product()?;
                    lhs = lhs + rhs;
                }
                Some(Token::Minus) => {
                    self.bump();
                    let rhs = self.product()?;
                    lhs = lhs - rhs;
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn product(&mut self) -> Result<Expr, SymbolicError> {
        let mut lhs = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.bump();
                    let rhs = self.unary()?;
                    lhs = match (lhs, rhs) {
                        (Expr::Num(a), Expr::Num(b)) => Expr::Num(a * b),
                        (lhs, rhs) => lhs * rhs,
                    };
                }
                Some(Token::Slash) => {
                    let offset = self.offset();
                    self.bump();
                    let rhs = self.unary()?;
                    lhs = match (lhs, rhs) {
                        (_, Expr::Num(b)) if b.is_zero() => {
                            return Err(SymbolicError::parse(offset, "division by literal zero"))
                        }
                        (Expr::Num(a), Expr::Num(b)) => Expr::Num(a / b),
                        (lhs, rhs) => lhs / rhs,
                    };
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, SymbolicError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.bump();
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.bump();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, SymbolicError> {
        let base = self.primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.bump();
            let exponent = self.unary()?;
            return Ok(base.pow(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, SymbolicError> {
        let offset = self.offset();
        match self.bump() {
            Some(Token::Number(value)) => Ok(Expr::Num(value)),
            Some(Token::LParen) => {
                let inner = self.sum()?;
                self.expect(Token::RParen, "`)`")?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => {
                if let Some(Token::LParen) = self.peek() {
                    let func = Func::from_name(&name).ok_or_else(|| {
                        SymbolicError::parse(offset, format!("unknown function `{name}`"))
                    })?;
                    self.bump();
                    let arg = self.sum()?;
                    self.expect(Token::RParen, "`)` after function argument")?;
                    return Ok(Expr::Func(func, Box::new(arg)));
                }
                Ok(match name.as_str() {
                    "pi" => Expr::Const(Constant::Pi),
                    "E" | "e" => Expr::Const(Constant::E),
                    "I" | "i" => Expr::Const(Constant::I),
                    "oo" | "inf" => {
                        return Err(SymbolicError::parse(
                            offset,
                            "infinity is only valid as a limit point or bound",
                        ))
                    }
                    _ => Expr::Sym(name),
                })
            }
            Some(_) => Err(SymbolicError::parse(offset, "unexpected token")),
            None => Err(SymbolicError::parse(offset, "unexpected end of input")),
        }
    }
}

/// Parses an infix expression.
pub fn parse(text: &str) -> Result<Expr, SymbolicError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(SymbolicError::parse(0, "empty expression"));
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: text.len(),
    };
    let expr = parser.sum()?;
    if parser.pos < parser.tokens.len() {
        return Err(SymbolicError::parse(parser.offset(), "trailing input"));
    }
    Ok(expr)
}
