//! Expression tree consumed and produced by the oracle.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::SymbolicError;
use crate::parser;

/// Named mathematical constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Constant {
    /// The circle constant π.
    Pi,
    /// Euler's number e.
    E,
    /// The imaginary unit i.
    I,
}

/// Elementary functions understood by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Func {
    /// Natural exponential.
    Exp,
    /// Natural logarithm.
    Ln,
    /// Principal square root.
    Sqrt,
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Hyperbolic sine.
    Sinh,
    /// Hyperbolic cosine.
    Cosh,
}

impl Func {
    /// Name used by the parser and the printer.
    pub fn name(self) -> &'static str {
        match self {
            Func::Exp => "exp",
            Func::Ln => "ln",
            Func::Sqrt => "sqrt",
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
        }
    }

    /// Resolves a function name, accepting `log` as the natural logarithm.
    pub fn from_name(name: &str) -> Option<Self> {
        let func = match name {
            "exp" => Func::Exp,
            "ln" | "log" => Func::Ln,
            "sqrt" => Func::Sqrt,
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "sinh" => Func::Sinh,
            "cosh" => Func::Cosh,
            _ => return None,
        };
        Some(func)
    }
}

/// Symbolic expression over exact rationals.
///
/// Serialises as its textual form, so catalogs and reports stay readable and
/// parse back to the same tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Exact rational number.
    Num(BigRational),
    /// Free symbol.
    Sym(String),
    /// Named constant.
    Const(Constant),
    /// Sum of the operands.
    Add(Vec<Expr>),
    /// Product of the operands.
    Mul(Vec<Expr>),
    /// Base raised to an exponent.
    Pow(Box<Expr>, Box<Expr>),
    /// Function application.
    Func(Func, Box<Expr>),
}

impl Expr {
    /// Integer literal.
    pub fn int(value: i64) -> Self {
        Expr::Num(BigRational::from_integer(BigInt::from(value)))
    }

    /// Rational literal `numer / denom`.
    ///
    /// # Panics
    ///
    /// Panics when `denom` is zero.
    pub fn rational(numer: i64, denom: i64) -> Self {
        Expr::Num(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    /// Free symbol with the given name.
    pub fn sym(name: impl Into<String>) -> Self {
        Expr::Sym(name.into())
    }

    /// The constant π.
    pub fn pi() -> Self {
        Expr::Const(Constant::Pi)
    }

    /// Euler's number.
    pub fn e() -> Self {
        Expr::Const(Constant::E)
    }

    /// The imaginary unit.
    pub fn i() -> Self {
        Expr::Const(Constant::I)
    }

    /// Zero.
    pub fn zero() -> Self {
        Expr::Num(BigRational::zero())
    }

    /// One.
    pub fn one() -> Self {
        Expr::Num(BigRational::one())
    }

    /// Parses an expression from text.
    pub fn parse(text: &str) -> Result<Self, SymbolicError> {
        parser::parse(text)
    }

    /// `self ^ exponent`.
    pub fn pow(self, exponent: Expr) -> Self {
        Expr::Pow(Box::new(self), Box::new(exponent))
    }

    /// Applies `func` to `self`.
    pub fn apply(self, func: Func) -> Self {
        Expr::Func(func, Box::new(self))
    }

    /// `exp(self)`.
    pub fn exp(self) -> Self {
        self.apply(Func::Exp)
    }

    /// `ln(self)`.
    pub fn ln(self) -> Self {
        self.apply(Func::Ln)
    }

    /// `sqrt(self)`.
    pub fn sqrt(self) -> Self {
        self.apply(Func::Sqrt)
    }

    /// `sin(self)`.
    pub fn sin(self) -> Self {
        self.apply(Func::Sin)
    }

    /// `cos(self)`.
    pub fn cos(self) -> Self {
        self.apply(Func::Cos)
    }

    /// Returns true for the literal rational zero. This is a structural check;
    /// use the oracle to decide whether an arbitrary expression vanishes.
    pub fn is_literal_zero(&self) -> bool {
        matches!(self, Expr::Num(value) if value.is_zero())
    }

    /// Returns the literal rational value, if this is a number.
    pub fn as_rational(&self) -> Option<&BigRational> {
        match self {
            Expr::Num(value) => Some(value),
            _ => None,
        }
    }

    /// Collects the names of all free symbols.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut BTreeSet<String>) {
        match self {
            Expr::Num(_) | Expr::Const(_) => {}
            Expr::Sym(name) => {
                out.insert(name.clone());
            }
            Expr::Add(items) | Expr::Mul(items) => {
                for item in items {
                    item.collect_symbols(out);
                }
            }
            Expr::Pow(base, exponent) => {
                base.collect_symbols(out);
                exponent.collect_symbols(out);
            }
            Expr::Func(_, arg) => arg.collect_symbols(out),
        }
    }

    /// Returns whether the symbol `name` occurs anywhere in the tree.
    pub fn contains_symbol(&self, name: &str) -> bool {
        match self {
            Expr::Num(_) | Expr::Const(_) => false,
            Expr::Sym(sym) => sym == name,
            Expr::Add(items) | Expr::Mul(items) => {
                items.iter().any(|item| item.contains_symbol(name))
            }
            Expr::Pow(base, exponent) => {
                base.contains_symbol(name) || exponent.contains_symbol(name)
            }
            Expr::Func(_, arg) => arg.contains_symbol(name),
        }
    }

    /// Replaces every occurrence of the symbol `name` with `value`.
    pub fn substitute(&self, name: &str, value: &Expr) -> Expr {
        match self {
            Expr::Sym(sym) if sym == name => value.clone(),
            Expr::Num(_) | Expr::Sym(_) | Expr::Const(_) => self.clone(),
            Expr::Add(items) => Expr::Add(
                items
                    .iter()
                    .map(|item| item.substitute(name, value))
                    .collect(),
            ),
            Expr::Mul(items) => Expr::Mul(
                items
                    .iter()
                    .map(|item| item.substitute(name, value))
                    .collect(),
            ),
            Expr::Pow(base, exponent) => Expr::Pow(
                Box::new(base.substitute(name, value)),
                Box::new(exponent.substitute(name, value)),
            ),
            Expr::Func(func, arg) => Expr::Func(*func, Box::new(arg.substitute(name, value))),
        }
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::int(value)
    }
}

impl From<BigRational> for Expr {
    fn from(value: BigRational) -> Self {
        Expr::Num(value)
    }
}

impl FromStr for Expr {
    type Err = SymbolicError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parser::parse(text)
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        let mut items = Vec::new();
        for side in [self, rhs] {
            match side {
                Expr::Add(inner) => items.extend(inner),
                other => items.push(other),
            }
        }
        Expr::Add(items)
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        self + (-rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        let mut items = Vec::new();
        for side in [self, rhs] {
            match side {
                Expr::Mul(inner) => items.extend(inner),
                other => items.push(other),
            }
        }
        Expr::Mul(items)
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        self * rhs.pow(Expr::int(-1))
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        match self {
            Expr::Num(value) => Expr::Num(-value),
            other => Expr::int(-1) * other,
        }
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct ExprVisitor;

impl<'de> Visitor<'de> for ExprVisitor {
    type Value = Expr;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an expression string or a number")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Expr, E> {
        parser::parse(value).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Expr, E> {
        Ok(Expr::int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Expr, E> {
        Ok(Expr::Num(BigRational::from_integer(BigInt::from(value))))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Expr, E> {
        parser::parse(&value.to_string()).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Expr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ExprVisitor)
    }
}

/// Point a limit variable approaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitPoint {
    /// A finite expression.
    Finite(Expr),
    /// Positive infinity.
    PosInfinity,
    /// Negative infinity.
    NegInfinity,
}

impl LimitPoint {
    /// Parses `oo`, `+oo`, `-oo`, `inf`, `-inf` or a finite expression.
    pub fn parse(text: &str) -> Result<Self, SymbolicError> {
        match text.trim() {
            "oo" | "+oo" | "inf" | "+inf" | "infinity" => Ok(LimitPoint::PosInfinity),
            "-oo" | "-inf" | "-infinity" => Ok(LimitPoint::NegInfinity),
            other => Ok(LimitPoint::Finite(parser::parse(other)?)),
        }
    }

    /// Returns true for either infinite point.
    pub fn is_infinite(&self) -> bool {
        !matches!(self, LimitPoint::Finite(_))
    }
}

impl From<Expr> for LimitPoint {
    fn from(value: Expr) -> Self {
        LimitPoint::Finite(value)
    }
}

impl fmt::Display for LimitPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitPoint::Finite(expr) => write!(f, "{expr}"),
            LimitPoint::PosInfinity => f.write_str("oo"),
            LimitPoint::NegInfinity => f.write_str("-oo"),
        }
    }
}

impl Serialize for LimitPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct LimitPointVisitor;

impl<'de> Visitor<'de> for LimitPointVisitor {
    type Value = LimitPoint;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a limit point such as `0`, `oo` or `-oo`")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<LimitPoint, E> {
        LimitPoint::parse(value).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<LimitPoint, E> {
        Ok(LimitPoint::Finite(Expr::int(value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<LimitPoint, E> {
        Ok(LimitPoint::Finite(Expr::Num(BigRational::from_integer(
            BigInt::from(value),
        ))))
    }
}

impl<'de> Deserialize<'de> for LimitPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LimitPointVisitor)
    }
}

/// Integration interval; either end may be infinite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower bound.
    pub lower: LimitPoint,
    /// Upper bound.
    pub upper: LimitPoint,
}

impl Interval {
    /// Interval between two finite expressions.
    pub fn new(lower: impl Into<LimitPoint>, upper: impl Into<LimitPoint>) -> Self {
        Self {
            lower: lower.into(),
            upper: upper.into(),
        }
    }
}
