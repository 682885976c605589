#![allow(dead_code)]

use qed_core::QedError;
use qed_sym::{Expr, Oracle, SymbolicOracle};

pub fn oracle() -> SymbolicOracle {
    SymbolicOracle::new()
}

pub fn expr(text: &str) -> Result<Expr, QedError> {
    Ok(Expr::parse(text)?)
}

/// Whether `lhs - rhs` normalises to zero.
pub fn equivalent(lhs: &str, rhs: &str) -> Result<bool, QedError> {
    let difference = expr(lhs)? - expr(rhs)?;
    Ok(oracle().is_zero(&difference)?)
}

pub const PHI: &str = "(1 + sqrt(5))/2";

pub fn binet(n: &str) -> String {
    format!("(((1 + sqrt(5))/2)^({n}) - ((1 - sqrt(5))/2)^({n}))/sqrt(5)")
}
