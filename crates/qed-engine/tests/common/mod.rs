#![allow(dead_code)]

use qed_core::QedError;
use qed_engine::{ProofObligation, RecordingObserver, Verifier};
use qed_sym::{Expr, Interval, LimitPoint, Oracle, SymbolicError, SymbolicOracle};

pub fn expr(text: &str) -> Result<Expr, QedError> {
    Ok(Expr::parse(text)?)
}

pub fn obligation(name: &str, hypothesis: &str, conclusion: &str) -> Result<ProofObligation, QedError> {
    Ok(ProofObligation::new(
        name,
        expr(hypothesis)?,
        expr(conclusion)?,
        "simplification",
    ))
}

pub fn verifier() -> (Verifier, RecordingObserver) {
    let observer = RecordingObserver::new();
    let verifier = Verifier::new(SymbolicOracle::new()).with_observer(observer.clone());
    (verifier, observer)
}

pub const PHI: &str = "(1 + sqrt(5))/2";

pub fn binet(n: &str) -> String {
    format!("(((1 + sqrt(5))/2)^({n}) - ((1 - sqrt(5))/2)^({n}))/sqrt(5)")
}

/// Oracle whose every operation fails.
pub struct FailingOracle;

impl FailingOracle {
    fn fail<T>(operation: &str) -> Result<T, SymbolicError> {
        Err(SymbolicError::Unsupported(format!("{operation} is unavailable")))
    }
}

impl Oracle for FailingOracle {
    fn simplify(&self, _expr: &Expr) -> Result<Expr, SymbolicError> {
        Self::fail("simplify")
    }

    fn expand(&self, _expr: &Expr) -> Result<Expr, SymbolicError> {
        Self::fail("expand")
    }

    fn factor(&self, _expr: &Expr) -> Result<Expr, SymbolicError> {
        Self::fail("factor")
    }

    fn limit(&self, _expr: &Expr, _var: &str, _point: &LimitPoint) -> Result<Expr, SymbolicError> {
        Self::fail("limit")
    }

    fn differentiate(&self, _expr: &Expr, _var: &str) -> Result<Expr, SymbolicError> {
        Self::fail("differentiate")
    }

    fn integrate(
        &self,
        _expr: &Expr,
        _var: &str,
        _bounds: Option<&Interval>,
    ) -> Result<Expr, SymbolicError> {
        Self::fail("integrate")
    }

    fn is_zero(&self, _expr: &Expr) -> Result<bool, SymbolicError> {
        Self::fail("is_zero")
    }

    fn is_constant(&self, _expr: &Expr) -> Result<bool, SymbolicError> {
        Self::fail("is_constant")
    }
}

/// Oracle that panics on every call.
pub struct PanickingOracle;

impl Oracle for PanickingOracle {
    fn simplify(&self, _expr: &Expr) -> Result<Expr, SymbolicError> {
        panic!("simplify exploded")
    }

    fn expand(&self, _expr: &Expr) -> Result<Expr, SymbolicError> {
        panic!("expand exploded")
    }

    fn factor(&self, _expr: &Expr) -> Result<Expr, SymbolicError> {
        panic!("factor exploded")
    }

    fn limit(&self, _expr: &Expr, _var: &str, _point: &LimitPoint) -> Result<Expr, SymbolicError> {
        panic!("limit exploded")
    }

    fn differentiate(&self, _expr: &Expr, _var: &str) -> Result<Expr, SymbolicError> {
        panic!("differentiate exploded")
    }

    fn integrate(
        &self,
        _expr: &Expr,
        _var: &str,
        _bounds: Option<&Interval>,
    ) -> Result<Expr, SymbolicError> {
        panic!("integrate exploded")
    }

    fn is_zero(&self, _expr: &Expr) -> Result<bool, SymbolicError> {
        panic!("is_zero exploded")
    }

    fn is_constant(&self, _expr: &Expr) -> Result<bool, SymbolicError> {
        panic!("is_constant exploded")
    }
}
