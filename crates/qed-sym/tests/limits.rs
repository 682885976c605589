mod common;

use qed_core::QedError;
use qed_sym::{Expr, LimitPoint, Oracle, SymbolicError};

use common::{binet, expr, oracle, PHI};

fn limit_at(text: &str, var: &str, point: LimitPoint) -> Result<Expr, SymbolicError> {
    oracle().limit(&Expr::parse(text)?, var, &point)
}

#[test]
fn fibonacci_ratio_tends_to_golden_ratio() -> Result<(), QedError> {
    let ratio = format!("({})/({})", binet("n + 1"), binet("n"));
    let value = limit_at(&ratio, "n", LimitPoint::PosInfinity)?;
    assert!(oracle().is_zero(&(value - expr(PHI)?))?);
    Ok(())
}

#[test]
fn removable_singularities_use_lhopital() -> Result<(), QedError> {
    let value = limit_at("sin(x)/x", "x", LimitPoint::Finite(Expr::zero()))?;
    assert_eq!(value.to_string(), "1");
    let value = limit_at("(x^2 - 1)/(x - 1)", "x", LimitPoint::Finite(Expr::one()))?;
    assert_eq!(value.to_string(), "2");
    Ok(())
}

#[test]
fn continuous_points_substitute() -> Result<(), QedError> {
    let value = limit_at("x^2 + 3", "x", LimitPoint::Finite(Expr::int(2)))?;
    assert_eq!(value.to_string(), "7");
    Ok(())
}

#[test]
fn dominant_terms_decide_infinite_limits() -> Result<(), QedError> {
    let value = limit_at("(3*x^2 + 1)/(x^2 + 5)", "x", LimitPoint::PosInfinity)?;
    assert_eq!(value.to_string(), "3");
    let value = limit_at("x/exp(x)", "x", LimitPoint::PosInfinity)?;
    assert_eq!(value.to_string(), "0");
    let value = limit_at("exp(x)", "x", LimitPoint::NegInfinity)?;
    assert_eq!(value.to_string(), "0");
    let value = limit_at("ln(x)/x", "x", LimitPoint::PosInfinity)?;
    assert_eq!(value.to_string(), "0");
    Ok(())
}

#[test]
fn divergent_and_oscillating_limits_fail() {
    let err = limit_at("1/x", "x", LimitPoint::Finite(Expr::zero())).unwrap_err();
    assert!(matches!(err, SymbolicError::Divergent(_)));
    let err = limit_at("x^2", "x", LimitPoint::PosInfinity).unwrap_err();
    assert!(matches!(err, SymbolicError::Divergent(_)));
    let err = limit_at("sin(x)", "x", LimitPoint::PosInfinity).unwrap_err();
    assert!(matches!(err, SymbolicError::Indeterminate(_)));
}

#[test]
fn negative_infinity_errors_name_the_original_limit() -> Result<(), QedError> {
    let err = limit_at("x^3 - x", "x", LimitPoint::NegInfinity).unwrap_err();
    assert!(matches!(err, SymbolicError::Divergent(_)));
    let shown = oracle().simplify(&expr("x^3 - x")?)?;
    let message = err.to_string();
    assert!(message.contains(&format!("{shown} grows without bound as x -> -oo")), "{message}");
    Ok(())
}

#[test]
fn limit_points_parse_infinities() -> Result<(), QedError> {
    assert_eq!(LimitPoint::parse("oo")?, LimitPoint::PosInfinity);
    assert_eq!(LimitPoint::parse("-inf")?, LimitPoint::NegInfinity);
    assert_eq!(LimitPoint::parse("1/2")?, LimitPoint::Finite(Expr::rational(1, 2)));
    Ok(())
}
