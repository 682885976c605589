mod common;

use qed_core::QedError;
use qed_sym::{Oracle, SymbolicError};

use common::{equivalent, expr, oracle, PHI};

#[test]
fn euler_identity_holds() -> Result<(), QedError> {
    assert!(equivalent("exp(I*pi)", "-1")?);
    assert!(equivalent("E^(I*pi) + 1", "0")?);
    Ok(())
}

#[test]
fn exponential_composition_law() -> Result<(), QedError> {
    assert!(equivalent(
        "r0*exp(a*t)*exp(I*omega*t)",
        "r0*exp((a + I*omega)*t)"
    )?);
    Ok(())
}

#[test]
fn euler_formula_through_trigonometric_rewrite() -> Result<(), QedError> {
    assert!(equivalent("exp(I*x)", "cos(x) + I*sin(x)")?);
    assert!(equivalent("sin(x)^2 + cos(x)^2", "1")?);
    assert!(equivalent("cosh(x)^2 - sinh(x)^2", "1")?);
    Ok(())
}

#[test]
fn golden_ratio_identities() -> Result<(), QedError> {
    assert!(equivalent(&format!("({PHI})^2"), &format!("{PHI} + 1"))?);
    assert!(equivalent(&format!("1/({PHI})"), &format!("{PHI} - 1"))?);
    Ok(())
}

#[test]
fn radicals_are_reduced() -> Result<(), QedError> {
    assert!(equivalent("sqrt(8)", "2*sqrt(2)")?);
    assert!(equivalent("sqrt(6)", "sqrt(2)*sqrt(3)")?);
    assert!(equivalent("sqrt(-4)", "2*I")?);
    assert!(equivalent("8^(1/3)", "2")?);
    Ok(())
}

#[test]
fn exact_angles_of_the_unit_circle() -> Result<(), QedError> {
    assert!(equivalent("exp(I*pi/2)", "I")?);
    assert!(equivalent("cos(pi/3)", "1/2")?);
    assert!(equivalent("sin(pi/4)", "sqrt(2)/2")?);
    Ok(())
}

#[test]
fn logarithms_cancel_exponentials() -> Result<(), QedError> {
    assert!(equivalent("ln(exp(x))", "x")?);
    assert!(equivalent("exp(2*ln(x))", "x^2")?);
    assert!(equivalent("ln(1)", "0")?);
    Ok(())
}

#[test]
fn rational_functions_compare_by_cross_multiplication() -> Result<(), QedError> {
    assert!(equivalent("(x^2 - 1)/(x - 1)", "x + 1")?);
    assert!(equivalent("1/(1 + sqrt(2))", "sqrt(2) - 1")?);
    assert!(!equivalent("x/(x + 1)", "1")?);
    Ok(())
}

#[test]
fn distinct_constants_leave_a_residual() -> Result<(), QedError> {
    let oracle = oracle();
    let residual = oracle.simplify(&(expr("3")? - expr("4")?))?;
    assert_eq!(residual.to_string(), "-1");
    assert!(!oracle.is_zero(&residual)?);
    assert!(oracle.is_constant(&residual)?);
    Ok(())
}

#[test]
fn expand_and_factor_render_the_same_value() -> Result<(), QedError> {
    let oracle = oracle();
    let source = expr("(x + 1)^2 - 1")?;
    let expanded = oracle.expand(&source)?;
    assert_eq!(expanded.to_string(), "2*x + x^2");
    let factored = oracle.factor(&source)?;
    assert_eq!(factored.to_string(), "x*(2 + x)");
    assert!(oracle.is_zero(&(factored - expanded))?);
    Ok(())
}

#[test]
fn constant_test_sees_free_symbols() -> Result<(), QedError> {
    let oracle = oracle();
    assert!(oracle.is_constant(&expr("pi + sqrt(2)")?)?);
    assert!(!oracle.is_constant(&expr("x - y")?)?);
    assert!(oracle.is_constant(&expr("x - x")?)?);
    Ok(())
}

#[test]
fn poles_are_reported_not_panicked() -> Result<(), QedError> {
    let oracle = oracle();
    let err = oracle.simplify(&expr("1/(x - x)")?).unwrap_err();
    assert!(matches!(err, SymbolicError::DivisionByZero { .. }));
    let err = oracle.simplify(&expr("tan(pi/2)")?).unwrap_err();
    assert!(matches!(err, SymbolicError::DivisionByZero { .. }));
    Ok(())
}

#[test]
fn huge_powers_are_rejected() -> Result<(), QedError> {
    let err = oracle().expand(&expr("(x + 1)^1000")?).unwrap_err();
    assert_eq!(err.code(), "too-large");
    Ok(())
}
