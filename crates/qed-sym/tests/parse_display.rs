mod common;

use qed_core::{from_json_slice, to_canonical_json_bytes, QedError};
use qed_sym::{Expr, Interval, LimitPoint, SymbolicError};

use common::expr;

#[test]
fn display_roundtrips_through_the_parser() -> Result<(), QedError> {
    for text in [
        "x^2 + 3*x - 1",
        "-2*x/(3*y)",
        "exp(I*pi) + 1",
        "sqrt(5)/2 + 1/2",
        "x^(1/2)",
        "(a + b)^n",
    ] {
        let parsed = expr(text)?;
        let reparsed = expr(&parsed.to_string())?;
        assert_eq!(parsed.to_string(), reparsed.to_string(), "{text}");
    }
    Ok(())
}

#[test]
fn decimals_become_exact_rationals() -> Result<(), QedError> {
    assert_eq!(expr("0.25")?, Expr::rational(1, 4));
    assert_eq!(expr("2**3")?.to_string(), "2^3");
    Ok(())
}

#[test]
fn parse_errors_carry_offsets() {
    let err = Expr::parse("x + * 2").unwrap_err();
    assert!(matches!(err, SymbolicError::Parse { offset: 4, .. }));
    let err = Expr::parse("frob(x)").unwrap_err();
    assert_eq!(err.code(), "parse");
    let qed: QedError = Expr::parse("(x").unwrap_err().into();
    assert_eq!(qed.code(), "parse");
}

#[test]
fn expressions_serialize_as_strings() -> Result<(), QedError> {
    let interval = Interval::new(expr("0")?, LimitPoint::PosInfinity);
    let bytes = to_canonical_json_bytes(&interval)?;
    assert_eq!(bytes, br#"{"lower":"0","upper":"oo"}"#.to_vec());
    let back: Interval = from_json_slice(&bytes)?;
    assert_eq!(back, interval);
    let value: Expr = from_json_slice(b"3")?;
    assert_eq!(value, Expr::int(3));
    Ok(())
}
