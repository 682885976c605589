mod common;

use qed_core::QedError;
use qed_engine::{Claim, ProofObligation, ProofStatus};

use common::{expr, obligation, verifier};

#[test]
fn fresh_obligation_is_unknown_with_empty_log() -> Result<(), QedError> {
    let ob = obligation("euler", "exp(I*pi)", "-1")?;
    assert_eq!(ob.status(), ProofStatus::Unknown);
    assert!(ob.proof_steps().is_empty());
    assert_eq!(ob.proof_method(), "simplification");
    Ok(())
}

#[test]
fn claims_parse_equations_expressions_and_text() -> Result<(), QedError> {
    assert_eq!(
        Claim::parse("x^2 = x*x"),
        Claim::equation(expr("x^2")?, expr("x*x")?)
    );
    assert_eq!(Claim::parse("2*x"), Claim::Expr(expr("2*x")?));
    assert_eq!(
        Claim::parse("exp is continuous"),
        Claim::text("exp is continuous")
    );
    Ok(())
}

#[test]
fn reverification_reproduces_status_and_appends_steps() -> Result<(), QedError> {
    let (verifier, _) = verifier();
    let mut ob = obligation("golden", "((1 + sqrt(5))/2)^2", "(1 + sqrt(5))/2 + 1")?;
    assert!(verifier.verify_by_simplification(&mut ob));
    let first = ob.proof_steps().len();
    assert!(verifier.verify_by_simplification(&mut ob));
    assert_eq!(ob.status(), ProofStatus::Proven);
    assert_eq!(ob.proof_steps().len(), 2 * first);
    assert_eq!(ob.proof_steps()[..first], ob.proof_steps()[first..]);
    Ok(())
}

#[test]
fn obligation_survives_json() -> Result<(), QedError> {
    let (verifier, _) = verifier();
    let mut ob = ProofObligation::new("three", expr("3")?, expr("4")?, "simplification");
    verifier.verify_by_simplification(&mut ob);
    let bytes = qed_core::to_canonical_json_bytes(&ob)?;
    let back: ProofObligation = qed_core::from_json_slice(&bytes)?;
    assert_eq!(back, ob);
    Ok(())
}
