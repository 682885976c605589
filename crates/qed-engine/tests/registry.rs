mod common;

use qed_core::QedError;
use qed_engine::{
    Claim, DuplicatePolicy, ObligationKind, ProofObligation, ProofStatus, Theory,
};

use common::{expr, obligation, verifier};

#[test]
fn duplicate_names_are_rejected_by_default() -> Result<(), QedError> {
    let mut theory = Theory::new();
    theory.add_axiom("complex_unit", Claim::equation(expr("I^2")?, expr("-1")?))?;
    let err = theory
        .add_axiom("complex_unit", Claim::text("something else"))
        .err()
        .ok_or_else(|| QedError::Registry(qed_core::ErrorInfo::new("test", "duplicate accepted")))?;
    assert!(matches!(err, QedError::Registry(_)));
    assert_eq!(err.code(), "duplicate-name");
    let kept = theory.axiom("complex_unit").map(|axiom| axiom.statement.clone());
    assert_eq!(kept, Some(Claim::equation(expr("I^2")?, expr("-1")?)));

    theory.add_lemma(obligation("phi_square", "phi^2", "phi + 1")?)?;
    assert!(theory.add_lemma(obligation("phi_square", "phi", "phi")?).is_err());
    Ok(())
}

#[test]
fn overwrite_policy_replaces_entries() -> Result<(), QedError> {
    let mut theory = Theory::with_duplicates(DuplicatePolicy::Overwrite);
    theory.add_definition("golden_ratio", expr("(1 + sqrt(5))/2")?)?;
    theory.add_definition("golden_ratio", expr("(1 - sqrt(5))/2")?)?;
    assert_eq!(theory.definition("golden_ratio"), Some(&expr("(1 - sqrt(5))/2")?));
    Ok(())
}

#[test]
fn registries_are_independent_and_ordered() -> Result<(), QedError> {
    let mut theory = Theory::new();
    theory.add_axiom("euler", Claim::text("exp(I*pi) = -1"))?;
    theory.add_theorem(obligation("euler", "exp(I*pi)", "-1")?)?;
    theory.add_theorem(obligation("composition", "exp(a)*exp(b)", "exp(a + b)")?)?;
    theory.add_corollary(obligation("reciprocal", "2/(1 + sqrt(5))", "(sqrt(5) - 1)/2")?)?;
    theory.add_lemma(obligation("square", "x*x", "x^2")?)?;

    let names: Vec<_> = theory.obligations(ObligationKind::Theorem).map(ProofObligation::name).collect();
    assert_eq!(names, ["composition", "euler"]);
    let kinds: Vec<_> = theory.all_obligations().map(|(kind, _)| kind).collect();
    assert_eq!(
        kinds,
        [
            ObligationKind::Lemma,
            ObligationKind::Theorem,
            ObligationKind::Theorem,
            ObligationKind::Corollary
        ]
    );
    assert!(theory.axioms().all(|axiom| axiom.status() == ProofStatus::Axiom));
    Ok(())
}

#[test]
fn definitions_expand_transitively() -> Result<(), QedError> {
    let mut theory = Theory::new();
    theory.add_definition("phi", expr("(1 + s)/2")?)?;
    theory.add_definition("s", expr("sqrt(5)")?)?;
    let expanded = theory.expand_definitions(&expr("phi^2")?)?;
    assert!(!expanded.contains_symbol("phi"));
    assert!(!expanded.contains_symbol("s"));
    Ok(())
}

#[test]
fn cyclic_definitions_are_an_error() -> Result<(), QedError> {
    let mut theory = Theory::new();
    theory.add_definition("a", expr("b + 1")?)?;
    theory.add_definition("b", expr("a + 1")?)?;
    let result = theory.expand_definitions(&expr("a")?);
    assert!(matches!(result, Err(ref err) if err.code() == "definition-cycle"));
    Ok(())
}

#[test]
fn verification_through_registry_uses_definitions() -> Result<(), QedError> {
    let (verifier, _) = verifier();
    let mut theory = Theory::new();
    theory.add_definition("phi", expr("(1 + sqrt(5))/2")?)?;
    theory.add_lemma(obligation("golden_square", "phi^2", "phi + 1")?)?;

    let proven = theory.verify_obligation(ObligationKind::Lemma, "golden_square", true, |ob| {
        verifier.verify_by_simplification(ob)
    })?;
    assert!(proven);
    let stored = theory
        .obligation(ObligationKind::Lemma, "golden_square")
        .ok_or_else(|| QedError::Registry(qed_core::ErrorInfo::new("test", "lemma missing")))?;
    assert_eq!(stored.status(), ProofStatus::Proven);
    assert_eq!(stored.hypothesis(), &Claim::Expr(expr("phi^2")?));
    assert!(!stored.proof_steps().is_empty());

    let unexpanded = theory.verify_obligation(ObligationKind::Lemma, "golden_square", false, |ob| {
        verifier.verify_by_simplification(ob)
    })?;
    assert!(!unexpanded);

    let missing = theory.verify_obligation(ObligationKind::Theorem, "golden_square", true, |_| true);
    assert!(matches!(missing, Err(ref err) if err.code() == "unknown-name"));
    Ok(())
}
