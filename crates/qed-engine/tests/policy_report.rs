mod common;

use std::fs;

use qed_core::{from_json_slice, QedError, RunProvenance};
use qed_engine::{Claim, DuplicatePolicy, ObligationKind, Policy, Theory, VerificationReport, Verifier};

use common::obligation;

fn io_error(err: std::io::Error) -> QedError {
    QedError::Serde(qed_core::ErrorInfo::new("io", err.to_string()))
}

#[test]
fn policy_defaults_fill_missing_keys() -> Result<(), QedError> {
    let dir = tempfile::tempdir().map_err(io_error)?;
    let path = dir.path().join("policy.yaml");
    fs::write(&path, "duplicates: overwrite\noracle:\n  lhopital_depth: 3\n").map_err(io_error)?;
    let text = fs::read_to_string(&path).map_err(io_error)?;
    let policy = Policy::from_yaml_str(&text)?;
    assert_eq!(policy.duplicates, DuplicatePolicy::Overwrite);
    assert_eq!(policy.oracle.lhopital_depth, 3);
    assert_eq!(policy.oracle.max_power, 64);
    assert!(policy.expand_definitions);

    assert_eq!(Policy::from_yaml_str("{}")?, Policy::default());
    assert!(Policy::from_yaml_str("duplicates: sometimes").is_err());
    assert_ne!(policy.hash()?, Policy::default().hash()?);
    Ok(())
}

fn verified_theory() -> Result<Theory, QedError> {
    let verifier = Verifier::from_policy(&Policy::default());
    let mut theory = Theory::new();
    theory.add_axiom("complex_unit", Claim::parse("I^2 = -1"))?;
    theory.add_theorem(obligation("euler_identity", "exp(I*pi)", "-1")?)?;
    theory.add_lemma(obligation("three_is_four", "3", "4")?)?;
    theory.add_corollary(obligation("unverified", "x", "x")?)?;
    theory.verify_obligation(ObligationKind::Theorem, "euler_identity", true, |ob| {
        verifier.verify_by_simplification(ob)
    })?;
    theory.verify_obligation(ObligationKind::Lemma, "three_is_four", true, |ob| {
        verifier.verify_by_simplification(ob)
    })?;
    Ok(theory)
}

#[test]
fn report_summarises_statuses() -> Result<(), QedError> {
    let theory = verified_theory()?;
    let provenance = RunProvenance::new("catalog", Policy::default().hash()?);
    let report = VerificationReport::from_theory(&theory, provenance)?;
    assert_eq!(report.summary.proven, 1);
    assert_eq!(report.summary.refuted, 1);
    assert_eq!(report.summary.unknown, 1);
    assert_eq!(report.summary.axioms, 1);
    assert_eq!(report.summary.total, 3);
    assert!(!report.all_proven());
    assert_eq!(report.entries[0].name, "three_is_four");
    Ok(())
}

#[test]
fn report_hash_is_stable_and_round_trips() -> Result<(), QedError> {
    let provenance = RunProvenance::new("catalog", Policy::default().hash()?);
    let first = VerificationReport::from_theory(&verified_theory()?, provenance.clone())?;
    let second = VerificationReport::from_theory(&verified_theory()?, provenance)?;
    assert_eq!(first.report_hash, second.report_hash);
    assert_eq!(first.to_bytes()?, second.to_bytes()?);

    let dir = tempfile::tempdir().map_err(io_error)?;
    let path = dir.path().join("report.json");
    fs::write(&path, first.to_bytes()?).map_err(io_error)?;
    let restored: VerificationReport = from_json_slice(&fs::read(&path).map_err(io_error)?)?;
    assert_eq!(restored, first);
    Ok(())
}
