mod common;

use std::error::Error;
use std::fs;

use common::{path_arg, qed, stderr, stdout};

#[test]
fn builtin_catalog_is_fully_proven() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("out");
    let output = qed(&["verify", "--out", &path_arg(&out)])?;
    assert!(output.status.success(), "stderr: {}\nstdout: {}", stderr(&output), stdout(&output));

    let text = stdout(&output);
    assert!(text.contains("⊢ AXIOM complex_unit"));
    assert!(text.contains("✓ PROVEN euler_identity"));
    assert!(text.contains("✓ PROVEN fibonacci_ratio_limit"));
    assert!(!text.contains("✗ REFUTED"));
    assert!(!text.contains("? UNKNOWN"));

    let report: serde_json::Value = serde_json::from_slice(&fs::read(out.join("report.json"))?)?;
    assert_eq!(report["summary"]["total"], 14);
    assert_eq!(report["summary"]["proven"], 14);
    assert_eq!(report["summary"]["axioms"], 6);
    assert_eq!(fs::read_to_string(out.join("report.txt"))?, text);
    Ok(())
}

#[test]
fn json_output_is_deterministic() -> Result<(), Box<dyn Error>> {
    let first = qed(&["verify", "--json"])?;
    let second = qed(&["verify", "--json"])?;
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    let report: serde_json::Value = serde_json::from_slice(&first.stdout)?;
    assert!(report["report_hash"].as_str().is_some_and(|hash| hash.len() == 64));
    Ok(())
}

const MIXED: &str = r#"
axioms:
  - name: complex_unit
    statement: "I^2 = -1"
definitions:
  - name: phi
    expression: "(1 + sqrt(5))/2"
obligations:
  - name: golden_square
    kind: lemma
    hypothesis: "phi^2"
    conclusion: "phi + 1"
    proof:
      method: simplification
  - name: three_is_four
    kind: theorem
    hypothesis: "3"
    conclusion: "4"
    proof:
      method: simplification
  - name: open_question
    kind: corollary
    hypothesis: "x"
    conclusion: "x"
    proof:
      method: contradiction
      assumption: "x = x"
"#;

#[test]
fn unproven_obligations_fail_the_run() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let catalog = dir.path().join("catalog.yaml");
    fs::write(&catalog, MIXED)?;
    let output = qed(&["verify", "--catalog", &path_arg(&catalog)])?;
    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("✓ PROVEN golden_square"));
    assert!(text.contains("✗ REFUTED three_is_four"));
    assert!(text.contains("? UNKNOWN open_question"));
    assert!(text.contains("proven 1/3"));
    assert!(stderr(&output).contains("2 of 3 obligations not proven"));
    Ok(())
}

#[test]
fn policy_controls_definition_expansion() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let catalog = dir.path().join("catalog.yaml");
    let policy = dir.path().join("policy.yaml");
    fs::write(&catalog, MIXED)?;
    fs::write(&policy, "expand_definitions: false\n")?;
    let output = qed(&[
        "verify",
        "--catalog",
        &path_arg(&catalog),
        "--policy",
        &path_arg(&policy),
    ])?;
    assert!(stdout(&output).contains("✗ REFUTED golden_square"));
    Ok(())
}

#[test]
fn duplicate_catalog_names_are_rejected() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let catalog = dir.path().join("catalog.yaml");
    fs::write(
        &catalog,
        "axioms:\n  - name: a\n    statement: \"x = x\"\n  - name: a\n    statement: \"y = y\"\n",
    )?;
    let output = qed(&["verify", "--catalog", &path_arg(&catalog)])?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("duplicate-name"));

    let policy = dir.path().join("policy.yaml");
    fs::write(&policy, "duplicates: overwrite\n")?;
    let output = qed(&[
        "verify",
        "--catalog",
        &path_arg(&catalog),
        "--policy",
        &path_arg(&policy),
    ])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("⊢ AXIOM a: y = y"));
    Ok(())
}

#[test]
fn malformed_catalog_is_reported() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let catalog = dir.path().join("catalog.yaml");
    fs::write(
        &catalog,
        "obligations:\n  - name: half\n    kind: lemma\n    hypothesis: x\n    conclusion: \"1/2\"\n    proof:\n      method: integral\n      integrand: x\n      variable: x\n      lower: 0\n      expected: \"1/2\"\n",
    )?;
    let output = qed(&["verify", "--catalog", &path_arg(&catalog)])?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("half-open-bounds"));
    Ok(())
}
