mod common;

use std::error::Error;

use common::{qed, stdout};

#[test]
fn check_simplify_reports_glyphs() -> Result<(), Box<dyn Error>> {
    let output = qed(&["check", "simplify", "exp(I*pi)", "-1"])?;
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("✓ PROVEN check"));

    let output = qed(&["check", "simplify", "3", "4"])?;
    assert!(!output.status.success());
    assert!(stdout(&output).starts_with("✗ REFUTED check"));
    Ok(())
}

#[test]
fn check_calculus_claims() -> Result<(), Box<dyn Error>> {
    let output = qed(&["check", "limit", "sin(x)/x", "x", "0", "1"])?;
    assert!(output.status.success(), "{}", stdout(&output));

    let output = qed(&["check", "derivative", "x^3", "x", "3*x^2"])?;
    assert!(output.status.success(), "{}", stdout(&output));

    let output = qed(&["check", "integral", "2*x", "x", "x^2 + 5"])?;
    assert!(output.status.success(), "{}", stdout(&output));

    let output = qed(&["check", "integral", "--lower", "0", "--upper", "1", "x", "x", "1"])?;
    assert!(!output.status.success());
    assert!(stdout(&output).contains("✗ REFUTED"));
    Ok(())
}

#[test]
fn oracle_errors_are_unknown() -> Result<(), Box<dyn Error>> {
    let output = qed(&["check", "limit", "x^2", "x", "oo", "0"])?;
    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("? UNKNOWN check"));
    assert!(text.contains("error:"));
    Ok(())
}

#[test]
fn version_prints_package_version() -> Result<(), Box<dyn Error>> {
    let output = qed(&["version"])?;
    assert_eq!(stdout(&output).trim(), env!("CARGO_PKG_VERSION"));
    let output = qed(&["version", "--long"])?;
    let info: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(info["strategies"].as_array().map(Vec::len), Some(6));
    Ok(())
}
