//! Plain-text rendering of verification results.

use std::fmt::Write;

use qed_engine::{ObligationKind, ProofObligation, ProofStatus, VerificationReport};

/// Display glyph for a status.
pub fn glyph(status: ProofStatus) -> &'static str {
    match status {
        ProofStatus::Proven => "✓ PROVEN",
        ProofStatus::Refuted => "✗ REFUTED",
        ProofStatus::Unknown => "? UNKNOWN",
        ProofStatus::Axiom => "⊢ AXIOM",
    }
}

fn heading(kind: ObligationKind) -> &'static str {
    match kind {
        ObligationKind::Lemma => "lemmas",
        ObligationKind::Theorem => "theorems",
        ObligationKind::Corollary => "corollaries",
    }
}

pub fn render_obligation(obligation: &ProofObligation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", glyph(obligation.status()), obligation.name());
    let _ = writeln!(out, "    {} => {}", obligation.hypothesis(), obligation.conclusion());
    for step in obligation.proof_steps() {
        let _ = writeln!(out, "      {step}");
    }
    out
}

pub fn render_report(report: &VerificationReport) -> String {
    let mut out = String::new();
    if !report.axioms.is_empty() {
        let _ = writeln!(out, "axioms");
        for axiom in &report.axioms {
            let _ = writeln!(out, "  {} {}: {}", glyph(ProofStatus::Axiom), axiom.name, axiom.statement);
        }
    }
    let mut current = None;
    for entry in &report.entries {
        if current != Some(entry.kind) {
            let _ = writeln!(out, "{}", heading(entry.kind));
            current = Some(entry.kind);
        }
        let _ = writeln!(out, "  {} {} [{}]", glyph(entry.status), entry.name, entry.proof_method);
        let _ = writeln!(out, "      {} => {}", entry.hypothesis, entry.conclusion);
        for step in &entry.proof_steps {
            let _ = writeln!(out, "        {step}");
        }
    }
    let summary = &report.summary;
    let _ = writeln!(
        out,
        "proven {}/{} ({:.1}%), refuted {}, unknown {}",
        summary.proven,
        summary.total,
        100.0 * summary.success_rate,
        summary.refuted,
        summary.unknown
    );
    let _ = writeln!(out, "report {}", report.report_hash);
    out
}
