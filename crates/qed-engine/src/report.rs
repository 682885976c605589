use qed_core::errors::QedError;
use qed_core::hash::stable_hash_string;
use qed_core::provenance::RunProvenance;
use qed_core::serde::{to_canonical_json_bytes, to_canonical_json_pretty};
use serde::{Deserialize, Serialize};

use crate::registry::{ObligationKind, Theory};
use crate::status::ProofStatus;

/// One verified (or unverified) obligation as it appears in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Registry the obligation came from.
    pub kind: ObligationKind,
    /// Obligation name.
    pub name: String,
    /// Rendered hypothesis.
    pub hypothesis: String,
    /// Rendered conclusion.
    pub conclusion: String,
    /// Advisory method label.
    pub proof_method: String,
    /// Final status.
    pub status: ProofStatus,
    /// Derivation log.
    pub proof_steps: Vec<String>,
}

/// Axiom listing; axioms are reported but never counted as verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxiomEntry {
    /// Axiom name.
    pub name: String,
    /// Rendered statement.
    pub statement: String,
}

/// Status counts over the obligations of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReportSummary {
    /// Obligations with status `Proven`.
    pub proven: usize,
    /// Obligations with status `Refuted`.
    pub refuted: usize,
    /// Obligations with status `Unknown`.
    pub unknown: usize,
    /// Registered axioms.
    pub axioms: usize,
    /// Obligations counted (axioms excluded).
    pub total: usize,
    /// `proven / total`, or zero for an empty theory.
    pub success_rate: f64,
}

impl ReportSummary {
    fn tally(entries: &[ReportEntry], axioms: usize) -> Self {
        let mut summary = ReportSummary {
            axioms,
            total: entries.len(),
            ..ReportSummary::default()
        };
        for entry in entries {
            match entry.status {
                ProofStatus::Proven => summary.proven += 1,
                ProofStatus::Refuted => summary.refuted += 1,
                ProofStatus::Unknown | ProofStatus::Axiom => summary.unknown += 1,
            }
        }
        if summary.total > 0 {
            summary.success_rate = summary.proven as f64 / summary.total as f64;
        }
        summary
    }
}

/// Content-addressed verification report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Hash over entries, axioms, summary and provenance.
    pub report_hash: String,
    /// Axioms in name order.
    pub axioms: Vec<AxiomEntry>,
    /// Lemmas, theorems and corollaries, each group in name order.
    pub entries: Vec<ReportEntry>,
    /// Status counts.
    pub summary: ReportSummary,
    /// Run provenance.
    pub provenance: RunProvenance,
}

impl VerificationReport {
    /// Snapshots the current state of `theory`.
    pub fn from_theory(theory: &Theory, provenance: RunProvenance) -> Result<Self, QedError> {
        let axioms: Vec<AxiomEntry> = theory
            .axioms()
            .map(|axiom| AxiomEntry {
                name: axiom.name.clone(),
                statement: axiom.statement.to_string(),
            })
            .collect();
        let entries: Vec<ReportEntry> = theory
            .all_obligations()
            .map(|(kind, obligation)| ReportEntry {
                kind,
                name: obligation.name().to_string(),
                hypothesis: obligation.hypothesis().to_string(),
                conclusion: obligation.conclusion().to_string(),
                proof_method: obligation.proof_method().to_string(),
                status: obligation.status(),
                proof_steps: obligation.proof_steps().to_vec(),
            })
            .collect();
        let summary = ReportSummary::tally(&entries, axioms.len());
        let report_hash = stable_hash_string(&(&axioms, &entries, &summary, &provenance))?;
        Ok(Self {
            report_hash,
            axioms,
            entries,
            summary,
            provenance,
        })
    }

    /// True when every counted obligation is proven.
    pub fn all_proven(&self) -> bool {
        self.summary.proven == self.summary.total
    }

    /// Canonical JSON encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, QedError> {
        to_canonical_json_bytes(self)
    }

    /// Pretty canonical JSON for terminals and files.
    pub fn to_pretty_json(&self) -> Result<String, QedError> {
        to_canonical_json_pretty(self)
    }
}
