use std::fmt;

use serde::{Deserialize, Serialize};

/// Verification state of an obligation.
///
/// The variant carries no presentation; glyphs and colours belong to the
/// reporting layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofStatus {
    /// Not yet verified, or the last attempt was inconclusive.
    #[default]
    Unknown,
    /// The last attempt established the claim.
    Proven,
    /// The last attempt disproved the claim.
    Refuted,
    /// Assumed without proof. Never produced by a strategy.
    Axiom,
}

impl ProofStatus {
    /// Stable lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            ProofStatus::Unknown => "unknown",
            ProofStatus::Proven => "proven",
            ProofStatus::Refuted => "refuted",
            ProofStatus::Axiom => "axiom",
        }
    }

    /// Whether the status is a definite verdict.
    pub fn is_resolved(self) -> bool {
        !matches!(self, ProofStatus::Unknown)
    }
}

impl fmt::Display for ProofStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
