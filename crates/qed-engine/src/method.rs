use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The six verification strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofMethod {
    /// Zero test of `hypothesis - conclusion`.
    Simplification,
    /// Base case and inductive step probes.
    Induction,
    /// Contradiction derived from an assumption.
    Contradiction,
    /// Limit equals an expected value.
    Limit,
    /// Derivative equals an expected expression.
    Derivative,
    /// Integral equals an expected expression.
    Integral,
}

impl ProofMethod {
    /// All methods in declaration order.
    pub const ALL: [ProofMethod; 6] = [
        ProofMethod::Simplification,
        ProofMethod::Induction,
        ProofMethod::Contradiction,
        ProofMethod::Limit,
        ProofMethod::Derivative,
        ProofMethod::Integral,
    ];

    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            ProofMethod::Simplification => "simplification",
            ProofMethod::Induction => "induction",
            ProofMethod::Contradiction => "contradiction",
            ProofMethod::Limit => "limit",
            ProofMethod::Derivative => "derivative",
            ProofMethod::Integral => "integral",
        }
    }

    /// Label suitable for an obligation's advisory `proof_method`.
    pub fn label(self) -> &'static str {
        match self {
            ProofMethod::Simplification => "Symbolic simplification",
            ProofMethod::Induction => "Mathematical induction",
            ProofMethod::Contradiction => "Proof by contradiction",
            ProofMethod::Limit => "Limit computation",
            ProofMethod::Derivative => "Differentiation",
            ProofMethod::Integral => "Integration",
        }
    }
}

impl fmt::Display for ProofMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProofMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProofMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s.trim())
            .ok_or_else(|| format!("unknown proof method `{s}`"))
    }
}
