//! Provenance and schema descriptors attached to verification reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance information attached to every serialized report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Schema of the enclosing payload.
    pub schema: SchemaVersion,
    /// Hash of the catalog (or other input) that produced the payload.
    pub input_hash: String,
    /// Hash of the policy in effect during the run.
    pub policy_hash: String,
    /// Version map for all tools involved in the run.
    pub tool_versions: BTreeMap<String, String>,
}

impl RunProvenance {
    /// Creates provenance for the given input and policy hashes, stamped with this crate's version.
    pub fn new(input_hash: impl Into<String>, policy_hash: impl Into<String>) -> Self {
        let mut tool_versions = BTreeMap::new();
        tool_versions.insert(
            "qed-core".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        Self {
            schema: SchemaVersion::default(),
            input_hash: input_hash.into(),
            policy_hash: policy_hash.into(),
            tool_versions,
        }
    }

    /// Records an additional tool version.
    pub fn with_tool(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.tool_versions.insert(name.into(), version.into());
        self
    }
}
