use qed_core::errors::{ErrorInfo, QedError};
use qed_core::hash::stable_hash_string;
use qed_sym::OracleConfig;
use serde::{Deserialize, Serialize};

/// What a registry does when a name is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with a registry error and keep the existing entry.
    #[default]
    Reject,
    /// Replace the existing entry.
    Overwrite,
}

/// Verification policy loaded from YAML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Duplicate-name handling for every registry.
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
    /// Guards passed to the built-in oracle.
    #[serde(default)]
    pub oracle: OracleConfig,
    /// Substitute registered definitions into claims before verification.
    #[serde(default = "Policy::default_expand_definitions")]
    pub expand_definitions: bool,
}

impl Policy {
    const fn default_expand_definitions() -> bool {
        true
    }

    /// Parses a YAML policy; missing keys take their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, QedError> {
        serde_yaml::from_str(text)
            .map_err(|err| QedError::Serde(ErrorInfo::new("policy-yaml", err.to_string())))
    }

    /// Content hash recorded in report provenance.
    pub fn hash(&self) -> Result<String, QedError> {
        stable_hash_string(self)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::default(),
            oracle: OracleConfig::default(),
            expand_definitions: Self::default_expand_definitions(),
        }
    }
}
