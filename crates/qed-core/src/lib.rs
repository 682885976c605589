#![deny(missing_docs)]
#![doc = "Shared error, canonical serialization and provenance types for the qed workspace."]

pub mod errors;
pub mod hash;
pub mod provenance;
pub mod serde;

pub use errors::{ErrorInfo, QedError};
pub use hash::stable_hash_string;
pub use provenance::{RunProvenance, SchemaVersion};
pub use crate::serde::{from_json_slice, to_canonical_json_bytes, to_canonical_json_pretty};
