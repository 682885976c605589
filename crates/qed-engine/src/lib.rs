#![deny(missing_docs)]
#![doc = "Proof obligations, the six verification strategies and theory registries."]

/// Obligation claims.
pub mod claim;
/// Strategy method names.
pub mod method;
/// Verification progress observers.
pub mod observer;
/// The proof obligation entity.
pub mod obligation;
/// Registry and oracle policy.
pub mod policy;
/// Axiom, definition and obligation registries.
pub mod registry;
/// Content-addressed verification reports.
pub mod report;
/// Verification status.
pub mod status;
pub mod strategy;
/// Strategy runner and entry points.
pub mod verifier;

pub use claim::Claim;
pub use method::ProofMethod;
pub use observer::{
    NullObserver, ObserverEvent, RecordingObserver, TracingObserver, VerificationObserver,
};
pub use obligation::ProofObligation;
pub use policy::{DuplicatePolicy, Policy};
pub use registry::{Axiom, ObligationKind, Theory};
pub use report::{AxiomEntry, ReportEntry, ReportSummary, VerificationReport};
pub use status::ProofStatus;
pub use strategy::{
    AttemptContext, Contradiction, DerivativeEquality, Induction, IntegralEquality,
    LimitEquality, Outcome, Simplification, Strategy, StrategyFault,
};
pub use verifier::{quiet_attempt_panics, Verifier};
