//! Differentiation, integration and limits.

pub(crate) mod diff;
pub(crate) mod integrate;
pub(crate) mod limit;
