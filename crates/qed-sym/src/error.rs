//! Failures reported by the symbolic oracle.

use qed_core::{ErrorInfo, QedError};
use thiserror::Error;

/// Error raised by parsing or by any oracle operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolicError {
    /// Malformed expression text.
    #[error("parse error at offset {offset}: {message}")]
    Parse {
        /// Byte offset of the offending token.
        offset: usize,
        /// Description of the problem.
        message: String,
    },
    /// A denominator normalised to the zero polynomial.
    #[error("division by zero in {context}")]
    DivisionByZero {
        /// Expression or operation that divided by zero.
        context: String,
    },
    /// The operation is outside what the normal form can decide.
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// A limit or definite integral that does not exist or is infinite.
    #[error("diverges: {0}")]
    Divergent(String),
    /// A limit whose dominant behaviour could not be decided.
    #[error("indeterminate limit: {0}")]
    Indeterminate(String),
    /// Expansion exceeded the configured size guards.
    #[error("expression too large: {0}")]
    TooLarge(String),
}

impl SymbolicError {
    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        SymbolicError::Parse {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn division_by_zero(context: impl Into<String>) -> Self {
        SymbolicError::DivisionByZero {
            context: context.into(),
        }
    }

    /// Stable machine readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            SymbolicError::Parse { .. } => "parse",
            SymbolicError::DivisionByZero { .. } => "division-by-zero",
            SymbolicError::Unsupported(_) => "unsupported",
            SymbolicError::Divergent(_) => "divergent",
            SymbolicError::Indeterminate(_) => "indeterminate",
            SymbolicError::TooLarge(_) => "too-large",
        }
    }
}

impl From<SymbolicError> for QedError {
    fn from(err: SymbolicError) -> Self {
        let info = ErrorInfo::new(err.code(), err.to_string());
        match err {
            SymbolicError::Parse { offset, .. } => {
                QedError::Parse(info.with_context("offset", offset.to_string()))
            }
            _ => QedError::Symbolic(info),
        }
    }
}
