#![deny(missing_docs)]
#![deny(unused_imports, dead_code)]
#![doc = "Exact symbolic computation oracle: expressions, parsing, a rational normal form, differentiation, integration and limits."]

pub(crate) mod calculus;
mod display;
/// Oracle error type.
pub mod error;
/// Expression tree, limit points and intervals.
pub mod expr;
pub(crate) mod normal;
/// The `Oracle` trait and the built-in `SymbolicOracle`.
pub mod oracle;
/// Infix expression parser.
pub mod parser;

pub use error::SymbolicError;
pub use expr::{Constant, Expr, Func, Interval, LimitPoint};
pub use oracle::{Oracle, OracleConfig, SymbolicOracle};
pub use parser::parse;
