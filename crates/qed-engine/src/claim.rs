use std::fmt;

use qed_sym::{Expr, SymbolicError};
use serde::{Deserialize, Serialize};

/// Statement attached to an obligation, axiom or assumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Claim {
    /// A symbolic expression.
    Expr(Expr),
    /// An equation between two expressions.
    Equation {
        /// Left-hand side.
        lhs: Expr,
        /// Right-hand side.
        rhs: Expr,
    },
    /// Free text the oracle cannot interpret.
    Text(String),
}

impl Claim {
    /// Free-text claim.
    pub fn text(text: impl Into<String>) -> Self {
        Claim::Text(text.into())
    }

    /// Equation claim.
    pub fn equation(lhs: Expr, rhs: Expr) -> Self {
        Claim::Equation { lhs, rhs }
    }

    /// Parses `lhs = rhs` into an equation and anything else into an
    /// expression. Text that is neither stays a text claim.
    pub fn parse(text: &str) -> Self {
        if let Some((lhs, rhs)) = text.split_once('=') {
            if let (Ok(lhs), Ok(rhs)) = (Expr::parse(lhs), Expr::parse(rhs)) {
                return Claim::Equation { lhs, rhs };
            }
        }
        match Expr::parse(text) {
            Ok(expr) => Claim::Expr(expr),
            Err(_) => Claim::Text(text.to_string()),
        }
    }

    /// Strict variant of [`Claim::parse`] for expression-only inputs.
    pub fn parse_expr(text: &str) -> Result<Self, SymbolicError> {
        Ok(Claim::Expr(Expr::parse(text)?))
    }

    /// The expression, when this claim is one.
    pub fn as_expr(&self) -> Option<&Expr> {
        match self {
            Claim::Expr(expr) => Some(expr),
            _ => None,
        }
    }

    /// Applies `f` to every expression inside the claim.
    pub fn map_exprs(&self, f: impl Fn(&Expr) -> Expr) -> Claim {
        match self {
            Claim::Expr(expr) => Claim::Expr(f(expr)),
            Claim::Equation { lhs, rhs } => Claim::Equation {
                lhs: f(lhs),
                rhs: f(rhs),
            },
            Claim::Text(text) => Claim::Text(text.clone()),
        }
    }
}

impl From<Expr> for Claim {
    fn from(expr: Expr) -> Self {
        Claim::Expr(expr)
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Claim::Expr(expr) => write!(f, "{expr}"),
            Claim::Equation { lhs, rhs } => write!(f, "{lhs} = {rhs}"),
            Claim::Text(text) => f.write_str(text),
        }
    }
}
