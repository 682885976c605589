use std::error::Error;

use clap::{Args, Subcommand};
use qed_engine::{Claim, ProofObligation, ProofStatus, Verifier};
use qed_sym::{Expr, Interval, LimitPoint};

use crate::commands::verify::load_policy;
use crate::render::render_obligation;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// YAML policy overriding the defaults.
    #[arg(long, global = true)]
    pub policy: Option<std::path::PathBuf>,
    #[command(subcommand)]
    pub claim: CheckClaim,
}

#[derive(Subcommand, Debug)]
pub enum CheckClaim {
    /// `lhs = rhs` by symbolic simplification.
    Simplify {
        #[arg(allow_hyphen_values = true)]
        lhs: String,
        #[arg(allow_hyphen_values = true)]
        rhs: String,
    },
    /// `lim_{variable -> point} expression = expected`.
    Limit {
        #[arg(allow_hyphen_values = true)]
        expression: String,
        variable: String,
        /// Finite expression, `oo` or `-oo`.
        #[arg(allow_hyphen_values = true)]
        point: String,
        #[arg(allow_hyphen_values = true)]
        expected: String,
    },
    /// `d expression / d variable = expected`.
    Derivative {
        #[arg(allow_hyphen_values = true)]
        expression: String,
        variable: String,
        #[arg(allow_hyphen_values = true)]
        expected: String,
    },
    /// Integral of `integrand` equals `expected`; indefinite without bounds.
    Integral {
        #[arg(allow_hyphen_values = true)]
        integrand: String,
        variable: String,
        #[arg(allow_hyphen_values = true)]
        expected: String,
        #[arg(long, allow_hyphen_values = true, requires = "upper")]
        lower: Option<String>,
        #[arg(long, allow_hyphen_values = true, requires = "lower")]
        upper: Option<String>,
    },
}

pub fn run(args: &CheckArgs) -> Result<(), Box<dyn Error>> {
    let policy = load_policy(args.policy.as_ref())?;
    let verifier = Verifier::from_policy(&policy);
    let obligation = match &args.claim {
        CheckClaim::Simplify { lhs, rhs } => {
            let mut ob = ProofObligation::new("check", Expr::parse(lhs)?, Expr::parse(rhs)?, "simplification");
            verifier.verify_by_simplification(&mut ob);
            ob
        }
        CheckClaim::Limit {
            expression,
            variable,
            point,
            expected,
        } => {
            let expression = Expr::parse(expression)?;
            let expected = Expr::parse(expected)?;
            let point = LimitPoint::parse(point)?;
            let mut ob = ProofObligation::new(
                "check",
                Claim::text(format!("lim {variable} -> {point} of {expression}")),
                expected.clone(),
                "limit",
            );
            verifier.verify_limit(&mut ob, &expression, variable, &point, &expected);
            ob
        }
        CheckClaim::Derivative {
            expression,
            variable,
            expected,
        } => {
            let function = Expr::parse(expression)?;
            let expected = Expr::parse(expected)?;
            let mut ob = ProofObligation::new(
                "check",
                Claim::text(format!("d/d{variable} {function}")),
                expected.clone(),
                "derivative",
            );
            verifier.verify_derivative(&mut ob, &function, variable, &expected);
            ob
        }
        CheckClaim::Integral {
            integrand,
            variable,
            expected,
            lower,
            upper,
        } => {
            let integrand = Expr::parse(integrand)?;
            let expected = Expr::parse(expected)?;
            let bounds = match (lower, upper) {
                (Some(lower), Some(upper)) => {
                    Some(Interval::new(LimitPoint::parse(lower)?, LimitPoint::parse(upper)?))
                }
                _ => None,
            };
            let mut ob = ProofObligation::new(
                "check",
                Claim::text(format!("integral of {integrand} d{variable}")),
                expected.clone(),
                "integral",
            );
            verifier.verify_integral(&mut ob, &integrand, variable, bounds.as_ref(), &expected);
            ob
        }
    };
    print!("{}", render_obligation(&obligation));
    if obligation.status() == ProofStatus::Proven {
        Ok(())
    } else {
        Err(format!("claim is {}", obligation.status()).into())
    }
}
