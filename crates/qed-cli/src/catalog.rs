//! Theorem catalogs: the built-in one and user supplied YAML files.

use std::fs;
use std::path::Path;

use qed_core::errors::{ErrorInfo, QedError};
use qed_core::hash::stable_hash_string;
use qed_engine::strategy::contradiction::residual_contradiction;
use qed_engine::strategy::induction::SummationInduction;
use qed_engine::{Claim, ObligationKind, Policy, ProofMethod, ProofObligation, Theory, Verifier};
use qed_sym::{Expr, Interval, LimitPoint};
use serde::{Deserialize, Serialize};

const BUILTIN: &str = include_str!("builtin.yaml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxiomSpec {
    pub name: String,
    pub statement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionSpec {
    pub name: String,
    pub expression: Expr,
}

/// How an obligation is discharged, with the strategy's own inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ProofSpec {
    Simplification,
    Induction {
        variable: String,
        term: Expr,
        closed_form: Expr,
        #[serde(default)]
        start: i64,
    },
    Contradiction {
        assumption: String,
    },
    Limit {
        expression: Expr,
        variable: String,
        point: LimitPoint,
        expected: Expr,
    },
    Derivative {
        function: Expr,
        variable: String,
        expected: Expr,
    },
    Integral {
        integrand: Expr,
        variable: String,
        #[serde(default)]
        lower: Option<LimitPoint>,
        #[serde(default)]
        upper: Option<LimitPoint>,
        expected: Expr,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationSpec {
    pub name: String,
    pub kind: ObligationKind,
    pub hypothesis: String,
    pub conclusion: String,
    pub proof: ProofSpec,
}

/// Axioms, definitions and obligations to register and verify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub axioms: Vec<AxiomSpec>,
    #[serde(default)]
    pub definitions: Vec<DefinitionSpec>,
    #[serde(default)]
    pub obligations: Vec<ObligationSpec>,
}

fn catalog_error(code: &str, message: impl Into<String>) -> QedError {
    QedError::Catalog(ErrorInfo::new(code, message))
}

impl ProofSpec {
    fn method(&self) -> ProofMethod {
        match self {
            ProofSpec::Simplification => ProofMethod::Simplification,
            ProofSpec::Induction { .. } => ProofMethod::Induction,
            ProofSpec::Contradiction { .. } => ProofMethod::Contradiction,
            ProofSpec::Limit { .. } => ProofMethod::Limit,
            ProofSpec::Derivative { .. } => ProofMethod::Derivative,
            ProofSpec::Integral { .. } => ProofMethod::Integral,
        }
    }

    fn bounds(&self) -> Result<Option<Interval>, QedError> {
        match self {
            ProofSpec::Integral {
                lower: Some(lower),
                upper: Some(upper),
                ..
            } => Ok(Some(Interval::new(lower.clone(), upper.clone()))),
            ProofSpec::Integral {
                lower: None,
                upper: None,
                ..
            } => Ok(None),
            ProofSpec::Integral { .. } => Err(catalog_error(
                "half-open-bounds",
                "integral bounds need both `lower` and `upper`",
            )),
            _ => Ok(None),
        }
    }

    fn expand(&self, theory: &Theory) -> Result<ProofSpec, QedError> {
        let expand = |expr: &Expr| theory.expand_definitions(expr);
        let point = |point: &LimitPoint| -> Result<LimitPoint, QedError> {
            Ok(match point {
                LimitPoint::Finite(expr) => LimitPoint::Finite(expand(expr)?),
                other => other.clone(),
            })
        };
        Ok(match self {
            ProofSpec::Simplification => ProofSpec::Simplification,
            ProofSpec::Contradiction { assumption } => ProofSpec::Contradiction {
                assumption: theory.expand_claim(&Claim::parse(assumption))?.to_string(),
            },
            ProofSpec::Induction {
                variable,
                term,
                closed_form,
                start,
            } => ProofSpec::Induction {
                variable: variable.clone(),
                term: expand(term)?,
                closed_form: expand(closed_form)?,
                start: *start,
            },
            ProofSpec::Limit {
                expression,
                variable,
                point: at,
                expected,
            } => ProofSpec::Limit {
                expression: expand(expression)?,
                variable: variable.clone(),
                point: point(at)?,
                expected: expand(expected)?,
            },
            ProofSpec::Derivative {
                function,
                variable,
                expected,
            } => ProofSpec::Derivative {
                function: expand(function)?,
                variable: variable.clone(),
                expected: expand(expected)?,
            },
            ProofSpec::Integral {
                integrand,
                variable,
                lower,
                upper,
                expected,
            } => ProofSpec::Integral {
                integrand: expand(integrand)?,
                variable: variable.clone(),
                lower: lower.as_ref().map(point).transpose()?,
                upper: upper.as_ref().map(point).transpose()?,
                expected: expand(expected)?,
            },
        })
    }

    fn verify(
        &self,
        verifier: &Verifier,
        obligation: &mut ProofObligation,
        bounds: Option<&Interval>,
    ) -> bool {
        match self {
            ProofSpec::Simplification => verifier.verify_by_simplification(obligation),
            ProofSpec::Induction {
                variable,
                term,
                closed_form,
                start,
            } => {
                let sum = SummationInduction::new(variable.clone(), term.clone(), closed_form.clone(), *start);
                let oracle = verifier.oracle();
                verifier.verify_by_induction(
                    obligation,
                    || sum.base_case(oracle),
                    || sum.inductive_step(oracle),
                )
            }
            ProofSpec::Contradiction { assumption } => {
                let oracle = verifier.oracle();
                verifier.verify_by_contradiction(obligation, Claim::parse(assumption), |claim| {
                    residual_contradiction(oracle, claim)
                })
            }
            ProofSpec::Limit {
                expression,
                variable,
                point,
                expected,
            } => verifier.verify_limit(obligation, expression, variable, point, expected),
            ProofSpec::Derivative {
                function,
                variable,
                expected,
            } => verifier.verify_derivative(obligation, function, variable, expected),
            ProofSpec::Integral {
                integrand,
                variable,
                expected,
                ..
            } => verifier.verify_integral(obligation, integrand, variable, bounds, expected),
        }
    }
}

impl Catalog {
    /// Catalog shipped with the binary.
    pub fn builtin() -> Result<Self, QedError> {
        Self::from_yaml_str(BUILTIN)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, QedError> {
        let catalog: Catalog =
            serde_yaml::from_str(text).map_err(|err| catalog_error("catalog-yaml", err.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, QedError> {
        let text = fs::read_to_string(path).map_err(|err| {
            QedError::Catalog(
                ErrorInfo::new("catalog-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&text)
    }

    fn validate(&self) -> Result<(), QedError> {
        for obligation in &self.obligations {
            obligation.proof.bounds().map_err(|err| {
                QedError::Catalog(err.info().clone().with_context("obligation", obligation.name.clone()))
            })?;
        }
        Ok(())
    }

    pub fn hash(&self) -> Result<String, QedError> {
        stable_hash_string(self)
    }

    /// Registers every entry into a fresh theory under `policy`.
    pub fn register(&self, policy: &Policy) -> Result<Theory, QedError> {
        let mut theory = Theory::with_duplicates(policy.duplicates);
        for axiom in &self.axioms {
            theory.add_axiom(axiom.name.clone(), Claim::parse(&axiom.statement))?;
        }
        for definition in &self.definitions {
            theory.add_definition(definition.name.clone(), definition.expression.clone())?;
        }
        for spec in &self.obligations {
            let obligation = ProofObligation::new(
                spec.name.clone(),
                Claim::parse(&spec.hypothesis),
                Claim::parse(&spec.conclusion),
                spec.proof.method().label(),
            );
            theory.add_obligation(spec.kind, obligation)?;
        }
        Ok(theory)
    }

    /// Registers and verifies every obligation, one at a time in catalog order.
    pub fn verify(&self, verifier: &Verifier, policy: &Policy) -> Result<Theory, QedError> {
        let mut theory = self.register(policy)?;
        for spec in &self.obligations {
            let proof = if policy.expand_definitions {
                spec.proof.expand(&theory)?
            } else {
                spec.proof.clone()
            };
            let bounds = proof.bounds()?;
            let proven = theory.verify_obligation(spec.kind, &spec.name, policy.expand_definitions, |ob| {
                proof.verify(verifier, ob, bounds.as_ref())
            })?;
            tracing::debug!(obligation = spec.name.as_str(), proven, "catalog entry verified");
        }
        Ok(theory)
    }
}
