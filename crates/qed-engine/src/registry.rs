use std::collections::btree_map::{BTreeMap, Entry};
use std::fmt;

use qed_core::errors::{ErrorInfo, QedError};
use qed_sym::Expr;
use serde::{Deserialize, Serialize};

use crate::claim::Claim;
use crate::obligation::ProofObligation;
use crate::policy::DuplicatePolicy;
use crate::status::ProofStatus;

/// Assumed-true statement; never verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axiom {
    /// Registry key.
    pub name: String,
    /// Assumed statement.
    pub statement: Claim,
}

impl Axiom {
    /// Always [`ProofStatus::Axiom`].
    pub fn status(&self) -> ProofStatus {
        ProofStatus::Axiom
    }
}

/// Registry holding proof obligations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObligationKind {
    /// Supporting result.
    Lemma,
    /// Main result.
    Theorem,
    /// Consequence of a theorem.
    Corollary,
}

impl ObligationKind {
    /// Every kind in report order.
    pub const ALL: [ObligationKind; 3] = [
        ObligationKind::Lemma,
        ObligationKind::Theorem,
        ObligationKind::Corollary,
    ];

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            ObligationKind::Lemma => "lemma",
            ObligationKind::Theorem => "theorem",
            ObligationKind::Corollary => "corollary",
        }
    }
}

impl fmt::Display for ObligationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owned store of axioms, definitions and obligations, keyed by name.
///
/// Each registry is independent: the same name may appear as an axiom and
/// as a lemma. Within one registry the [`DuplicatePolicy`] decides whether a
/// second insertion fails or replaces the first. Iteration is in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theory {
    duplicates: DuplicatePolicy,
    axioms: BTreeMap<String, Axiom>,
    definitions: BTreeMap<String, Expr>,
    lemmas: BTreeMap<String, ProofObligation>,
    theorems: BTreeMap<String, ProofObligation>,
    corollaries: BTreeMap<String, ProofObligation>,
}

fn insert<V>(
    map: &mut BTreeMap<String, V>,
    policy: DuplicatePolicy,
    registry: &str,
    name: String,
    value: V,
) -> Result<(), QedError> {
    match map.entry(name) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
        Entry::Occupied(mut slot) => match policy {
            DuplicatePolicy::Overwrite => {
                tracing::debug!(registry, name = slot.key().as_str(), "overwriting registry entry");
                slot.insert(value);
                Ok(())
            }
            DuplicatePolicy::Reject => Err(QedError::Registry(
                ErrorInfo::new("duplicate-name", format!("{registry} `{}` is already registered", slot.key()))
                    .with_context("registry", registry)
                    .with_context("name", slot.key().clone())
                    .with_hint("choose a unique name or set `duplicates: overwrite`"),
            )),
        },
    }
}

fn missing(registry: &str, name: &str) -> QedError {
    QedError::Registry(
        ErrorInfo::new("unknown-name", format!("no {registry} named `{name}`"))
            .with_context("registry", registry)
            .with_context("name", name),
    )
}

impl Theory {
    /// Empty theory that rejects duplicate names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty theory with the given duplicate policy.
    pub fn with_duplicates(duplicates: DuplicatePolicy) -> Self {
        Self {
            duplicates,
            ..Self::default()
        }
    }

    /// Duplicate policy in effect.
    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Registers an axiom.
    pub fn add_axiom(
        &mut self,
        name: impl Into<String>,
        statement: impl Into<Claim>,
    ) -> Result<(), QedError> {
        let name = name.into();
        let axiom = Axiom {
            name: name.clone(),
            statement: statement.into(),
        };
        insert(&mut self.axioms, self.duplicates, "axiom", name, axiom)
    }

    /// Registers a named expression.
    pub fn add_definition(&mut self, name: impl Into<String>, expression: Expr) -> Result<(), QedError> {
        insert(
            &mut self.definitions,
            self.duplicates,
            "definition",
            name.into(),
            expression,
        )
    }

    /// Registers an obligation under its own name.
    pub fn add_obligation(&mut self, kind: ObligationKind, obligation: ProofObligation) -> Result<(), QedError> {
        let duplicates = self.duplicates;
        let name = obligation.name().to_string();
        insert(self.registry_mut(kind), duplicates, kind.as_str(), name, obligation)
    }

    /// Registers a lemma.
    pub fn add_lemma(&mut self, obligation: ProofObligation) -> Result<(), QedError> {
        self.add_obligation(ObligationKind::Lemma, obligation)
    }

    /// Registers a theorem.
    pub fn add_theorem(&mut self, obligation: ProofObligation) -> Result<(), QedError> {
        self.add_obligation(ObligationKind::Theorem, obligation)
    }

    /// Registers a corollary.
    pub fn add_corollary(&mut self, obligation: ProofObligation) -> Result<(), QedError> {
        self.add_obligation(ObligationKind::Corollary, obligation)
    }

    fn registry(&self, kind: ObligationKind) -> &BTreeMap<String, ProofObligation> {
        match kind {
            ObligationKind::Lemma => &self.lemmas,
            ObligationKind::Theorem => &self.theorems,
            ObligationKind::Corollary => &self.corollaries,
        }
    }

    fn registry_mut(&mut self, kind: ObligationKind) -> &mut BTreeMap<String, ProofObligation> {
        match kind {
            ObligationKind::Lemma => &mut self.lemmas,
            ObligationKind::Theorem => &mut self.theorems,
            ObligationKind::Corollary => &mut self.corollaries,
        }
    }

    /// Axiom by name.
    pub fn axiom(&self, name: &str) -> Option<&Axiom> {
        self.axioms.get(name)
    }

    /// Definition by name.
    pub fn definition(&self, name: &str) -> Option<&Expr> {
        self.definitions.get(name)
    }

    /// Obligation by kind and name.
    pub fn obligation(&self, kind: ObligationKind, name: &str) -> Option<&ProofObligation> {
        self.registry(kind).get(name)
    }

    /// Mutable obligation by kind and name.
    pub fn obligation_mut(&mut self, kind: ObligationKind, name: &str) -> Option<&mut ProofObligation> {
        self.registry_mut(kind).get_mut(name)
    }

    /// Axioms in name order.
    pub fn axioms(&self) -> impl Iterator<Item = &Axiom> {
        self.axioms.values()
    }

    /// Definitions in name order.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.definitions.iter().map(|(name, expr)| (name.as_str(), expr))
    }

    /// Obligations of one kind in name order.
    pub fn obligations(&self, kind: ObligationKind) -> impl Iterator<Item = &ProofObligation> {
        self.registry(kind).values()
    }

    /// Lemmas, then theorems, then corollaries.
    pub fn all_obligations(&self) -> impl Iterator<Item = (ObligationKind, &ProofObligation)> {
        ObligationKind::ALL
            .into_iter()
            .flat_map(move |kind| self.obligations(kind).map(move |ob| (kind, ob)))
    }

    /// Substitutes definitions into `expr` until no defined name remains.
    ///
    /// Definitions may refer to each other; a cycle is a registry error.
    pub fn expand_definitions(&self, expr: &Expr) -> Result<Expr, QedError> {
        let mut current = expr.clone();
        for _ in 0..=self.definitions.len() {
            let pending: Vec<String> = current
                .free_symbols()
                .into_iter()
                .filter(|name| self.definitions.contains_key(name))
                .collect();
            if pending.is_empty() {
                return Ok(current);
            }
            for name in pending {
                if let Some(value) = self.definitions.get(&name) {
                    current = current.substitute(&name, value);
                }
            }
        }
        Err(QedError::Registry(
            ErrorInfo::new("definition-cycle", format!("definitions never settle in `{expr}`"))
                .with_hint("a definition refers back to itself"),
        ))
    }

    /// [`Theory::expand_definitions`] applied to every expression in a claim.
    pub fn expand_claim(&self, claim: &Claim) -> Result<Claim, QedError> {
        Ok(match claim {
            Claim::Expr(expr) => Claim::Expr(self.expand_definitions(expr)?),
            Claim::Equation { lhs, rhs } => Claim::Equation {
                lhs: self.expand_definitions(lhs)?,
                rhs: self.expand_definitions(rhs)?,
            },
            Claim::Text(text) => Claim::Text(text.clone()),
        })
    }

    /// Runs `verify` on a registered obligation.
    ///
    /// With `expand` set the strategy sees a copy whose claims have the
    /// definitions substituted in; its verdict and new steps are then
    /// recorded on the stored obligation, which keeps its original claims.
    pub fn verify_obligation<F>(
        &mut self,
        kind: ObligationKind,
        name: &str,
        expand: bool,
        verify: F,
    ) -> Result<bool, QedError>
    where
        F: FnOnce(&mut ProofObligation) -> bool,
    {
        if !expand {
            let stored = self
                .obligation_mut(kind, name)
                .ok_or_else(|| missing(kind.as_str(), name))?;
            return Ok(verify(stored));
        }
        let mut working = self
            .obligation(kind, name)
            .ok_or_else(|| missing(kind.as_str(), name))?
            .try_map_claims(|claim| self.expand_claim(claim))?;
        let before = working.proof_steps().len();
        let proven = verify(&mut working);
        let steps = working.proof_steps()[before..].to_vec();
        let stored = self
            .obligation_mut(kind, name)
            .ok_or_else(|| missing(kind.as_str(), name))?;
        stored.record(working.status(), steps);
        Ok(proven)
    }
}
