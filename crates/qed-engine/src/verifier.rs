use std::any::Any;
use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Once;

use qed_sym::{Expr, Interval, LimitPoint, Oracle, SymbolicOracle};

use crate::claim::Claim;
use crate::observer::{TracingObserver, VerificationObserver};
use crate::obligation::ProofObligation;
use crate::policy::Policy;
use crate::status::ProofStatus;
use crate::strategy::{
    AttemptContext, Contradiction, DerivativeEquality, Induction, IntegralEquality,
    LimitEquality, Simplification, Strategy, StrategyFault,
};

thread_local! {
    static IN_ATTEMPT: Cell<bool> = const { Cell::new(false) };
}

/// Routes panics raised inside strategy attempts to `tracing` instead of stderr.
///
/// The default hook prints every panic before [`Verifier::run`] catches it.
/// After this call such panics are logged at debug level; panics outside an
/// attempt still reach the previously installed hook. Only the first call
/// installs anything.
pub fn quiet_attempt_panics() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if IN_ATTEMPT.with(Cell::get) {
                tracing::debug!(panic = %info, "strategy attempt panicked");
            } else {
                previous(info);
            }
        }));
    });
}

/// Runs strategies against obligations.
///
/// [`Verifier::run`] is the only place obligation status changes. Every
/// entry point is total: oracle errors, probe errors and panics raised
/// inside a strategy all end as `Unknown` with a logged reason.
pub struct Verifier {
    oracle: Box<dyn Oracle>,
    observer: Box<dyn VerificationObserver>,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(SymbolicOracle::new())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

impl Verifier {
    /// Verifier over `oracle`, reporting to a [`TracingObserver`].
    pub fn new(oracle: impl Oracle + 'static) -> Self {
        Self {
            oracle: Box::new(oracle),
            observer: Box::new(TracingObserver),
        }
    }

    /// Verifier over the built-in oracle configured by `policy`.
    pub fn from_policy(policy: &Policy) -> Self {
        Self::new(SymbolicOracle::with_config(policy.oracle))
    }

    /// Replaces the observer.
    pub fn with_observer(mut self, observer: impl VerificationObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Oracle used by every strategy.
    pub fn oracle(&self) -> &dyn Oracle {
        self.oracle.as_ref()
    }

    /// Runs one strategy attempt and records its verdict on `obligation`.
    ///
    /// A panic inside the attempt is contained and recorded, but the process
    /// panic hook still runs first; call [`quiet_attempt_panics`] to keep it
    /// off stderr.
    pub fn run(&self, strategy: &dyn Strategy, obligation: &mut ProofObligation) -> bool {
        let method = strategy.method();
        self.observer.started(obligation.name(), method);

        let (result, mut steps) = {
            let mut cx = AttemptContext::new(obligation, self.oracle.as_ref());
            let outer = IN_ATTEMPT.with(|flag| flag.replace(true));
            let result = catch_unwind(AssertUnwindSafe(|| strategy.attempt(&mut cx)));
            IN_ATTEMPT.with(|flag| flag.set(outer));
            (result, cx.into_steps())
        };

        let status = match result {
            Ok(Ok(outcome)) => outcome.status(),
            Ok(Err(fault)) => {
                let message = format!("error: {fault}");
                self.observer.fault(obligation.name(), &message);
                steps.push(message);
                ProofStatus::Unknown
            }
            Err(payload) => {
                let message = format!("error: {method} attempt panicked: {}", panic_message(payload.as_ref()));
                self.observer.fault(obligation.name(), &message);
                steps.push(message);
                ProofStatus::Unknown
            }
        };

        for step in &steps {
            self.observer.step(obligation.name(), step);
        }
        obligation.record(status, steps);
        self.observer.finished(obligation.name(), status);
        status == ProofStatus::Proven
    }

    /// Proves `hypothesis = conclusion` symbolically.
    pub fn verify_by_simplification(&self, obligation: &mut ProofObligation) -> bool {
        self.run(&Simplification, obligation)
    }

    /// Proves the obligation from a base case and an inductive step probe.
    pub fn verify_by_induction<B, S>(
        &self,
        obligation: &mut ProofObligation,
        base_case: B,
        inductive_step: S,
    ) -> bool
    where
        B: Fn() -> Result<bool, StrategyFault>,
        S: Fn() -> Result<bool, StrategyFault>,
    {
        self.run(&Induction::new(base_case, inductive_step), obligation)
    }

    /// Proves the obligation by deriving a contradiction from `assumption`.
    pub fn verify_by_contradiction<P>(
        &self,
        obligation: &mut ProofObligation,
        assumption: Claim,
        leads_to_contradiction: P,
    ) -> bool
    where
        P: Fn(&Claim) -> Result<bool, StrategyFault>,
    {
        self.run(
            &Contradiction::new(assumption, leads_to_contradiction),
            obligation,
        )
    }

    /// Proves that `expression` tends to `expected` as `variable -> point`.
    pub fn verify_limit(
        &self,
        obligation: &mut ProofObligation,
        expression: &Expr,
        variable: &str,
        point: &LimitPoint,
        expected: &Expr,
    ) -> bool {
        let strategy = LimitEquality {
            expression: expression.clone(),
            variable: variable.to_string(),
            point: point.clone(),
            expected: expected.clone(),
        };
        self.run(&strategy, obligation)
    }

    /// Proves that the derivative of `function` is `expected`.
    pub fn verify_derivative(
        &self,
        obligation: &mut ProofObligation,
        function: &Expr,
        variable: &str,
        expected: &Expr,
    ) -> bool {
        let strategy = DerivativeEquality {
            function: function.clone(),
            variable: variable.to_string(),
            expected: expected.clone(),
        };
        self.run(&strategy, obligation)
    }

    /// Proves an integral identity; `bounds = None` means an antiderivative.
    pub fn verify_integral(
        &self,
        obligation: &mut ProofObligation,
        integrand: &Expr,
        variable: &str,
        bounds: Option<&Interval>,
        expected: &Expr,
    ) -> bool {
        let strategy = IntegralEquality {
            integrand: integrand.clone(),
            variable: variable.to_string(),
            bounds: bounds.cloned(),
            expected: expected.clone(),
        };
        self.run(&strategy, obligation)
    }
}
