mod common;

use proptest::prelude::*;
use qed_engine::{ProofObligation, ProofStatus, Verifier};
use qed_sym::Expr;

proptest! {
    #[test]
    fn simplification_status_is_reproducible(a in -50i64..50, b in -50i64..50, c in -5i64..5) {
        let verifier = Verifier::default();
        let lhs = (Expr::sym("x") + Expr::int(a)) * (Expr::sym("x") + Expr::int(b));
        let rhs = Expr::sym("x").pow(Expr::int(2)) + Expr::int(a + b) * Expr::sym("x") + Expr::int(a * b + c);
        let mut ob = ProofObligation::new("product", lhs, rhs, "simplification");
        let first = verifier.verify_by_simplification(&mut ob);
        let status = ob.status();
        let second = verifier.verify_by_simplification(&mut ob);
        prop_assert_eq!(first, second);
        prop_assert_eq!(ob.status(), status);
        prop_assert_eq!(first, c == 0);
        let expected = if c == 0 { ProofStatus::Proven } else { ProofStatus::Refuted };
        prop_assert_eq!(status, expected);
    }

    #[test]
    fn derivative_of_monomials(k in 1i64..12, coeff in -9i64..9) {
        let verifier = Verifier::default();
        let x = Expr::sym("x");
        let f = Expr::int(coeff) * x.clone().pow(Expr::int(k));
        let df = Expr::int(coeff * k) * x.clone().pow(Expr::int(k - 1));
        let mut ob = ProofObligation::new("power_rule", f.clone(), df.clone(), "derivative");
        prop_assert!(verifier.verify_derivative(&mut ob, &f, "x", &df));
        prop_assert!(!ob.proof_steps().is_empty());
    }
}
