mod common;

use proptest::prelude::*;
use qed_sym::{Expr, Oracle, SymbolicOracle};

fn binomial(n: u32, k: u32) -> i64 {
    (0..k).fold(1i64, |acc, i| acc * i64::from(n - i) / i64::from(i + 1))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn binomial_expansion_matches_power(a in -6i64..6, b in -6i64..6, n in 0u32..5) {
        let oracle = SymbolicOracle::new();
        let power = Expr::parse(&format!("({a}*x + {b})^{n}")).unwrap();
        let mut expansion = Expr::zero();
        for k in 0..=n {
            let coeff = binomial(n, k) * a.pow(k) * b.pow(n - k);
            expansion = expansion + Expr::int(coeff) * Expr::sym("x").pow(Expr::int(i64::from(k)));
        }
        prop_assert!(oracle.is_zero(&(power - expansion)).unwrap());
    }

    #[test]
    fn sums_commute_and_scale(a in -20i64..20, b in -20i64..20, c in 1i64..9) {
        let oracle = SymbolicOracle::new();
        let lhs = Expr::parse(&format!("({a}*x + {b}*y)/{c}")).unwrap();
        let rhs = Expr::parse(&format!("{b}*y/{c} + {a}*x/{c}")).unwrap();
        prop_assert!(oracle.is_zero(&(lhs - rhs)).unwrap());
    }

    #[test]
    fn simplified_form_reparses_to_the_same_value(a in -5i64..5, b in 1i64..5, k in 0i64..4) {
        let oracle = SymbolicOracle::new();
        let source = Expr::parse(&format!("{a}*exp({k}*t)/({b}*x + 1) + sqrt({b})*x^{k}")).unwrap();
        let simplified = oracle.simplify(&source).unwrap();
        let reparsed = Expr::parse(&simplified.to_string()).unwrap();
        prop_assert!(oracle.is_zero(&(reparsed - source)).unwrap());
    }

    #[test]
    fn derivative_of_antiderivative_is_identity(c in -4i64..4, k in 0i64..4, rate in 1i64..3) {
        let oracle = SymbolicOracle::new();
        let integrand = Expr::parse(&format!("{c}*x^{k}*exp({rate}*x)")).unwrap();
        let primitive = oracle.integrate(&integrand, "x", None).unwrap();
        let back = oracle.differentiate(&primitive, "x").unwrap();
        prop_assert!(oracle.is_zero(&(back - integrand)).unwrap());
    }
}
