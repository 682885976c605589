use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qed_engine::{NullObserver, ProofObligation, Verifier};
use qed_sym::{Expr, Interval, LimitPoint, SymbolicOracle};

fn parse(text: &str) -> Expr {
    Expr::parse(text).expect("parse benchmark expression")
}

fn bench_simplification(c: &mut Criterion) {
    let verifier = Verifier::new(SymbolicOracle::new()).with_observer(NullObserver);
    let template = ProofObligation::new(
        "composition",
        parse("r0*exp(a*t)*exp(I*omega*t)"),
        parse("r0*exp((a + I*omega)*t)"),
        "simplification",
    );
    c.bench_function("verify_composition_law", |b| {
        b.iter(|| {
            let mut ob = template.clone();
            black_box(verifier.verify_by_simplification(&mut ob))
        })
    });
}

fn bench_calculus(c: &mut Criterion) {
    let verifier = Verifier::new(SymbolicOracle::new()).with_observer(NullObserver);
    let template = ProofObligation::new("calculus", parse("0"), parse("0"), "calculus");
    let integrand = parse("x^2*exp(-x)");
    let bounds = Interval::new(Expr::zero(), LimitPoint::PosInfinity);
    c.bench_function("verify_gamma_three", |b| {
        b.iter(|| {
            let mut ob = template.clone();
            black_box(verifier.verify_integral(&mut ob, &integrand, "x", Some(&bounds), &Expr::int(2)))
        })
    });
    let spiral = parse("exp((a + I)*theta)");
    let derivative = parse("(a + I)*exp((a + I)*theta)");
    c.bench_function("verify_spiral_derivative", |b| {
        b.iter(|| {
            let mut ob = template.clone();
            black_box(verifier.verify_derivative(&mut ob, &spiral, "theta", &derivative))
        })
    });
}

criterion_group!(benches, bench_simplification, bench_calculus);
criterion_main!(benches);
