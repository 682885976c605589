use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qed_sym::{Expr, LimitPoint, Oracle, SymbolicOracle};

fn binet(n: &str) -> String {
    format!("(((1 + sqrt(5))/2)^({n}) - ((1 - sqrt(5))/2)^({n}))/sqrt(5)")
}

fn bench_simplify(c: &mut Criterion) {
    let oracle = SymbolicOracle::new();
    let composition = Expr::parse("r0*exp(a*t)*exp(I*omega*t) - r0*exp((a + I*omega)*t)")
        .expect("parse composition");
    let trig = Expr::parse("(sin(x) + cos(x))^4").expect("parse trig");
    c.bench_function("simplify_composition_law", |b| {
        b.iter(|| oracle.simplify(black_box(&composition)).expect("simplify"))
    });
    c.bench_function("expand_trig_power", |b| {
        b.iter(|| oracle.expand(black_box(&trig)).expect("expand"))
    });
}

fn bench_calculus(c: &mut Criterion) {
    let oracle = SymbolicOracle::new();
    let ratio = Expr::parse(&format!("({})/({})", binet("n + 1"), binet("n"))).expect("parse");
    let integrand = Expr::parse("x^3*exp(2*x)").expect("parse integrand");
    c.bench_function("fibonacci_ratio_limit", |b| {
        b.iter(|| {
            oracle
                .limit(black_box(&ratio), "n", &LimitPoint::PosInfinity)
                .expect("limit")
        })
    });
    c.bench_function("integrate_by_parts", |b| {
        b.iter(|| oracle.integrate(black_box(&integrand), "x", None).expect("integrate"))
    });
}

criterion_group!(benches, bench_simplify, bench_calculus);
criterion_main!(benches);
