use criterion::{black_box, criterion_group, criterion_main, Criterion};
use advisory_constraint::{ConstraintSet, VersionConstraint};

fn bench_parse(c: &mut Criterion) {
    let constraints = [
        ">=1.2.3,<4.5.6",
        ">1.0,<=2.0",
        "<=4.5.6",
        ">=1.2.3",
        " >= 1.2 , < 2 ",
        "dev-master",
        "^1.2.3 || ~2.4",
    ];

    c.bench_function("parse_constraints", |b| {
        b.iter(|| {
            for constraint in constraints {
                black_box(VersionConstraint::from_string(black_box(constraint)));
            }
        })
    });
}

fn bench_merge_pair(c: &mut Criterion) {
    let left = VersionConstraint::from_string(">=1.0,<2.0");
    let right = VersionConstraint::from_string(">=1.5,<3.0");

    c.bench_function("merge_overlapping_pair", |b| {
        b.iter(|| black_box(black_box(&left).merge_with(black_box(&right)).ok()))
    });
}

fn bench_fold_set(c: &mut Criterion) {
    let constraints: Vec<VersionConstraint> = (0..50u32)
        .map(|i| VersionConstraint::from_string(&format!(">={}.0,<{}.5", i, i + 1)))
        .chain(std::iter::once(VersionConstraint::from_string("dev-main")))
        .collect();

    c.bench_function("fold_constraint_set", |b| {
        b.iter(|| {
            let set = ConstraintSet::from_constraints(black_box(constraints.clone())).ok();
            black_box(set.map(|s| s.conflict_string()))
        })
    });
}

criterion_group!(benches, bench_parse, bench_merge_pair, bench_fold_set);
criterion_main!(benches);
