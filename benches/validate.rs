use brewlint::formula::{InstallStep, PackageFormula, SmokeTest, StepOp};
use brewlint::{validate, validate_batch};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn sample_formula() -> PackageFormula {
    PackageFormula {
        class_name: "StackRefreshrCli".to_string(),
        description: "Bash-powered stack refresher".to_string(),
        homepage: "https://github.com/raymonepping/homebrew-stack-refreshr-cli".to_string(),
        source_url:
            "https://github.com/raymonepping/homebrew-stack-refreshr-cli/archive/refs/tags/v1.0.0.tar.gz"
                .to_string(),
        checksum: "c8891dbce241044fa40727cf777f62f9c86ef5de18540ffab0cbea598c96ff10".to_string(),
        license: "MIT".to_string(),
        version: "1.0.0".to_string(),
        dependencies: vec!["bash".to_string(), "jq".to_string()],
        install_steps: vec![
            InstallStep {
                op: StepOp::Copy,
                path: "bin/stack_refreshr".to_string(),
                shell: None,
            },
            InstallStep {
                op: StepOp::Chmod,
                path: "bin/stack_refreshr".to_string(),
                shell: None,
            },
        ],
        post_install_message: String::new(),
        smoke_test: SmokeTest {
            command: "bin/stack_refreshr --help".to_string(),
            expect_substring: "Usage: stack_refreshr".to_string(),
        },
        ..Default::default()
    }
}

fn messy_formula() -> PackageFormula {
    let mut formula = sample_formula();
    formula.checksum = "REPLACE_WITH_REAL_SHA256".to_string();
    formula.version = "2.0.0".to_string();
    formula.dependencies.push("Bad Name".to_string());
    formula
}

fn bench_validate(c: &mut Criterion) {
    let clean = sample_formula();
    let messy = messy_formula();

    c.bench_function("validate clean record", |b| {
        b.iter(|| validate(black_box(&clean)))
    });

    c.bench_function("validate messy record", |b| {
        b.iter(|| validate(black_box(&messy)))
    });
}

fn bench_validate_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_batch");

    for size in [10usize, 100, 1000] {
        let batch: Vec<PackageFormula> = (0..size).map(|_| sample_formula()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter(|| validate_batch(black_box(batch)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_validate, bench_validate_batch);
criterion_main!(benches);
