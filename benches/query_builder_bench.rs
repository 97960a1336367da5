/// Clause builder benchmarks
/// Measures SET and WHERE fragment construction for typical request sizes
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

use jobly::infrastructure::persistence::{
    build_set_clause, sql_for_company_filter, sql_for_job_filter, SqlValue, UpdateSpec,
    COMPANY_COLUMNS,
};

fn set_clause_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_clause");

    for fields in [1usize, 4, 16, 64] {
        let update: UpdateSpec = (0..fields)
            .map(|i| (format!("field_{}", i), SqlValue::Int(i as i64)))
            .collect();

        group.throughput(Throughput::Elements(fields as u64));
        group.bench_with_input(BenchmarkId::from_parameter(fields), &update, |b, update| {
            b.iter(|| build_set_clause(std::hint::black_box(update), COMPANY_COLUMNS).unwrap())
        });
    }

    group.finish();
}

fn where_clause_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("where_clause");

    let company = json!({"nameLike": "net", "minEmployees": "10", "maxEmployees": "300"});
    let company = company.as_object().unwrap();
    group.bench_function("company_all_filters", |b| {
        b.iter(|| sql_for_company_filter(std::hint::black_box(company)).unwrap())
    });

    let job = json!({"title": "engineer", "minSalary": 50000, "hasEquity": "true"});
    let job = job.as_object().unwrap();
    group.bench_function("job_all_filters", |b| {
        b.iter(|| sql_for_job_filter(std::hint::black_box(job)).unwrap())
    });

    let rejected = json!({"minEmployees": 300, "maxEmployees": 10});
    let rejected = rejected.as_object().unwrap();
    group.bench_function("company_inverted_range", |b| {
        b.iter(|| sql_for_company_filter(std::hint::black_box(rejected)).unwrap_err())
    });

    group.finish();
}

criterion_group!(benches, set_clause_benchmarks, where_clause_benchmarks);
criterion_main!(benches);
