//! Benchmark suite for the LIFT front end
//!
//! Measures each pipeline stage in isolation and the whole pipeline on
//! synthesized units of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use lift_core::diagnostics::analyze;
use lift_core::lexer::Lexer;
use lift_core::parser::Parser;
use lift_core::types::TypeChecker;

/// Generate a source unit with the specified number of functions
fn generate_source(num_functions: usize) -> String {
    let mut source = String::from(
        "struct Point { x: int, y: int }\n\
         func scale(p: Point, k: int): Point {\n\
             return Point { x: p.x * k, y: p.y * k };\n\
         }\n",
    );

    for i in 0..num_functions {
        source.push_str(&format!(
            "func work{i}(n: int): int {{\n\
                 let total = 0;\n\
                 for j in range(0, n) {{\n\
                     total = total + j * 2 - 1;\n\
                 }}\n\
                 let label = match total {{\n\
                     0 => \"zero\",\n\
                     _ => \"nonzero\",\n\
                 }};\n\
                 println(label);\n\
                 return total;\n\
             }}\n"
        ));
    }

    source
}

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    for size in [10, 100, 1_000] {
        let source = generate_source(size);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| black_box(Lexer::tokenize(source)));
        });
    }

    group.finish();
}

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    for size in [10, 100, 1_000] {
        let source = generate_source(size);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| black_box(Parser::parse(source)));
        });
    }

    group.finish();
}

fn bench_checker(c: &mut Criterion) {
    let mut group = c.benchmark_group("checker");

    for size in [10, 100, 1_000] {
        let source = generate_source(size);
        let parsed = Parser::parse(&source);
        assert!(parsed.errors.is_empty());
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &parsed.unit,
            |b, unit| {
                b.iter(|| black_box(TypeChecker::new().check_unit(unit)));
            },
        );
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for size in [10, 100, 1_000] {
        let source = generate_source(size);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| black_box(analyze("bench.lift", source)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer,
    bench_parser,
    bench_checker,
    bench_pipeline
);
criterion_main!(benches);
