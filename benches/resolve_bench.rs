//! Resolution Benchmark
//!
//! Measures parse, usage analysis and full resolution over generated
//! constructor sources.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fuzzyioc::{Container, Instance, SourceTree, Type, analyze_usage, shape_of};
use std::fmt::Write;
use std::sync::Arc;

// =============================================================================
// Source Generators
// =============================================================================

/// A constructor with `params` parameters, each used by `uses` calls.
fn generate_consumer(params: usize, uses: usize) -> String {
    let names: Vec<String> = (0..params).map(|i| format!("dep{i}")).collect();
    let mut source = format!("function Consumer({}) {{\n", names.join(", "));
    for name in &names {
        let _ = writeln!(source, "    this.{name} = {name};");
    }
    source.push_str("    this.run = function () {\n");
    for (i, name) in names.iter().enumerate() {
        for j in 0..uses {
            let _ = writeln!(source, "        this.{name}.op{i}_{j}(this.{name}.field{i});");
        }
    }
    source.push_str("    };\n}\n");
    source
}

/// The provider that satisfies parameter `i` of [`generate_consumer`].
fn generate_provider(i: usize, uses: usize) -> String {
    let mut source = format!("function Provider{i}() {{\n    this.field{i} = {i};\n");
    for j in 0..uses {
        let _ = writeln!(source, "    this.op{i}_{j} = function (x) {{ return x; }};");
    }
    source.push_str("}\n");
    source
}

fn container_with_providers(count: usize, uses: usize) -> Container {
    let mut container = Container::new();
    for i in 0..count {
        let ty = Type::from_value(format!("Provider{i}"), generate_provider(i, uses), i);
        container.register(&ty).expect("provider registers");
    }
    container
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for params in [1, 8, 32] {
        let source = generate_consumer(params, 4);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(params), &source, |b, source| {
            b.iter(|| black_box(SourceTree::parse("bench.js", source.as_str())))
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    for params in [1, 8, 32] {
        let tree = SourceTree::parse("bench.js", generate_consumer(params, 4)).expect("parses");
        group.bench_with_input(BenchmarkId::new("usage", params), &tree, |b, tree| {
            b.iter(|| black_box(analyze_usage(tree)))
        });
        group.bench_with_input(BenchmarkId::new("shape", params), &tree, |b, tree| {
            b.iter(|| black_box(shape_of(tree)))
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for params in [1, 8, 32] {
        let container = container_with_providers(params, 4);
        group.bench_function(BenchmarkId::from_parameter(params), |b| {
            // Fresh type each iteration so the parse is measured too
            b.iter(|| {
                let consumer = Type::new("Consumer", generate_consumer(params, 4), |args| {
                    Ok(Arc::new(args.len()) as Instance)
                });
                black_box(container.resolve(&consumer))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_analyze, bench_resolve);
criterion_main!(benches);
