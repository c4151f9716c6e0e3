//! Benchmarks for attribute assignment and reads.
//!
//! - Setters: instance-typed vs symbolic cast types (symbolic pays a registry
//!   lookup per write)
//! - Readers: cached values vs first-read default materialization
//!
//! ```bash
//! cargo bench --bench cast_benchmarks
//! ```

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use typed_attrs::prelude::*;
use typed_attrs::types::IntegerType;

fn definition() -> Arc<Definition> {
    let types = Arc::new(TypeRegistry::with_defaults());
    let mut definition = Definition::with_types("Bench", types);
    definition
        .attribute("symbolic", "integer")
        .unwrap()
        .attribute("instance", CastTypeRef::instance(IntegerType::new()))
        .unwrap()
        .attribute_with(
            "decimal",
            "decimal",
            AttributeOptions::new().option("precision", 10).option("scale", 2),
        )
        .unwrap()
        .attribute_with("label", "string", AttributeOptions::new().default("none"))
        .unwrap();
    Arc::new(definition)
}

/// Benchmark writers with different cast type references.
fn setter_benchmarks(c: &mut Criterion) {
    let definition = definition();
    let mut instance = Instance::new(&definition);

    let mut group = c.benchmark_group("attributes/setters");

    group.bench_function("instance_typed", |b| {
        b.iter(|| instance.write("instance", black_box("42")).unwrap());
    });

    group.bench_function("symbolic", |b| {
        b.iter(|| instance.write("symbolic", black_box("42")).unwrap());
    });

    group.bench_function("symbolic_with_options", |b| {
        b.iter(|| instance.write("decimal", black_box("1234.5678")).unwrap());
    });

    group.finish();
}

/// Benchmark readers on cached and unset slots.
fn reader_benchmarks(c: &mut Criterion) {
    let definition = definition();

    let mut group = c.benchmark_group("attributes/readers");

    let mut instance = Instance::build(&definition, [("symbolic", 42)]).unwrap();
    group.bench_function("cached", |b| {
        b.iter(|| black_box(instance.read("symbolic")));
    });

    group.bench_function("default_first_read", |b| {
        b.iter_batched(
            || Instance::new(&definition),
            |mut instance| black_box(instance.read("label")),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, setter_benchmarks, reader_benchmarks);

criterion_main!(benches);
