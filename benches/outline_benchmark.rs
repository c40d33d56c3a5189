//! Benchmarks for docoutline structure inference.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic course documents of increasing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docoutline::{DeclaredUnit, EngineOptions, OutlineBuilder, ParagraphRecord};

/// Creates a synthetic course with a table of contents and the given
/// number of units, each with sections, subsections and body text.
fn create_course(unit_count: u32) -> Vec<ParagraphRecord> {
    let mut records = vec![
        ParagraphRecord::new("MÓDULO 0373"),
        ParagraphRecord::with_style("Lenguajes de marcas y sistemas de gestión", "Title"),
        ParagraphRecord::new("Índice"),
    ];

    // Table of contents
    for n in 1..=unit_count {
        records.push(ParagraphRecord::new(format!("UNIDAD {}: Tema {} ........ {}", n, n, n * 10)));
    }

    for n in 1..=unit_count {
        records.push(ParagraphRecord::with_style(format!("UNIDAD {}: Tema {}", n, n), "Heading1"));
        records.push(ParagraphRecord::new(
            "Introducción a la unidad con una explicación general del contenido.",
        ));
        for m in 1..=3 {
            records.push(ParagraphRecord::new(format!("{}.{} Apartado {}", n, m, m)));
            records.push(ParagraphRecord::new(
                "Concepto: Explicación detallada del concepto tratado en este apartado.",
            ));
            for letter in ['a', 'b'] {
                records.push(ParagraphRecord::new(format!("{}.{}.{} Detalle", n, m, letter)));
                records.push(ParagraphRecord::list_item("Elemento de la lista sin punto"));
                records.push(ParagraphRecord::new(
                    "Párrafo de cuerpo con suficiente texto para simular contenido real del curso.",
                ));
            }
        }
    }

    records
}

/// Benchmark outline building at various sizes.
fn bench_outline_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline_building");
    let builder = OutlineBuilder::default();

    for unit_count in [1, 10, 50].iter() {
        let records = create_course(*unit_count);

        group.bench_function(format!("{}_units", unit_count), |b| {
            b.iter(|| builder.build(black_box(&records)));
        });
    }

    group.finish();
}

/// Benchmark the full pipeline including normalization and statistics.
fn bench_full_analysis(c: &mut Criterion) {
    let records = create_course(20);
    let options = EngineOptions::default();

    c.bench_function("analyze_20_units", |b| {
        b.iter(|| docoutline::analyze_with_options(black_box(&records), &options));
    });
}

/// Benchmark block classification and declared unit matching.
fn bench_blocks_and_matching(c: &mut Criterion) {
    let analysis = docoutline::analyze(&create_course(20));
    let declared: Vec<DeclaredUnit> = (1..=8).map(|n| DeclaredUnit::new(n, "")).collect();

    c.bench_function("unit_blocks", |b| {
        b.iter(|| analysis.unit_blocks(black_box(1)));
    });

    c.bench_function("match_declared", |b| {
        b.iter(|| analysis.match_declared(black_box(&declared)));
    });
}

/// Benchmark parallel batch analysis.
fn bench_batch(c: &mut Criterion) {
    let documents: Vec<Vec<ParagraphRecord>> = (0..16).map(|_| create_course(5)).collect();
    let parallel = EngineOptions::default();
    let sequential = EngineOptions::default().sequential();

    let mut group = c.benchmark_group("batch");
    group.bench_function("parallel", |b| {
        b.iter(|| docoutline::analyze_batch(black_box(&documents), &parallel));
    });
    group.bench_function("sequential", |b| {
        b.iter(|| docoutline::analyze_batch(black_box(&documents), &sequential));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_outline_building,
    bench_full_analysis,
    bench_blocks_and_matching,
    bench_batch,
);
criterion_main!(benches);
