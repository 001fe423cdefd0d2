//! Benchmarks for two-level minimization, gate synthesis and whole runs
//!
//! Minimization inputs are pseudo-random output columns from a fixed seed so
//! runs are comparable.

use bitlogic::transform::{to_gate_form, UniversalGate};
use bitlogic::{Bit, EngineConfig, Expr, Minimizable, TruthTable};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

const NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// Linear congruential generator, enough to spread ones over a table
fn random_table(width: usize, seed: u64) -> TruthTable {
    let mut state = seed;
    let outputs = (0..1usize << width)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            if (state >> 33) & 1 == 1 {
                Bit::One
            } else {
                Bit::Zero
            }
        })
        .collect();
    let variables: Vec<Arc<str>> = NAMES[..width].iter().map(|&n| Arc::from(n)).collect();
    TruthTable::from_outputs(variables, "F", outputs).expect("output column matches width")
}

fn bench_minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");

    for width in 3..=6 {
        let tables: Vec<TruthTable> = (0..8).map(|seed| random_table(width, seed)).collect();
        group.throughput(Throughput::Elements(tables.len() as u64));

        group.bench_with_input(BenchmarkId::new("sop", width), &tables, |b, tables| {
            b.iter(|| {
                for table in tables {
                    black_box(table.minimize_sop());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("pos", width), &tables, |b, tables| {
            b.iter(|| {
                for table in tables {
                    black_box(table.minimize_pos());
                }
            });
        });
    }

    group.finish();
}

fn bench_gate_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_synthesis");

    let sources = [
        ("small", "A xor B"),
        ("medium", "(A imply B) and (C xnor D) or not (A nor C)"),
        (
            "large",
            "(A xor B xor C xor D) and (E imply F) or (A nimply D) and not (B nand E) xnor C",
        ),
    ];

    for (name, source) in sources {
        let expr = Expr::parse(source).expect("benchmark expression parses");
        group.bench_with_input(BenchmarkId::new("nand", name), &expr, |b, expr| {
            b.iter(|| black_box(to_gate_form(expr, UniversalGate::Nand)));
        });
        group.bench_with_input(BenchmarkId::new("nor", name), &expr, |b, expr| {
            b.iter(|| black_box(to_gate_form(expr, UniversalGate::Nor)));
        });
    }

    group.finish();
}

fn bench_programs(c: &mut Criterion) {
    let mut group = c.benchmark_group("programs");

    let programs = [
        (
            "adder",
            "SUM(A, B, C) = A xor B xor C;
             CARRY(A, B, C) = A and B or C and (A xor B);
             PRINT(SUM(1, 1, 1), CARRY(1, 1, 0));
             TABLE(SUM(A, B, C));
             SHOW(SOLVE_SOP(CARRY(A, B, C)));",
        ),
        (
            "tables",
            "MUX(S : A, B) = table { 0: A; 1: B; }
             XOR(A, B) = table { 01: 1; 10: 1; }
             PRINT(MUX(0, 1, 0), MUX(1, 0, 1), XOR(1, 0));
             SHOW(SOLVE_POS(MUX(S, A, B)));",
        ),
        (
            "solve5",
            "SHOW(SOLVE_SOP(A and B or C and D or not E and A or B xor D));
             SHOW(TO_NAND(A and B or C));",
        ),
    ];

    for (name, source) in programs {
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, source| {
            b.iter(|| black_box(bitlogic::run_source(source, EngineConfig::default())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_minimize, bench_gate_synthesis, bench_programs);
criterion_main!(benches);
