//! Tests for the two-level minimizer

use super::*;
use crate::engine::{Evaluator, LocalScope};
use crate::truth_table::TruthTable;
use crate::EngineConfig;

fn names(count: usize) -> Vec<Arc<str>> {
    ["A", "B", "C", "D"][..count]
        .iter()
        .map(|name| Arc::from(*name))
        .collect()
}

fn table_of(width: usize, function: usize) -> TruthTable {
    let outputs = (0..1usize << width)
        .map(|row| Bit::from((function >> row) & 1 == 1))
        .collect();
    TruthTable::from_outputs(names(width), format!("f{}", function), outputs).unwrap()
}

/// True if `expr` computes `table` for every row
fn agrees(expr: &Expr, table: &TruthTable) -> bool {
    let mut evaluator = Evaluator::new(EngineConfig::default());
    table.rows().all(|(inputs, output)| {
        let scope: LocalScope = table.variables().iter().cloned().zip(inputs).collect();
        evaluator.evaluate(expr, Some(&scope)) == Ok(output)
    })
}

/// Every cube over `width` variables that lies inside `minterms`
fn implicant_cubes(width: usize, minterms: &BTreeSet<usize>) -> Vec<Implicant> {
    let mut cubes = Vec::new();
    for code in 0..3usize.pow(width as u32) {
        let mut inputs = Vec::with_capacity(width);
        let mut rest = code;
        for _ in 0..width {
            inputs.push(match rest % 3 {
                0 => None,
                1 => Some(false),
                _ => Some(true),
            });
            rest /= 3;
        }
        let mut cube = Implicant {
            inputs,
            minterms: BTreeSet::new(),
        };
        cube.minterms = (0..1usize << width).filter(|&m| cube.covers(m)).collect();
        if cube.minterms.is_subset(minterms) {
            cubes.push(cube);
        }
    }
    cubes
}

/// Smallest (term count, literal count) of any cover drawn from `cubes`
fn brute_force_cost(cubes: &[Implicant], minterms: &BTreeSet<usize>) -> (usize, usize) {
    if minterms.is_empty() {
        return (0, 0);
    }
    for size in 1..=cubes.len() {
        let mut best = None;
        search(cubes, minterms, size, 0, &mut Vec::new(), &mut best);
        if let Some(literals) = best {
            return (size, literals);
        }
    }
    unreachable!("the minterms themselves always form a cover")
}

fn search(
    cubes: &[Implicant],
    minterms: &BTreeSet<usize>,
    size: usize,
    start: usize,
    chosen: &mut Vec<usize>,
    best: &mut Option<usize>,
) {
    if chosen.len() == size {
        let covered: BTreeSet<usize> = chosen
            .iter()
            .flat_map(|&i| cubes[i].minterms.iter().copied())
            .collect();
        if &covered == minterms {
            let literals = chosen.iter().map(|&i| cubes[i].literal_count()).sum();
            *best = Some(best.map_or(literals, |b: usize| b.min(literals)));
        }
        return;
    }
    for i in start..cubes.len() {
        chosen.push(i);
        search(cubes, minterms, size, i + 1, chosen, best);
        chosen.pop();
    }
}

fn covered_by(cover: &Cover) -> BTreeSet<usize> {
    cover
        .implicants()
        .iter()
        .flat_map(|cube| cube.minterms().iter().copied())
        .collect()
}

// ========== Known Results ==========

#[test]
fn test_or_like_function() {
    // {00, 01, 11} is not A or B
    let table = table_of(2, 0b1011);
    let expr = table.minimize_sop().to_expr(Span::default());
    assert_eq!(expr.to_string(), "not A or B");
    assert!(agrees(&expr, &table));
}

#[test]
fn test_constants() {
    let zero = table_of(2, 0);
    assert_eq!(zero.minimize_sop().to_string(), "0");
    assert_eq!(zero.minimize_pos().to_string(), "0");

    let one = table_of(2, 0b1111);
    assert_eq!(one.minimize_sop().to_string(), "1");
    assert_eq!(one.minimize_pos().to_string(), "1");
}

#[test]
fn test_xor_needs_two_full_terms() {
    let table = table_of(2, 0b0110);
    let sop = table.minimize_sop();
    assert_eq!(sop.num_implicants(), 2);
    assert_eq!(sop.literal_count(), 4);
    assert_eq!(sop.to_string(), "not A and B or A and not B");

    let pos = table.minimize_pos();
    assert_eq!(pos.to_string(), "(A or B) and (not A or not B)");
}

#[test]
fn test_terms_ordered_by_first_minterm() {
    // m(1, 4, 5): B'C covers 1 and 5, AB' covers 4 and 5
    let table = table_of(3, 0b0011_0010);
    let patterns: Vec<String> = table
        .minimize_sop()
        .implicants()
        .iter()
        .map(|cube| cube.pattern())
        .collect();
    assert_eq!(patterns, vec!["-01", "10-"]);
}

#[test]
fn test_minimize_function_uses_sop() {
    let vars = names(3);
    let minterms = BTreeSet::from([0, 1, 2, 3]);
    assert_eq!(minimize(&vars, &minterms, Span::default()).to_string(), "not A");
}

#[test]
fn test_result_spans_use_given_span() {
    let table = table_of(2, 0b1000);
    let expr = table.minimize_sop().to_expr(Span::new(5, 9));
    assert_eq!(expr.to_string(), "A and B");
    assert_eq!(expr.span, Span::new(5, 9));
}

// ========== Exhaustive Minimality ==========

#[test]
fn test_all_three_variable_functions_are_minimal() {
    for function in 0..256 {
        let table = table_of(3, function);

        let minterms = table.minterms();
        let sop = table.minimize_sop();
        assert_eq!(covered_by(&sop), minterms, "f{} SOP covers wrong set", function);
        assert!(agrees(&sop.to_expr(Span::default()), &table), "f{} SOP", function);
        let expected = brute_force_cost(&implicant_cubes(3, &minterms), &minterms);
        assert_eq!(
            (sop.num_implicants(), sop.literal_count()),
            expected,
            "f{} SOP is not minimal",
            function
        );

        let maxterms = table.maxterms();
        let pos = table.minimize_pos();
        assert!(agrees(&pos.to_expr(Span::default()), &table), "f{} POS", function);
        let expected = brute_force_cost(&implicant_cubes(3, &maxterms), &maxterms);
        assert_eq!(
            (pos.num_implicants(), pos.literal_count()),
            expected,
            "f{} POS is not minimal",
            function
        );
    }
}

#[test]
fn test_sampled_four_variable_functions_are_minimal() {
    for function in (0..65536).step_by(997) {
        let table = table_of(4, function);
        let minterms = table.minterms();
        let sop = table.minimize_sop();
        assert!(agrees(&sop.to_expr(Span::default()), &table), "f{}", function);

        // Some minimum cover always consists of primes only
        let primes = prime_implicants(4, &minterms);
        assert_eq!(
            (sop.num_implicants(), sop.literal_count()),
            brute_force_cost(&primes, &minterms),
            "f{} is not minimal",
            function
        );
    }
}
