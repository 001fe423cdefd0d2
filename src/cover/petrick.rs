//! Cover selection: essential primes, then Petrick's method on the rest

use super::cubes::Implicant;
use std::collections::{BTreeMap, BTreeSet};

type Candidate = BTreeSet<usize>;

/// Indices into `primes` of a minimum cover of `minterms`
///
/// Essential primes are always taken. The remaining minterms are covered
/// exactly with Petrick's method. Among covers with the fewest implicants,
/// the one with the fewest literals wins, then the one whose sorted pattern
/// list is lexicographically smallest.
///
/// The returned indices are sorted.
pub fn select_cover(primes: &[Implicant], minterms: &BTreeSet<usize>) -> Vec<usize> {
    let chart = coverage_chart(primes, minterms);

    let essential: Candidate = chart
        .values()
        .filter(|candidates| candidates.len() == 1)
        .flat_map(|candidates| candidates.iter().copied())
        .collect();

    let remaining: Vec<&Vec<usize>> = chart
        .iter()
        .filter(|&(&minterm, _)| {
            !essential
                .iter()
                .any(|&prime| primes[prime].minterms.contains(&minterm))
        })
        .map(|(_, candidates)| candidates)
        .collect();

    log::debug!(
        "{} prime(s), {} essential, {} minterm(s) left for Petrick",
        primes.len(),
        essential.len(),
        remaining.len()
    );

    let mut cover = essential;
    if !remaining.is_empty() {
        let products = petrick(&remaining);
        if let Some(best) = products.into_iter().min_by_key(|candidate| cost(primes, candidate)) {
            cover.extend(best);
        }
    }
    cover.into_iter().collect()
}

/// For each minterm, the primes that cover it
fn coverage_chart(primes: &[Implicant], minterms: &BTreeSet<usize>) -> BTreeMap<usize, Vec<usize>> {
    minterms
        .iter()
        .map(|&minterm| {
            let candidates = primes
                .iter()
                .enumerate()
                .filter(|(_, prime)| prime.minterms.contains(&minterm))
                .map(|(i, _)| i)
                .collect();
            (minterm, candidates)
        })
        .collect()
}

/// Expand the product of sums into its minimal sum of products
///
/// Each clause lists the primes covering one minterm. Multiplying out picks
/// one prime per clause; after every step any candidate that is a strict
/// superset of another is absorbed.
fn petrick(clauses: &[&Vec<usize>]) -> BTreeSet<Candidate> {
    let mut products: BTreeSet<Candidate> = BTreeSet::from([Candidate::new()]);
    for clause in clauses {
        let mut expanded = BTreeSet::new();
        for product in &products {
            for &prime in clause.iter() {
                let mut candidate = product.clone();
                candidate.insert(prime);
                expanded.insert(candidate);
            }
        }
        products = absorb(expanded);
        log::trace!("Petrick product has {} term(s)", products.len());
    }
    products
}

fn absorb(products: BTreeSet<Candidate>) -> BTreeSet<Candidate> {
    let mut by_size: Vec<Candidate> = products.into_iter().collect();
    by_size.sort_by_key(|candidate| candidate.len());

    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in by_size {
        if !kept.iter().any(|smaller| smaller.is_subset(&candidate)) {
            kept.push(candidate);
        }
    }
    kept.into_iter().collect()
}

fn cost(primes: &[Implicant], candidate: &Candidate) -> (usize, usize, Vec<String>) {
    let literals = candidate
        .iter()
        .map(|&prime| primes[prime].literal_count())
        .sum();
    let mut patterns: Vec<String> = candidate.iter().map(|&prime| primes[prime].pattern()).collect();
    patterns.sort();
    (candidate.len(), literals, patterns)
}
