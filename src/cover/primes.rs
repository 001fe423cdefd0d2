//! Prime implicant generation (Quine-McCluskey)

use super::cubes::Implicant;
use std::collections::{BTreeMap, BTreeSet};

type Terms = BTreeMap<Vec<Option<bool>>, Implicant>;

/// All prime implicants of the function that is 1 exactly on `minterms`
///
/// Terms are grouped by their number of 1 inputs and only neighbouring
/// groups are compared, since cubes that differ in one fixed input must
/// differ in that count by exactly one. Each round either merges a term or
/// keeps it as prime; a round adds one don't-care per term, so the loop ends
/// after at most `width + 1` rounds.
///
/// The result is sorted by pattern.
pub fn prime_implicants(width: usize, minterms: &BTreeSet<usize>) -> Vec<Implicant> {
    let mut current: Terms = minterms
        .iter()
        .map(|&index| {
            let cube = Implicant::from_minterm(index, width);
            (cube.inputs.clone(), cube)
        })
        .collect();
    let mut primes = Vec::new();

    for round in 0..=width {
        if current.is_empty() {
            break;
        }
        let next = merge_round(&current, &mut primes);
        log::trace!(
            "Round {}: {} term(s) merged into {}, {} prime(s) so far",
            round,
            current.len(),
            next.len(),
            primes.len()
        );
        current = next;
    }

    primes.extend(current.into_values());
    primes.sort_by_key(|cube| cube.pattern());
    primes
}

/// Merge every adjacent pair once; terms that merged with nothing are prime
fn merge_round(current: &Terms, primes: &mut Vec<Implicant>) -> Terms {
    let mut groups: BTreeMap<usize, Vec<&Implicant>> = BTreeMap::new();
    for cube in current.values() {
        groups.entry(cube.ones()).or_default().push(cube);
    }

    let mut merged: BTreeSet<&[Option<bool>]> = BTreeSet::new();
    let mut next = Terms::new();
    for (ones, group) in &groups {
        let Some(neighbours) = groups.get(&(ones + 1)) else {
            continue;
        };
        for &low in group {
            for &high in neighbours {
                if let Some(combined) = low.combine(high) {
                    merged.insert(&low.inputs);
                    merged.insert(&high.inputs);
                    next.entry(combined.inputs.clone())
                        .and_modify(|existing| existing.minterms.extend(&combined.minterms))
                        .or_insert(combined);
                }
            }
        }
    }

    primes.extend(
        current
            .values()
            .filter(|cube| !merged.contains(cube.inputs.as_slice()))
            .cloned(),
    );
    next
}
