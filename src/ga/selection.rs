//! Tournament selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Individual;
use rand::Rng;

/// Tournament selection: draw `k` aspirants with replacement, return the
/// index of the fittest (highest fitness).
///
/// Ties go to the aspirant drawn first.
///
/// Higher `k` = stronger selection pressure.
/// - k=2: light pressure (good for diversity)
/// - k=3-5: moderate pressure (typical default)
/// - k>5: strong pressure (risk of premature convergence)
///
/// # Complexity
/// O(k) per selection
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<G, R: Rng>(population: &[Individual<G>], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );

    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].rank_key() > population[best_idx].rank_key() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Fills a new population of `count` individuals by repeated tournaments.
///
/// Selected individuals are cloned, so the same parent may appear several
/// times and keeps its cached fitness.
pub fn select_tournament<G: Clone, R: Rng>(
    population: &[Individual<G>],
    count: usize,
    k: usize,
    rng: &mut R,
) -> Vec<Individual<G>> {
    (0..count)
        .map(|_| population[tournament(population, k, rng)].clone())
        .collect()
}

/// Index of the fittest individual; ties go to the earliest.
///
/// # Panics
/// Panics if `population` is empty.
pub fn best_index<G>(population: &[Individual<G>]) -> usize {
    assert!(!population.is_empty(), "population must not be empty");

    let mut best = 0;
    for (i, ind) in population.iter().enumerate().skip(1) {
        if ind.rank_key() > population[best].rank_key() {
            best = i;
        }
    }
    best
}
