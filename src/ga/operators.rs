//! Generic linear-genome operators.
//!
//! Crossover and mutation operators for flat gene vectors. They operate on
//! slices and know nothing about what the genes mean; the shift domain uses
//! them on its flat boolean assignment grid.
//!
//! # Crossover Operators
//!
//! - [`two_point_crossover`]: exchange the segment between two cut points
//!
//! # Mutation Operators
//!
//! - [`flip_bit_mutation`]: flip each bit independently, O(n)
//!
//! # References
//!
//! - De Jong (1975), "An Analysis of the Behavior of a Class of Genetic
//!   Adaptive Systems"
//! - Spears & De Jong (1991), "An Analysis of Multi-Point Crossover"

use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Two-point crossover, in place.
///
/// Picks two distinct cut points `1 <= c1 < c2 <= n` and swaps the genes in
/// `[c1, c2)` between the two parents. The first gene is never exchanged,
/// and swapping equal segments leaves both parents unchanged.
///
/// Genomes shorter than two genes are left untouched.
///
/// # Complexity
/// O(n) time, O(1) space
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn two_point_crossover<T, R: Rng>(a: &mut [T], b: &mut [T], rng: &mut R) {
    let n = a.len();
    assert_eq!(n, b.len(), "parents must have equal length");
    if n < 2 {
        return;
    }

    let (start, end) = cut_points(n, rng);
    a[start..end].swap_with_slice(&mut b[start..end]);
}

/// Draws two distinct cut points in `1..=n`, returned ascending.
fn cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let c1 = rng.random_range(1..=n);
    let mut c2 = rng.random_range(1..n);
    if c2 >= c1 {
        c2 += 1;
        (c1, c2)
    } else {
        (c2, c1)
    }
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Flip-bit mutation: each bit is inverted independently with probability
/// `indpb`.
///
/// # Complexity
/// O(n)
pub fn flip_bit_mutation<R: Rng>(bits: &mut [bool], indpb: f64, rng: &mut R) {
    let p = indpb.clamp(0.0, 1.0);
    for bit in bits.iter_mut() {
        if rng.random_bool(p) {
            *bit = !*bit;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
