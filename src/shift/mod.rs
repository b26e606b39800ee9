//! Staff shift scheduling by genetic algorithm.
//!
//! A [`Schedule`] assigns each staff member to each operating hour of each
//! day. Candidate schedules are scored by [`ShiftEvaluator`] against
//! staffing bounds, working-hour limits, per-day contiguity, shift
//! preferences and incompatible pairs, then evolved by the generic
//! [`crate::ga`] engine through [`ShiftProblem`].
//!
//! # Core Types
//!
//! - [`ShiftConfig`]: Dimensions, constraint parameters, penalty weights and GA settings
//! - [`Roster`]: Staff names, hoped-for hours and incompatible pairs
//! - [`Schedule`]: Flat staff-major assignment grid with a 3D view
//! - [`ShiftEvaluator`]: Penalty-based fitness and [`ViolationReport`]
//! - [`ShiftOptimizer`]: Validated entry point returning a [`ShiftSolution`]
//!
//! # Operators
//!
//! - [`construct`]: Smart and random initial schedules
//! - [`mutation`]: Smart nudge or flip-bit mutation
//! - [`repair`]: Overstaffing, gap and understaffing fixes

mod config;
pub mod construct;
mod evaluator;
pub mod mutation;
mod problem;
pub mod repair;
mod roster;
mod schedule;

pub use config::{PenaltyWeights, ShiftConfig};
pub use evaluator::{ShiftEvaluator, ViolationReport};
pub use problem::{ShiftOptimizer, ShiftProblem, ShiftSolution};
pub use roster::Roster;
pub use schedule::{has_gap, worked_span, Schedule};

use rand::Rng;

/// Draws `amount` distinct staff indices from `pool` without replacement.
///
/// # Panics
/// Panics if `amount > pool.len()`.
pub(crate) fn sample_staff<R: Rng + ?Sized>(
    pool: &[usize],
    amount: usize,
    rng: &mut R,
) -> Vec<usize> {
    rand::seq::index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i])
        .collect()
}
