//! Genetic Algorithm engine.
//!
//! A generic generational GA built on a trait-based problem seam. Users
//! define their problem by implementing [`GaProblem`], which specifies how
//! to create the initial population, evaluate, crossover, mutate, and repair
//! genomes.
//!
//! # Core Types
//!
//! - [`Individual`]: A genome with an explicitly invalidated fitness cache
//! - [`GaProblem`]: Problem definition: initialization, evaluation and operators
//! - [`GaConfig`]: Algorithm parameters (population size, rates, seed)
//! - [`GaRunner`]: Executes the generational loop
//! - [`GaResult`]: Best individual plus per-generation statistics
//!
//! Fitness is maximized. Every generation is produced by tournament
//! selection, pairwise crossover, mutation and probabilistic repair; only
//! individuals whose cache was invalidated are re-evaluated.
//!
//! # Submodules
//!
//! - [`operators`]: Two-point crossover and flip-bit mutation on flat genomes
//! - [`selection`]: Tournament selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use types::{GaProblem, Individual};
