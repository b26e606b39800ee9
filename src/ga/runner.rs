//! GA generational loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → (selection → crossover → mutation →
//! repair → re-evaluation) × generations.

use super::config::GaConfig;
use super::selection::{best_index, select_tournament};
use super::types::{GaProblem, Individual};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

/// Fitness statistics recorded for one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation index; 0 is the initial population.
    pub generation: usize,
    /// Number of individuals evaluated during this generation.
    pub evaluations: usize,
    /// Highest fitness in the population.
    pub max: f64,
    /// Mean fitness of the population.
    pub mean: f64,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<G> {
    /// The fittest individual of the final population.
    pub best: Individual<G>,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Statistics for every generation, starting at generation 0.
    pub history: Vec<GenerationStats>,

    /// Total number of fitness evaluations over the run.
    pub evaluations: usize,
}

/// Executes the GA generational loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// With a fixed `seed` the whole run, from initialization to the final
    /// generation, is deterministic.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Genome>> {
        config.validate()?;
        Ok(Self::run_validated(problem, config))
    }

    /// Runs with a configuration the caller has already validated.
    pub(crate) fn run_validated<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> GaResult<P::Genome> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        info!(
            population_size = config.population_size,
            generations = config.generations,
            seed = ?config.seed,
            "starting GA run"
        );

        // 1. Initialize population
        let mut population: Vec<Individual<P::Genome>> = problem
            .create_population(config.population_size, &mut rng)
            .into_iter()
            .map(Individual::new)
            .collect();

        // 2. Evaluate initial population
        let evaluated = evaluate_invalid(problem, &mut population, config.parallel);
        let mut total_evaluations = evaluated;

        let mut history = Vec::with_capacity(config.generations + 1);
        history.push(record(0, evaluated, &population));
        report(&history[0], config);

        // 3. Generational loop
        for gen in 1..=config.generations {
            population = evolve(problem, config, &population, &mut rng);

            let evaluated = evaluate_invalid(problem, &mut population, config.parallel);
            total_evaluations += evaluated;

            let stats = record(gen, evaluated, &population);
            report(&stats, config);
            history.push(stats);
        }

        let best = population.swap_remove(best_index(&population));
        let best_fitness = best.rank_key();

        info!(best_fitness, total_evaluations, "GA run finished");

        GaResult {
            best,
            best_fitness,
            history,
            evaluations: total_evaluations,
        }
    }
}

/// Produces the next generation from the current one.
///
/// Tournament selection fills a population of equal size; successive pairs
/// are crossed over, then every offspring may be mutated and repaired. Any
/// operator that touches a genome clears its cached fitness.
fn evolve<P: GaProblem, R: Rng>(
    problem: &P,
    config: &GaConfig,
    population: &[Individual<P::Genome>],
    rng: &mut R,
) -> Vec<Individual<P::Genome>> {
    let mut offspring =
        select_tournament(population, population.len(), config.tournament_size, rng);

    // Crossover on (0, 1), (2, 3), ...; an odd tail is left alone.
    for pair in offspring.chunks_exact_mut(2) {
        if rng.random_bool(config.crossover_rate) {
            let (left, right) = pair.split_at_mut(1);
            problem.crossover(&mut left[0].genome, &mut right[0].genome, rng);
            left[0].invalidate();
            right[0].invalidate();
        }
    }

    for child in offspring.iter_mut() {
        if rng.random_bool(config.mutation_rate) {
            problem.mutate(&mut child.genome, rng);
            child.invalidate();
        }
    }

    for child in offspring.iter_mut() {
        if rng.random_bool(config.repair_rate) {
            problem.repair(&mut child.genome, rng);
            child.invalidate();
        }
    }

    offspring
}

/// Evaluates every individual whose cached fitness is invalid.
///
/// Returns the number of evaluations performed.
fn evaluate_invalid<P: GaProblem>(
    problem: &P,
    population: &mut [Individual<P::Genome>],
    parallel: bool,
) -> usize {
    let count = population.iter().filter(|ind| !ind.is_valid()).count();
    if count > 0 {
        evaluate_pending(problem, population, parallel);
    }
    count
}

#[cfg(feature = "parallel")]
fn evaluate_pending<P: GaProblem>(
    problem: &P,
    population: &mut [Individual<P::Genome>],
    parallel: bool,
) {
    if parallel {
        population
            .par_iter_mut()
            .filter(|ind| !ind.is_valid())
            .for_each(|ind| {
                let f = problem.evaluate(&ind.genome);
                ind.set_fitness(f);
            });
    } else {
        evaluate_sequential(problem, population);
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_pending<P: GaProblem>(
    problem: &P,
    population: &mut [Individual<P::Genome>],
    _parallel: bool,
) {
    evaluate_sequential(problem, population);
}

fn evaluate_sequential<P: GaProblem>(problem: &P, population: &mut [Individual<P::Genome>]) {
    for ind in population.iter_mut().filter(|ind| !ind.is_valid()) {
        let f = problem.evaluate(&ind.genome);
        ind.set_fitness(f);
    }
}

fn record<G>(generation: usize, evaluations: usize, population: &[Individual<G>]) -> GenerationStats {
    let fitnesses = population.iter().map(Individual::rank_key);
    let max = fitnesses.clone().fold(f64::NEG_INFINITY, f64::max);
    let mean = fitnesses.sum::<f64>() / population.len() as f64;
    GenerationStats {
        generation,
        evaluations,
        max,
        mean,
    }
}

fn report(stats: &GenerationStats, config: &GaConfig) {
    debug!(
        generation = stats.generation,
        evaluations = stats.evaluations,
        max = stats.max,
        mean = stats.mean,
        "generation complete"
    );
    if config.progress_interval > 0 && stats.generation % config.progress_interval == 0 {
        info!(
            "generation {}: max fitness = {:.2}, mean fitness = {:.2}",
            stats.generation, stats.max, stats.mean
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
