//! Core definitions for the GA engine.
//!
//! [`Individual`] pairs a genome with its cached fitness, and [`GaProblem`]
//! is the contract between the generic generational loop and a
//! domain-specific problem.

use rand::Rng;

/// A candidate solution together with its cached fitness.
///
/// Fitness is maximized: higher is better. The cache starts empty and is
/// cleared by [`invalidate`](Individual::invalidate) whenever the genome is
/// changed by an operator; the runner only re-evaluates individuals whose
/// cache is empty.
///
/// ```
/// use u_shift::ga::Individual;
///
/// let mut ind = Individual::new(vec![true, false]);
/// assert!(!ind.is_valid());
/// ind.set_fitness(-10.0);
/// assert_eq!(ind.fitness(), Some(-10.0));
/// ind.invalidate();
/// assert!(!ind.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual<G> {
    /// The genome.
    pub genome: G,
    fitness: Option<f64>,
}

impl<G> Individual<G> {
    /// Wraps a genome with an empty fitness cache.
    pub fn new(genome: G) -> Self {
        Self {
            genome,
            fitness: None,
        }
    }

    /// Returns the cached fitness, if valid.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Stores a freshly computed fitness.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Clears the cached fitness.
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// Whether the cached fitness reflects the current genome.
    pub fn is_valid(&self) -> bool {
        self.fitness.is_some()
    }

    /// Fitness for ranking purposes; an invalid cache ranks below everything.
    pub(crate) fn rank_key(&self) -> f64 {
        self.fitness.unwrap_or(f64::NEG_INFINITY)
    }
}

/// Defines a GA optimization problem.
///
/// Implementors supply the domain-specific pieces of the generational loop:
///
/// 1. **Initialization**: build the whole starting population
/// 2. **Evaluation**: compute a scalar fitness (higher is better)
/// 3. **Crossover**: recombine two genomes in place
/// 4. **Mutation**: perturb one genome in place
/// 5. **Repair**: pull one genome back toward feasibility
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate
/// individuals in parallel when the `parallel` feature is enabled.
pub trait GaProblem: Send + Sync {
    /// The genome (solution encoding) for this problem.
    type Genome: Clone + Send + Sync;

    /// Creates the initial population of exactly `size` genomes.
    fn create_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Self::Genome>;

    /// Evaluates a genome. Must be a pure function of the genome.
    fn evaluate(&self, genome: &Self::Genome) -> f64;

    /// Recombines two genomes in place.
    ///
    /// The default implementation leaves both parents unchanged.
    fn crossover<R: Rng>(&self, _a: &mut Self::Genome, _b: &mut Self::Genome, _rng: &mut R) {}

    /// Mutates a genome in place.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _genome: &mut Self::Genome, _rng: &mut R) {}

    /// Repairs a genome in place.
    ///
    /// The default implementation is a no-op.
    fn repair<R: Rng>(&self, _genome: &mut Self::Genome, _rng: &mut R) {}
}
