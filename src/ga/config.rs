//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use crate::error::{Error, Result};

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, tournament pressure, operator rates,
/// the generation budget, and parallelism. The run always completes every
/// configured generation; there is no early stopping.
///
/// # Defaults
///
/// ```
/// use u_shift::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 150);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_shift::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_tournament_size(5)
///     .with_mutation_rate(0.1)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of individuals in the population.
    ///
    /// Constant across generations. Must be at least 2 so that crossover
    /// has a pair to work on.
    pub population_size: usize,

    /// Number of generations after the initial one.
    pub generations: usize,

    /// Number of aspirants drawn (with replacement) per tournament.
    pub tournament_size: usize,

    /// Probability of applying crossover to each successive pair (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability of mutating an offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Probability of fully repairing an offspring after variation (0.0–1.0).
    pub repair_rate: f64,

    /// Whether to evaluate individuals in parallel using rayon.
    ///
    /// Only has an effect with the `parallel` feature enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Log at `info` level every this many generations (0 disables).
    pub progress_interval: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 150,
            generations: 100,
            tournament_size: 3,
            crossover_rate: 0.8,
            mutation_rate: 0.15,
            repair_rate: 0.3,
            parallel: false,
            seed: None,
            progress_interval: 10,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the repair rate.
    pub fn with_repair_rate(mut self, rate: f64) -> Self {
        self.repair_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the progress logging interval (0 disables).
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(Error::config("population_size must be at least 2"));
        }
        if self.generations == 0 {
            return Err(Error::config("generations must be at least 1"));
        }
        if self.tournament_size == 0 {
            return Err(Error::config("tournament_size must be at least 1"));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("repair_rate", self.repair_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::config(format!("{name} must be within [0, 1]")));
            }
        }
        Ok(())
    }
}
