//! Shift scheduling as a GA problem.
//!
//! [`ShiftProblem`] implements [`GaProblem`] for [`Schedule`] genomes, and
//! [`ShiftOptimizer`] is the validated entry point that runs it.

use rand::Rng;
use tracing::info;

use super::config::ShiftConfig;
use super::construct::initial_population;
use super::evaluator::{ShiftEvaluator, ViolationReport};
use super::mutation::mutate;
use super::repair::repair;
use super::roster::Roster;
use super::schedule::Schedule;
use crate::error::Result;
use crate::ga::operators::two_point_crossover;
use crate::ga::{GaProblem, GaResult, GaRunner};

/// Operator set of one shift scheduling run.
///
/// Each problem owns its configuration and resolved evaluator; nothing is
/// shared between instances.
#[derive(Debug, Clone)]
pub struct ShiftProblem {
    config: ShiftConfig,
    evaluator: ShiftEvaluator,
}

impl ShiftProblem {
    /// Validates the configuration and resolves the roster against it.
    pub fn new(config: ShiftConfig, roster: &Roster) -> Result<Self> {
        config.validate()?;
        let evaluator = ShiftEvaluator::new(&config, roster);
        Ok(Self { config, evaluator })
    }

    pub fn config(&self) -> &ShiftConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &ShiftEvaluator {
        &self.evaluator
    }
}

impl GaProblem for ShiftProblem {
    type Genome = Schedule;

    fn create_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Schedule> {
        initial_population(&self.config, size, rng)
    }

    fn evaluate(&self, schedule: &Schedule) -> f64 {
        self.evaluator.evaluate(schedule)
    }

    fn crossover<R: Rng>(&self, a: &mut Schedule, b: &mut Schedule, rng: &mut R) {
        two_point_crossover(a.cells_mut(), b.cells_mut(), rng);
    }

    fn mutate<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) {
        mutate(schedule, &self.config, rng);
    }

    fn repair<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) {
        repair(schedule, &self.config, rng);
    }
}

/// Outcome of a shift optimization run.
#[derive(Debug, Clone)]
pub struct ShiftSolution {
    /// Best schedule of the final population.
    pub schedule: Schedule,
    /// Its fitness (0 is violation-free).
    pub fitness: f64,
    /// Its violation counts.
    pub report: ViolationReport,
    /// Full GA result, including the per-generation history.
    pub run: GaResult<Schedule>,
}

/// Validated shift scheduling optimizer.
///
/// ```
/// use u_shift::ga::GaConfig;
/// use u_shift::shift::{Roster, ShiftConfig, ShiftOptimizer};
///
/// let config = ShiftConfig::default()
///     .with_dimensions(4, 1, 3)
///     .with_staff_per_hour(1, 2)
///     .with_ga(GaConfig::default().with_population_size(10).with_generations(1).with_seed(1));
/// let optimizer = ShiftOptimizer::new(config, &Roster::anonymous(4)).unwrap();
/// let solution = optimizer.run();
/// assert_eq!(solution.run.history.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ShiftOptimizer {
    problem: ShiftProblem,
}

impl ShiftOptimizer {
    /// Validates the configuration and resolves the roster.
    pub fn new(config: ShiftConfig, roster: &Roster) -> Result<Self> {
        let problem = ShiftProblem::new(config, roster)?;
        let config = &problem.config;
        if roster.len() < config.staff_count {
            info!(
                roster = roster.len(),
                staff_count = config.staff_count,
                "roster is shorter than staff_count; extra staff have no preferences"
            );
        }
        Ok(Self { problem })
    }

    pub fn problem(&self) -> &ShiftProblem {
        &self.problem
    }

    /// Runs every configured generation and returns the best schedule.
    pub fn run(&self) -> ShiftSolution {
        let run = GaRunner::run_validated(&self.problem, &self.problem.config.ga);

        let schedule = run.best.genome.clone();
        let report = self.problem.evaluator.stats(&schedule);
        info!(
            fitness = run.best_fitness,
            understaffed = report.understaffed_count,
            overstaffed = report.overstaffed_count,
            overwork = report.overwork_count,
            gaps = report.gap_count,
            pair_violations = report.negative_pair_violations,
            "shift optimization finished"
        );

        ShiftSolution {
            schedule,
            fitness: run.best_fitness,
            report,
            run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::GaConfig;

    fn tiny_config(ga: GaConfig) -> ShiftConfig {
        ShiftConfig::default()
            .with_dimensions(4, 1, 3)
            .with_staff_per_hour(1, 2)
            .with_ga(ga.with_population_size(10).with_generations(1))
    }

    #[test]
    fn test_tiny_run_beats_all_off() {
        let config = tiny_config(GaConfig::default().with_seed(42));
        let optimizer = ShiftOptimizer::new(config, &Roster::anonymous(4)).unwrap();
        let all_off = optimizer.problem().evaluate(&Schedule::new(4, 1, 3));
        assert_eq!(all_off, -3.0 * 2000.0);

        let solution = optimizer.run();
        assert!(solution.fitness >= all_off);
        assert_eq!(solution.report.understaffed_count, 0);
        assert_eq!(solution.run.history.len(), 2);
        assert_eq!(solution.run.history[0].evaluations, 10);
        assert_eq!(solution.fitness, solution.run.history[1].max);
    }

    #[test]
    fn test_tiny_run_fully_staffed_when_always_repaired() {
        let config = tiny_config(GaConfig::default().with_seed(42).with_repair_rate(1.0));
        let optimizer = ShiftOptimizer::new(config, &Roster::anonymous(4)).unwrap();
        let solution = optimizer.run();

        assert_eq!(solution.report.understaffed_count, 0);
        assert!(solution.report.is_feasible());
        assert_eq!(
            solution.fitness,
            -solution
                .report
                .penalty(optimizer.problem().evaluator().penalties())
        );
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let roster = Roster::anonymous(6)
            .with_preference("A", 1, [0, 1, 2])
            .with_incompatible_pair("B", "C");
        let config = ShiftConfig::default()
            .with_dimensions(6, 2, 5)
            .with_ga(
                GaConfig::default()
                    .with_population_size(20)
                    .with_generations(15)
                    .with_seed(9),
            );

        let a = ShiftOptimizer::new(config.clone(), &roster).unwrap().run();
        let b = ShiftOptimizer::new(config, &roster).unwrap().run();
        assert_eq!(a.schedule, b.schedule);
        assert_eq!(a.run.history, b.run.history);
    }

    #[test]
    fn test_search_improves_on_initial_population() {
        let roster = Roster::anonymous(10)
            .with_preference("A", 1, [0, 1, 2, 3])
            .with_preference("B", 2, [4, 5, 6, 7])
            .with_incompatible_pair("C", "D");
        let config = ShiftConfig::default()
            .with_dimensions(10, 3, 8)
            .with_ga(
                GaConfig::default()
                    .with_population_size(40)
                    .with_generations(40)
                    .with_seed(3),
            );

        let solution = ShiftOptimizer::new(config, &roster).unwrap().run();
        let history = &solution.run.history;
        assert_eq!(history.len(), 41);
        assert!(history[40].max >= history[0].mean);
    }

    #[test]
    fn test_problem_rejects_invalid_config() {
        let roster = Roster::anonymous(4);
        let base = tiny_config(GaConfig::default().with_seed(1));

        assert!(ShiftProblem::new(base.clone().with_staff_per_hour(3, 2), &roster).is_err());
        assert!(ShiftProblem::new(base.clone().with_dimensions(4, 0, 3), &roster).is_err());
        assert!(ShiftProblem::new(base.clone(), &roster).is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ShiftConfig::default().with_staff_per_hour(3, 2);
        assert!(ShiftOptimizer::new(config, &Roster::anonymous(26)).is_err());
    }
}
