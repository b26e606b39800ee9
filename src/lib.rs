//! Genetic-algorithm staff shift scheduling.
//!
//! Builds weekly shift schedules that satisfy hourly staffing bounds,
//! daily and weekly working-hour limits, contiguous working days, staff
//! shift preferences and incompatible staff pairs, trading them off through
//! weighted penalties.
//!
//! - **GA**: A generic generational genetic algorithm. Problems implement
//!   [`ga::GaProblem`]; the runner handles tournament selection, crossover,
//!   mutation, repair and fitness caching.
//! - **Shift**: The shift scheduling problem on top of it: schedule
//!   representation, roster parsing, penalty evaluation, smart
//!   construction, mutation and repair.
//!
//! # Example
//!
//! ```
//! use u_shift::ga::GaConfig;
//! use u_shift::shift::{Roster, ShiftConfig, ShiftOptimizer};
//!
//! let roster = Roster::anonymous(8)
//!     .with_preference("A", 1, [0, 1, 2])
//!     .with_incompatible_pair("B", "C");
//! let config = ShiftConfig::default()
//!     .with_dimensions(8, 2, 6)
//!     .with_ga(GaConfig::default().with_population_size(20).with_generations(5).with_seed(7));
//!
//! let solution = ShiftOptimizer::new(config, &roster)?.run();
//! assert!(solution.fitness <= 0.0);
//! # Ok::<(), u_shift::Error>(())
//! ```

pub mod error;
pub mod ga;
pub mod shift;

pub use error::{Error, Result};
