//! Initial population construction.
//!
//! Two builders feed the initial population: [`smart_schedule`], which
//! fills slots toward a random target headcount while respecting the daily
//! cap and contiguity, and [`random_schedule`], which ignores constraints
//! entirely. [`initial_population`] mixes them by the configured ratio and
//! repairs every member.

use rand::Rng;

use super::config::ShiftConfig;
use super::repair::{repair, stays_contiguous};
use super::sample_staff;
use super::schedule::Schedule;

/// Builds a schedule slot by slot, day-major then hour.
///
/// Each slot draws a target headcount uniformly from
/// `min_staff_per_hour..=max_staff_per_hour`. A staff member is available
/// when the extra hour would keep them within the daily cap and keep their
/// day contiguous; `target` of them are sampled, or all of them when fewer
/// are available. Earlier slots shape availability for later ones.
pub fn smart_schedule<R: Rng>(config: &ShiftConfig, rng: &mut R) -> Schedule {
    let mut schedule = Schedule::new(config.staff_count, config.day_count, config.hour_count);

    for day in 0..config.day_count {
        for hour in 0..config.hour_count {
            let target = rng.random_range(config.min_staff_per_hour..=config.max_staff_per_hour);
            let available: Vec<usize> = (0..config.staff_count)
                .filter(|&s| {
                    schedule.day_hours(s, day) < config.max_work_hours_per_day
                        && stays_contiguous(schedule.day(s, day), hour)
                })
                .collect();

            let chosen = if available.len() >= target {
                sample_staff(&available, target, rng)
            } else {
                available
            };
            for staff in chosen {
                schedule.set(staff, day, hour, true);
            }
        }
    }

    schedule
}

/// Builds a schedule with every cell set independently with probability ½.
pub fn random_schedule<R: Rng>(config: &ShiftConfig, rng: &mut R) -> Schedule {
    let cells = (0..config.gene_count()).map(|_| rng.random_bool(0.5)).collect();
    Schedule::from_cells(config.staff_count, config.day_count, config.hour_count, cells)
}

/// Builds `size` schedules: the first `floor(size × smart_generation_ratio)`
/// by smart construction, the rest at random, then repairs all of them.
pub fn initial_population<R: Rng>(config: &ShiftConfig, size: usize, rng: &mut R) -> Vec<Schedule> {
    let smart_count = config.smart_count(size);

    let mut population: Vec<Schedule> = (0..smart_count)
        .map(|_| smart_schedule(config, rng))
        .collect();
    population.extend((smart_count..size).map(|_| random_schedule(config, rng)));

    for schedule in population.iter_mut() {
        repair(schedule, config, rng);
    }
    population
}
