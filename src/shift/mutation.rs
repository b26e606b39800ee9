//! Constraint-biased mutation.

use rand::Rng;

use super::config::ShiftConfig;
use super::schedule::Schedule;
use crate::ga::operators::flip_bit_mutation;

/// Mutates a schedule: with probability `smart_mutation_share` a
/// [`smart_mutate`] nudge, otherwise uniform flip-bit mutation at
/// `flip_bit_rate` per cell.
pub fn mutate<R: Rng>(schedule: &mut Schedule, config: &ShiftConfig, rng: &mut R) {
    if rng.random_bool(config.smart_mutation_share) {
        smart_mutate(schedule, config, rng);
    } else {
        flip_bit_mutation(schedule.cells_mut(), config.flip_bit_rate, rng);
    }
}

/// One light pass that nudges staffing levels toward the bounds.
///
/// First, every overstaffed slot loses one random assigned staff member
/// with probability `smart_mutation_rate`. Then every understaffed slot
/// gains, with the same probability, one random unassigned staff member who
/// is still under the daily cap, if there is one. Unlike repair, this does
/// not guarantee any constraint afterwards.
pub fn smart_mutate<R: Rng>(schedule: &mut Schedule, config: &ShiftConfig, rng: &mut R) {
    let (days, hours) = (schedule.day_count(), schedule.hour_count());

    for day in 0..days {
        for hour in 0..hours {
            if schedule.slot_count(day, hour) > config.max_staff_per_hour
                && rng.random_bool(config.smart_mutation_rate)
            {
                let assigned = schedule.assigned(day, hour);
                let staff = assigned[rng.random_range(0..assigned.len())];
                schedule.set(staff, day, hour, false);
            }
        }
    }

    for day in 0..days {
        for hour in 0..hours {
            if schedule.slot_count(day, hour) < config.min_staff_per_hour
                && rng.random_bool(config.smart_mutation_rate)
            {
                let rested: Vec<usize> = schedule
                    .unassigned(day, hour)
                    .into_iter()
                    .filter(|&s| schedule.day_hours(s, day) < config.max_work_hours_per_day)
                    .collect();
                if !rested.is_empty() {
                    let staff = rested[rng.random_range(0..rested.len())];
                    schedule.set(staff, day, hour, true);
                }
            }
        }
    }
}
