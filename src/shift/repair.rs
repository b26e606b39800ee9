//! Single-pass constraint repair.
//!
//! [`repair`] runs three phases in a fixed order, each taking the schedule
//! by exclusive reference:
//!
//! 1. [`fix_overstaffing`]: unassign random staff from slots above the maximum.
//! 2. [`fix_gaps`]: make every staff-day contiguous by filling its span, then
//!    trim the front or back down to the daily cap.
//! 3. [`fix_understaffing`]: assign staff to slots below the minimum,
//!    preferring staff under the daily cap.
//!
//! Later phases never undo the invariant of an earlier one: gap filling
//! only uses slots with room left, and understaffing only picks staff whose
//! day stays contiguous. After a repair no slot is overstaffed and no
//! staff-day has a gap. Understaffing and overwork may remain; the pass is
//! not iterated to a fixed point.

use rand::Rng;

use super::config::ShiftConfig;
use super::sample_staff;
use super::schedule::{has_gap, worked_span, Schedule};

/// Runs all three repair phases once.
pub fn repair<R: Rng>(schedule: &mut Schedule, config: &ShiftConfig, rng: &mut R) {
    fix_overstaffing(schedule, config.max_staff_per_hour, rng);
    fix_gaps(schedule, config.max_staff_per_hour, config.max_work_hours_per_day, rng);
    fix_understaffing(
        schedule,
        config.min_staff_per_hour,
        config.max_work_hours_per_day,
        rng,
    );
}

/// Phase 1: for every slot above `max_staff`, unassign exactly the excess,
/// chosen uniformly without replacement.
pub fn fix_overstaffing<R: Rng>(schedule: &mut Schedule, max_staff: usize, rng: &mut R) {
    for day in 0..schedule.day_count() {
        for hour in 0..schedule.hour_count() {
            let assigned = schedule.assigned(day, hour);
            if assigned.len() <= max_staff {
                continue;
            }
            for staff in sample_staff(&assigned, assigned.len() - max_staff, rng) {
                schedule.set(staff, day, hour, false);
            }
        }
    }
}

/// Phase 2: closes every gap.
///
/// The span between the first and last worked hour is filled when every
/// missing hour's slot is below `max_staff`; otherwise only the longest
/// worked block is kept (earliest on ties). A block longer than
/// `max_day_hours` is then trimmed hour by hour from the front or the back,
/// chosen uniformly.
pub fn fix_gaps<R: Rng>(
    schedule: &mut Schedule,
    max_staff: usize,
    max_day_hours: usize,
    rng: &mut R,
) {
    for staff in 0..schedule.staff_count() {
        for day in 0..schedule.day_count() {
            if !has_gap(schedule.day(staff, day)) {
                continue;
            }
            let Some((first, last)) = worked_span(schedule.day(staff, day)) else {
                continue;
            };

            let fillable = (first..=last)
                .filter(|&h| !schedule.get(staff, day, h))
                .all(|h| schedule.slot_count(day, h) < max_staff);

            let (start, end) = if fillable {
                (first, last)
            } else {
                longest_block(schedule.day(staff, day))
            };

            let hours = schedule.day_mut(staff, day);
            hours.fill(false);
            hours[start..=end].fill(true);

            let len = end - start + 1;
            if len > max_day_hours {
                let excess = len - max_day_hours;
                if rng.random_bool(0.5) {
                    hours[start..start + excess].fill(false);
                } else {
                    hours[end + 1 - excess..=end].fill(false);
                }
            }
        }
    }
}

/// Inclusive bounds of the longest run of worked hours; earliest on ties.
///
/// The day must contain at least one worked hour.
fn longest_block(day: &[bool]) -> (usize, usize) {
    let mut best = (0, 0);
    let mut best_len = 0;
    let mut run_start = None;
    for (h, &on) in day.iter().chain(std::iter::once(&false)).enumerate() {
        match (on, run_start) {
            (true, None) => run_start = Some(h),
            (false, Some(start)) => {
                if h - start > best_len {
                    best_len = h - start;
                    best = (start, h - 1);
                }
                run_start = None;
            }
            _ => {}
        }
    }
    best
}

/// Phase 3: for every slot below `min_staff`, assigns the missing heads.
///
/// Only staff whose day stays contiguous with the new hour are eligible.
/// Those still under `max_day_hours` are sampled first; if there are too
/// few of them, the sample is drawn from every eligible staff member
/// regardless of load, since overwork costs less than an unfilled slot.
/// If even that pool is too small, all of it is assigned, and a slot with no
/// contiguous candidate stays understaffed.
pub fn fix_understaffing<R: Rng>(
    schedule: &mut Schedule,
    min_staff: usize,
    max_day_hours: usize,
    rng: &mut R,
) {
    for day in 0..schedule.day_count() {
        for hour in 0..schedule.hour_count() {
            let count = schedule.slot_count(day, hour);
            if count >= min_staff {
                continue;
            }
            let needed = min_staff - count;

            let eligible: Vec<usize> = schedule
                .unassigned(day, hour)
                .into_iter()
                .filter(|&s| stays_contiguous(schedule.day(s, day), hour))
                .collect();
            let rested: Vec<usize> = eligible
                .iter()
                .copied()
                .filter(|&s| schedule.day_hours(s, day) < max_day_hours)
                .collect();

            let chosen = if rested.len() >= needed {
                sample_staff(&rested, needed, rng)
            } else {
                sample_staff(&eligible, needed.min(eligible.len()), rng)
            };
            for staff in chosen {
                schedule.set(staff, day, hour, true);
            }
        }
    }
}

/// Whether working `hour` keeps a gap-free day gap-free.
pub(crate) fn stays_contiguous(day: &[bool], hour: usize) -> bool {
    match worked_span(day) {
        None => true,
        Some((first, last)) => hour + 1 >= first && hour <= last + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(staff: usize, days: usize, hours: usize) -> ShiftConfig {
        ShiftConfig::default()
            .with_dimensions(staff, days, hours)
            .with_staff_per_hour(1, 2)
            .with_max_work_hours_per_day(4)
    }

    fn random_schedule(config: &ShiftConfig, rng: &mut StdRng) -> Schedule {
        Schedule::from_cells(
            config.staff_count,
            config.day_count,
            config.hour_count,
            (0..config.gene_count()).map(|_| rng.random_bool(0.5)).collect(),
        )
    }

    #[test]
    fn test_fix_overstaffing_removes_exact_excess() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut schedule = Schedule::new(5, 1, 2);
        for s in 0..5 {
            schedule.set(s, 0, 0, true);
        }
        schedule.set(0, 0, 1, true);

        fix_overstaffing(&mut schedule, 2, &mut rng);
        assert_eq!(schedule.slot_count(0, 0), 2);
        assert_eq!(schedule.slot_count(0, 1), 1);
    }

    #[test]
    fn test_fix_gaps_fills_span() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut schedule = Schedule::new(2, 1, 6);
        schedule.set(0, 0, 1, true);
        schedule.set(0, 0, 4, true);

        fix_gaps(&mut schedule, 2, 8, &mut rng);
        assert_eq!(
            schedule.day(0, 0),
            [false, true, true, true, true, false]
        );
    }

    #[test]
    fn test_fix_gaps_trims_to_daily_cap() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen_front = false;
        let mut seen_back = false;
        for _ in 0..50 {
            let mut schedule = Schedule::new(1, 1, 8);
            schedule.set(0, 0, 0, true);
            schedule.set(0, 0, 7, true);

            fix_gaps(&mut schedule, 1, 5, &mut rng);
            let day = schedule.day(0, 0);
            assert_eq!(schedule.day_hours(0, 0), 5);
            assert!(!has_gap(day));
            if day[7] {
                seen_front = true;
            } else {
                seen_back = true;
            }
        }
        assert!(seen_front && seen_back, "both trim directions should occur");
    }

    #[test]
    fn test_fix_gaps_keeps_longest_block_when_slot_full() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut schedule = Schedule::new(2, 1, 6);
        // Staff 0 works 0 and 2..=4; hour 1 is full because of staff 1.
        for h in [0, 2, 3, 4] {
            schedule.set(0, 0, h, true);
        }
        schedule.set(1, 0, 1, true);

        fix_gaps(&mut schedule, 1, 8, &mut rng);
        assert_eq!(
            schedule.day(0, 0),
            [false, false, true, true, true, false]
        );
        assert_eq!(schedule.slot_count(0, 1), 1);
    }

    #[test]
    fn test_longest_block() {
        assert_eq!(longest_block(&[true, false, true, true]), (2, 3));
        assert_eq!(longest_block(&[true, true, false, true, true]), (0, 1));
        assert_eq!(longest_block(&[false, true, false]), (1, 1));
    }

    #[test]
    fn test_fix_understaffing_prefers_rested_staff() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let mut schedule = Schedule::new(3, 1, 4);
            // Staff 0 is at the cap of 2 and adjacent to hour 2.
            schedule.set(0, 0, 0, true);
            schedule.set(0, 0, 1, true);

            fix_understaffing(&mut schedule, 1, 2, &mut rng);
            assert!(!schedule.get(0, 0, 2), "capped staff must not be picked");
            assert_eq!(schedule.slot_count(0, 2), 1);
            assert_eq!(schedule.slot_count(0, 3), 1);
        }
    }

    #[test]
    fn test_fix_understaffing_falls_back_to_loaded_staff() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut schedule = Schedule::new(1, 1, 3);
        schedule.set(0, 0, 0, true);

        fix_understaffing(&mut schedule, 1, 1, &mut rng);
        // Overwork is tolerated rather than leaving slots empty.
        assert_eq!(schedule.day(0, 0), [true, true, true]);
    }

    #[test]
    fn test_fix_understaffing_never_opens_gap() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut schedule = Schedule::new(2, 1, 5);
        // Both staff work hour 4 only; hour 0 has nobody eligible.
        schedule.set(0, 0, 4, true);
        schedule.set(1, 0, 4, true);

        fix_understaffing(&mut schedule, 1, 8, &mut rng);
        assert!(!has_gap(schedule.day(0, 0)));
        assert!(!has_gap(schedule.day(1, 0)));
        for hour in 0..3 {
            assert_eq!(schedule.slot_count(0, hour), 0);
        }
        assert_eq!(schedule.slot_count(0, 3), 1);
    }

    #[test]
    fn test_stays_contiguous() {
        let day = [false, true, true, false, false];
        assert!(stays_contiguous(&day, 0));
        assert!(stays_contiguous(&day, 3));
        assert!(stays_contiguous(&day, 2));
        assert!(!stays_contiguous(&day, 4));
        assert!(stays_contiguous(&[false; 5], 4));
    }

    #[test]
    fn test_repair_invariants_on_random_schedules() {
        let config = config(6, 3, 8);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut schedule = random_schedule(&config, &mut rng);
            repair(&mut schedule, &config, &mut rng);

            for day in 0..3 {
                for hour in 0..8 {
                    assert!(schedule.slot_count(day, hour) <= 2);
                }
                for staff in 0..6 {
                    assert!(!has_gap(schedule.day(staff, day)));
                }
            }
        }
    }

    #[test]
    fn test_second_repair_only_adds() {
        let config = config(5, 2, 6);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let mut once = random_schedule(&config, &mut rng);
            repair(&mut once, &config, &mut rng);
            let mut twice = once.clone();
            repair(&mut twice, &config, &mut rng);

            for (a, b) in once.cells().iter().zip(twice.cells()) {
                assert!(!a || *b, "second repair must not remove assignments");
            }

            let fully_staffed = (0..2).all(|d| (0..6).all(|h| once.slot_count(d, h) >= 1));
            if fully_staffed {
                assert_eq!(once, twice);
            }
        }
    }
}
