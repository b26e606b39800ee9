//! Penalty-based schedule evaluation.
//!
//! [`ShiftEvaluator`] maps a [`Schedule`] to a [`ViolationReport`] of raw
//! violation counts, and to a scalar fitness equal to the negated weighted
//! sum of those counts. A violation-free schedule scores exactly 0.
//!
//! All categories are always evaluated in full:
//!
//! | Category | Unit | Predicate |
//! |---|---|---|
//! | understaffed | slot | headcount < min |
//! | overstaffed | slot | headcount > max (plus `excess_staff` per head over max) |
//! | overwork | staff-day | hours > daily cap |
//! | gap | staff-day | worked hours not contiguous |
//! | hope mismatch | staff-hour | worked XOR hoped |
//! | incompatible pair | pair-slot | both members working |

use tracing::warn;

use super::config::{PenaltyWeights, ShiftConfig};
use super::roster::Roster;
use super::schedule::{has_gap, Schedule};

/// Raw violation counts of one schedule, unweighted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViolationReport {
    /// Slots below the minimum headcount.
    pub understaffed_count: usize,
    /// Slots above the maximum headcount.
    pub overstaffed_count: usize,
    /// Total heads above the maximum, summed over overstaffed slots.
    pub excess_staff: usize,
    /// Staff-days above the daily hour cap.
    pub overwork_count: usize,
    /// Staff-days with a gap.
    pub gap_count: usize,
    /// Staff-hours where assignment and preference disagree.
    pub hope_mismatch_count: usize,
    /// Pair-slots where both members of an incompatible pair work.
    pub negative_pair_violations: usize,
    /// Hours worked over the horizon, per staff index.
    pub staff_hours: Vec<usize>,
}

impl ViolationReport {
    /// Weighted penalty of these counts; fitness is its negation.
    pub fn penalty(&self, weights: &PenaltyWeights) -> f64 {
        self.understaffed_count as f64 * weights.understaffed
            + self.overstaffed_count as f64 * weights.overstaffed
            + self.excess_staff as f64 * weights.excess_staff
            + self.overwork_count as f64 * weights.overwork
            + self.gap_count as f64 * weights.gap
            + self.hope_mismatch_count as f64 * weights.hope_mismatch
            + self.negative_pair_violations as f64 * weights.incompatible_pair
    }

    /// Staff indices whose weekly hours fall outside `[min, max]`.
    pub fn weekly_outliers(&self, min: usize, max: usize) -> Vec<usize> {
        self.staff_hours
            .iter()
            .enumerate()
            .filter(|(_, &h)| h < min || h > max)
            .map(|(s, _)| s)
            .collect()
    }

    /// Whether every hard staffing, workload and contiguity constraint holds.
    pub fn is_feasible(&self) -> bool {
        self.understaffed_count == 0
            && self.overstaffed_count == 0
            && self.overwork_count == 0
            && self.gap_count == 0
    }
}

/// Scores schedules against a configuration and roster.
///
/// Preferences and incompatible pairs are resolved to staff indices once at
/// construction; evaluation is then a pure function of the schedule.
#[derive(Debug, Clone)]
pub struct ShiftEvaluator {
    staff: usize,
    days: usize,
    hours: usize,
    min_staff: usize,
    max_staff: usize,
    max_day_hours: usize,
    penalties: PenaltyWeights,
    /// Hoped-for hours, in the same layout as a schedule.
    hopes: Schedule,
    pairs: Vec<(usize, usize)>,
}

impl ShiftEvaluator {
    /// Resolves the roster against the configured dimensions.
    ///
    /// Staff at index `staff_count` or beyond are outside the schedule and
    /// ignored; staff missing from the roster have no preferences. Pairs
    /// naming unknown or out-of-range staff, or the same person twice, are
    /// skipped with a warning.
    pub fn new(config: &ShiftConfig, roster: &Roster) -> Self {
        let (staff, days, hours) = (config.staff_count, config.day_count, config.hour_count);

        let mut hopes = Schedule::new(staff, days, hours);
        for (s, name) in roster.staff_names().iter().enumerate().take(staff) {
            for day in 0..days {
                for h in roster.hoped_hours(name, day + 1).filter(|&h| h < hours) {
                    hopes.set(s, day, h, true);
                }
            }
        }

        let mut pairs = Vec::new();
        for (a, b) in roster.incompatible_pairs() {
            match (roster.index_of(a), roster.index_of(b)) {
                (Some(i), Some(j)) if i < staff && j < staff && i != j => pairs.push((i, j)),
                _ => warn!(a = %a, b = %b, "ignoring incompatible pair outside the roster"),
            }
        }

        Self {
            staff,
            days,
            hours,
            min_staff: config.min_staff_per_hour,
            max_staff: config.max_staff_per_hour,
            max_day_hours: config.max_work_hours_per_day,
            penalties: config.penalties.clone(),
            hopes,
            pairs,
        }
    }

    /// Fitness of a schedule: 0 when violation-free, negative otherwise.
    pub fn evaluate(&self, schedule: &Schedule) -> f64 {
        -self.stats(schedule).penalty(&self.penalties)
    }

    /// Raw violation counts and per-staff hours of a schedule.
    ///
    /// # Panics
    /// Panics if the schedule dimensions differ from the configuration.
    pub fn stats(&self, schedule: &Schedule) -> ViolationReport {
        assert_eq!(
            (schedule.staff_count(), schedule.day_count(), schedule.hour_count()),
            (self.staff, self.days, self.hours),
            "schedule dimensions must match the configuration"
        );

        let mut report = ViolationReport {
            staff_hours: Vec::with_capacity(self.staff),
            ..ViolationReport::default()
        };

        // Staffing levels
        for day in 0..self.days {
            for hour in 0..self.hours {
                let count = schedule.slot_count(day, hour);
                if count < self.min_staff {
                    report.understaffed_count += 1;
                } else if count > self.max_staff {
                    report.overstaffed_count += 1;
                    report.excess_staff += count - self.max_staff;
                }
            }
        }

        // Per staff-day workload, contiguity and preferences
        for s in 0..self.staff {
            report.staff_hours.push(schedule.week_hours(s));
            for day in 0..self.days {
                let worked = schedule.day(s, day);
                if worked.iter().filter(|&&on| on).count() > self.max_day_hours {
                    report.overwork_count += 1;
                }
                if has_gap(worked) {
                    report.gap_count += 1;
                }
                report.hope_mismatch_count += worked
                    .iter()
                    .zip(self.hopes.day(s, day))
                    .filter(|(on, hoped)| on != hoped)
                    .count();
            }
        }

        // Incompatible pairs
        for &(a, b) in &self.pairs {
            for day in 0..self.days {
                report.negative_pair_violations += schedule
                    .day(a, day)
                    .iter()
                    .zip(schedule.day(b, day))
                    .filter(|(&x, &y)| x && y)
                    .count();
            }
        }

        report
    }

    /// Penalty weights in use.
    pub fn penalties(&self) -> &PenaltyWeights {
        &self.penalties
    }

    /// Resolved incompatible pairs, as staff indices.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }
}
