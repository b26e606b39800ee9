//! Shift scheduling configuration.
//!
//! [`ShiftConfig`] fixes the problem dimensions, the staffing and workload
//! bounds, the construction and mutation biases, the penalty weights, and
//! the GA parameters of a run. It is built once and never changes during
//! the search.

use crate::error::{Error, Result};
use crate::ga::GaConfig;

/// Weights of the seven penalty categories.
///
/// Every weight must be strictly positive; the evaluator subtracts them
/// from a zero starting fitness.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PenaltyWeights {
    /// Per slot staffed below the minimum.
    pub understaffed: f64,
    /// Per slot staffed above the maximum.
    pub overstaffed: f64,
    /// Per staff member above the maximum, on top of `overstaffed`.
    pub excess_staff: f64,
    /// Per staff-day over the daily hour cap (flat, not scaled).
    pub overwork: f64,
    /// Per staff-day whose worked hours are not contiguous.
    pub gap: f64,
    /// Per hour where assignment and preference disagree.
    pub hope_mismatch: f64,
    /// Per slot where both members of an incompatible pair work.
    pub incompatible_pair: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            understaffed: 2000.0,
            overstaffed: 500.0,
            excess_staff: 200.0,
            overwork: 1000.0,
            gap: 300.0,
            hope_mismatch: 50.0,
            incompatible_pair: 10.0,
        }
    }
}

impl PenaltyWeights {
    fn validate(&self) -> Result<()> {
        for (name, weight) in [
            ("understaffed", self.understaffed),
            ("overstaffed", self.overstaffed),
            ("excess_staff", self.excess_staff),
            ("overwork", self.overwork),
            ("gap", self.gap),
            ("hope_mismatch", self.hope_mismatch),
            ("incompatible_pair", self.incompatible_pair),
        ] {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(Error::config(format!(
                    "penalty weight `{name}` must be positive and finite, got {weight}"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for a shift scheduling run.
///
/// # Defaults
///
/// ```
/// use u_shift::shift::ShiftConfig;
///
/// let config = ShiftConfig::default();
/// assert_eq!(config.staff_count, 26);
/// assert_eq!(config.hour_count, 13);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShiftConfig {
    /// Number of staff; defines staff indices `0..staff_count`.
    pub staff_count: usize,
    /// Number of days in the horizon.
    pub day_count: usize,
    /// Number of schedulable hours per day.
    pub hour_count: usize,
    /// Clock hour of hour offset 0.
    pub start_hour: u32,

    /// Minimum headcount per slot.
    pub min_staff_per_hour: usize,
    /// Maximum headcount per slot.
    pub max_staff_per_hour: usize,
    /// Daily hour cap per staff member.
    pub max_work_hours_per_day: usize,
    /// Weekly hour ceiling, used for reporting.
    pub max_work_hours_per_week: usize,
    /// Weekly hour floor, used for reporting.
    pub min_work_hours_per_week: usize,

    /// Fraction of the initial population built by constraint-biased
    /// construction (0.0–1.0); the rest is uniform random.
    pub smart_generation_ratio: f64,
    /// Probability that a mutation uses the smart nudge rather than
    /// uniform bit flipping (0.0–1.0).
    pub smart_mutation_share: f64,
    /// Per-slot probability of a smart-mutation nudge (0.0–1.0).
    pub smart_mutation_rate: f64,
    /// Per-bit probability of uniform flip-bit mutation (0.0–1.0).
    pub flip_bit_rate: f64,

    /// Penalty weights.
    pub penalties: PenaltyWeights,

    /// Evolutionary loop parameters.
    pub ga: GaConfig,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            staff_count: 26,
            day_count: 7,
            hour_count: 13,
            start_hour: 10,
            min_staff_per_hour: 2,
            max_staff_per_hour: 3,
            max_work_hours_per_day: 8,
            max_work_hours_per_week: 40,
            min_work_hours_per_week: 20,
            smart_generation_ratio: 0.7,
            smart_mutation_share: 0.5,
            smart_mutation_rate: 0.3,
            flip_bit_rate: 0.05,
            penalties: PenaltyWeights::default(),
            ga: GaConfig::default(),
        }
    }
}

impl ShiftConfig {
    /// Sets the problem dimensions.
    pub fn with_dimensions(mut self, staff: usize, days: usize, hours: usize) -> Self {
        self.staff_count = staff;
        self.day_count = days;
        self.hour_count = hours;
        self
    }

    /// Sets the clock hour of hour offset 0.
    pub fn with_start_hour(mut self, hour: u32) -> Self {
        self.start_hour = hour;
        self
    }

    /// Sets the per-slot headcount bounds.
    pub fn with_staff_per_hour(mut self, min: usize, max: usize) -> Self {
        self.min_staff_per_hour = min;
        self.max_staff_per_hour = max;
        self
    }

    /// Sets the daily hour cap.
    pub fn with_max_work_hours_per_day(mut self, hours: usize) -> Self {
        self.max_work_hours_per_day = hours;
        self
    }

    /// Sets the weekly hour band used for reporting.
    pub fn with_weekly_hours(mut self, min: usize, max: usize) -> Self {
        self.min_work_hours_per_week = min;
        self.max_work_hours_per_week = max;
        self
    }

    /// Sets the smart construction ratio.
    pub fn with_smart_generation_ratio(mut self, ratio: f64) -> Self {
        self.smart_generation_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the share of mutations that use the smart nudge.
    pub fn with_smart_mutation_share(mut self, share: f64) -> Self {
        self.smart_mutation_share = share.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-slot smart-mutation probability.
    pub fn with_smart_mutation_rate(mut self, rate: f64) -> Self {
        self.smart_mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-bit flip probability.
    pub fn with_flip_bit_rate(mut self, rate: f64) -> Self {
        self.flip_bit_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the penalty weights.
    pub fn with_penalties(mut self, penalties: PenaltyWeights) -> Self {
        self.penalties = penalties;
        self
    }

    /// Sets the GA parameters.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Length of the flat schedule encoding.
    pub fn gene_count(&self) -> usize {
        self.staff_count * self.day_count * self.hour_count
    }

    /// Number of individuals out of `size` built by smart construction:
    /// `floor(size × smart_generation_ratio)`.
    pub fn smart_count(&self, size: usize) -> usize {
        ((size as f64 * self.smart_generation_ratio) as usize).min(size)
    }

    /// Validates the configuration, including the nested GA parameters.
    pub fn validate(&self) -> Result<()> {
        if self.staff_count == 0 || self.day_count == 0 || self.hour_count == 0 {
            return Err(Error::config(
                "staff_count, day_count and hour_count must all be at least 1",
            ));
        }
        if self.min_staff_per_hour > self.max_staff_per_hour {
            return Err(Error::config(format!(
                "min_staff_per_hour ({}) exceeds max_staff_per_hour ({})",
                self.min_staff_per_hour, self.max_staff_per_hour
            )));
        }
        if self.min_work_hours_per_week > self.max_work_hours_per_week {
            return Err(Error::config(format!(
                "min_work_hours_per_week ({}) exceeds max_work_hours_per_week ({})",
                self.min_work_hours_per_week, self.max_work_hours_per_week
            )));
        }
        for (name, p) in [
            ("smart_generation_ratio", self.smart_generation_ratio),
            ("smart_mutation_share", self.smart_mutation_share),
            ("smart_mutation_rate", self.smart_mutation_rate),
            ("flip_bit_rate", self.flip_bit_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::config(format!("{name} must be within [0, 1]")));
            }
        }
        self.penalties.validate()?;
        self.ga.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShiftConfig::default();
        assert_eq!(config.staff_count, 26);
        assert_eq!(config.day_count, 7);
        assert_eq!(config.hour_count, 13);
        assert_eq!(config.start_hour, 10);
        assert_eq!(config.min_staff_per_hour, 2);
        assert_eq!(config.max_staff_per_hour, 3);
        assert_eq!(config.max_work_hours_per_day, 8);
        assert_eq!(config.max_work_hours_per_week, 40);
        assert_eq!(config.min_work_hours_per_week, 20);
        assert!((config.smart_generation_ratio - 0.7).abs() < 1e-10);
        assert_eq!(config.penalties.understaffed, 2000.0);
        assert_eq!(config.penalties.incompatible_pair, 10.0);
        assert_eq!(config.gene_count(), 26 * 7 * 13);
    }

    #[test]
    fn test_smart_count_floors() {
        let config = ShiftConfig::default().with_smart_generation_ratio(0.7);
        // 15 * 0.7 = 10.5
        assert_eq!(config.smart_count(15), 10);
        assert_eq!(config.smart_count(0), 0);

        let config = config.with_smart_generation_ratio(1.0);
        assert_eq!(config.smart_count(15), 15);
    }

    #[test]
    fn test_validate_min_above_max() {
        let config = ShiftConfig::default().with_staff_per_hour(4, 3);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_dimension() {
        let config = ShiftConfig::default().with_dimensions(3, 0, 5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_weekly_band() {
        let config = ShiftConfig::default().with_weekly_hours(30, 20);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_nonpositive_penalty() {
        let penalties = PenaltyWeights {
            gap: 0.0,
            ..PenaltyWeights::default()
        };
        let err = ShiftConfig::default()
            .with_penalties(penalties)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("`gap`"));
    }

    #[test]
    fn test_validate_propagates_ga_errors() {
        let config =
            ShiftConfig::default().with_ga(GaConfig::default().with_population_size(1));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp_ratios() {
        let config = ShiftConfig::default()
            .with_smart_generation_ratio(1.4)
            .with_flip_bit_rate(-1.0);
        assert_eq!(config.smart_generation_ratio, 1.0);
        assert_eq!(config.flip_bit_rate, 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_override_from_json() {
        let config: ShiftConfig =
            serde_json::from_str(r#"{"staff_count": 4, "penalties": {"gap": 1.0}}"#).unwrap();
        assert_eq!(config.staff_count, 4);
        assert_eq!(config.penalties.gap, 1.0);
        assert_eq!(config.penalties.understaffed, 2000.0);
        assert_eq!(config.day_count, 7);
    }
}
