//! Boolean assignment grid.
//!
//! A [`Schedule`] stores one bit per (staff, day, hour) in a single flat
//! vector, staff-major. The flat vector is what crossover and flip-bit
//! mutation operate on; the 3D accessors are what evaluation and repair use.

use std::fmt;

/// Staff × day × hour assignment grid; `true` means "working that hour".
///
/// Dimensions are fixed at construction.
///
/// ```
/// use u_shift::shift::Schedule;
///
/// let mut s = Schedule::new(2, 1, 4);
/// s.set(0, 0, 1, true);
/// s.set(1, 0, 1, true);
/// assert_eq!(s.slot_count(0, 1), 2);
/// assert_eq!(s.day_hours(0, 0), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    staff: usize,
    days: usize,
    hours: usize,
    cells: Vec<bool>,
}

impl Schedule {
    /// Creates an all-off schedule.
    pub fn new(staff: usize, days: usize, hours: usize) -> Self {
        Self {
            staff,
            days,
            hours,
            cells: vec![false; staff * days * hours],
        }
    }

    /// Wraps a flat staff-major cell vector.
    ///
    /// # Panics
    /// Panics if `cells.len() != staff * days * hours`.
    pub fn from_cells(staff: usize, days: usize, hours: usize, cells: Vec<bool>) -> Self {
        assert_eq!(
            cells.len(),
            staff * days * hours,
            "cell count must equal staff * days * hours"
        );
        Self {
            staff,
            days,
            hours,
            cells,
        }
    }

    pub fn staff_count(&self) -> usize {
        self.staff
    }

    pub fn day_count(&self) -> usize {
        self.days
    }

    pub fn hour_count(&self) -> usize {
        self.hours
    }

    /// The flat encoding.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// The flat encoding, mutably.
    pub fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    /// Consumes the schedule, returning the flat encoding.
    pub fn into_cells(self) -> Vec<bool> {
        self.cells
    }

    #[inline]
    fn index(&self, staff: usize, day: usize, hour: usize) -> usize {
        debug_assert!(staff < self.staff && day < self.days && hour < self.hours);
        (staff * self.days + day) * self.hours + hour
    }

    #[inline]
    pub fn get(&self, staff: usize, day: usize, hour: usize) -> bool {
        self.cells[self.index(staff, day, hour)]
    }

    #[inline]
    pub fn set(&mut self, staff: usize, day: usize, hour: usize, on: bool) {
        let i = self.index(staff, day, hour);
        self.cells[i] = on;
    }

    /// One staff member's hours for one day.
    pub fn day(&self, staff: usize, day: usize) -> &[bool] {
        let start = self.index(staff, day, 0);
        &self.cells[start..start + self.hours]
    }

    /// One staff member's hours for one day, mutably.
    pub fn day_mut(&mut self, staff: usize, day: usize) -> &mut [bool] {
        let start = self.index(staff, day, 0);
        let hours = self.hours;
        &mut self.cells[start..start + hours]
    }

    /// Headcount of a slot.
    pub fn slot_count(&self, day: usize, hour: usize) -> usize {
        (0..self.staff).filter(|&s| self.get(s, day, hour)).count()
    }

    /// Staff assigned to a slot, ascending.
    pub fn assigned(&self, day: usize, hour: usize) -> Vec<usize> {
        (0..self.staff).filter(|&s| self.get(s, day, hour)).collect()
    }

    /// Staff not assigned to a slot, ascending.
    pub fn unassigned(&self, day: usize, hour: usize) -> Vec<usize> {
        (0..self.staff).filter(|&s| !self.get(s, day, hour)).collect()
    }

    /// Hours worked by one staff member on one day.
    pub fn day_hours(&self, staff: usize, day: usize) -> usize {
        self.day(staff, day).iter().filter(|&&on| on).count()
    }

    /// Hours worked by one staff member over the horizon.
    pub fn week_hours(&self, staff: usize) -> usize {
        let start = self.index(staff, 0, 0);
        self.cells[start..start + self.days * self.hours]
            .iter()
            .filter(|&&on| on)
            .count()
    }
}

/// Whether a day's worked hours are split into more than one block.
///
/// Days with zero or one worked hour never have a gap.
pub fn has_gap(day: &[bool]) -> bool {
    match worked_span(day) {
        Some((first, last)) => day[first..=last].iter().any(|&on| !on),
        None => false,
    }
}

/// First and last worked hour of a day, if any.
pub fn worked_span(day: &[bool]) -> Option<(usize, usize)> {
    let first = day.iter().position(|&on| on)?;
    let last = day.iter().rposition(|&on| on)?;
    Some((first, last))
}

/// One row per staff member, days separated by `|`, `#` for worked hours.
impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for staff in 0..self.staff {
            write!(f, "{staff:>3} ")?;
            for day in 0..self.days {
                f.write_str("|")?;
                for &on in self.day(staff, day) {
                    f.write_str(if on { "#" } else { "." })?;
                }
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_staff_major() {
        let mut s = Schedule::new(2, 3, 4);
        s.set(1, 2, 3, true);
        assert_eq!(s.cells().len(), 24);
        assert!(s.cells()[23]);
        s.set(0, 1, 0, true);
        assert!(s.cells()[4]);
    }

    #[test]
    fn test_counts() {
        let mut s = Schedule::new(3, 2, 4);
        s.set(0, 0, 1, true);
        s.set(2, 0, 1, true);
        s.set(2, 1, 3, true);

        assert_eq!(s.slot_count(0, 1), 2);
        assert_eq!(s.assigned(0, 1), vec![0, 2]);
        assert_eq!(s.unassigned(0, 1), vec![1]);
        assert_eq!(s.day_hours(2, 0), 1);
        assert_eq!(s.week_hours(2), 2);
        assert_eq!(s.week_hours(1), 0);
    }

    #[test]
    fn test_day_mut_writes_through() {
        let mut s = Schedule::new(2, 2, 3);
        s.day_mut(1, 1).fill(true);
        assert_eq!(s.day_hours(1, 1), 3);
        assert_eq!(s.day_hours(1, 0), 0);
        assert_eq!(s.day_hours(0, 1), 0);
    }

    #[test]
    fn test_has_gap() {
        assert!(!has_gap(&[false, false, false]));
        assert!(!has_gap(&[false, true, false]));
        assert!(!has_gap(&[true, true, true]));
        assert!(!has_gap(&[false, true, true, false]));
        assert!(has_gap(&[true, false, true]));
        assert!(has_gap(&[false, true, false, false, true]));
    }

    #[test]
    fn test_worked_span() {
        assert_eq!(worked_span(&[false, false]), None);
        assert_eq!(worked_span(&[false, true, false, true]), Some((1, 3)));
    }

    #[test]
    #[should_panic(expected = "cell count must equal")]
    fn test_from_cells_mismatch() {
        Schedule::from_cells(2, 2, 2, vec![false; 7]);
    }

    #[test]
    fn test_display() {
        let mut s = Schedule::new(1, 2, 2);
        s.set(0, 1, 0, true);
        assert_eq!(s.to_string(), "  0 |..|#.|\n");
    }
}
