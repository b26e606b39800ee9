//! Staff roster, shift preferences, and incompatible pairs.
//!
//! The roster is the read-only input data of a run. It can be built
//! programmatically or loaded from the two plain-text formats below.
//!
//! # Preference text
//!
//! ```text
//! # comment
//! Alice
//! 10/1: 16:00-22:00, 10/2: 10:00-18:00
//! Bob
//! 10/3: 12:00-15:00
//! ```
//!
//! A line containing `:` lists `M/D: HH:MM-HH:MM` entries for the most
//! recent staff member; any other non-comment line names a new staff
//! member. `D` is the 1-based day index; the end hour is exclusive.
//!
//! # Pair text
//!
//! ```text
//! # staff who should not share an hour
//! Alice-Bob
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::warn;

use crate::error::{Error, Result};

/// Staff list plus preference and incompatibility data.
///
/// Staff order defines staff indices: the `i`-th name is staff `i`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    staff: Vec<String>,
    /// name → 1-based day → hoped-for hour offsets.
    preferences: HashMap<String, BTreeMap<usize, BTreeSet<usize>>>,
    incompatible: Vec<(String, String)>,
}

impl Roster {
    /// Creates a roster from staff names; duplicates after the first are
    /// dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self::default();
        for name in names {
            roster.add_staff(name.into());
        }
        roster
    }

    /// Placeholder roster of `n` staff (`A`, `B`, ... then `S27`, `S28`, ...)
    /// with no preferences and no pairs.
    pub fn anonymous(n: usize) -> Self {
        Self::new((0..n).map(|i| match u8::try_from(i) {
            Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
            _ => format!("S{}", i + 1),
        }))
    }

    fn add_staff(&mut self, name: String) -> bool {
        if self.staff.contains(&name) {
            return false;
        }
        self.staff.push(name);
        true
    }

    /// Records that `name` hopes to work the given hour offsets on `day`
    /// (1-based). Unknown names are added to the roster.
    pub fn with_preference<I>(mut self, name: &str, day: usize, hours: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        self.add_preference(name, day, hours);
        self
    }

    fn add_preference<I>(&mut self, name: &str, day: usize, hours: I)
    where
        I: IntoIterator<Item = usize>,
    {
        self.add_staff(name.to_string());
        self.preferences
            .entry(name.to_string())
            .or_default()
            .entry(day)
            .or_default()
            .extend(hours);
    }

    /// Adds a pair of staff who must not work the same hour.
    pub fn with_incompatible_pair(mut self, a: &str, b: &str) -> Self {
        self.incompatible.push((a.to_string(), b.to_string()));
        self
    }

    /// Adds several incompatible pairs.
    pub fn with_incompatible_pairs<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.incompatible.extend(pairs);
        self
    }

    pub fn staff_names(&self) -> &[String] {
        &self.staff
    }

    pub fn len(&self) -> usize {
        self.staff.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staff.is_empty()
    }

    /// Index of a staff member.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.staff.iter().position(|s| s == name)
    }

    /// Hour offsets `name` hopes to work on `day` (1-based); empty if none.
    pub fn hoped_hours(&self, name: &str, day: usize) -> impl Iterator<Item = usize> + '_ {
        self.preferences
            .get(name)
            .and_then(|days| days.get(&day))
            .into_iter()
            .flatten()
            .copied()
    }

    pub fn incompatible_pairs(&self) -> &[(String, String)] {
        &self.incompatible
    }

    /// Parses preference text.
    ///
    /// Clock hours outside `[start_hour, start_hour + hour_count)` are
    /// dropped; the rest are stored as offsets from `start_hour`. Malformed
    /// entries are skipped with a warning. An entry line before the first
    /// staff name is an error.
    pub fn parse_preferences(text: &str, start_hour: u32, hour_count: usize) -> Result<Self> {
        let mut roster = Self::default();
        let mut current: Option<String> = None;
        let end_hour = start_hour + hour_count as u32;

        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if !line.contains(':') {
                roster.add_staff(line.to_string());
                current = Some(line.to_string());
                continue;
            }

            let Some(name) = current.as_deref() else {
                return Err(Error::Parse {
                    line: line_no,
                    message: "shift entry before any staff name".into(),
                });
            };

            for entry in line.split(',') {
                match parse_entry(entry) {
                    Some((day, from, to)) => {
                        let hours = (from..to)
                            .filter(|h| (start_hour..end_hour).contains(h))
                            .map(|h| (h - start_hour) as usize);
                        roster.add_preference(name, day, hours);
                    }
                    None => warn!(line = line_no, entry = entry.trim(), "skipping malformed shift entry"),
                }
            }
        }

        Ok(roster)
    }

    /// Parses incompatible-pair text.
    ///
    /// Each `A-B` line yields one pair; `suffix` is appended to both trimmed
    /// names so pair files can use short forms of roster names. Lines that
    /// do not split into two non-empty names are skipped with a warning.
    pub fn parse_incompatible_pairs(text: &str, suffix: &str) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split('-').map(str::trim);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(a), Some(b), None) if !a.is_empty() && !b.is_empty() => {
                    pairs.push((format!("{a}{suffix}"), format!("{b}{suffix}")));
                }
                _ => warn!(line = i + 1, content = line, "skipping malformed pair line"),
            }
        }
        pairs
    }
}

/// Parses `M/D: HH:MM-HH:MM` into `(day, start_hour, end_hour)`.
fn parse_entry(entry: &str) -> Option<(usize, u32, u32)> {
    let (date, range) = entry.trim().split_once(':')?;
    let (_month, day) = date.trim().split_once('/')?;
    let (from, to) = range.trim().split_once('-')?;
    Some((day.trim().parse().ok()?, clock_hour(from)?, clock_hour(to)?))
}

fn clock_hour(time: &str) -> Option<u32> {
    let (hour, minute) = time.trim().split_once(':')?;
    minute.parse::<u32>().ok()?;
    hour.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOPES: &str = "\
# kitchen
Alice
10/1: 16:00-22:00, 10/2: 9:00-12:00

Bob
10/3: 20:00-23:00
# trailing comment
";

    #[test]
    fn test_parse_preferences() {
        let roster = Roster::parse_preferences(HOPES, 10, 12).unwrap();

        assert_eq!(roster.staff_names(), ["Alice", "Bob"]);
        let day1: Vec<usize> = roster.hoped_hours("Alice", 1).collect();
        assert_eq!(day1, vec![6, 7, 8, 9, 10, 11]);
        // 9:00 falls before the start hour
        let day2: Vec<usize> = roster.hoped_hours("Alice", 2).collect();
        assert_eq!(day2, vec![0, 1]);
        // 22:00 falls past the horizon
        let bob: Vec<usize> = roster.hoped_hours("Bob", 3).collect();
        assert_eq!(bob, vec![10, 11]);
        assert_eq!(roster.hoped_hours("Bob", 1).count(), 0);
        assert_eq!(roster.hoped_hours("Carol", 1).count(), 0);
    }

    #[test]
    fn test_parse_preferences_skips_malformed_entries() {
        let text = "Alice\n10/1: 12:00-14:00, garbage: x, 10/x: 10:00-11:00\n";
        let roster = Roster::parse_preferences(text, 10, 13).unwrap();
        let hours: Vec<usize> = roster.hoped_hours("Alice", 1).collect();
        assert_eq!(hours, vec![2, 3]);
    }

    #[test]
    fn test_parse_preferences_entry_before_staff() {
        let err = Roster::parse_preferences("# header\n10/1: 10:00-12:00\n", 10, 13).unwrap_err();
        assert_eq!(
            err,
            Error::Parse {
                line: 2,
                message: "shift entry before any staff name".into()
            }
        );
    }

    #[test]
    fn test_repeated_staff_header_merges() {
        let text = "Alice\n10/1: 10:00-11:00\nAlice\n10/1: 12:00-13:00\n";
        let roster = Roster::parse_preferences(text, 10, 13).unwrap();
        assert_eq!(roster.len(), 1);
        let hours: Vec<usize> = roster.hoped_hours("Alice", 1).collect();
        assert_eq!(hours, vec![0, 2]);
    }

    #[test]
    fn test_parse_pairs() {
        let text = "# pairs\nA - B\nC-D\nno dash\nE-F-G\n-H\n";
        let pairs = Roster::parse_incompatible_pairs(text, "san");
        assert_eq!(
            pairs,
            vec![
                ("Asan".to_string(), "Bsan".to_string()),
                ("Csan".to_string(), "Dsan".to_string()),
            ]
        );
    }

    #[test]
    fn test_anonymous() {
        let roster = Roster::anonymous(28);
        assert_eq!(roster.len(), 28);
        assert_eq!(roster.staff_names()[0], "A");
        assert_eq!(roster.staff_names()[25], "Z");
        assert_eq!(roster.staff_names()[26], "S27");
        assert!(roster.incompatible_pairs().is_empty());
    }

    #[test]
    fn test_builder() {
        let roster = Roster::new(["A", "B", "A"])
            .with_preference("C", 1, [0, 1])
            .with_incompatible_pair("A", "B");
        assert_eq!(roster.staff_names(), ["A", "B", "C"]);
        assert_eq!(roster.index_of("C"), Some(2));
        assert_eq!(roster.incompatible_pairs().len(), 1);
    }
}
