//! The fixed weekday axis and per-day cell state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five weekdays of a planning week.
///
/// The grid axis is closed: Saturday and Sunday do not exist in this model,
/// and every row carries exactly one cell per variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All weekdays in grid order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Convert to the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monday" | "mon" => Ok(Weekday::Monday),
            "tuesday" | "tue" => Ok(Weekday::Tuesday),
            "wednesday" | "wed" => Ok(Weekday::Wednesday),
            "thursday" | "thu" => Ok(Weekday::Thursday),
            "friday" | "fri" => Ok(Weekday::Friday),
            _ => Err(format!("Invalid weekday: {s}")),
        }
    }
}

/// One task cell for one weekday in one row.
///
/// Mutable while the week is current; frozen once captured into an archive
/// snapshot. A cell counts toward statistics only when it is filled.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayState {
    /// Task text for the day (may be empty)
    pub text: String,

    /// Whether the task has been marked complete
    pub completed: bool,
}

impl DayState {
    /// A cell is filled when its text is non-blank after trimming.
    pub fn is_filled(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// The full Monday..Friday cell set for a row.
///
/// A struct rather than a map: every weekday is always present, so the
/// "missing key" failure mode cannot be represented. Serializes with
/// `Monday`..`Friday` keys for snapshot compatibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct WeekDays {
    pub monday: DayState,
    pub tuesday: DayState,
    pub wednesday: DayState,
    pub thursday: DayState,
    pub friday: DayState,
}

impl WeekDays {
    /// Borrow the cell for a weekday.
    pub fn get(&self, day: Weekday) -> &DayState {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
        }
    }

    /// Mutably borrow the cell for a weekday.
    pub fn get_mut(&mut self, day: Weekday) -> &mut DayState {
        match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
        }
    }

    /// Iterate cells in grid order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DayState)> {
        Weekday::ALL.iter().map(move |day| (*day, self.get(*day)))
    }
}
