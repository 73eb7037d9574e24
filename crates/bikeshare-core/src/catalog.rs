//! Fixed enumerations the explorer validates user input against.
//!
//! Every enumeration implements [`Choice`], which gives the prompt layer a
//! single way to match free text against an accepted set.

use std::fmt;

use crate::error::{BikeshareError, Result};

// ── Choice ────────────────────────────────────────────────────────────────────

/// A value picked from a closed, ordered set of named options.
pub trait Choice: Copy + PartialEq + 'static {
    /// Every accepted value, in presentation order.
    const OPTIONS: &'static [Self];

    /// Lower-case key the user types to select this value.
    fn name(self) -> &'static str;

    /// Match `input` (trimmed, case-insensitive) against [`Choice::OPTIONS`].
    fn parse_choice(input: &str) -> Result<Self> {
        let needle = input.trim().to_lowercase();
        Self::OPTIONS
            .iter()
            .copied()
            .find(|option| option.name() == needle)
            .ok_or_else(|| BikeshareError::InvalidInput {
                input: input.trim().to_string(),
            })
    }

    /// All option keys, in order.
    fn names() -> Vec<&'static str> {
        Self::OPTIONS.iter().map(|option| option.name()).collect()
    }
}

// ── City ──────────────────────────────────────────────────────────────────────

/// The three cities with bundled trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// File name of the city's CSV inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }
}

impl Choice for City {
    const OPTIONS: &'static [Self] = &[City::Chicago, City::NewYorkCity, City::Washington];

    fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Month ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// 1-based calendar index, taken from the position in [`Choice::OPTIONS`].
    pub fn number(self) -> u32 {
        Self::OPTIONS
            .iter()
            .position(|m| *m == self)
            .map(|idx| idx as u32 + 1)
            .unwrap_or_default()
    }

    /// Inverse of [`Month::number`]; `None` outside `1..=12`.
    pub fn from_number(number: u32) -> Option<Self> {
        let idx = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::OPTIONS.get(idx).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl Choice for Month {
    const OPTIONS: &'static [Self] = &[
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    fn name(self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
            Month::July => "july",
            Month::August => "august",
            Month::September => "september",
            Month::October => "october",
            Month::November => "november",
            Month::December => "december",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── DayOfWeek ─────────────────────────────────────────────────────────────────

/// Weekday names, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn label(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// `true` when `name` spells this weekday, ignoring case and padding.
    pub fn matches_name(self, name: &str) -> bool {
        self.label().eq_ignore_ascii_case(name.trim())
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl Choice for DayOfWeek {
    const OPTIONS: &'static [Self] = &[
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// A filter value on one dimension: everything, or a single member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: Copy> Selection<T> {
    pub fn is_all(self) -> bool {
        matches!(self, Selection::All)
    }
}

/// Month filter answers: `all` or January through June.
impl Choice for Selection<Month> {
    const OPTIONS: &'static [Self] = &[
        Selection::All,
        Selection::Only(Month::January),
        Selection::Only(Month::February),
        Selection::Only(Month::March),
        Selection::Only(Month::April),
        Selection::Only(Month::May),
        Selection::Only(Month::June),
    ];

    fn name(self) -> &'static str {
        match self {
            Selection::All => "all",
            Selection::Only(month) => month.name(),
        }
    }
}

impl Choice for Selection<DayOfWeek> {
    const OPTIONS: &'static [Self] = &[
        Selection::All,
        Selection::Only(DayOfWeek::Monday),
        Selection::Only(DayOfWeek::Tuesday),
        Selection::Only(DayOfWeek::Wednesday),
        Selection::Only(DayOfWeek::Thursday),
        Selection::Only(DayOfWeek::Friday),
        Selection::Only(DayOfWeek::Saturday),
        Selection::Only(DayOfWeek::Sunday),
    ];

    fn name(self) -> &'static str {
        match self {
            Selection::All => "all",
            Selection::Only(day) => day.name(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

// ── FilterMode ────────────────────────────────────────────────────────────────

/// Which time dimensions the user wants to filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Month,
    Day,
    Both,
    None,
}

impl FilterMode {
    pub fn wants_month(self) -> bool {
        matches!(self, FilterMode::Month | FilterMode::Both)
    }

    pub fn wants_day(self) -> bool {
        matches!(self, FilterMode::Day | FilterMode::Both)
    }
}

impl Choice for FilterMode {
    const OPTIONS: &'static [Self] = &[
        FilterMode::Month,
        FilterMode::Day,
        FilterMode::Both,
        FilterMode::None,
    ];

    fn name(self) -> &'static str {
        match self {
            FilterMode::Month => "month",
            FilterMode::Day => "day",
            FilterMode::Both => "both",
            FilterMode::None => "none",
        }
    }
}

// ── Answer ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn is_yes(self) -> bool {
        self == Answer::Yes
    }
}

impl Choice for Answer {
    const OPTIONS: &'static [Self] = &[Answer::Yes, Answer::No];

    fn name(self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
