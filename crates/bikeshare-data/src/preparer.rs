//! Calendar-field derivation and month / weekday filtering.
//!
//! [`prepare`] borrows a loaded [`Dataset`], attaches the month, weekday and
//! start hour of every trip, then keeps only the trips matching the
//! requested [`TimeFilter`]. The source dataset is never modified.

use bikeshare_core::catalog::{Choice, DayOfWeek, Month, Selection};
use bikeshare_core::error::Result;
use bikeshare_core::models::{Dataset, Schema, TripRecord};
use chrono::{Datelike, NaiveDateTime, Timelike};
use tracing::debug;

// ── TimeFilter ────────────────────────────────────────────────────────────────

/// Month and weekday restriction; both dimensions apply together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeFilter {
    pub month: Selection<Month>,
    pub day: Selection<DayOfWeek>,
}

impl TimeFilter {
    pub fn new(month: Selection<Month>, day: Selection<DayOfWeek>) -> Self {
        Self { month, day }
    }

    /// No restriction on either dimension.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from user-facing names such as `("june", "all")`.
    pub fn parse(month: &str, day: &str) -> Result<Self> {
        Ok(Self {
            month: Selection::<Month>::parse_choice(month)?,
            day: Selection::<DayOfWeek>::parse_choice(day)?,
        })
    }

    pub fn is_unfiltered(&self) -> bool {
        self.month.is_all() && self.day.is_all()
    }

    fn keeps_month(&self, trip: &PreparedTrip) -> bool {
        match self.month {
            Selection::All => true,
            Selection::Only(month) => trip.month() == month.number(),
        }
    }

    fn keeps_day(&self, trip: &PreparedTrip) -> bool {
        match self.day {
            Selection::All => true,
            Selection::Only(day) => day.matches_name(trip.day_of_week().label()),
        }
    }
}

// ── Derived fields ────────────────────────────────────────────────────────────

/// Calendar fields computed from a trip's start time.
///
/// Only constructible from a timestamp, so the values always agree with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedFields {
    month: u32,
    day_of_week: DayOfWeek,
    start_hour: u32,
}

impl DerivedFields {
    pub fn from_timestamp(ts: &NaiveDateTime) -> Self {
        Self {
            month: ts.month(),
            day_of_week: DayOfWeek::from(ts.weekday()),
            start_hour: ts.hour(),
        }
    }
}

/// A trip together with its derived calendar fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTrip {
    record: TripRecord,
    derived: DerivedFields,
}

impl PreparedTrip {
    pub fn new(record: TripRecord) -> Self {
        let derived = DerivedFields::from_timestamp(&record.start_time);
        Self { record, derived }
    }

    pub fn record(&self) -> &TripRecord {
        &self.record
    }

    /// Calendar month, 1-12.
    pub fn month(&self) -> u32 {
        self.derived.month
    }

    pub fn day_of_week(&self) -> DayOfWeek {
        self.derived.day_of_week
    }

    /// Hour of day, 0-23.
    pub fn start_hour(&self) -> u32 {
        self.derived.start_hour
    }
}

// ── PreparedDataset ───────────────────────────────────────────────────────────

/// The trips left after derivation and filtering, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedDataset {
    schema: Schema,
    trips: Vec<PreparedTrip>,
    filter: TimeFilter,
}

impl PreparedDataset {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn trips(&self) -> &[PreparedTrip] {
        &self.trips
    }

    /// The filter most recently applied to produce this dataset.
    pub fn filter(&self) -> TimeFilter {
        self.filter
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Apply `filter` again to an already prepared dataset.
    pub fn refine(&self, filter: &TimeFilter) -> PreparedDataset {
        let trips = apply_filter(self.trips.iter().cloned(), filter);
        PreparedDataset {
            schema: self.schema.clone(),
            trips,
            filter: *filter,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Derive calendar fields for every trip without filtering.
pub fn derive(dataset: &Dataset) -> PreparedDataset {
    prepare(dataset, &TimeFilter::all())
}

/// Derive calendar fields, then keep trips matching `filter`.
///
/// The month restriction is applied first, then the weekday restriction.
pub fn prepare(dataset: &Dataset, filter: &TimeFilter) -> PreparedDataset {
    let derived = dataset.records.iter().cloned().map(PreparedTrip::new);
    let trips = if filter.is_unfiltered() {
        derived.collect()
    } else {
        apply_filter(derived, filter)
    };

    debug!(
        "Prepared {} of {} trips (month: {}, day: {})",
        trips.len(),
        dataset.len(),
        filter.month,
        filter.day
    );

    PreparedDataset {
        schema: dataset.schema.clone(),
        trips,
        filter: *filter,
    }
}

fn apply_filter(
    trips: impl Iterator<Item = PreparedTrip>,
    filter: &TimeFilter,
) -> Vec<PreparedTrip> {
    trips
        .filter(|trip| filter.keeps_month(trip))
        .filter(|trip| filter.keeps_day(trip))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
