//! The four trip reports: travel times, stations, durations and users.
//!
//! Every routine reads a [`PreparedDataset`] without modifying it and
//! reports "not available" (`None` / [`ColumnReport::Missing`]) instead of
//! failing when there is nothing to summarise.

use std::fmt;
use std::time::{Duration, Instant};

use bikeshare_core::catalog::{DayOfWeek, Month};
use bikeshare_core::models::{OptionalColumn, Schema};
use tracing::debug;

use crate::aggregator::{FrequencyTable, Modal};
use crate::preparer::{PreparedDataset, TimeFilter};

// ── Public types ──────────────────────────────────────────────────────────────

/// A report together with the wall-clock time spent computing it.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub report: T,
    pub elapsed: Duration,
}

fn timed<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let report = f();
    Timed {
        report,
        elapsed: start.elapsed(),
    }
}

/// Result for a column that only some cities provide.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnReport<T> {
    Present(T),
    /// The dataset has no such column; carries the column header.
    Missing(&'static str),
}

impl<T> ColumnReport<T> {
    fn for_column(schema: &Schema, column: OptionalColumn, build: impl FnOnce() -> T) -> Self {
        match schema.require(column) {
            Ok(()) => ColumnReport::Present(build()),
            Err(e) => {
                debug!("{}", e);
                ColumnReport::Missing(column.header())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    pub month: Option<Modal<Month>>,
    pub day_of_week: Option<Modal<DayOfWeek>>,
    pub start_hour: Option<Modal<u32>>,
}

/// A start / end station combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationPair {
    pub start: String,
    pub end: String,
}

impl fmt::Display for StationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub start_station: Option<Modal<String>>,
    pub end_station: Option<Modal<String>>,
    pub trip: Option<Modal<StationPair>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub trip_count: usize,
    /// Sum of trip durations in seconds; `None` when there are no trips.
    pub total_seconds: Option<f64>,
    /// Arithmetic mean in seconds; `None` when there are no trips.
    pub mean_seconds: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: Modal<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    /// User type counts, most frequent first. Blank cells are skipped.
    pub user_types: Vec<(String, usize)>,
    pub gender: ColumnReport<Vec<(String, usize)>>,
    /// `Present(None)` when the column exists but holds no years.
    pub birth_years: ColumnReport<Option<BirthYearStats>>,
}

/// All four reports for one prepared dataset.
#[derive(Debug, Clone)]
pub struct TripAnalysis {
    pub filter: TimeFilter,
    pub trips_analyzed: usize,
    pub time: Timed<TimeStats>,
    pub stations: Timed<StationStats>,
    pub durations: Timed<DurationStats>,
    pub users: Timed<UserStats>,
}

// ── Report routines ───────────────────────────────────────────────────────────

/// Most frequent month, weekday and start hour.
pub fn time_stats(data: &PreparedDataset) -> Timed<TimeStats> {
    timed(|| {
        let trips = data.trips();
        TimeStats {
            month: trips
                .iter()
                .filter_map(|t| Month::from_number(t.month()))
                .collect::<FrequencyTable<_>>()
                .mode(),
            day_of_week: trips
                .iter()
                .map(|t| t.day_of_week())
                .collect::<FrequencyTable<_>>()
                .mode(),
            start_hour: trips
                .iter()
                .map(|t| t.start_hour())
                .collect::<FrequencyTable<_>>()
                .mode(),
        }
    })
}

/// Most popular start station, end station and start-to-end trip.
pub fn station_stats(data: &PreparedDataset) -> Timed<StationStats> {
    timed(|| {
        let mut starts = FrequencyTable::new();
        let mut ends = FrequencyTable::new();
        let mut pairs = FrequencyTable::new();

        for trip in data.trips() {
            let record = trip.record();
            starts.add(record.start_station.clone());
            ends.add(record.end_station.clone());
            pairs.add(StationPair {
                start: record.start_station.clone(),
                end: record.end_station.clone(),
            });
        }

        StationStats {
            start_station: starts.mode(),
            end_station: ends.mode(),
            trip: pairs.mode(),
        }
    })
}

/// Total and mean trip duration.
pub fn duration_stats(data: &PreparedDataset) -> Timed<DurationStats> {
    timed(|| {
        let trip_count = data.len();
        if trip_count == 0 {
            return DurationStats {
                trip_count,
                total_seconds: None,
                mean_seconds: None,
            };
        }

        let total: f64 = data.trips().iter().map(|t| t.record().trip_duration).sum();
        DurationStats {
            trip_count,
            total_seconds: Some(total),
            mean_seconds: Some(total / trip_count as f64),
        }
    })
}

/// User type, gender and birth year breakdowns.
pub fn user_stats(data: &PreparedDataset) -> Timed<UserStats> {
    timed(|| {
        let trips = data.trips();
        let schema = data.schema();

        let user_types = trips
            .iter()
            .filter_map(|t| t.record().user_type.clone())
            .collect::<FrequencyTable<_>>()
            .distribution();

        let gender = ColumnReport::for_column(schema, OptionalColumn::Gender, || {
            trips
                .iter()
                .filter_map(|t| t.record().gender.clone())
                .collect::<FrequencyTable<_>>()
                .distribution()
        });

        let birth_years = ColumnReport::for_column(schema, OptionalColumn::BirthYear, || {
            let years: Vec<i32> = trips.iter().filter_map(|t| t.record().birth_year).collect();
            birth_year_stats(&years)
        });

        UserStats {
            user_types,
            gender,
            birth_years,
        }
    })
}

/// Run every report over `data`.
pub fn analyze_trips(data: &PreparedDataset) -> TripAnalysis {
    let analysis = TripAnalysis {
        filter: data.filter(),
        trips_analyzed: data.len(),
        time: time_stats(data),
        stations: station_stats(data),
        durations: duration_stats(data),
        users: user_stats(data),
    };

    debug!(
        "Analyzed {} trips in {:?}",
        analysis.trips_analyzed,
        analysis.time.elapsed
            + analysis.stations.elapsed
            + analysis.durations.elapsed
            + analysis.users.elapsed
    );

    analysis
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn birth_year_stats(years: &[i32]) -> Option<BirthYearStats> {
    let earliest = *years.iter().min()?;
    let most_recent = *years.iter().max()?;
    let most_common = years.iter().copied().collect::<FrequencyTable<_>>().mode()?;
    Some(BirthYearStats {
        earliest,
        most_recent,
        most_common,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
