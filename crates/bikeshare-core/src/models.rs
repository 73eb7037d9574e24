use chrono::NaiveDateTime;

use crate::error::{BikeshareError, Result};

// ── Column names ──────────────────────────────────────────────────────────────

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Columns every city file must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    START_TIME,
    TRIP_DURATION,
    START_STATION,
    END_STATION,
    USER_TYPE,
];

// ── TripRecord ────────────────────────────────────────────────────────────────

/// A single bike trip as read from a city CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// Local wall-clock time the trip started.
    pub start_time: NaiveDateTime,
    /// Raw end time text, kept only for the raw-data dump.
    pub end_time: Option<String>,
    /// Trip length in seconds.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    /// `None` when the source cell is blank.
    pub user_type: Option<String>,
    /// `None` when the cell is blank or the city has no gender column.
    pub gender: Option<String>,
    /// `None` when the cell is blank or the city has no birth year column.
    pub birth_year: Option<i32>,
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// Columns that only some cities provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalColumn {
    Gender,
    BirthYear,
}

impl OptionalColumn {
    pub const ALL: [OptionalColumn; 2] = [OptionalColumn::Gender, OptionalColumn::BirthYear];

    /// Header text of the column in the source file.
    pub fn header(self) -> &'static str {
        match self {
            OptionalColumn::Gender => GENDER,
            OptionalColumn::BirthYear => BIRTH_YEAR,
        }
    }
}

/// The header row of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(|c| c.into().trim().to_string()).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Succeeds when `column` is part of the schema, otherwise returns
    /// [`BikeshareError::MissingColumn`].
    pub fn require(&self, column: OptionalColumn) -> Result<()> {
        if self.contains(column.header()) {
            Ok(())
        } else {
            Err(BikeshareError::MissingColumn(column.header()))
        }
    }

    /// Required columns absent from this schema, in declaration order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| !self.contains(name))
            .collect()
    }

    /// Optional columns present in this schema.
    pub fn optional_columns(&self) -> Vec<OptionalColumn> {
        OptionalColumn::ALL
            .into_iter()
            .filter(|column| self.require(*column).is_ok())
            .collect()
    }
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// Every trip of one city file, in source row order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub schema: Schema,
    pub records: Vec<TripRecord>,
}

impl Dataset {
    pub fn new(schema: Schema, records: Vec<TripRecord>) -> Self {
        Self { schema, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn full_schema() -> Schema {
        Schema::new([
            "",
            "Start Time",
            "End Time",
            "Trip Duration",
            "Start Station",
            "End Station",
            "User Type",
            "Gender",
            "Birth Year",
        ])
    }

    #[test]
    fn test_schema_require_present_column() {
        let schema = full_schema();
        assert!(schema.require(OptionalColumn::Gender).is_ok());
        assert!(schema.require(OptionalColumn::BirthYear).is_ok());
        assert_eq!(
            schema.optional_columns(),
            vec![OptionalColumn::Gender, OptionalColumn::BirthYear]
        );
    }

    #[test]
    fn test_schema_require_missing_column() {
        let schema = Schema::new(REQUIRED_COLUMNS.iter().copied());
        let err = schema.require(OptionalColumn::Gender).unwrap_err();
        assert!(matches!(err, BikeshareError::MissingColumn("Gender")));
        assert!(schema.optional_columns().is_empty());
    }

    #[test]
    fn test_schema_missing_required() {
        let schema = Schema::new(["Start Time", "Start Station", "User Type"]);
        assert_eq!(
            schema.missing_required(),
            vec!["Trip Duration", "End Station"]
        );
        assert!(full_schema().missing_required().is_empty());
    }

    #[test]
    fn test_schema_trims_headers() {
        let schema = Schema::new([" Gender "]);
        assert!(schema.contains("Gender"));
    }

    #[test]
    fn test_dataset_len() {
        let dataset = Dataset::new(full_schema(), Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
    }
}
