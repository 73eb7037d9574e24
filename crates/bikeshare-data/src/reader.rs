//! CSV loading for the city trip exports.
//!
//! Resolves a [`City`] to its file under the data directory and parses it
//! into a [`Dataset`], preserving source row order.

use std::io::Read;
use std::path::{Path, PathBuf};

use bikeshare_core::catalog::City;
use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{Dataset, Schema, TripRecord};
use bikeshare_core::time_utils::parse_trip_timestamp;
use serde::Deserialize;
use tracing::{debug, info, warn};

// ── Raw row ───────────────────────────────────────────────────────────────────

/// One CSV row as it appears on disk. Columns not named here are ignored.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    /// Exports write birth years as floats (`1989.0`).
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Path of `city`'s CSV inside `data_dir`.
pub fn city_path(data_dir: &Path, city: City) -> PathBuf {
    data_dir.join(city.file_name())
}

/// Load every trip for `city` from `data_dir`.
///
/// Any failure to open or parse the file is reported as
/// [`BikeshareError::DataUnavailable`].
pub fn load_city(data_dir: &Path, city: City) -> Result<Dataset> {
    let path = city_path(data_dir, city);
    info!("Loading {} trips from {}", city, path.display());

    let dataset = match load_dataset(&path) {
        Ok(dataset) => dataset,
        Err(e) => {
            warn!("{}", e);
            return Err(e);
        }
    };

    info!(
        "Loaded {} trips for {} (optional columns: {:?})",
        dataset.len(),
        city,
        dataset.schema.optional_columns()
    );
    Ok(dataset)
}

/// Load a trip CSV from an explicit path.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).map_err(|e| BikeshareError::data_unavailable(path, e))?;
    parse_dataset(file, path)
}

/// Parse trip CSV text from any reader. `origin` is only used in errors.
pub fn parse_dataset<R: Read>(input: R, origin: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| BikeshareError::data_unavailable(origin, format!("unreadable header: {e}")))?
        .clone();
    let schema = Schema::new(headers.iter());

    let missing = schema.missing_required();
    if !missing.is_empty() {
        return Err(BikeshareError::data_unavailable(
            origin,
            format!("missing required columns: {}", missing.join(", ")),
        ));
    }

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<RawTrip>().enumerate() {
        // records start on line 2, after the header
        let line = idx + 2;
        let raw = result
            .map_err(|e| BikeshareError::data_unavailable(origin, format!("line {line}: {e}")))?;
        let record = into_record(raw)
            .map_err(|e| BikeshareError::data_unavailable(origin, format!("line {line}: {e}")))?;
        records.push(record);
    }

    debug!("Parsed {} rows from {}", records.len(), origin.display());
    Ok(Dataset::new(schema, records))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn into_record(raw: RawTrip) -> std::result::Result<TripRecord, String> {
    let start_time = parse_trip_timestamp(&raw.start_time).map_err(|e| e.to_string())?;

    if !raw.trip_duration.is_finite() || raw.trip_duration < 0.0 {
        return Err(format!("invalid trip duration {}", raw.trip_duration));
    }

    Ok(TripRecord {
        start_time,
        end_time: non_blank(raw.end_time),
        trip_duration: raw.trip_duration,
        start_station: raw.start_station,
        end_station: raw.end_station,
        user_type: non_blank(raw.user_type),
        gender: non_blank(raw.gender),
        birth_year: raw
            .birth_year
            .filter(|year| year.is_finite())
            .map(|year| year.trunc() as i32),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::OptionalColumn;
    use chrono::{Datelike, Timelike};
    use std::io::Write;
    use tempfile::TempDir;

    const CHICAGO_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Customer,,
";

    const WASHINGTON_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
";

    fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_city_resolves_file_name() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "chicago.csv", CHICAGO_CSV);

        let dataset = load_city(dir.path(), City::Chicago).unwrap();
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_load_preserves_row_order_and_fields() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "chicago.csv", CHICAGO_CSV);

        let dataset = load_dataset(&path).unwrap();
        let first = &dataset.records[0];
        assert_eq!(first.start_time.month(), 6);
        assert_eq!(first.start_time.hour(), 15);
        assert_eq!(first.trip_duration, 321.0);
        assert_eq!(first.start_station, "Wood St & Hubbard St");
        assert_eq!(first.user_type.as_deref(), Some("Subscriber"));
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));
        assert_eq!(first.end_time.as_deref(), Some("2017-06-23 15:14:53"));

        assert_eq!(dataset.records[1].start_station, "Theater on the Lake");
        assert_eq!(dataset.records[2].start_time.month(), 1);
    }

    #[test]
    fn test_load_blank_optional_cells_are_none() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "chicago.csv", CHICAGO_CSV);

        let dataset = load_dataset(&path).unwrap();
        let customer = &dataset.records[2];
        assert!(customer.gender.is_none());
        assert!(customer.birth_year.is_none());
    }

    #[test]
    fn test_load_schema_without_optional_columns() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "washington.csv", WASHINGTON_CSV);

        let dataset = load_city(dir.path(), City::Washington).unwrap();
        assert!(dataset.schema.require(OptionalColumn::Gender).is_err());
        assert!(dataset.schema.require(OptionalColumn::BirthYear).is_err());
        assert_eq!(dataset.records[0].trip_duration, 489.066);
        assert!(dataset.records[0].gender.is_none());
    }

    #[test]
    fn test_load_missing_file_is_data_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = load_city(dir.path(), City::NewYorkCity).unwrap_err();
        match err {
            BikeshareError::DataUnavailable { path, .. } => {
                assert!(path.ends_with("new_york_city.csv"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_required_column() {
        let csv = "Start Time,Start Station,User Type\n2017-01-01 00:00:00,A,Customer\n";
        let err = parse_dataset(csv.as_bytes(), Path::new("broken.csv")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("missing required columns"), "{msg}");
        assert!(msg.contains("Trip Duration"));
        assert!(msg.contains("End Station"));
    }

    #[test]
    fn test_load_bad_timestamp_reports_line() {
        let csv = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:00:00,60,A,B,Customer
not-a-date,60,A,B,Customer
";
        let err = parse_dataset(csv.as_bytes(), Path::new("bad.csv")).unwrap_err();
        assert!(matches!(err, BikeshareError::DataUnavailable { .. }));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_load_non_numeric_duration() {
        let csv = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:00:00,long,A,B,Customer
";
        let err = parse_dataset(csv.as_bytes(), Path::new("bad.csv")).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_load_negative_duration_rejected() {
        let csv = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:00:00,-5,A,B,Customer
";
        let err = parse_dataset(csv.as_bytes(), Path::new("bad.csv")).unwrap_err();
        assert!(matches!(err, BikeshareError::DataUnavailable { .. }));
    }

    #[test]
    fn test_load_header_only_is_empty_dataset() {
        let csv = "Start Time,Trip Duration,Start Station,End Station,User Type\n";
        let dataset = parse_dataset(csv.as_bytes(), Path::new("empty.csv")).unwrap();
        assert!(dataset.is_empty());
    }
}
