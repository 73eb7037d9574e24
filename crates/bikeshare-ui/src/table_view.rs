//! Paged raw-row table for the "see some raw data?" prompt.
//!
//! Columns follow the dataset schema: optional columns only appear when the
//! city file has them. Cell widths are measured in terminal columns.

use bikeshare_core::models::{
    Dataset, OptionalColumn, TripRecord, BIRTH_YEAR, END_STATION, END_TIME, GENDER, START_STATION,
    START_TIME, TRIP_DURATION, USER_TYPE,
};
use unicode_width::UnicodeWidthStr;

/// A page of raw rows ready for printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    /// Rendered table, header included.
    pub text: String,
    /// Index of the first row of the following page.
    pub next_offset: usize,
    /// `true` once the last row of the dataset has been shown.
    pub exhausted: bool,
}

/// Render rows `offset..offset + page_size` of `dataset`.
///
/// Returns `None` when `offset` is already past the last row.
pub fn render_raw_page(dataset: &Dataset, offset: usize, page_size: usize) -> Option<RawPage> {
    if offset >= dataset.len() || page_size == 0 {
        return None;
    }
    let end = (offset + page_size).min(dataset.len());

    let columns = Columns::for_dataset(dataset);
    let header = columns.header();
    let rows: Vec<Vec<String>> = dataset.records[offset..end]
        .iter()
        .enumerate()
        .map(|(i, record)| columns.cells(offset + i, record))
        .collect();

    Some(RawPage {
        text: layout(&header, &rows),
        next_offset: end,
        exhausted: end >= dataset.len(),
    })
}

// ── Column selection ──────────────────────────────────────────────────────────

struct Columns {
    end_time: bool,
    gender: bool,
    birth_year: bool,
}

impl Columns {
    fn for_dataset(dataset: &Dataset) -> Self {
        Self {
            end_time: dataset.schema.contains(END_TIME),
            gender: dataset.schema.require(OptionalColumn::Gender).is_ok(),
            birth_year: dataset.schema.require(OptionalColumn::BirthYear).is_ok(),
        }
    }

    fn header(&self) -> Vec<String> {
        let mut names = vec!["#", START_TIME];
        if self.end_time {
            names.push(END_TIME);
        }
        names.extend([TRIP_DURATION, START_STATION, END_STATION, USER_TYPE]);
        if self.gender {
            names.push(GENDER);
        }
        if self.birth_year {
            names.push(BIRTH_YEAR);
        }
        names.into_iter().map(str::to_string).collect()
    }

    fn cells(&self, row: usize, record: &TripRecord) -> Vec<String> {
        let mut cells = vec![
            row.to_string(),
            record.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        ];
        if self.end_time {
            cells.push(record.end_time.clone().unwrap_or_default());
        }
        cells.push(record.trip_duration.to_string());
        cells.push(record.start_station.clone());
        cells.push(record.end_station.clone());
        cells.push(record.user_type.clone().unwrap_or_default());
        if self.gender {
            cells.push(record.gender.clone().unwrap_or_default());
        }
        if self.birth_year {
            cells.push(record.birth_year.map(|y| y.to_string()).unwrap_or_default());
        }
        cells
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

fn layout(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(header, &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(format_row(row, &widths));
    }
    lines.join("\n")
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| pad(cell, *w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Right-pad `cell` with spaces to `width` display columns.
fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(fill))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
