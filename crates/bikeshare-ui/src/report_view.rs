//! Plain-text rendering of the trip reports.
//!
//! Each section mirrors one report routine and ends with the time it took
//! and a horizontal rule. Values that could not be computed are printed as
//! "not available" lines.

use std::time::Duration;

use bikeshare_core::formatting::{format_count, format_duration, format_number, percentage};
use bikeshare_data::aggregator::Modal;
use bikeshare_data::analysis::{
    ColumnReport, DurationStats, StationStats, TimeStats, Timed, TripAnalysis, UserStats,
};
use unicode_width::UnicodeWidthStr;

/// Separator printed between sections.
pub const RULE: &str = "----------------------------------------";

pub const NOT_AVAILABLE: &str = "not available";

/// Render every section of `analysis`, preceded by a one-line summary.
pub fn render_analysis(analysis: &TripAnalysis) -> String {
    let mut lines = vec![
        format!(
            "Analyzing {} trips (month: {}, day: {})",
            format_count(analysis.trips_analyzed),
            analysis.filter.month,
            analysis.filter.day
        ),
        RULE.to_string(),
    ];
    lines.extend(time_lines(&analysis.time));
    lines.extend(station_lines(&analysis.stations));
    lines.extend(duration_lines(&analysis.durations));
    lines.extend(user_lines(&analysis.users));
    join(lines)
}

// ── Sections ──────────────────────────────────────────────────────────────────

fn time_lines(stats: &Timed<TimeStats>) -> Vec<String> {
    let report = &stats.report;
    let mut lines = section_header("Calculating The Most Frequent Times of Travel...");
    lines.push(modal_line("Most common month", report.month.as_ref()));
    lines.push(modal_line("Most common day of week", report.day_of_week.as_ref()));
    lines.push(modal_line(
        "Most common start hour",
        report
            .start_hour
            .as_ref()
            .map(|m| Modal {
                value: format!("{:02}:00", m.value),
                count: m.count,
            })
            .as_ref(),
    ));
    lines.extend(section_footer(stats.elapsed));
    lines
}

fn station_lines(stats: &Timed<StationStats>) -> Vec<String> {
    let report = &stats.report;
    let mut lines = section_header("Calculating The Most Popular Stations and Trip...");
    lines.push(modal_line("Most common start station", report.start_station.as_ref()));
    lines.push(modal_line("Most common end station", report.end_station.as_ref()));
    lines.push(modal_line("Most frequent trip", report.trip.as_ref()));
    lines.extend(section_footer(stats.elapsed));
    lines
}

fn duration_lines(stats: &Timed<DurationStats>) -> Vec<String> {
    let report = &stats.report;
    let mut lines = section_header("Calculating Trip Duration...");
    lines.push(seconds_line("Total travel time", report.total_seconds));
    lines.push(seconds_line("Mean travel time", report.mean_seconds));
    lines.extend(section_footer(stats.elapsed));
    lines
}

fn user_lines(stats: &Timed<UserStats>) -> Vec<String> {
    let report = &stats.report;
    let mut lines = section_header("Calculating User Stats...");

    lines.push("Counts of user type:".to_string());
    lines.extend(distribution_lines(&report.user_types));

    lines.push(String::new());
    lines.push("Counts of gender:".to_string());
    match &report.gender {
        ColumnReport::Present(counts) => lines.extend(distribution_lines(counts)),
        ColumnReport::Missing(_) => lines.push("  There's no gender data.".to_string()),
    }

    lines.push(String::new());
    lines.push("Birth year stats:".to_string());
    match &report.birth_years {
        ColumnReport::Present(Some(years)) => {
            lines.push(format!("  Earliest: {}", years.earliest));
            lines.push(format!("  Most recent: {}", years.most_recent));
            lines.push(format!(
                "  Most common: {} ({} occurrences)",
                years.most_common.value,
                format_count(years.most_common.count)
            ));
        }
        ColumnReport::Present(None) => lines.push(format!("  {}", NOT_AVAILABLE)),
        ColumnReport::Missing(_) => lines.push("  There's no birth year data.".to_string()),
    }

    lines.extend(section_footer(stats.elapsed));
    lines
}

// ── Line helpers ──────────────────────────────────────────────────────────────

fn section_header(title: &str) -> Vec<String> {
    vec![String::new(), title.to_string(), String::new()]
}

fn section_footer(elapsed: Duration) -> Vec<String> {
    vec![
        String::new(),
        format!("This took {:.6} seconds.", elapsed.as_secs_f64()),
        RULE.to_string(),
    ]
}

fn modal_line<T: std::fmt::Display>(label: &str, modal: Option<&Modal<T>>) -> String {
    match modal {
        Some(m) => format!(
            "{}: {} ({} occurrences)",
            label,
            m.value,
            format_count(m.count)
        ),
        None => format!("{}: {}", label, NOT_AVAILABLE),
    }
}

fn seconds_line(label: &str, seconds: Option<f64>) -> String {
    match seconds {
        Some(s) => format!(
            "{}: {} seconds ({})",
            label,
            format_number(s, 2),
            format_duration(s)
        ),
        None => format!("{}: {}", label, NOT_AVAILABLE),
    }
}

fn distribution_lines(counts: &[(String, usize)]) -> Vec<String> {
    if counts.is_empty() {
        return vec![format!("  {}", NOT_AVAILABLE)];
    }
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let width = counts.iter().map(|(name, _)| name.width()).max().unwrap_or(0);
    counts
        .iter()
        .map(|(name, n)| {
            format!(
                "  {}{}  {:>9}  ({:.1}%)",
                name,
                " ".repeat(width - name.width()),
                format_count(*n),
                percentage(*n as f64, total as f64, 1)
            )
        })
        .collect()
}

fn join(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::catalog::{DayOfWeek, Month};
    use bikeshare_data::analysis::{BirthYearStats, StationPair};
    use bikeshare_data::preparer::TimeFilter;

    fn timed<T>(report: T) -> Timed<T> {
        Timed {
            report,
            elapsed: Duration::from_millis(2),
        }
    }

    fn empty_analysis(gender: ColumnReport<Vec<(String, usize)>>) -> TripAnalysis {
        TripAnalysis {
            filter: TimeFilter::all(),
            trips_analyzed: 0,
            time: timed(TimeStats {
                month: None,
                day_of_week: None,
                start_hour: None,
            }),
            stations: timed(StationStats {
                start_station: None,
                end_station: None,
                trip: None,
            }),
            durations: timed(DurationStats {
                trip_count: 0,
                total_seconds: None,
                mean_seconds: None,
            }),
            users: timed(UserStats {
                user_types: Vec::new(),
                gender,
                birth_years: ColumnReport::Missing("Birth Year"),
            }),
        }
    }

    #[test]
    fn test_render_time_stats() {
        let text = join(time_lines(&timed(TimeStats {
            month: Some(Modal {
                value: Month::June,
                count: 1_200,
            }),
            day_of_week: Some(Modal {
                value: DayOfWeek::Friday,
                count: 80,
            }),
            start_hour: Some(Modal {
                value: 8,
                count: 42,
            }),
        })));

        assert!(text.contains("Most common month: June (1,200 occurrences)"));
        assert!(text.contains("Most common day of week: Friday (80 occurrences)"));
        assert!(text.contains("Most common start hour: 08:00 (42 occurrences)"));
        assert!(text.contains("This took 0.002000 seconds."));
        assert!(text.trim_end().ends_with(RULE));
    }

    #[test]
    fn test_render_station_stats_trip_arrow() {
        let text = join(station_lines(&timed(StationStats {
            start_station: Some(Modal {
                value: "Streeter Dr & Grand Ave".to_string(),
                count: 3,
            }),
            end_station: None,
            trip: Some(Modal {
                value: StationPair {
                    start: "Lake Shore Dr & Monroe St".to_string(),
                    end: "Streeter Dr & Grand Ave".to_string(),
                },
                count: 2,
            }),
        })));

        assert!(text.contains(
            "Most common start station: Streeter Dr & Grand Ave (3 occurrences)"
        ));
        assert!(text.contains("Most common end station: not available"));
        assert!(text.contains(
            "Most frequent trip: Lake Shore Dr & Monroe St --> Streeter Dr & Grand Ave (2 occurrences)"
        ));
    }

    #[test]
    fn test_render_duration_stats() {
        let text = join(duration_lines(&timed(DurationStats {
            trip_count: 2,
            total_seconds: Some(3_725.0),
            mean_seconds: Some(1_862.5),
        })));
        assert!(text.contains("Total travel time: 3,725.00 seconds (1h 2m 5s)"));
        assert!(text.contains("Mean travel time: 1,862.50 seconds"));
    }

    #[test]
    fn test_render_user_stats_full() {
        let text = join(user_lines(&timed(UserStats {
            user_types: vec![("Subscriber".to_string(), 3), ("Customer".to_string(), 1)],
            gender: ColumnReport::Present(vec![("Male".to_string(), 2)]),
            birth_years: ColumnReport::Present(Some(BirthYearStats {
                earliest: 1899,
                most_recent: 2016,
                most_common: Modal {
                    value: 1989,
                    count: 14,
                },
            })),
        })));

        assert!(text.contains("Subscriber"));
        assert!(text.contains("(75.0%)"));
        assert!(text.contains("Earliest: 1899"));
        assert!(text.contains("Most recent: 2016"));
        assert!(text.contains("Most common: 1989 (14 occurrences)"));
        assert!(!text.contains("no gender data"));
    }

    #[test]
    fn test_distribution_aligns_by_display_width() {
        let lines = distribution_lines(&[("会员".to_string(), 3), ("Customer".to_string(), 1)]);
        let col = |line: &str| line.find('(').map(|byte| line[..byte].width());
        assert_eq!(col(&lines[0]), col(&lines[1]));
    }

    #[test]
    fn test_render_user_stats_missing_columns() {
        let analysis = empty_analysis(ColumnReport::Missing("Gender"));
        let text = join(user_lines(&analysis.users));
        assert!(text.contains("There's no gender data."));
        assert!(text.contains("There's no birth year data."));
    }

    #[test]
    fn test_render_analysis_empty_dataset() {
        let analysis = empty_analysis(ColumnReport::Present(Vec::new()));
        let text = render_analysis(&analysis);

        assert!(text.starts_with("Analyzing 0 trips (month: all, day: all)"));
        assert!(text.contains("Most common month: not available"));
        assert!(text.contains("Most frequent trip: not available"));
        assert!(text.contains("Total travel time: not available"));
        assert!(text.contains("Mean travel time: not available"));
        assert_eq!(text.matches(RULE).count(), 5);
    }
}
