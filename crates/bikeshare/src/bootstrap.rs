use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map the CLI level names onto `tracing` filter directives.
///
/// Unknown names are passed through so that `RUST_LOG`-style directives
/// such as `bikeshare_data=trace` keep working.
pub fn normalise_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Logs go to stderr unless `log_file` is given, in which case they are
/// appended to that file without ANSI colours so they never interleave with
/// the interactive prompts.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(normalise_level(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()?;
        }
        None => {
            registry
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Open `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalise_level_known_names() {
        assert_eq!(normalise_level("DEBUG"), "debug");
        assert_eq!(normalise_level("info"), "info");
        assert_eq!(normalise_level("WARNING"), "warn");
        assert_eq!(normalise_level("ERROR"), "error");
    }

    #[test]
    fn test_normalise_level_passes_directives_through() {
        assert_eq!(
            normalise_level("bikeshare_data=trace"),
            "bikeshare_data=trace"
        );
    }

    #[test]
    fn test_open_log_file_creates_parents() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("logs").join("nested").join("bikeshare.log");

        open_log_file(&path).expect("open log file");

        assert!(path.is_file(), "log file must exist");
    }

    #[test]
    fn test_open_log_file_appends() {
        use std::io::Write;

        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("bikeshare.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_setup_logging_to_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("run.log");

        setup_logging("INFO", Some(&path)).expect("subscriber installs once");
        tracing::info!("log file smoke test");

        assert!(path.is_file());
        assert!(setup_logging("INFO", None).is_err(), "second init must fail");
    }
}
