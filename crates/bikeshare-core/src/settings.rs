use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore US bike-share trip data interactively
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bike-share trip data interactively",
    version
)]
pub struct Settings {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Rows shown per page of raw data (1-100)
    #[arg(
        long,
        env = "BIKESHARE_PAGE_SIZE",
        default_value = "5",
        value_parser = clap::value_parser!(u16).range(1..=100)
    )]
    pub page_size: u16,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when omitted)
    #[arg(long, env = "BIKESHARE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    pub fn page_size(&self) -> usize {
        usize::from(self.page_size)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
