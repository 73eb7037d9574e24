//! The interactive explore loop.
//!
//! Each pass picks a city, loads its trips, optionally pages through raw
//! rows, asks for time filters, prints the reports and offers a restart.
//! The loaded dataset belongs to a single pass and is dropped before the
//! next one starts.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use bikeshare_core::catalog::{Answer, City, DayOfWeek, FilterMode, Month, Selection};
use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::Dataset;
use bikeshare_data::analysis::analyze_trips;
use bikeshare_data::preparer::{prepare, TimeFilter};
use bikeshare_data::reader::load_city;
use bikeshare_ui::report_view::{render_analysis, RULE};
use bikeshare_ui::table_view::render_raw_page;
use tracing::{debug, info};

use crate::prompt::{Prompter, Question};

// ── Questions ─────────────────────────────────────────────────────────────────

const CITY: Question<'static> = Question {
    prompt: "\nWhich data do you want to see: Chicago, New York City, or Washington? - ",
    retry: "Invalid city name! Enter Chicago, New York City, or Washington. - ",
};

const FILTER_MODE: Question<'static> = Question {
    prompt: "\nWould you like to filter the data by 'month', 'day', 'both' or 'none'? - ",
    retry: "Invalid input! Make sure you enter 'month', 'day', 'both' or 'none'. - ",
};

const MONTH: Question<'static> = Question {
    prompt: "\nWhich month: January, February, March, April, May, June, or all? - ",
    retry: "Invalid input! Please enter January, February, March, April, May, June, or all. - ",
};

const DAY: Question<'static> = Question {
    prompt: "\nEnter the day of week: Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday, or all. - ",
    retry: "Invalid input! Please enter Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday, or all. - ",
};

const RAW_DATA: Question<'static> = Question {
    prompt: "\nWould you like to see some raw data? (Yes/No) - ",
    retry: "Would you like to see some raw data? (Yes/No) - ",
};

const MORE_RAW_DATA: Question<'static> = Question {
    prompt: "\nWould you like to see more raw data? (Yes/No) - ",
    retry: "Would you like to see more raw data? (Yes/No) - ",
};

const RETRY_LOAD: Question<'static> = Question {
    prompt: "\nWould you like to try again? (Yes/No) - ",
    retry: "Please enter yes or no. - ",
};

const RESTART: Question<'static> = Question {
    prompt: "\nWould you like to restart? (Yes/No) - ",
    retry: "Please enter yes or no. - ",
};

// ── State machine ─────────────────────────────────────────────────────────────

/// Where the session is in a single explore pass.
#[derive(Debug)]
enum State {
    SelectCity,
    Load(City),
    RetryOrAbort,
    RawData { city: City, dataset: Dataset },
    FilterPrompt { city: City, dataset: Dataset },
    Report { city: City, dataset: Dataset, filter: TimeFilter },
    RestartPrompt,
    Done,
}

/// Drives the explore loop over a [`Prompter`].
pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    data_dir: PathBuf,
    page_size: usize,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(prompter: Prompter<R, W>, data_dir: PathBuf, page_size: usize) -> Self {
        Self {
            prompter,
            data_dir,
            page_size: page_size.max(1),
        }
    }

    /// Run until the user stops or input ends.
    ///
    /// Only terminal write failures are returned as errors.
    pub fn run(&mut self) -> Result<()> {
        let mut state = State::SelectCity;
        loop {
            if matches!(state, State::Done) {
                info!("Session finished");
                return Ok(());
            }
            state = match self.step(state) {
                Ok(next) => next,
                Err(BikeshareError::InputClosed) => {
                    info!("Input closed; ending session");
                    State::Done
                }
                Err(e) => return Err(e),
            };
        }
    }

    #[cfg(test)]
    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    fn step(&mut self, state: State) -> Result<State> {
        match state {
            State::SelectCity => {
                self.prompter.say(RULE)?;
                self.prompter
                    .say("\nHello! Let's explore some US bikeshare data!")?;
                let city: City = self.prompter.choose(&CITY)?;
                debug!("Selected city {}", city);
                Ok(State::Load(city))
            }

            State::Load(city) => match load_city(&self.data_dir, city) {
                Ok(dataset) => Ok(State::RawData { city, dataset }),
                Err(e) if e.is_recoverable() => {
                    self.prompter
                        .say(&format!("Could not load {} data. {}", city, e))?;
                    self.prompter.say(RULE)?;
                    Ok(State::RetryOrAbort)
                }
                Err(e) => Err(e),
            },

            State::RetryOrAbort => {
                let answer: Answer = self.prompter.choose(&RETRY_LOAD)?;
                Ok(if answer.is_yes() {
                    State::SelectCity
                } else {
                    State::Done
                })
            }

            State::RawData { city, dataset } => {
                self.page_raw_data(&dataset)?;
                Ok(State::FilterPrompt { city, dataset })
            }

            State::FilterPrompt { city, dataset } => {
                let filter = self.ask_filters()?;
                Ok(State::Report {
                    city,
                    dataset,
                    filter,
                })
            }

            State::Report {
                city,
                dataset,
                filter,
            } => {
                let prepared = prepare(&dataset, &filter);
                info!(
                    "Reporting on {} of {} {} trips",
                    prepared.len(),
                    dataset.len(),
                    city
                );
                let analysis = analyze_trips(&prepared);
                self.prompter.say(&render_analysis(&analysis))?;
                Ok(State::RestartPrompt)
            }

            State::RestartPrompt => {
                let answer: Answer = self.prompter.choose(&RESTART)?;
                Ok(if answer.is_yes() {
                    State::SelectCity
                } else {
                    State::Done
                })
            }

            State::Done => Ok(State::Done),
        }
    }

    /// Show `page_size` raw rows at a time while the user keeps saying yes.
    fn page_raw_data(&mut self, dataset: &Dataset) -> Result<()> {
        let mut answer: Answer = self.prompter.choose(&RAW_DATA)?;
        let mut offset = 0;

        while answer.is_yes() {
            let Some(page) = render_raw_page(dataset, offset, self.page_size) else {
                self.prompter.say("No raw data to show.")?;
                break;
            };
            self.prompter.say(&page.text)?;
            if page.exhausted {
                self.prompter.say("\nThat's all the raw data.")?;
                break;
            }
            offset = page.next_offset;
            answer = self.prompter.choose(&MORE_RAW_DATA)?;
        }
        Ok(())
    }

    fn ask_filters(&mut self) -> Result<TimeFilter> {
        let mode: FilterMode = self.prompter.choose(&FILTER_MODE)?;

        let month = if mode.wants_month() {
            self.prompter.choose::<Selection<Month>>(&MONTH)?
        } else {
            Selection::All
        };
        let day = if mode.wants_day() {
            self.prompter.choose::<Selection<DayOfWeek>>(&DAY)?
        } else {
            Selection::All
        };

        self.prompter.say(RULE)?;
        Ok(TimeFilter::new(month, day))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
