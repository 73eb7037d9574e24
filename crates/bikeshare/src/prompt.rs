//! Line-oriented prompting with validation against a fixed option set.

use std::io::{BufRead, Write};

use bikeshare_core::catalog::Choice;
use bikeshare_core::error::{BikeshareError, Result};
use tracing::debug;

/// Text shown when asking for a [`Choice`].
#[derive(Debug, Clone, Copy)]
pub struct Question<'a> {
    /// Shown on the first attempt.
    pub prompt: &'a str,
    /// Shown after an answer outside the accepted set.
    pub retry: &'a str,
}

/// Reads answers from `input` and writes prompts and reports to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask `question` until the answer names one of `T::OPTIONS`.
    ///
    /// Invalid answers are handled here and never reach the caller.
    /// Returns [`BikeshareError::InputClosed`] on end of input.
    pub fn choose<T: Choice>(&mut self, question: &Question<'_>) -> Result<T> {
        let mut prompt = question.prompt;
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let line = self.read_line()?;
            match T::parse_choice(&line) {
                Ok(choice) => return Ok(choice),
                Err(BikeshareError::InvalidInput { input }) => {
                    debug!("rejected answer {:?}, expected one of {:?}", input, T::names());
                    prompt = question.retry;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Write `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Undecodable bytes are replaced, so such a line fails validation
    /// like any other unknown answer.
    fn read_line(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(BikeshareError::InputClosed);
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::catalog::{Answer, City, DayOfWeek, Month, Selection};
    use std::io::Cursor;

    const CITY: Question<'static> = Question {
        prompt: "City? ",
        retry: "Invalid city! City? ",
    };

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_inner().1).unwrap()
    }

    #[test]
    fn test_choose_accepts_first_valid_answer() {
        let mut p = prompter("Washington\n");
        let city: City = p.choose(&CITY).unwrap();
        assert_eq!(city, City::Washington);
        assert_eq!(output(p), "City? ");
    }

    #[test]
    fn test_choose_reprompts_until_valid() {
        let mut p = prompter("Chiacgo\n\nnew york city\n");
        let city: City = p.choose(&CITY).unwrap();
        assert_eq!(city, City::NewYorkCity);
        assert_eq!(
            output(p),
            "City? Invalid city! City? Invalid city! City? "
        );
    }

    #[test]
    fn test_choose_input_closed() {
        let mut p = prompter("Chiacgo\n");
        let err = p.choose::<City>(&CITY).unwrap_err();
        assert!(matches!(err, BikeshareError::InputClosed));
    }

    #[test]
    fn test_choose_reprompts_on_invalid_utf8() {
        let mut p = Prompter::new(Cursor::new(b"\xff\xfe\nchicago\n".to_vec()), Vec::new());
        let city: City = p.choose(&CITY).unwrap();
        assert_eq!(city, City::Chicago);
        assert_eq!(output(p), "City? Invalid city! City? ");
    }

    #[test]
    fn test_choose_handles_missing_trailing_newline() {
        let mut p = prompter("yes");
        let answer: Answer = p
            .choose(&Question {
                prompt: "? ",
                retry: "? ",
            })
            .unwrap();
        assert!(answer.is_yes());
    }

    #[test]
    fn test_choose_same_primitive_for_every_enumeration() {
        let mut p = prompter("JUNE\nall\n");
        let q = Question {
            prompt: "> ",
            retry: "> ",
        };
        let month: Selection<Month> = p.choose(&q).unwrap();
        let day: Selection<DayOfWeek> = p.choose(&q).unwrap();
        assert_eq!(month, Selection::Only(Month::June));
        assert_eq!(day, Selection::All);
    }

    #[test]
    fn test_say_appends_newline() {
        let mut p = prompter("");
        p.say("hello").unwrap();
        assert_eq!(output(p), "hello\n");
    }
}
