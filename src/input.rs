/// Input Module
///
/// Prompting and typed parsing of user input. Handlers declare the values
/// they need through the typed readers here; the `Prompter` trait is the
/// seam that lets tests feed scripted answers instead of stdin.
use crate::core::{MarqueeError, Result};
use crate::domain::{BookingStatus, SeatList};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::io::{self, BufRead, Write};

/// Prompt formats, shared with the menu help text.
pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const TIME_FORMAT: &str = "%H:%M";
pub const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// A source of answers to prompts.
pub trait Prompter {
    /// Shows `label` and returns one line of input, trimmed.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error with `UnexpectedEof` when the input source is
    /// exhausted; the menu loop treats that as a request to exit.
    fn prompt(&mut self, label: &str) -> Result<String>;
}

/// The interactive prompter: writes labels to stdout, reads from stdin.
pub struct StdinPrompter;

impl StdinPrompter {
    pub fn new() -> Self {
        StdinPrompter
    }
}

impl Default for StdinPrompter {
    fn default() -> Self {
        StdinPrompter::new()
    }
}

impl Prompter for StdinPrompter {
    fn prompt(&mut self, label: &str) -> Result<String> {
        print!("{}: ", label);
        io::stdout().flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(MarqueeError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "end of input",
            )));
        }
        Ok(line.trim().to_string())
    }
}

/// Reads a free-text value.
pub fn read_text(input: &mut dyn Prompter, label: &str) -> Result<String> {
    input.prompt(label)
}

/// Reads an integer id.
pub fn read_i32(input: &mut dyn Prompter, label: &str) -> Result<i32> {
    let raw = input.prompt(label)?;
    raw.parse::<i32>()
        .map_err(|_| MarqueeError::Validation(format!("'{}' is not a valid number", raw)))
}

/// Reads a date in `dd/mm/yyyy` form.
pub fn read_date(input: &mut dyn Prompter, label: &str) -> Result<NaiveDate> {
    let raw = input.prompt(&format!("{} (dd/mm/yyyy)", label))?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT)
        .map_err(|_| MarqueeError::Validation(format!("'{}' is not a valid date", raw)))
}

/// Reads a time of day in `hh:mm` form.
pub fn read_time(input: &mut dyn Prompter, label: &str) -> Result<NaiveTime> {
    let raw = input.prompt(&format!("{} (hh:mm)", label))?;
    NaiveTime::parse_from_str(&raw, TIME_FORMAT)
        .map_err(|_| MarqueeError::Validation(format!("'{}' is not a valid time", raw)))
}

/// Reads a timestamp in `dd/mm/yyyy hh:mm` form.
pub fn read_datetime(input: &mut dyn Prompter, label: &str) -> Result<NaiveDateTime> {
    let raw = input.prompt(&format!("{} (dd/mm/yyyy hh:mm)", label))?;
    NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT)
        .map_err(|_| MarqueeError::Validation(format!("'{}' is not a valid date/time", raw)))
}

/// Reads a booking status literal.
pub fn read_status(input: &mut dyn Prompter, label: &str) -> Result<BookingStatus> {
    input
        .prompt(&format!("{} (Pending/Paid/Cancelled)", label))?
        .parse()
}

/// Reads a comma-separated seat list.
pub fn read_seats(input: &mut dyn Prompter, label: &str) -> Result<SeatList> {
    input
        .prompt(&format!("{} (comma-separated seat numbers)", label))?
        .parse()
}
