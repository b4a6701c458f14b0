//! The interactive menu loop

use std::io::{BufRead, Write};

use chrono::{Local, NaiveDate};
use log::warn;

use crate::{
    config::Config,
    errors::Error,
    ops::{daily_totals, query},
    prompt::{is_yes, parse_amount, parse_category, parse_date_or_today, parse_required_date},
    report::{write_chart, write_report},
    types::{Transaction, TransactionStore},
};

/// Whether the menu loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Quit,
}

/// A menu-driven session over a [`TransactionStore`].
///
/// Reads answers line by line from `input` and writes prompts and results to
/// `output`. Failures of the store are shown to the user and the menu is offered
/// again; only failures of `input` or `output` end the session with an error.
/// The session also ends when `input` is exhausted.
pub struct Session<S, R, W> {
    store: S,
    input: R,
    output: W,
    config: Config,
    today: NaiveDate,
}

impl<S, R, W> Session<S, R, W>
where
    S: TransactionStore,
    R: BufRead,
    W: Write,
{
    /// Creates a session, using the local date as "today"
    pub fn new(store: S, input: R, output: W, config: Config) -> Self {
        Self {
            store,
            input,
            output,
            config,
            today: Local::now().date_naive(),
        }
    }

    /// Overrides the date used when the user leaves the transaction date blank
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Ends the session, handing back the store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Runs the menu until the user exits or input runs out.
    pub fn run(&mut self) -> Result<(), Error> {
        if let Err(err) = self.store.initialize() {
            self.show_error(&err)?;
        }
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "1. Add a new transaction")?;
            writeln!(
                self.output,
                "2. View transactions and summary within a date range"
            )?;
            writeln!(self.output, "3. Exit")?;
            let Some(choice) = self.ask("Enter your choice (1-3): ")? else {
                break;
            };
            let step = match choice.trim() {
                "1" => self.add()?,
                "2" => self.view()?,
                "3" => {
                    writeln!(self.output, "Exiting..")?;
                    Step::Quit
                }
                _ => {
                    writeln!(self.output, "Invalid choice. Enter 1, 2 or 3.")?;
                    Step::Continue
                }
            };
            if step == Step::Quit {
                break;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn add(&mut self) -> Result<Step, Error> {
        let today = self.today;
        let Some(date) = self.ask_until(
            "Enter the date of the transaction (dd-mm-yyyy) or enter for today's date: ",
            |answer| parse_date_or_today(answer, today),
        )?
        else {
            return Ok(Step::Quit);
        };
        let Some(amount) = self.ask_until("Enter the amount: ", parse_amount)? else {
            return Ok(Step::Quit);
        };
        let Some(category) = self.ask_until(
            "Enter the category ('I' for Income or 'E' for Expense): ",
            parse_category,
        )?
        else {
            return Ok(Step::Quit);
        };
        let Some(description) = self.ask("Enter a description (optional): ")? else {
            return Ok(Step::Quit);
        };

        let transaction = Transaction::new(date, amount, category, description.trim());
        match self.store.append(&transaction) {
            Ok(()) => writeln!(self.output, "Entry added successfully")?,
            Err(err) => self.show_error(&err)?,
        }
        Ok(Step::Continue)
    }

    fn view(&mut self) -> Result<Step, Error> {
        let Some(start) =
            self.ask_until("Enter the start date (dd-mm-yyyy): ", parse_required_date)?
        else {
            return Ok(Step::Quit);
        };
        let Some(end) = self.ask_until("Enter the end date (dd-mm-yyyy): ", parse_required_date)?
        else {
            return Ok(Step::Quit);
        };

        let records = match self.store.load_all() {
            Ok(records) => records,
            Err(err) => {
                self.show_error(&err)?;
                return Ok(Step::Continue);
            }
        };
        let report = match query(&records, start, end) {
            Ok(report) => report,
            Err(err) => {
                self.show_error(&err)?;
                return Ok(Step::Continue);
            }
        };
        write_report(&mut self.output, &report, &self.config)?;

        let Some(answer) = self.ask("Do you want to see a plot? (y/n) ")? else {
            return Ok(Step::Quit);
        };
        if is_yes(&answer) {
            match daily_totals(&report) {
                Ok(series) => write_chart(&mut self.output, &series, &self.config)?,
                Err(err) => self.show_error(&err)?,
            }
        }
        Ok(Step::Continue)
    }

    /// Prints `prompt` and reads one line, without its line ending.
    /// Returns `None` once input is exhausted.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>, Error> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim_end_matches(['\r', '\n']);
        Ok(Some(answer.to_string()))
    }

    /// Asks until `parse` accepts the answer, printing each rejection
    fn ask_until<T, F>(&mut self, prompt: &str, parse: F) -> Result<Option<T>, Error>
    where
        F: Fn(&str) -> Result<T, Error>,
    {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn show_error(&mut self, err: &Error) -> Result<(), Error> {
        warn!("{err}");
        writeln!(self.output, "Error: {err}")?;
        Ok(())
    }
}
