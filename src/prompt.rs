//! Parsing and validation of values typed in by the user

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    errors::Error,
    types::{parse_date, Category},
};

/// Parses a date in `dd-mm-yyyy`, or returns `today` when the input is blank.
pub fn parse_date_or_today(input: &str, today: NaiveDate) -> Result<NaiveDate, Error> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(today);
    }
    parse_date(input)
}

/// Parses a required date in `dd-mm-yyyy`
pub fn parse_required_date(input: &str) -> Result<NaiveDate, Error> {
    parse_date(input.trim())
}

/// Parses an amount, which must be a decimal number greater than zero.
///
/// # Errors
/// [`Error::InvalidAmount`] for anything else
pub fn parse_amount(input: &str) -> Result<Decimal, Error> {
    let input = input.trim();
    match Decimal::from_str(input) {
        Ok(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(Error::InvalidAmount(input.to_string())),
    }
}

/// Maps the menu shorthand `I` or `E` (any case) to a category.
///
/// # Errors
/// [`Error::InvalidCategory`] for anything else
pub fn parse_category(input: &str) -> Result<Category, Error> {
    let input = input.trim();
    match input.to_ascii_uppercase().as_str() {
        "I" => Ok(Category::Income),
        "E" => Ok(Category::Expense),
        _ => Err(Error::InvalidCategory(input.to_string())),
    }
}

/// Returns whether a yes/no answer is affirmative
#[must_use]
pub fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
