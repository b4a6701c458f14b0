//! Common datatypes supporting functions throughout the ledger

use std::fmt::Display;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// The single textual format accepted for dates (`dd-mm-yyyy`)
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Field names of the backing file, in column order
pub const COLUMNS: [&str; 4] = ["date", "amount", "category", "description"];

/// Parses a date in [`DATE_FORMAT`].
///
/// # Errors
/// [`Error::MalformedDate`] if `value` is not a valid `dd-mm-yyyy` date
pub fn parse_date(value: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| Error::MalformedDate {
        value: value.to_string(),
    })
}

/// Formats a date in [`DATE_FORMAT`]
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Direction of a transaction.
///
/// Only [`Category::Income`] and [`Category::Expense`] take part in summaries.
/// Any other text is kept as [`Category::Other`] so that it survives a
/// load/append cycle untouched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Money in
    Income,
    /// Money out
    Expense,
    /// Unrecognized category, stored as written
    Other(String),
}

impl Category {
    /// The text stored in the backing file for this category
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Category::Income => "Income",
            Category::Expense => "Expense",
            Category::Other(name) => name,
        }
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Income" => Category::Income,
            "Expense" => Category::Expense,
            _ => Category::Other(name),
        }
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Category::from(name.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dated income or expense entry.
///
/// Transactions are immutable once created; the stores only ever append them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Calendar day of the transaction
    pub(crate) date: NaiveDate,
    /// Magnitude of the transaction; the direction comes from `category`
    pub(crate) amount: Decimal,
    /// Whether this is income or an expense
    pub(crate) category: Category,
    /// Free-form text, possibly empty
    pub(crate) description: String,
}

impl Transaction {
    /// Creates a new transaction.
    ///
    /// A [`Category::Other`] spelled `Income` or `Expense` is stored as the
    /// matching known category, since that is how it will read back.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        category: impl Into<Category>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            category: Category::from(String::from(category.into())),
            description: description.into(),
        }
    }

    /// Returns the day of the transaction
    #[must_use]
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the amount of the transaction
    #[must_use]
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the category of the transaction
    #[must_use]
    #[inline]
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Returns the description of the transaction
    #[must_use]
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// The transactions falling in an inclusive date range, with their totals.
///
/// Borrows the matching records from the slice it was built from, in their
/// original order. An empty report is a normal outcome, not an error.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    /// First day of the range
    pub(crate) start: NaiveDate,
    /// Last day of the range
    pub(crate) end: NaiveDate,
    /// Matching transactions in original order
    pub(crate) transactions: Vec<&'a Transaction>,
    /// Sum of amounts in the [`Category::Income`] category
    pub(crate) total_income: Decimal,
    /// Sum of amounts in the [`Category::Expense`] category
    pub(crate) total_expense: Decimal,
    /// `total_income - total_expense`
    pub(crate) net: Decimal,
}

impl<'a> Report<'a> {
    /// Returns the first day of the range
    #[must_use]
    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the range
    #[must_use]
    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns the matching transactions
    #[must_use]
    #[inline]
    pub fn transactions(&self) -> &[&'a Transaction] {
        &self.transactions
    }

    /// Returns total income in the range
    #[must_use]
    #[inline]
    pub fn total_income(&self) -> Decimal {
        self.total_income
    }

    /// Returns total expenses in the range
    #[must_use]
    #[inline]
    pub fn total_expense(&self) -> Decimal {
        self.total_expense
    }

    /// Returns income minus expenses
    #[must_use]
    #[inline]
    pub fn net(&self) -> Decimal {
        self.net
    }

    /// Returns whether no transaction fell in the range
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Income and expense totals for one day, a point of the chart series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotals {
    /// The day
    pub date: NaiveDate,
    /// Sum of income on that day
    pub income: Decimal,
    /// Sum of expenses on that day
    pub expense: Decimal,
}

/// An interface to the append-only transaction log
pub trait TransactionStore {
    /// Creates the ledger if it does not exist yet. Calling it again is a no-op.
    fn initialize(&mut self) -> Result<(), Error>;

    /// Appends one transaction to the end of the ledger
    fn append(&mut self, transaction: &Transaction) -> Result<(), Error>;

    /// Loads every transaction, in the order they were appended
    fn load_all(&self) -> Result<Vec<Transaction>, Error>;
}

/// Holds all transactions in an in-memory structure.
///
/// # Limitations
/// No persistence.
#[derive(Default, Debug)]
pub struct MemoryStore {
    /// `None` until the store is initialized
    pub(crate) transactions: Option<Vec<Transaction>>,
}

impl MemoryStore {
    /// Creates a new, uninitialized [`MemoryStore`]
    #[must_use]
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("05-01-2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(format_date(date), "05-01-2024");
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        for value in ["2024-01-05", "5/1/2024", "32-01-2024", "", "05-13-2024"] {
            match parse_date(value) {
                Err(Error::MalformedDate { value: found }) => assert_eq!(found, value),
                other => panic!("Expected malformed date for {value:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_category_names() {
        assert_eq!(Category::from("Income"), Category::Income);
        assert_eq!(Category::from("Expense"), Category::Expense);
        assert_eq!(
            Category::from("income"),
            Category::Other("income".to_string())
        );
        assert_eq!(String::from(Category::Other("Gift".into())), "Gift");
        assert_eq!(Category::Expense.to_string(), "Expense");
    }

    #[test]
    fn test_known_names_in_other_are_normalized() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let transaction = Transaction::new(
            date,
            Decimal::from(5),
            Category::Other("Income".into()),
            "",
        );
        assert_eq!(transaction.category(), &Category::Income);
        let transaction =
            Transaction::new(date, Decimal::from(5), Category::Other("Bonus".into()), "");
        assert_eq!(transaction.category(), &Category::Other("Bonus".into()));
    }
}
