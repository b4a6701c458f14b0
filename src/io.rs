//! Reading and writing the CSV transaction log

use std::{
    fs::{File, OpenOptions},
    io::{BufReader, ErrorKind, Read, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::Error,
    types::{
        format_date, parse_date, Category, MemoryStore, Transaction, TransactionStore, COLUMNS,
    },
};

/// A row as found in the backing file, before the date has been checked
#[derive(Deserialize, Debug)]
struct StoredRow {
    date: String,
    #[serde(deserialize_with = "rust_decimal::serde::str::deserialize")]
    amount: Decimal,
    category: Category,
    description: String,
}

impl TryFrom<StoredRow> for Transaction {
    type Error = Error;

    fn try_from(row: StoredRow) -> Result<Self, Self::Error> {
        Ok(Transaction {
            date: parse_date(&row.date)?,
            amount: row.amount,
            category: row.category,
            description: row.description,
        })
    }
}

/// Type used for serializing a [`Transaction`] with its date in the fixed format
#[derive(Serialize, Debug)]
struct RowRef<'a> {
    date: String,
    #[serde(serialize_with = "rust_decimal::serde::str::serialize")]
    amount: Decimal,
    category: &'a str,
    description: &'a str,
}

impl<'a> From<&'a Transaction> for RowRef<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        Self {
            date: format_date(transaction.date),
            amount: transaction.amount,
            category: transaction.category.as_str(),
            description: &transaction.description,
        }
    }
}

/// Writes the header row of a new ledger.
///
/// Output data will be:
/// ```csv
/// date,amount,category,description
/// ```
pub fn write_header<W: Write>(writer: &mut W) -> Result<(), Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(COLUMNS)?;
    csv_writer.flush()?;
    Ok(())
}

/// Writes a single transaction as one CSV row, without a header, and flushes it.
///
/// Descriptions containing commas or quotes are quoted.
pub fn write_transaction<W: Write>(
    writer: &mut W,
    transaction: &Transaction,
) -> Result<(), Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.serialize(RowRef::from(transaction))?;
    csv_writer.flush()?;
    Ok(())
}

/// Loads transactions from a CSV-formatted stream, in file order.
///
/// Expects input data in this format (including header):
/// ```csv
/// date,amount,category,description
/// 01-01-2024,100,Income,salary
/// 05-01-2024,40,Expense,food
/// ```
///
/// # Errors
/// [`Error::Header`] if the header is not exactly `date,amount,category,description`,
/// [`Error::MalformedRow`] for a row whose date or amount cannot be parsed
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>, Error> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    if headers.iter().ne(COLUMNS.iter().copied()) {
        return Err(Error::Header {
            found: headers.iter().map(String::from).collect(),
        });
    }
    let mut transactions = vec![];
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        let row: Result<StoredRow, csv::Error> = record.deserialize(Some(&headers));
        let transaction = row
            .map_err(Error::from)
            .and_then(Transaction::try_from)
            .map_err(|err| Error::MalformedRow {
                line,
                source: Box::new(err),
            })?;
        transactions.push(transaction);
    }
    Ok(transactions)
}

/// The ledger kept in a single CSV file on disk.
///
/// # Limitations
/// Assumes a single writer. Every load re-reads the whole file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    /// Location of the backing file
    path: PathBuf,
}

impl CsvStore {
    /// Creates a store backed by the file at `path`. Nothing is touched on disk
    /// until [`TransactionStore::initialize`] is called.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store backed by the file named in `config`
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ledger_path())
    }

    /// Returns the path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn not_found(&self, err: std::io::Error) -> Error {
        if err.kind() == ErrorKind::NotFound {
            Error::Uninitialized(self.path.display().to_string())
        } else {
            Error::Io(err)
        }
    }
}

impl TransactionStore for CsvStore {
    fn initialize(&mut self) -> Result<(), Error> {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(mut file) => {
                write_header(&mut file)?;
                info!("Created ledger at {}", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                debug!("Ledger already exists at {}", self.path.display());
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn append(&mut self, transaction: &Transaction) -> Result<(), Error> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|err| self.not_found(err))?;
        write_transaction(&mut file, transaction)?;
        debug!(
            "Appended {} {} on {} to {}",
            transaction.category,
            transaction.amount,
            format_date(transaction.date),
            self.path.display()
        );
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Transaction>, Error> {
        let file = File::open(&self.path).map_err(|err| self.not_found(err))?;
        let transactions = read_transactions(BufReader::new(file))?;
        debug!(
            "Loaded {} transactions from {}",
            transactions.len(),
            self.path.display()
        );
        Ok(transactions)
    }
}

impl TransactionStore for MemoryStore {
    fn initialize(&mut self) -> Result<(), Error> {
        self.transactions.get_or_insert_with(Vec::new);
        Ok(())
    }

    fn append(&mut self, transaction: &Transaction) -> Result<(), Error> {
        self.transactions
            .as_mut()
            .ok_or_else(|| Error::Uninitialized("in memory".to_string()))?
            .push(transaction.clone());
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Transaction>, Error> {
        self.transactions
            .clone()
            .ok_or_else(|| Error::Uninitialized("in memory".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Cursor};

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;

    fn day(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new(day(1, 1, 2024), dec!(100), Category::Income, "salary"),
            Transaction::new(day(5, 1, 2024), dec!(40.50), Category::Expense, "food"),
            Transaction::new(day(10, 2, 2024), dec!(20), Category::Expense, "bus"),
        ]
    }

    const TEST_INPUT_CSV: &[u8] = b"date,amount,category,description\r
01-01-2024,100.0,Income,salary\r
05-01-2024,40.0,Expense,\r
06-01-2024,12.5,Gift,\"flowers, roses\"\r
";

    #[test]
    fn test_read_file_written_elsewhere() {
        let transactions = read_transactions(Cursor::new(TEST_INPUT_CSV)).unwrap();
        assert_eq!(transactions.len(), 3);
        assert_eq!(transactions[0].date(), day(1, 1, 2024));
        assert_eq!(transactions[0].amount(), dec!(100));
        assert_eq!(transactions[1].category(), &Category::Expense);
        assert_eq!(transactions[1].description(), "");
        assert_eq!(transactions[2].category(), &Category::Other("Gift".into()));
        assert_eq!(transactions[2].description(), "flowers, roses");
    }

    #[test]
    fn test_write_quotes_description() {
        let mut output = vec![];
        let transaction = Transaction::new(
            day(3, 3, 2024),
            dec!(7.25),
            Category::Expense,
            "coffee, \"large\"",
        );
        write_transaction(&mut output, &transaction).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "03-03-2024,7.25,Expense,\"coffee, \"\"large\"\"\"\n"
        );
    }

    #[test]
    fn test_malformed_date_names_line() {
        let input = b"date,amount,category,description\n\
                      01-01-2024,1,Income,a\n\
                      2024-01-02,2,Income,b\n";
        match read_transactions(Cursor::new(&input[..])) {
            Err(Error::MalformedRow { line, source }) => {
                assert_eq!(line, 3);
                assert!(matches!(*source, Error::MalformedDate { .. }));
            }
            other => panic!("Expected malformed row, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_amount() {
        let input = b"date,amount,category,description\n01-01-2024,lots,Income,a\n";
        assert!(matches!(
            read_transactions(Cursor::new(&input[..])),
            Err(Error::MalformedRow { line: 2, .. })
        ));
    }

    #[test]
    fn test_wrong_header() {
        let input = b"date,category,amount,description\n";
        match read_transactions(Cursor::new(&input[..])) {
            Err(Error::Header { found }) => assert_eq!(found[1], "category"),
            other => panic!("Expected header error, got {other:?}"),
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let mut store = CsvStore::new(&path);
        store.initialize().unwrap();
        let first = fs::read_to_string(&path).unwrap();
        assert_eq!(first, "date,amount,category,description\n");
        store.initialize().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), first);

        store.append(&sample()[0]).unwrap();
        let with_row = fs::read_to_string(&path).unwrap();
        store.initialize().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), with_row);
    }

    #[test]
    fn test_append_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CsvStore::new(dir.path().join("ledger.csv"));
        store.initialize().unwrap();
        assert!(store.load_all().unwrap().is_empty());
        for transaction in &sample() {
            store.append(transaction).unwrap();
        }
        assert_eq!(store.load_all().unwrap(), sample());
    }

    #[test]
    fn test_uninitialized_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CsvStore::new(dir.path().join("missing.csv"));
        assert!(matches!(store.load_all(), Err(Error::Uninitialized(_))));
        assert!(matches!(
            store.append(&sample()[0]),
            Err(Error::Uninitialized(_))
        ));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_from_config() {
        let config = Config::default().with_ledger_path("/var/tmp/money.csv");
        assert_eq!(
            CsvStore::from_config(&config).path(),
            Path::new("/var/tmp/money.csv")
        );
    }

    #[test]
    fn test_category_spelled_like_known_one_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CsvStore::new(dir.path().join("ledger.csv"));
        store.initialize().unwrap();
        let transaction = Transaction::new(
            day(2, 1, 2024),
            dec!(5),
            Category::Other("Income".into()),
            "bonus",
        );
        store.append(&transaction).unwrap();
        assert_eq!(store.load_all().unwrap(), vec![transaction]);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CsvStore::new(dir.path());
        match store.append(&sample()[0]) {
            Err(Error::Io(err)) => assert_ne!(err.kind(), ErrorKind::NotFound),
            other => panic!("Expected I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.append(&sample()[0]).is_err());
        store.initialize().unwrap();
        for transaction in &sample() {
            store.append(transaction).unwrap();
        }
        store.initialize().unwrap();
        assert_eq!(store.load_all().unwrap(), sample());
    }
}
