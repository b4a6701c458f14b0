/// Error type that can be returned by fallible operations in this crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error reading or writing CSV data; could wrap IO or parsing errors
    #[error("Error processing CSV: {0}")]
    Load(#[from] csv::Error),
    /// Error on the underlying file or terminal stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The ledger was used before [`initialize`](crate::types::TransactionStore::initialize)
    /// created it.
    #[error("Ledger {0} does not exist; initialize it first")]
    Uninitialized(String),
    /// The first row of the backing file is not `date,amount,category,description`
    #[error("Unexpected ledger header {found:?}")]
    Header {
        /// The header fields actually found
        found: Vec<String>,
    },
    /// A date that does not match the `dd-mm-yyyy` format
    #[error("Malformed date {value:?}, expected dd-mm-yyyy")]
    MalformedDate {
        /// The offending text
        value: String,
    },
    /// A stored row could not be decoded
    #[error("Invalid record on line {line}: {source}")]
    MalformedRow {
        /// Line number in the backing file (1-based, header included)
        line: u64,
        /// What was wrong with the row
        #[source]
        source: Box<Error>,
    },
    /// An amount that is not a positive decimal number
    #[error("Invalid amount {0:?}: amount must be a positive number")]
    InvalidAmount(String),
    /// A total that does not fit in a [`Decimal`](rust_decimal::Decimal)
    #[error("Amounts too large: {0} overflows")]
    Overflow(&'static str),
    /// A category that is not one of the accepted choices
    #[error("Invalid category {0:?}: enter 'I' for Income or 'E' for Expense")]
    InvalidCategory(String),
}
