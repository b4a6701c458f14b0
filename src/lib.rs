#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
/// Runtime settings passed to the store and presenter
pub mod config;
/// Error handling and custom [`Error`](std::error::Error) types
pub mod errors;
/// Reading and writing the transaction log
pub mod io;
/// Date range queries and aggregation
pub mod ops;
/// Parsing of user-entered values
pub mod prompt;
/// Text rendering of reports and charts
pub mod report;
/// Interactive menu loop
pub mod session;
/// Data types used throughout the ledger
pub mod types;
