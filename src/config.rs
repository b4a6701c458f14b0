//! Runtime configuration for the ledger

use std::path::{Path, PathBuf};

/// Default location of the backing file, relative to the working directory
pub const DEFAULT_LEDGER_PATH: &str = "finance_data.csv";

/// Default currency symbol used when printing totals
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Default width, in characters, of the longest chart bar
pub const DEFAULT_CHART_WIDTH: usize = 40;

/// Settings passed explicitly to the store and the presenter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the CSV backing file
    pub(crate) ledger_path: PathBuf,
    /// Prefix for monetary amounts in the summary and chart
    pub(crate) currency_symbol: String,
    /// Width of the longest bar in the chart
    pub(crate) chart_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            chart_width: DEFAULT_CHART_WIDTH,
        }
    }
}

impl Config {
    /// Sets the backing file path
    #[must_use]
    pub fn with_ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
        self
    }

    /// Sets the currency symbol
    #[must_use]
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Sets the chart width; a width of zero is raised to one
    #[must_use]
    pub fn with_chart_width(mut self, width: usize) -> Self {
        self.chart_width = width.max(1);
        self
    }

    /// Returns the backing file path
    #[must_use]
    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    /// Returns the currency symbol
    #[must_use]
    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Returns the chart width
    #[must_use]
    pub fn chart_width(&self) -> usize {
        self.chart_width
    }
}
