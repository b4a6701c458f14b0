//! Text output of query results and the income/expense chart

use std::io::Write;

use rust_decimal::{prelude::ToPrimitive, Decimal};

use crate::{
    config::Config,
    errors::Error,
    types::{format_date, DailyTotals, Report},
};

/// Prints the transactions of a report as a table, followed by the summary.
///
/// An empty report prints a single notice instead.
///
/// Output will be in the form:
/// ```text
/// Transactions from 01-01-2024 to 31-01-2024
/// date        amount  category  description
/// 01-01-2024  100     Income    salary
/// 05-01-2024  40      Expense   food
///
/// Summary:
/// Total Income: ₹100.00
/// Total Expense: ₹40.00
/// Net Savings: ₹60.00
/// ```
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &Report<'_>,
    config: &Config,
) -> Result<(), Error> {
    if report.is_empty() {
        writeln!(writer, "No transactions found in the given date range.")?;
        return Ok(());
    }
    writeln!(
        writer,
        "Transactions from {} to {}",
        format_date(report.start()),
        format_date(report.end())
    )?;

    let rows: Vec<[String; 4]> = report
        .transactions()
        .iter()
        .map(|transaction| {
            [
                format_date(transaction.date()),
                transaction.amount().to_string(),
                transaction.category().to_string(),
                transaction.description().to_string(),
            ]
        })
        .collect();
    let header = ["date", "amount", "category", "description"].map(String::from);
    let mut widths = [0usize; 4];
    for row in std::iter::once(&header).chain(&rows) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    for row in std::iter::once(&header).chain(&rows) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(writer, "{}", line.trim_end())?;
    }

    let symbol = config.currency_symbol();
    writeln!(writer)?;
    writeln!(writer, "Summary:")?;
    writeln!(writer, "Total Income: {symbol}{:.2}", report.total_income())?;
    writeln!(writer, "Total Expense: {symbol}{:.2}", report.total_expense())?;
    writeln!(writer, "Net Savings: {symbol}{:.2}", report.net())?;
    Ok(())
}

/// Length of a bar for `value`, scaled so that `max` fills `width` characters
fn bar_length(value: Decimal, max: Decimal, width: usize) -> usize {
    if max <= Decimal::ZERO {
        return 0;
    }
    let width_decimal = Decimal::from(width);
    value
        .checked_mul(width_decimal)
        .and_then(|scaled| scaled.checked_div(max))
        // Very large amounts: scale the ratio instead, losing some precision
        .or_else(|| {
            value
                .checked_div(max)
                .and_then(|ratio| ratio.checked_mul(width_decimal))
        })
        .map_or(width, |length| length.round().to_usize().unwrap_or(0))
        .min(width)
}

/// Draws the daily income and expense series as horizontal bars.
///
/// Each day gets an income row (`+`) and an expense row (`-`), scaled against the
/// largest daily value so that it spans [`Config::chart_width`] characters.
pub fn write_chart<W: Write>(
    writer: &mut W,
    series: &[DailyTotals],
    config: &Config,
) -> Result<(), Error> {
    writeln!(writer, "Income and Expenses Over Time")?;
    let max = series
        .iter()
        .flat_map(|point| [point.income, point.expense])
        .max()
        .unwrap_or(Decimal::ZERO);
    let width = config.chart_width();
    let symbol = config.currency_symbol();
    for point in series {
        let income = "+".repeat(bar_length(point.income, max, width));
        let expense = "-".repeat(bar_length(point.expense, max, width));
        writeln!(
            writer,
            "{}  Income  |{income:<width$}| {symbol}{:.2}",
            format_date(point.date),
            point.income
        )?;
        writeln!(
            writer,
            "{:10}  Expense |{expense:<width$}| {symbol}{:.2}",
            "", point.expense
        )?;
    }
    Ok(())
}
