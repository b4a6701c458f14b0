use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use crate::{
    errors::Error,
    types::{Category, DailyTotals, Report, Transaction},
};

/// Selects the transactions dated within `[start, end]`, both ends included, and totals them.
///
/// Relative order of the matching transactions is preserved. The bounds are not
/// reordered: when `start > end` the report is empty.
///
/// Only [`Category::Income`] and [`Category::Expense`] contribute to the totals;
/// other categories are listed but not summed.
///
/// # Errors
/// [`Error::Overflow`] if a total does not fit in a [`Decimal`]
pub fn query(
    records: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Report<'_>, Error> {
    let transactions: Vec<&Transaction> = records
        .iter()
        .filter(|transaction| start <= transaction.date && transaction.date <= end)
        .collect();
    let total_income = sum_category(&transactions, &Category::Income)?;
    let total_expense = sum_category(&transactions, &Category::Expense)?;
    let net = total_income
        .checked_sub(total_expense)
        .ok_or(Error::Overflow("net savings"))?;
    debug!(
        "Query {start}..={end} matched {} of {} transactions",
        transactions.len(),
        records.len()
    );
    Ok(Report {
        start,
        end,
        transactions,
        total_income,
        total_expense,
        net,
    })
}

fn sum_category(transactions: &[&Transaction], category: &Category) -> Result<Decimal, Error> {
    transactions
        .iter()
        .filter(|transaction| &transaction.category == category)
        .try_fold(Decimal::ZERO, |total, transaction| {
            total
                .checked_add(transaction.amount)
                .ok_or(Error::Overflow(match category {
                    Category::Income => "total income",
                    _ => "total expense",
                }))
        })
}

/// Builds the chart series for a report: one point per distinct day present in the
/// report, ascending, holding that day's income and expense sums.
///
/// # Errors
/// [`Error::Overflow`] if a daily sum does not fit in a [`Decimal`]
pub fn daily_totals(report: &Report<'_>) -> Result<Vec<DailyTotals>, Error> {
    let mut days: BTreeMap<NaiveDate, DailyTotals> = BTreeMap::new();
    for transaction in report.transactions() {
        let totals = days
            .entry(transaction.date)
            .or_insert_with(|| DailyTotals {
                date: transaction.date,
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
            });
        let (sum, name) = match transaction.category {
            Category::Income => (&mut totals.income, "daily income"),
            Category::Expense => (&mut totals.expense, "daily expense"),
            // Present on the axis, but not plotted
            Category::Other(_) => continue,
        };
        *sum = sum
            .checked_add(transaction.amount)
            .ok_or(Error::Overflow(name))?;
    }
    Ok(days.into_values().collect())
}
