use std::{io, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use finledger::{
    config::{Config, DEFAULT_CURRENCY_SYMBOL, DEFAULT_LEDGER_PATH},
    io::CsvStore,
    ops,
    prompt::{parse_amount, parse_date_or_today, parse_required_date},
    report,
    session::Session,
    types::{Category, Transaction, TransactionStore},
};

/// Record income and expenses in a CSV ledger and summarize them by date range
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Path of the CSV ledger file
    #[arg(long, env = "FINLEDGER_FILE", default_value = DEFAULT_LEDGER_PATH)]
    file: PathBuf,

    /// Currency symbol printed before totals
    #[arg(long, env = "FINLEDGER_CURRENCY", default_value = DEFAULT_CURRENCY_SYMBOL)]
    currency: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the ledger file if it does not exist
    Init,
    /// Append a transaction
    Add {
        /// Amount, a positive decimal number
        #[arg(short, long)]
        amount: String,
        /// `income`, `expense`, or any other category name
        #[arg(short, long)]
        category: String,
        /// Date of the transaction (dd-mm-yyyy), today if omitted
        #[arg(short, long, default_value = "")]
        date: String,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Show transactions and totals between two dates, inclusive
    View {
        /// First day (dd-mm-yyyy)
        start: String,
        /// Last day (dd-mm-yyyy)
        end: String,
        /// Also draw the daily income/expense chart
        #[arg(long)]
        chart: bool,
    },
    /// Interactive menu (the default)
    Menu,
}

fn category_from_arg(name: &str) -> Category {
    match name.to_ascii_lowercase().as_str() {
        "income" | "i" => Category::Income,
        "expense" | "e" => Category::Expense,
        _ => Category::from(name),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::default()
        .with_ledger_path(cli.file)
        .with_currency_symbol(cli.currency);
    let mut store = CsvStore::from_config(&config);
    store
        .initialize()
        .with_context(|| format!("Couldn't create ledger at {}", store.path().display()))?;

    match cli.command.unwrap_or(Command::Menu) {
        Command::Init => println!("Ledger ready at {}", store.path().display()),
        Command::Add {
            amount,
            category,
            date,
            description,
        } => {
            let today = chrono::Local::now().date_naive();
            let transaction = Transaction::new(
                parse_date_or_today(&date, today)?,
                parse_amount(&amount)?,
                category_from_arg(&category),
                description,
            );
            store
                .append(&transaction)
                .context("Failed to append transaction")?;
            println!("Entry added successfully");
        }
        Command::View { start, end, chart } => {
            let (start, end) = (parse_required_date(&start)?, parse_required_date(&end)?);
            let records = store.load_all().context("Failed to load ledger")?;
            let found = ops::query(&records, start, end)?;
            let mut stdout = io::stdout().lock();
            report::write_report(&mut stdout, &found, &config)?;
            if chart {
                report::write_chart(&mut stdout, &ops::daily_totals(&found)?, &config)?;
            }
        }
        Command::Menu => {
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            Session::new(store, stdin, stdout, config).run()?;
        }
    }
    Ok(())
}
