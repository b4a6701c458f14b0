use std::fs;

use finledger::{
    errors::Error,
    io::CsvStore,
    ops,
    types::{parse_date, Category, Transaction, TransactionStore},
};
use rust_decimal_macros::dec;

fn transaction(
    date: &str,
    amount: rust_decimal::Decimal,
    category: Category,
    text: &str,
) -> Transaction {
    Transaction::new(parse_date(date).unwrap(), amount, category, text)
}

#[test]
fn test_january_summary_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CsvStore::new(dir.path().join("finance_data.csv"));
    store.initialize().unwrap();
    let records = [
        transaction("01-01-2024", dec!(100), Category::Income, "salary"),
        transaction("05-01-2024", dec!(40), Category::Expense, "food"),
        transaction("10-02-2024", dec!(20), Category::Expense, "bus"),
    ];
    for record in &records {
        store.append(record).unwrap();
    }

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded, records);

    let report = ops::query(
        &loaded,
        parse_date("01-01-2024").unwrap(),
        parse_date("31-01-2024").unwrap(),
    )
    .unwrap();
    assert_eq!(report.transactions(), &[&loaded[0], &loaded[1]]);
    assert_eq!(report.total_income(), dec!(100));
    assert_eq!(report.total_expense(), dec!(40));
    assert_eq!(report.net(), dec!(60));

    let single = ops::query(
        &loaded,
        parse_date("05-01-2024").unwrap(),
        parse_date("05-01-2024").unwrap(),
    )
    .unwrap();
    assert_eq!(single.transactions(), &[&loaded[1]]);
}

#[test]
fn test_reopened_store_keeps_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    let record = transaction(
        "29-02-2024",
        dec!(12.75),
        Category::Other("Gift".into()),
        "book, \"used\"",
    );
    {
        let mut store = CsvStore::new(&path);
        store.initialize().unwrap();
        store.append(&record).unwrap();
    }
    let mut store = CsvStore::new(&path);
    store.initialize().unwrap();
    assert_eq!(store.load_all().unwrap(), vec![record]);
    assert_eq!(
        fs::read_to_string(&path).unwrap().lines().next(),
        Some("date,amount,category,description")
    );
}

#[test]
fn test_corrupted_date_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    fs::write(&path, "date,amount,category,description\n2024/01/01,5,Income,x\n").unwrap();
    let store = CsvStore::new(&path);
    assert!(matches!(
        store.load_all(),
        Err(Error::MalformedRow { line: 2, .. })
    ));
}
