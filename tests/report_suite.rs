use chrono::NaiveDate;

use ledger_core::ledger::{Book, Entry, EntryKind};
use ledger_core::report::{
    available_months, category_breakdown, expense_by_category, monthly_report, monthly_totals,
    Month,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(d: NaiveDate, kind: EntryKind, category: &str, amount: f64) -> Entry {
    Entry::new(d, kind, category, amount, "")
}

fn multi_month_book() -> Book {
    Book::from_entries(vec![
        entry(date(2024, 1, 5), EntryKind::Income, "Salary/Receipts", 2800.0),
        entry(date(2024, 1, 20), EntryKind::Expense, "Rent", 900.0),
        entry(date(2024, 2, 5), EntryKind::Income, "Salary/Receipts", 2800.0),
        entry(date(2024, 2, 11), EntryKind::Expense, "Groceries", 310.25),
        entry(date(2024, 2, 11), EntryKind::Expense, "Electricity", 89.75),
        entry(date(2024, 3, 15), EntryKind::Expense, "Groceries", 100.0),
        entry(date(2024, 3, 10), EntryKind::Expense, "Rent", 900.0),
    ])
}

#[test]
fn empty_book_reports_no_months() {
    // Scenario A: empty store means "no data", not an error.
    let book = Book::new();
    assert!(available_months(&book).is_empty());
    let month = Month::new(2024, 3).unwrap();
    let report = monthly_report(&book, month);
    assert_eq!(report.totals.income, 0.0);
    assert_eq!(report.totals.expense, 0.0);
    assert!(report.breakdown.is_empty());
    assert!(report.entries.is_empty());
}

#[test]
fn balance_identity_holds_for_every_month() {
    let book = multi_month_book();
    let months = available_months(&book);
    assert_eq!(months.len(), 3);
    for month in months {
        let totals = monthly_totals(&book, month);
        assert_eq!(totals.balance(), totals.income - totals.expense);
        let breakdown_total: f64 = expense_by_category(&book, month).values().sum();
        assert_eq!(breakdown_total, totals.expense);
    }
}

#[test]
fn months_are_presented_most_recent_first() {
    let months = available_months(&multi_month_book());
    let labels: Vec<String> = months.iter().map(|m| m.to_string()).collect();
    assert_eq!(labels, vec!["2024-03", "2024-02", "2024-01"]);
}

#[test]
fn march_breakdown_matches_scenario_shares() {
    // Scenario C: Groceries 100 + Rent 900 split 10%/90%.
    let book = multi_month_book();
    let march = Month::new(2024, 3).unwrap();

    let sums = expense_by_category(&book, march);
    assert_eq!(sums.len(), 2);
    assert_eq!(sums["Groceries"], 100.0);
    assert_eq!(sums["Rent"], 900.0);

    let breakdown = category_breakdown(&book, march);
    for slice in &breakdown.slices {
        match slice.category.as_str() {
            "Groceries" => assert_eq!(slice.share, 0.1),
            "Rent" => assert_eq!(slice.share, 0.9),
            other => panic!("unexpected category {other}"),
        }
    }
}

#[test]
fn income_categories_never_appear_in_the_expense_breakdown() {
    let book = multi_month_book();
    let january = Month::new(2024, 1).unwrap();
    let sums = expense_by_category(&book, january);
    assert_eq!(sums.len(), 1);
    assert!(!sums.contains_key("Salary/Receipts"));
}

#[test]
fn report_view_is_sorted_newest_first() {
    let book = multi_month_book();
    let report = monthly_report(&book, Month::new(2024, 3).unwrap());
    let dates: Vec<NaiveDate> = report.entries.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![date(2024, 3, 15), date(2024, 3, 10)]);
}
