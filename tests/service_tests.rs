use chrono::NaiveDate;
use tempfile::{tempdir, TempDir};

use ledger_core::core::LedgerManager;
use ledger_core::errors::LedgerError;
use ledger_core::ledger::{EntryDraft, EntryKind};
use ledger_core::report::Month;
use ledger_core::storage::CsvStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn manager_in(temp: &TempDir) -> LedgerManager {
    LedgerManager::open(Box::new(CsvStore::new(temp.path().join("entries.csv"))))
}

fn march() -> Month {
    Month::new(2024, 3).unwrap()
}

fn expense(category: &str, day: u32, amount: f64) -> EntryDraft {
    EntryDraft::new(date(2024, 3, day), EntryKind::Expense, category, amount, "")
}

#[test]
fn submitted_entry_survives_a_reload() {
    // Scenario B: one expense, reload, totals reflect it.
    let temp = tempdir().unwrap();
    let mut manager = manager_in(&temp);
    manager
        .submit_entry(expense("Groceries", 15, 120.5))
        .expect("submit");
    drop(manager);

    let manager = manager_in(&temp);
    assert!(manager.load_warnings().is_empty());
    let report = manager.select_month(march());
    assert_eq!(report.totals.income, 0.0);
    assert_eq!(report.totals.expense, 120.5);
    assert_eq!(report.totals.balance(), -120.5);
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].note, "");
}

#[test]
fn zero_and_negative_amounts_never_mutate_the_collection() {
    let temp = tempdir().unwrap();
    let mut manager = manager_in(&temp);
    for amount in [0.0, -120.5] {
        let result = manager.submit_entry(expense("Groceries", 15, amount));
        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }
    assert!(manager.book().is_empty());
    assert!(manager.available_months().is_empty());
}

#[test]
fn editing_a_row_updates_monthly_totals() {
    // Scenario D: raise the Groceries entry from 100 to 150.
    let temp = tempdir().unwrap();
    let mut manager = manager_in(&temp);
    manager.submit_entry(expense("Groceries", 15, 100.0)).unwrap();
    manager.submit_entry(expense("Rent", 10, 900.0)).unwrap();
    assert_eq!(manager.select_month(march()).totals.expense, 1000.0);

    let report = manager.select_month(march());
    let row = report
        .entries
        .iter()
        .position(|e| e.category == "Groceries")
        .unwrap();
    manager
        .edit_entry(march(), row, expense("Groceries", 15, 150.0))
        .expect("edit");

    assert_eq!(manager.select_month(march()).totals.expense, 1050.0);

    // The edit is persisted, not just in memory.
    drop(manager);
    let manager = manager_in(&temp);
    assert_eq!(manager.select_month(march()).totals.expense, 1050.0);
}

#[test]
fn deleting_a_row_removes_its_category_but_keeps_the_month() {
    // Scenario E: delete Rent; March stays alive through Groceries.
    let temp = tempdir().unwrap();
    let mut manager = manager_in(&temp);
    manager.submit_entry(expense("Groceries", 15, 100.0)).unwrap();
    manager.submit_entry(expense("Rent", 10, 900.0)).unwrap();

    let report = manager.select_month(march());
    let row = report
        .entries
        .iter()
        .position(|e| e.category == "Rent")
        .unwrap();
    let removed = manager.delete_entry(march(), row).expect("delete");
    assert_eq!(removed.category, "Rent");

    assert_eq!(manager.available_months(), vec![march()]);
    let report = manager.select_month(march());
    assert_eq!(report.totals.expense, 100.0);
    assert!(report
        .breakdown
        .slices
        .iter()
        .all(|slice| slice.category != "Rent"));
}

#[test]
fn duplicate_tuples_resolve_to_the_first_entry_deterministically() {
    let temp = tempdir().unwrap();
    let mut manager = manager_in(&temp);
    let first = manager
        .submit_entry(EntryDraft::new(
            date(2024, 3, 15),
            EntryKind::Expense,
            "Groceries",
            50.0,
            "first",
        ))
        .unwrap();
    let second = manager
        .submit_entry(EntryDraft::new(
            date(2024, 3, 15),
            EntryKind::Expense,
            "Groceries",
            50.0,
            "second",
        ))
        .unwrap();

    // Both rendered rows carry the same tuple; either resolves to the first
    // entry in collection order, every time.
    for row in [0usize, 1usize] {
        let probe = manager_probe(&manager, row);
        assert_eq!(probe, first);
        assert_ne!(probe, second);
    }

    let removed = manager.delete_entry(march(), 1).expect("delete");
    assert_eq!(removed.id, first);
    assert_eq!(manager.book().entries()[0].id, second);
}

/// Resolves a rendered row the way a mutation would, without mutating.
fn manager_probe(manager: &LedgerManager, row: usize) -> uuid::Uuid {
    let view = manager.select_month(march()).entries;
    let rendered = &view[row];
    let index = manager.book().locate(rendered).expect("tuple match");
    manager.book().entries()[index].id
}

#[test]
fn mutations_on_missing_rows_fail_without_saving() {
    let temp = tempdir().unwrap();
    let mut manager = manager_in(&temp);
    manager.submit_entry(expense("Groceries", 15, 100.0)).unwrap();

    let draft = expense("Groceries", 15, 200.0);
    assert!(matches!(
        manager.edit_entry(march(), 3, draft),
        Err(LedgerError::NotFound(_))
    ));
    assert!(matches!(
        manager.delete_entry(march(), 3),
        Err(LedgerError::NotFound(_))
    ));
    assert_eq!(manager.book().len(), 1);
    assert_eq!(manager.select_month(march()).totals.expense, 100.0);
}

#[test]
fn notes_round_trip_exactly_through_the_facade() {
    let temp = tempdir().unwrap();
    let mut manager = manager_in(&temp);
    manager
        .submit_entry(EntryDraft::new(
            date(2024, 3, 15),
            EntryKind::Expense,
            "Groceries",
            42.0,
            "  spaced, with commas and \"quotes\"  ",
        ))
        .unwrap();
    drop(manager);

    let manager = manager_in(&temp);
    let report = manager.select_month(march());
    assert_eq!(report.entries[0].note, "  spaced, with commas and \"quotes\"  ");
}
