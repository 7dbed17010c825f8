//! Facade coordinating the entry collection, monthly reporting, and
//! persistence. This is the surface presentation layers talk to: every
//! mutating operation validates, applies, and rewrites the store in full.

use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::{Book, Entry, EntryDraft};
use crate::report::{self, Month, MonthlyReport};
use crate::storage::StorageBackend;

pub struct LedgerManager {
    book: Book,
    storage: Box<dyn StorageBackend>,
    load_warnings: Vec<String>,
}

impl LedgerManager {
    /// Loads the persisted collection. A corrupt or unreadable store degrades
    /// to an empty book with a warning; startup never fails on load.
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        let (book, load_warnings) = match storage.load() {
            Ok(report) => (report.book, report.warnings),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load store, starting empty");
                (
                    Book::new(),
                    vec![format!("failed to load persisted data: {err}")],
                )
            }
        };
        Self {
            book,
            storage,
            load_warnings,
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    /// Warnings produced while loading (corruption, dropped rows).
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    /// Validates and records a new entry, persisting the full collection.
    pub fn submit_entry(&mut self, draft: EntryDraft) -> Result<Uuid, LedgerError> {
        draft.validate()?;
        let id = self.book.add(draft.into_entry());
        self.persist()?;
        tracing::info!(%id, "entry recorded");
        Ok(id)
    }

    /// Distinct months with data, most recent first.
    pub fn available_months(&self) -> Vec<Month> {
        report::available_months(&self.book)
    }

    /// Totals, category breakdown, and the sorted entry list for one month.
    pub fn select_month(&self, month: Month) -> MonthlyReport {
        report::monthly_report(&self.book, month)
    }

    /// Overwrites the entry behind a rendered row with new values.
    pub fn edit_entry(
        &mut self,
        month: Month,
        row: usize,
        draft: EntryDraft,
    ) -> Result<(), LedgerError> {
        let id = self.resolve_row(month, row)?;
        self.book.edit_by_id(id, &draft)?;
        self.persist()
    }

    /// Removes the entry behind a rendered row, returning it.
    pub fn delete_entry(&mut self, month: Month, row: usize) -> Result<Entry, LedgerError> {
        let id = self.resolve_row(month, row)?;
        let removed = self.book.remove_by_id(id)?;
        self.persist()?;
        Ok(removed)
    }

    /// Maps a row of the month's rendered view back to an authoritative
    /// entry id. Rows are matched on (date, kind, category, amount); with
    /// duplicate tuples the first entry in collection order wins.
    fn resolve_row(&self, month: Month, row: usize) -> Result<Uuid, LedgerError> {
        let view = report::month_view(&self.book, month);
        let rendered = view
            .get(row)
            .ok_or_else(|| LedgerError::NotFound(format!("row {row} of {month}")))?;
        let index = self
            .book
            .locate(rendered)
            .ok_or_else(|| LedgerError::NotFound(format!("row {row} of {month}")))?;
        Ok(self.book.entries()[index].id)
    }

    fn persist(&self) -> Result<(), LedgerError> {
        self.storage.save(&self.book)
    }
}
