pub mod csv_backend;

use std::path::{Path, PathBuf};

use crate::{errors::LedgerError, ledger::Book};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Outcome of loading the persisted store. Rows whose date (or kind/amount)
/// could not be parsed are dropped from the book and counted here.
#[derive(Debug)]
pub struct LoadReport {
    pub book: Book,
    pub dropped_rows: usize,
    pub warnings: Vec<String>,
    pub path: PathBuf,
}

/// Abstraction over persistence backends for the entry collection. Every
/// mutation rewrites the store in full; there is no append path.
pub trait StorageBackend: Send + Sync {
    fn load(&self) -> Result<LoadReport>;
    fn save(&self, book: &Book) -> Result<()>;
    fn path(&self) -> &Path;
}

pub use csv_backend::{parse_flexible_date, CsvStore};
