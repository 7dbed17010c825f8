use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::{Book, Entry, EntryKind};
use crate::utils::ensure_dir;

use super::{LoadReport, Result, StorageBackend};

const HEADERS: [&str; 6] = ["id", "date", "kind", "category", "amount", "note"];
const TMP_SUFFIX: &str = "tmp";

/// Columns a persisted store must carry to be recognized. `id` and `note`
/// may be absent in legacy files.
const REQUIRED_COLUMNS: [&str; 4] = ["date", "kind", "category", "amount"];

/// Date formats attempted in decreasing strictness, day-before-month
/// preferred, with a month-first best-effort fallback at the end. Two-digit
/// year forms come before their four-digit counterparts: `%Y` happily reads
/// `24` as year 24, while `%y` rejects four-digit input outright.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%d/%m/%y", "%d/%m/%Y", "%d-%m-%y", "%d-%m-%Y", "%m/%d/%Y",
];

/// Flat CSV persistence for the entry collection. Dates are normalized to
/// ISO `YYYY-MM-DD` on save regardless of how they were parsed on load.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

/// Raw persisted row prior to validation; every field tolerates absence so
/// hand-edited and legacy files still reach the parse ladder.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    id: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    kind: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    amount: String,
    #[serde(default)]
    note: String,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store rooted at the default application data directory.
    pub fn new_default() -> Self {
        Self::new(crate::utils::store_file())
    }

    fn parse_row(row: RawRow) -> Option<Entry> {
        let date_raw = row.date.trim();
        if date_raw.is_empty() {
            return None;
        }
        let date = parse_flexible_date(date_raw)?;
        let kind = EntryKind::parse(&row.kind)?;
        let amount: f64 = row.amount.trim().parse().ok()?;
        // Legacy rows carry no id column; mint one so the entry becomes
        // addressable for edit/delete.
        let id = Uuid::from_str(row.id.trim()).unwrap_or_else(|_| Uuid::new_v4());
        if !crate::ledger::is_known(&row.category) {
            tracing::debug!(category = %row.category, "category outside the suggested set");
        }
        Some(Entry {
            id,
            date,
            kind,
            category: row.category,
            amount,
            note: row.note,
        })
    }
}

impl StorageBackend for CsvStore {
    fn load(&self) -> Result<LoadReport> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(LoadReport {
                    book: Book::new(),
                    dropped_rows: 0,
                    warnings: Vec::new(),
                    path: self.path.clone(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            // Zero-byte store; same as no data.
            return Ok(LoadReport {
                book: Book::new(),
                dropped_rows: 0,
                warnings: Vec::new(),
                path: self.path.clone(),
            });
        }
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(LedgerError::Persistence(format!(
                    "store `{}` is missing the `{}` column",
                    self.path.display(),
                    column
                )));
            }
        }

        let mut book = Book::new();
        let mut dropped_rows = 0usize;
        for record in reader.deserialize::<RawRow>() {
            let row = match record {
                Ok(row) => row,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable row");
                    dropped_rows += 1;
                    continue;
                }
            };
            match Self::parse_row(row) {
                Some(entry) => {
                    book.add(entry);
                }
                None => dropped_rows += 1,
            }
        }

        let mut warnings = Vec::new();
        if dropped_rows > 0 {
            tracing::warn!(dropped_rows, "dropped rows with unparseable values");
            warnings.push(format!(
                "dropped {dropped_rows} row(s) with unparseable values"
            ));
        }
        tracing::info!(entries = book.len(), path = %self.path.display(), "store loaded");
        Ok(LoadReport {
            book,
            dropped_rows,
            warnings,
            path: self.path.clone(),
        })
    }

    fn save(&self, book: &Book) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let tmp = tmp_path(&self.path);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)?;
        writer.write_record(HEADERS)?;
        for entry in book.entries() {
            writer.serialize(entry)?;
        }
        writer.flush()?;
        drop(writer);
        fs::rename(&tmp, &self.path)?;
        tracing::info!(entries = book.len(), path = %self.path.display(), "store saved");
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Attempts each supported date format in order, most strict first. The ISO
/// form is only tried when the value leads with a four-digit field, so
/// `05-03-24` reads day-first as 5 March 2024 rather than year 5.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let leads_with_year = raw.len() > 4 && raw.as_bytes()[..4].iter().all(u8::is_ascii_digit);
    let ladder = if leads_with_year {
        &DATE_FORMATS[..]
    } else {
        &DATE_FORMATS[1..]
    };
    ladder
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_ladder_prefers_day_before_month() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(parse_flexible_date("2024-03-05"), Some(expected));
        assert_eq!(parse_flexible_date("05/03/2024"), Some(expected));
        assert_eq!(parse_flexible_date("05-03-2024"), Some(expected));
        assert_eq!(parse_flexible_date("05/03/24"), Some(expected));
        assert_eq!(parse_flexible_date("05-03-24"), Some(expected));
        // Day-first cannot read a 13th month, so the month-first fallback
        // catches US-style dates.
        let fallback = NaiveDate::from_ymd_opt(2024, 12, 13).unwrap();
        assert_eq!(parse_flexible_date("12/13/2024"), Some(fallback));
        assert_eq!(parse_flexible_date("not a date"), None);
        assert_eq!(parse_flexible_date(""), None);
    }

    #[test]
    fn tmp_path_appends_suffix_to_extension() {
        let tmp = tmp_path(Path::new("/data/entries.csv"));
        assert_eq!(tmp, PathBuf::from("/data/entries.csv.tmp"));
        let bare = tmp_path(Path::new("/data/entries"));
        assert_eq!(bare, PathBuf::from("/data/entries.tmp"));
    }
}
