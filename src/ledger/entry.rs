use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

/// One recorded financial transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
}

impl Entry {
    pub fn new(
        date: NaiveDate,
        kind: EntryKind,
        category: impl Into<String>,
        amount: f64,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            kind,
            category: category.into(),
            amount,
            note: note.into(),
        }
    }

    /// Identity tuple used to resolve rendered rows back to the collection.
    /// The note is deliberately excluded; persisted rows carry no other key.
    pub fn matches_tuple(&self, other: &Entry) -> bool {
        self.date == other.date
            && self.kind == other.kind
            && self.category == other.category
            && self.amount == other.amount
    }
}

/// Direction of an entry's cash flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        }
    }

    pub fn parse(raw: &str) -> Option<EntryKind> {
        match raw.trim() {
            "Income" => Some(EntryKind::Income),
            "Expense" => Some(EntryKind::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// An unvalidated submission for a new entry or an in-place edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub category: String,
    pub amount: f64,
    pub note: String,
}

impl EntryDraft {
    pub fn new(
        date: NaiveDate,
        kind: EntryKind,
        category: impl Into<String>,
        amount: f64,
        note: impl Into<String>,
    ) -> Self {
        Self {
            date,
            kind,
            category: category.into(),
            amount,
            note: note.into(),
        }
    }

    /// New entries must carry a strictly positive amount.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.amount <= 0.0 {
            return Err(LedgerError::Validation(
                "amount must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn into_entry(self) -> Entry {
        Entry::new(self.date, self.kind, self.category, self.amount, self.note)
    }

    /// Overwrites every field of `entry` except its identity.
    pub fn apply_to(&self, entry: &mut Entry) {
        entry.date = self.date;
        entry.kind = self.kind;
        entry.category = self.category.clone();
        entry.amount = self.amount;
        entry.note = self.note.clone();
    }
}
