use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entry::{Entry, EntryDraft};
use crate::errors::LedgerError;

/// The authoritative, unfiltered collection of entries for one process
/// lifetime. Owned exclusively by the storage facade; no concurrent writers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Book {
    entries: Vec<Entry>,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry and returns its identifier.
    pub fn add(&mut self, entry: Entry) -> Uuid {
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    pub fn entry(&self, id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Resolves a rendered view row back to a position in the authoritative
    /// collection by matching on (date, kind, category, amount). When several
    /// entries share the tuple this returns the first in collection order,
    /// deterministically.
    pub fn locate(&self, row: &Entry) -> Option<usize> {
        self.entries.iter().position(|entry| entry.matches_tuple(row))
    }

    /// Overwrites every field of the identified entry in place, keeping its id.
    pub fn edit_by_id(&mut self, id: Uuid, draft: &EntryDraft) -> Result<(), LedgerError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("entry {id}")))?;
        draft.apply_to(entry);
        tracing::debug!(%id, "entry edited");
        Ok(())
    }

    /// Removes the identified entry, compacting the remaining positions.
    pub fn remove_by_id(&mut self, id: Uuid) -> Result<Entry, LedgerError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("entry {id}")))?;
        let removed = self.entries.remove(index);
        tracing::debug!(%id, "entry removed");
        Ok(removed)
    }
}
