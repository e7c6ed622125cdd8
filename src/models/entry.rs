//! Income/expense entry model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::ensure_positive;
use super::{EntryId, EntryKind};
use crate::error::{FinTrackError, Result};

/// A single recorded income or expense. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique identifier (UUID).
    pub id: EntryId,
    /// Category name ("Food", "Salary", or a free-form name).
    pub category: String,
    /// Amount (> 0).
    pub amount: Decimal,
    /// Optional user note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Day the entry is attributed to (yyyy-MM-dd).
    pub date: NaiveDate,
}

/// Input for recording a new entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    /// Category name.
    pub category: String,
    /// Amount; must be positive.
    pub amount: Decimal,
    /// Income or expense.
    pub kind: EntryKind,
    /// Day the entry is attributed to.
    pub date: NaiveDate,
    /// Optional note.
    pub note: Option<String>,
}

impl NewEntry {
    /// Creates an entry input without a note.
    #[inline]
    #[must_use]
    pub fn new<T: Into<String>>(category: T, amount: Decimal, kind: EntryKind, date: NaiveDate) -> Self {
        Self {
            category: category.into(),
            amount,
            kind,
            date,
            note: None,
        }
    }

    /// Attaches a note.
    #[inline]
    #[must_use]
    pub fn with_note<T: Into<String>>(mut self, note: T) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Validates the input and assigns a fresh id.
    pub(crate) fn into_entry(self) -> Result<Entry> {
        let category = self.category.trim();
        if category.is_empty() {
            return Err(FinTrackError::validation("category", "category is required"));
        }
        let amount = ensure_positive("amount", self.amount)?;
        Ok(Entry {
            id: EntryId::generate(),
            category: category.to_owned(),
            amount,
            note: clean_note(self.note),
            kind: self.kind,
            date: self.date,
        })
    }
}

/// Trims a note and drops it when nothing is left.
pub(crate) fn clean_note(note: Option<String>) -> Option<String> {
    note.map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
