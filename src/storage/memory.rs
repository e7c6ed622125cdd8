//! In-memory storage backend.
//!
//! Provides [`InMemoryStorage`], a thread-safe in-memory implementation of
//! [`super::Storage`]. This is the default session store and the backend
//! used by unit tests.

use std::sync::Mutex;

use crate::error::{FinTrackError, Result};
use crate::models::{Entry, Goal, GoalId};

use super::{GoalUpdate, duplicate_goal_error, modify_in};

/// Thread-safe in-memory storage.
///
/// # Example
///
/// ```rust
/// use fintrack::ledger::Ledger;
/// use fintrack::storage::InMemoryStorage;
///
/// let ledger = Ledger::new(InMemoryStorage::new());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    /// All state behind a single mutex for thread-safe interior mutability.
    inner: Mutex<Inner>,
}

/// Inner mutable state.
#[derive(Debug, Default)]
struct Inner {
    /// Stored entries.
    entries: Vec<Entry>,
    /// Stored goals.
    goals: Vec<Goal>,
}

impl InMemoryStorage {
    /// Creates a new empty in-memory storage.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R, F: FnOnce(&mut Inner) -> R>(&self, op: F) -> Result<R> {
        let mut inner = self.inner.lock().map_err(|err| lock_error(&err))?;
        Ok(op(&mut inner))
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> FinTrackError {
    FinTrackError::Storage(err.to_string().into())
}

impl super::Storage for InMemoryStorage {
    #[inline]
    fn entries(&self) -> Result<Vec<Entry>> {
        self.with_lock(|inner| inner.entries.clone())
    }

    #[inline]
    fn append_entry(&self, entry: Entry) -> Result<()> {
        self.with_lock(|inner| inner.entries.push(entry))
    }

    #[inline]
    fn goals(&self) -> Result<Vec<Goal>> {
        self.with_lock(|inner| inner.goals.clone())
    }

    #[inline]
    fn insert_goal(&self, goal: Goal) -> Result<()> {
        self.with_lock(|inner| {
            if inner.goals.iter().any(|existing| existing.id == goal.id) {
                return Err(duplicate_goal_error(&goal.id));
            }
            inner.goals.push(goal);
            Ok(())
        })?
    }

    #[inline]
    fn modify_goal(&self, id: &GoalId, update: GoalUpdate<'_>) -> Result<Option<Goal>> {
        self.with_lock(|inner| modify_in(&mut inner.goals, id, update))?
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.with_lock(|inner| *inner = Inner::default())
    }
}
