//! Pluggable storage backends for the ledger's entries and goals.
//!
//! The [`Storage`] trait is the only thing the ledger knows about where
//! data lives. [`InMemoryStorage`] keeps everything for the lifetime of
//! the process; [`FileStorage`] persists it as JSON files.

#[cfg(feature = "storage-file")]
mod file;
mod memory;

#[cfg(feature = "storage-file")]
pub use file::FileStorage;
pub use memory::InMemoryStorage;

use crate::error::{FinTrackError, Result};
use crate::models::{Entry, Goal, GoalId};

/// Callback used by [`Storage::modify_goal`] to mutate a goal in place.
pub type GoalUpdate<'update> = &'update mut dyn FnMut(&mut Goal) -> Result<()>;

/// Storage backend for ledger entries and goals.
///
/// All methods take `&self`; implementations use interior mutability
/// (e.g. `Mutex`) for thread-safe mutation. Collections are returned in
/// insertion order.
pub trait Storage: core::fmt::Debug + Send + Sync {
    /// Returns all stored entries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    fn entries(&self) -> Result<Vec<Entry>>;

    /// Appends an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write.
    fn append_entry(&self, entry: Entry) -> Result<()>;

    /// Returns all stored goals across every goal type, in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    fn goals(&self) -> Result<Vec<Goal>>;

    /// Inserts a new goal after all existing ones.
    ///
    /// # Errors
    ///
    /// Returns an error if a goal with the same ID already exists or the
    /// storage backend fails to write.
    fn insert_goal(&self, goal: Goal) -> Result<()>;

    /// Runs `update` on a copy of the goal while holding the backend's
    /// exclusive lock, and stores the copy only if `update` succeeds.
    ///
    /// Returns the stored goal, or `Ok(None)` if no goal has that ID.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `update` (nothing is written), or an
    /// error if the storage backend fails to read or write.
    fn modify_goal(&self, id: &GoalId, update: GoalUpdate<'_>) -> Result<Option<Goal>>;

    /// Removes all stored data.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write.
    fn clear(&self) -> Result<()>;
}

/// Builds the error for a goal ID that is already taken.
fn duplicate_goal_error(id: &GoalId) -> FinTrackError {
    FinTrackError::Storage(format!("goal {id} already exists").into())
}

/// Applies `update` to a copy of the goal with `id` and writes the copy
/// back only on success.
fn modify_in(goals: &mut [Goal], id: &GoalId, update: GoalUpdate<'_>) -> Result<Option<Goal>> {
    let Some(slot) = goals.iter_mut().find(|goal| goal.id == *id) else {
        return Ok(None);
    };
    let mut draft = slot.clone();
    update(&mut draft)?;
    slot.clone_from(&draft);
    Ok(Some(draft))
}
