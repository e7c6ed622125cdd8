//! JSON-file-based storage backend.
//!
//! Stores entries and goals in separate JSON files under a configurable
//! directory (default: `$XDG_DATA_HOME/fintrack/`).

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::error::{FinTrackError, Result};
use crate::models::{Entry, Goal, GoalId};

use super::{GoalUpdate, duplicate_goal_error, modify_in};

/// Application name used for the XDG data directory.
const APP_NAME: &str = "fintrack";

/// File name for entries.
const ENTRIES_FILE: &str = "entries.json";
/// File name for goals (all goal types, contributions inline).
const GOALS_FILE: &str = "goals.json";
/// Sentinel file used for cross-process file locking.
const LOCK_FILE: &str = "storage.lock";

/// File-backed storage that persists the ledger as JSON files.
///
/// # Concurrency
///
/// Thread safety within a single process is provided by an in-process
/// [`Mutex`]. Cross-process safety is achieved via an advisory file lock
/// on `storage.lock` (using [`std::fs::File::lock`] /
/// [`std::fs::File::lock_shared`]).
///
/// Read operations acquire a shared lock, while writes and
/// read-modify-write cycles such as [`super::Storage::modify_goal`] hold
/// the exclusive lock for their whole duration.
///
/// # File layout
///
/// ```text
/// <dir>/
///   storage.lock          (cross-process lock sentinel)
///   entries.json
///   goals.json
/// ```
#[derive(Debug)]
pub struct FileStorage {
    /// Root directory containing all JSON files.
    dir: PathBuf,
    /// Mutex serializing concurrent in-process access.
    lock: Mutex<()>,
    /// Sentinel file for cross-process advisory locking.
    lock_file: fs::File,
}

impl FileStorage {
    /// Creates a new file storage rooted at the given directory.
    ///
    /// Creates the directory (and parents) if it does not exist, and
    /// opens (or creates) the `storage.lock` sentinel file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the lock
    /// file cannot be opened.
    #[inline]
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(storage_io_error)?;
        let lock_file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(dir.join(LOCK_FILE))
            .map_err(storage_io_error)?;
        tracing::debug!(dir = %dir.display(), "opened file storage");
        Ok(Self {
            dir,
            lock: Mutex::new(()),
            lock_file,
        })
    }

    /// Returns the default XDG-compliant data directory for this application.
    ///
    /// On Linux: `$XDG_DATA_HOME/fintrack/` (typically
    /// `~/.local/share/fintrack/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be determined.
    #[inline]
    pub fn default_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|data_path| data_path.join(APP_NAME))
            .ok_or_else(|| FinTrackError::Storage("could not determine platform data directory".into()))
    }

    /// Directory this storage reads from and writes to.
    #[inline]
    #[must_use]
    pub const fn dir(&self) -> &PathBuf {
        &self.dir
    }

    // ── Private helpers ─────────────────────────────────────────────

    /// Returns the full path for a given file name.
    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Acquires an in-process mutex guard and a shared (read) file lock,
    /// executes `op`, then releases the file lock.
    fn with_shared_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock_shared().map_err(storage_io_error)?;
        let result = op();
        // The operation's own error wins over an unlock failure.
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(storage_io_error(err));
        }
        result
    }

    /// Acquires an in-process mutex guard and an exclusive (write) file
    /// lock, executes `op`, then releases the file lock.
    fn with_exclusive_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock().map_err(storage_io_error)?;
        let result = op();
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(storage_io_error(err));
        }
        result
    }

    /// Reads and deserializes a JSON array file. Returns an empty `Vec` if
    /// the file does not exist.
    fn read_items<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        match fs::read_to_string(self.path(name)) {
            Ok(contents) => serde_json::from_str(&contents).map_err(FinTrackError::from),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(storage_io_error(err)),
        }
    }

    /// Atomically writes a serialized JSON file (write-to-tmp then rename).
    fn write_items<T: Serialize>(&self, name: &str, items: &[T]) -> Result<()> {
        let path = self.path(name);
        let tmp_path = self.path(&format!("{name}.tmp"));
        let json = serde_json::to_string_pretty(items).map_err(FinTrackError::from)?;
        fs::write(&tmp_path, json).map_err(storage_io_error)?;
        fs::rename(&tmp_path, &path).map_err(storage_io_error)?;
        Ok(())
    }
}

// ── Free-standing helpers ───────────────────────────────────────────────

/// Wraps an I/O error into a [`FinTrackError::Storage`].
fn storage_io_error(err: std::io::Error) -> FinTrackError {
    FinTrackError::Storage(Box::new(err))
}

/// Wraps a mutex poison error into a [`FinTrackError::Storage`].
fn lock_poison_error<T>(err: &std::sync::PoisonError<T>) -> FinTrackError {
    FinTrackError::Storage(err.to_string().into())
}

// ── Storage implementation ──────────────────────────────────────────────

impl super::Storage for FileStorage {
    #[inline]
    fn entries(&self) -> Result<Vec<Entry>> {
        self.with_shared_lock(|| self.read_items(ENTRIES_FILE))
    }

    #[inline]
    fn append_entry(&self, entry: Entry) -> Result<()> {
        self.with_exclusive_lock(|| {
            let mut entries: Vec<Entry> = self.read_items(ENTRIES_FILE)?;
            entries.push(entry);
            self.write_items(ENTRIES_FILE, &entries)
        })
    }

    #[inline]
    fn goals(&self) -> Result<Vec<Goal>> {
        self.with_shared_lock(|| self.read_items(GOALS_FILE))
    }

    #[inline]
    fn insert_goal(&self, goal: Goal) -> Result<()> {
        self.with_exclusive_lock(|| {
            let mut goals: Vec<Goal> = self.read_items(GOALS_FILE)?;
            if goals.iter().any(|existing| existing.id == goal.id) {
                return Err(duplicate_goal_error(&goal.id));
            }
            goals.push(goal);
            self.write_items(GOALS_FILE, &goals)
        })
    }

    #[inline]
    fn modify_goal(&self, id: &GoalId, update: GoalUpdate<'_>) -> Result<Option<Goal>> {
        self.with_exclusive_lock(|| {
            let mut goals: Vec<Goal> = self.read_items(GOALS_FILE)?;
            let updated = modify_in(&mut goals, id, update)?;
            if updated.is_some() {
                self.write_items(GOALS_FILE, &goals)?;
            }
            Ok(updated)
        })
    }

    /// Deletes the data files. The `storage.lock` sentinel is kept.
    #[inline]
    fn clear(&self) -> Result<()> {
        self.with_exclusive_lock(|| {
            for name in [ENTRIES_FILE, GOALS_FILE] {
                match fs::remove_file(self.path(name)) {
                    Ok(()) => {}
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                    Err(err) => return Err(storage_io_error(err)),
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryId, EntryKind, GoalType, NaiveDate};
    use crate::storage::Storage;
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Helper to create a [`FileStorage`] in a temporary directory.
    fn temp_storage() -> (FileStorage, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        (storage, dir)
    }

    fn ts() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn test_entry(id: &str, category: &str) -> Entry {
        Entry {
            id: EntryId::new(id.to_owned()),
            category: category.to_owned(),
            amount: dec!(250.75),
            note: Some("lunch".to_owned()),
            kind: EntryKind::Expense,
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        }
    }

    fn test_goal(id: &str) -> Goal {
        Goal {
            id: GoalId::new(id.to_owned()),
            name: "Travel".to_owned(),
            target_amount: dec!(5000),
            current_amount: Decimal::ZERO,
            goal_type: GoalType::ShortTerm,
            note: None,
            target_date: NaiveDate::from_ymd_opt(2026, 1, 1),
            created_at: ts(),
            contributions: Vec::new(),
        }
    }

    #[test]
    fn lockfile_created_on_construction() {
        let (storage, _dir) = temp_storage();
        assert!(storage.path(LOCK_FILE).exists());
    }

    #[test]
    fn empty_storage_returns_empty_vecs() {
        let (storage, _dir) = temp_storage();
        assert!(storage.entries().unwrap().is_empty());
        assert!(storage.goals().unwrap().is_empty());
    }

    #[test]
    fn entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
            storage.append_entry(test_entry("e-1", "Food")).unwrap();
            storage.append_entry(test_entry("e-2", "Travel")).unwrap();
        }
        let reopened = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let entries = reopened.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, "Food");
        assert_eq!(entries[1].amount, dec!(250.75));
    }

    #[test]
    fn entries_file_uses_type_key() {
        let (storage, _dir) = temp_storage();
        storage.append_entry(test_entry("e-1", "Food")).unwrap();
        let raw = fs::read_to_string(storage.path(ENTRIES_FILE)).unwrap();
        assert!(raw.contains(r#""type": "expense""#));
        assert!(!storage.path(&format!("{ENTRIES_FILE}.tmp")).exists());
    }

    #[test]
    fn insert_goal_rejects_duplicate_id() {
        let (storage, _dir) = temp_storage();
        storage.insert_goal(test_goal("g-1")).unwrap();
        assert!(storage.insert_goal(test_goal("g-1")).is_err());
        assert_eq!(storage.goals().unwrap().len(), 1);
    }

    #[test]
    fn modify_goal_persists_on_success_only() {
        let (storage, _dir) = temp_storage();
        storage.insert_goal(test_goal("g-1")).unwrap();
        let id = GoalId::new("g-1".to_owned());

        let _updated = storage
            .modify_goal(&id, &mut |goal| {
                goal.current_amount = dec!(100);
                Ok(())
            })
            .unwrap();
        let failed = storage.modify_goal(&id, &mut |goal| {
            goal.current_amount = dec!(7);
            Err(FinTrackError::validation("amount", "rejected"))
        });

        assert!(failed.is_err());
        assert_eq!(storage.goals().unwrap()[0].current_amount, dec!(100));
    }

    #[test]
    fn modify_unknown_goal_does_not_create_file() {
        let (storage, _dir) = temp_storage();
        let result = storage
            .modify_goal(&GoalId::new("missing".to_owned()), &mut |_goal| Ok(()))
            .unwrap();
        assert!(result.is_none());
        assert!(!storage.path(GOALS_FILE).exists());
    }

    #[test]
    fn clear_preserves_lockfile() {
        let (storage, _dir) = temp_storage();
        storage.append_entry(test_entry("e-1", "Food")).unwrap();
        storage.insert_goal(test_goal("g-1")).unwrap();
        storage.clear().unwrap();
        assert!(storage.entries().unwrap().is_empty());
        assert!(storage.goals().unwrap().is_empty());
        assert!(storage.path(LOCK_FILE).exists());
    }

    #[test]
    fn default_dir_ends_with_app_name() {
        if let Ok(dir) = FileStorage::default_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }

    #[test]
    fn concurrent_modifications_are_serialized() {
        use std::sync::Arc;
        use std::thread;

        let (storage, _dir) = temp_storage();
        storage.insert_goal(test_goal("g-1")).unwrap();
        let storage = Arc::new(storage);
        let num_threads: usize = 8;
        let steps_per_thread: usize = 25;

        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                let storage = Arc::clone(&storage);
                thread::spawn(move || {
                    let id = GoalId::new("g-1".to_owned());
                    for _ in 0..steps_per_thread {
                        let _updated = storage
                            .modify_goal(&id, &mut |goal| {
                                goal.current_amount += Decimal::ONE;
                                Ok(())
                            })
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let expected = Decimal::from(num_threads * steps_per_thread);
        assert_eq!(storage.goals().unwrap()[0].current_amount, expected);
    }
}
