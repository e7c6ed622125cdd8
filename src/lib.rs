//! Personal finance ledger: income and expense entries plus savings goals.
//!
//! The [`ledger::Ledger`] is the single owner of all entries and goals and
//! validates every mutation before it reaches a [`storage::Storage`]
//! backend. [`progress`] derives display metrics for a goal, [`summary`]
//! aggregates entries over a period, and [`catalog`] holds the fixed
//! category and goal-suggestion lists.
//!
//! # Example
//!
//! ```
//! use fintrack::ledger::{Ledger, LedgerStore};
//! use fintrack::models::{Decimal, EntryKind, NaiveDate, NewEntry};
//! use fintrack::storage::InMemoryStorage;
//!
//! let ledger = Ledger::new(InMemoryStorage::new());
//! let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let entry = ledger
//!     .add_entry(NewEntry::new("Food", Decimal::from(12), EntryKind::Expense, day))
//!     .unwrap();
//! assert_eq!(ledger.list_entries(None).unwrap(), vec![entry]);
//! ```

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod models;
pub mod progress;
pub mod storage;
pub mod summary;
