//! Data models for ledger entities.
//!
//! This module contains strongly-typed representations of entries, goals
//! and goal contributions, newtype ID wrappers, and enumeration types for
//! constrained values.

mod amount;
mod entry;
mod enums;
mod goal;
mod ids;

pub use amount::{DateRange, amount_from_f64, parse_amount};
pub use chrono::NaiveDate;
pub use entry::{Entry, NewEntry};
pub use enums::{Direction, EntryKind, GoalType};
pub use goal::{Goal, GoalContribution, NewContribution, NewGoal};
pub use ids::{ContributionId, EntryId, GoalId};
pub use rust_decimal::Decimal;
