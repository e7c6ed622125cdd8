//! The ledger store: the single authoritative holder of entries and goals.
//!
//! [`LedgerStore`] is the capability a presentation layer depends on;
//! [`Ledger`] implements it on top of any [`Storage`] backend and enforces
//! every data-model invariant before anything is written.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::error::{FinTrackError, Result};
use crate::models::{
    DateRange, Entry, EntryKind, Goal, GoalId, GoalType, NewContribution, NewEntry, NewGoal,
};
use crate::progress::GoalProgress;
use crate::storage::Storage;
use crate::summary::{Summary, summarize};

/// Composable filter for querying entries.
///
/// Use builder-style methods to chain multiple criteria. An entry must
/// satisfy every set criterion to pass.
///
/// # Examples
///
/// ```
/// use fintrack::ledger::EntryFilter;
/// use fintrack::models::{DateRange, EntryKind, NaiveDate};
///
/// let january = DateRange::new(
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
/// )
/// .unwrap();
/// let filter = EntryFilter::new()
///     .date_range(january)
///     .kind(EntryKind::Expense)
///     .category("food");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EntryFilter {
    /// Inclusive date range.
    pub date_range: Option<DateRange>,
    /// Income or expense.
    pub kind: Option<EntryKind>,
    /// Category name (case-insensitive, exact).
    pub category: Option<String>,
    /// Note substring (case-insensitive).
    pub note: Option<String>,
    /// Minimum amount (inclusive).
    pub min_amount: Option<Decimal>,
    /// Maximum amount (inclusive).
    pub max_amount: Option<Decimal>,
}

impl EntryFilter {
    /// Creates an empty filter that matches all entries.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to entries dated within `range`.
    #[inline]
    #[must_use]
    pub const fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Restricts to income or expense entries.
    #[inline]
    #[must_use]
    pub const fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restricts to one category (case-insensitive).
    #[inline]
    #[must_use]
    pub fn category<T: Into<String>>(mut self, name: T) -> Self {
        self.category = Some(name.into());
        self
    }

    /// Restricts to entries whose note contains the given substring
    /// (case-insensitive).
    #[inline]
    #[must_use]
    pub fn note<T: Into<String>>(mut self, text: T) -> Self {
        self.note = Some(text.into());
        self
    }

    /// Restricts to entries with amounts in `[min, max]`.
    #[inline]
    #[must_use]
    pub const fn amount_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.min_amount = Some(min);
        self.max_amount = Some(max);
        self
    }

    /// Returns `true` if the entry satisfies all set criteria.
    #[inline]
    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        self.matches_date(entry)
            && self.kind.is_none_or(|kind| entry.kind == kind)
            && self.matches_category(entry)
            && self.matches_note(entry)
            && self.matches_amount(entry)
    }

    /// Checks the date range.
    fn matches_date(&self, entry: &Entry) -> bool {
        self.date_range
            .as_ref()
            .is_none_or(|range| range.contains(entry.date))
    }

    /// Checks the category.
    fn matches_category(&self, entry: &Entry) -> bool {
        self.category
            .as_ref()
            .is_none_or(|name| entry.category.eq_ignore_ascii_case(name.trim()))
    }

    /// Checks the note.
    fn matches_note(&self, entry: &Entry) -> bool {
        self.note.as_ref().is_none_or(|text| {
            let needle = text.to_lowercase();
            entry
                .note
                .as_ref()
                .is_some_and(|note| note.to_lowercase().contains(&needle))
        })
    }

    /// Checks the amount bounds.
    fn matches_amount(&self, entry: &Entry) -> bool {
        self.min_amount.is_none_or(|min| entry.amount >= min)
            && self.max_amount.is_none_or(|max| entry.amount <= max)
    }
}

/// Operations a presentation layer needs from the ledger.
///
/// Every mutation either fully applies or fails without changing state.
pub trait LedgerStore {
    /// Records an income or expense entry and returns it with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`FinTrackError::Validation`] if the amount is not positive
    /// or the category is empty, or a storage error.
    fn add_entry(&self, input: NewEntry) -> Result<Entry>;

    /// Creates a goal with a zero balance under its goal type.
    ///
    /// # Errors
    ///
    /// Returns [`FinTrackError::Validation`] if the name is empty or the
    /// target is not positive, or a storage error.
    fn create_goal(&self, input: NewGoal) -> Result<Goal>;

    /// Applies a Saving or Withdraw to a goal and returns the updated goal.
    ///
    /// # Errors
    ///
    /// Returns [`FinTrackError::GoalNotFound`] for an unknown id,
    /// [`FinTrackError::Validation`] for a non-positive amount,
    /// [`FinTrackError::InsufficientFunds`] when a withdrawal exceeds the
    /// balance, or a storage error.
    fn apply_contribution(&self, goal_id: &GoalId, input: NewContribution) -> Result<Goal>;

    /// Goals of one type in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage backend fails to read.
    fn list_goals(&self, goal_type: GoalType) -> Result<Vec<Goal>>;

    /// Entries in insertion order, optionally limited to a date range.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage backend fails to read.
    fn list_entries(&self, range: Option<&DateRange>) -> Result<Vec<Entry>>;
}

/// Ledger backed by a [`Storage`] implementation.
///
/// # Examples
///
/// ```
/// use fintrack::ledger::{Ledger, LedgerStore};
/// use fintrack::models::{Decimal, GoalType, NewContribution, NewGoal};
/// use fintrack::progress::percent_complete;
/// use fintrack::storage::InMemoryStorage;
///
/// let ledger: Ledger<InMemoryStorage> = Ledger::default();
/// let goal = ledger
///     .create_goal(NewGoal::new("Travel", Decimal::from(1000), GoalType::ShortTerm))
///     .unwrap();
/// let goal = ledger
///     .apply_contribution(&goal.id, NewContribution::saving(Decimal::from(250)))
///     .unwrap();
/// assert_eq!(percent_complete(&goal), 25);
/// ```
#[derive(Debug, Default)]
pub struct Ledger<S: Storage> {
    /// Storage backend.
    storage: S,
}

impl<S: Storage> Ledger<S> {
    /// Wraps a storage backend.
    #[inline]
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns a reference to the storage backend.
    #[inline]
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Looks up a goal by id.
    ///
    /// # Errors
    ///
    /// Returns [`FinTrackError::GoalNotFound`] for an unknown id, or a
    /// storage error.
    pub fn goal(&self, goal_id: &GoalId) -> Result<Goal> {
        self.storage
            .goals()?
            .into_iter()
            .find(|goal| goal.id == *goal_id)
            .ok_or_else(|| FinTrackError::GoalNotFound(goal_id.clone()))
    }

    /// All goals grouped by type, in [`GoalType::ALL`] order. Every type
    /// is present, possibly with an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    pub fn goals_by_type(&self) -> Result<Vec<(GoalType, Vec<Goal>)>> {
        let goals = self.storage.goals()?;
        Ok(GoalType::ALL
            .into_iter()
            .map(|goal_type| {
                let partition = goals
                    .iter()
                    .filter(|goal| goal.goal_type == goal_type)
                    .cloned()
                    .collect();
                (goal_type, partition)
            })
            .collect())
    }

    /// Display metrics for one goal.
    ///
    /// # Errors
    ///
    /// Returns [`FinTrackError::GoalNotFound`] for an unknown id, or a
    /// storage error.
    #[inline]
    pub fn goal_progress(&self, goal_id: &GoalId) -> Result<GoalProgress> {
        self.goal(goal_id).map(|goal| GoalProgress::of(&goal))
    }

    /// Returns entries matching the given filter, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    pub fn filter_entries(&self, filter: &EntryFilter) -> Result<Vec<Entry>> {
        let all = self.storage.entries()?;
        Ok(all.into_iter().filter(|entry| filter.matches(entry)).collect())
    }

    /// Income and expense totals for `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    pub fn summary(&self, range: &DateRange) -> Result<Summary> {
        let entries = self.storage.entries()?;
        Ok(summarize(&entries, range))
    }

    /// Removes every entry and goal.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write.
    #[tracing::instrument(skip_all)]
    pub fn reset(&self) -> Result<()> {
        self.storage.clear()?;
        tracing::debug!("ledger cleared");
        Ok(())
    }
}

impl<S: Storage> LedgerStore for Ledger<S> {
    #[tracing::instrument(skip_all)]
    fn add_entry(&self, input: NewEntry) -> Result<Entry> {
        let entry = input.into_entry()?;
        self.storage.append_entry(entry.clone())?;
        tracing::debug!(
            entry_id = %entry.id,
            kind = %entry.kind,
            category = %entry.category,
            amount = %entry.amount,
            "entry added"
        );
        Ok(entry)
    }

    #[tracing::instrument(skip_all)]
    fn create_goal(&self, input: NewGoal) -> Result<Goal> {
        let goal = input.into_goal(Utc::now())?;
        self.storage.insert_goal(goal.clone())?;
        tracing::debug!(
            goal_id = %goal.id,
            goal_type = %goal.goal_type,
            target = %goal.target_amount,
            "goal created"
        );
        Ok(goal)
    }

    #[tracing::instrument(skip_all, fields(goal_id = %goal_id))]
    fn apply_contribution(&self, goal_id: &GoalId, input: NewContribution) -> Result<Goal> {
        let now = Utc::now();
        let goal = self
            .storage
            .modify_goal(goal_id, &mut |goal| goal.apply(&input, now))?
            .ok_or_else(|| FinTrackError::GoalNotFound(goal_id.clone()))?;
        tracing::debug!(
            direction = %input.direction,
            amount = %input.amount,
            balance = %goal.current_amount,
            "contribution applied"
        );
        Ok(goal)
    }

    #[inline]
    fn list_goals(&self, goal_type: GoalType) -> Result<Vec<Goal>> {
        let all = self.storage.goals()?;
        Ok(all
            .into_iter()
            .filter(|goal| goal.goal_type == goal_type)
            .collect())
    }

    #[inline]
    fn list_entries(&self, range: Option<&DateRange>) -> Result<Vec<Entry>> {
        let all = self.storage.entries()?;
        Ok(all
            .into_iter()
            .filter(|entry| range.is_none_or(|bounds| bounds.contains(entry.date)))
            .collect())
    }
}
