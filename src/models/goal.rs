//! Savings goal and goal contribution models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::ensure_positive;
use super::entry::clean_note;
use super::{ContributionId, Direction, GoalId, GoalType};
use crate::error::{FinTrackError, Result};

/// A named savings target with an accumulating balance.
///
/// `current_amount` is never negative but may exceed `target_amount`;
/// over-saving is allowed and only clamped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Unique identifier (UUID).
    pub id: GoalId,
    /// Display name, also the icon lookup key.
    pub name: String,
    /// Amount to reach (> 0).
    pub target_amount: Decimal,
    /// Amount saved so far (>= 0).
    pub current_amount: Decimal,
    /// Partition the goal is listed under.
    pub goal_type: GoalType,
    /// Optional user note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Day the user wants to reach the target by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    /// Creation timestamp (Unix seconds).
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    /// Savings and withdrawals applied to this goal, oldest first.
    #[serde(default)]
    pub contributions: Vec<GoalContribution>,
}

/// A Saving or Withdraw applied to a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalContribution {
    /// Unique identifier (UUID).
    pub id: ContributionId,
    /// Goal this contribution belongs to.
    pub goal_id: GoalId,
    /// Amount moved (> 0).
    pub amount: Decimal,
    /// Saving or withdraw.
    pub direction: Direction,
    /// Optional user note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// When the contribution was recorded (Unix seconds).
    #[serde(with = "chrono::serde::ts_seconds")]
    pub recorded_at: DateTime<Utc>,
}

/// Input for creating a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGoal {
    /// Display name.
    pub name: String,
    /// Amount to reach; must be positive.
    pub target_amount: Decimal,
    /// Partition to list the goal under.
    pub goal_type: GoalType,
    /// Optional note.
    pub note: Option<String>,
    /// Optional target date.
    pub target_date: Option<NaiveDate>,
}

/// Input for a Saving or Withdraw against a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContribution {
    /// Amount to move; must be positive.
    pub amount: Decimal,
    /// Saving or withdraw.
    pub direction: Direction,
    /// Optional note.
    pub note: Option<String>,
}

impl NewGoal {
    /// Creates a goal input without note or target date.
    #[inline]
    #[must_use]
    pub fn new<T: Into<String>>(name: T, target_amount: Decimal, goal_type: GoalType) -> Self {
        Self {
            name: name.into(),
            target_amount,
            goal_type,
            note: None,
            target_date: None,
        }
    }

    /// Attaches a note.
    #[inline]
    #[must_use]
    pub fn with_note<T: Into<String>>(mut self, note: T) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Sets the day the goal should be reached by.
    #[inline]
    #[must_use]
    pub const fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    /// Validates the input and builds an empty goal.
    pub(crate) fn into_goal(self, now: DateTime<Utc>) -> Result<Goal> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FinTrackError::validation("name", "goal name is required"));
        }
        let target_amount = ensure_positive("target amount", self.target_amount)?;
        Ok(Goal {
            id: GoalId::generate(),
            name: name.to_owned(),
            target_amount,
            current_amount: Decimal::ZERO,
            goal_type: self.goal_type,
            note: clean_note(self.note),
            target_date: self.target_date,
            created_at: now,
            contributions: Vec::new(),
        })
    }
}

impl NewContribution {
    /// A saving of `amount`.
    #[inline]
    #[must_use]
    pub const fn saving(amount: Decimal) -> Self {
        Self {
            amount,
            direction: Direction::Saving,
            note: None,
        }
    }

    /// A withdrawal of `amount`.
    #[inline]
    #[must_use]
    pub const fn withdraw(amount: Decimal) -> Self {
        Self {
            amount,
            direction: Direction::Withdraw,
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
}

impl Goal {
    /// Applies a contribution in place.
    ///
    /// Leaves the goal untouched on error.
    pub(crate) fn apply(&mut self, input: &NewContribution, now: DateTime<Utc>) -> Result<()> {
        let amount = ensure_positive("amount", input.amount)?;
        let balance = match input.direction {
            Direction::Saving => self
                .current_amount
                .checked_add(amount)
                .ok_or_else(|| FinTrackError::validation("amount", "saving overflows the goal balance"))?,
            Direction::Withdraw => {
                if amount > self.current_amount {
                    return Err(FinTrackError::InsufficientFunds {
                        goal: self.id.clone(),
                        requested: amount,
                        available: self.current_amount,
                    });
                }
                self.current_amount - amount
            }
        };
        self.current_amount = balance;
        self.contributions.push(GoalContribution {
            id: ContributionId::generate(),
            goal_id: self.id.clone(),
            amount,
            direction: input.direction,
            note: clean_note(input.note.clone()),
            recorded_at: now,
        });
        Ok(())
    }

    /// Sum of all savings ever applied.
    #[inline]
    #[must_use]
    pub fn total_saved(&self) -> Decimal {
        self.sum_direction(Direction::Saving)
    }

    /// Sum of all withdrawals ever applied.
    #[inline]
    #[must_use]
    pub fn total_withdrawn(&self) -> Decimal {
        self.sum_direction(Direction::Withdraw)
    }

    /// Icon key for this goal's name.
    #[inline]
    #[must_use]
    pub fn icon(&self) -> &'static str {
        crate::catalog::goal_icon(&self.name)
    }

    /// Sums contribution amounts for one direction.
    fn sum_direction(&self, direction: Direction) -> Decimal {
        self.contributions
            .iter()
            .filter(|contribution| contribution.direction == direction)
            .map(|contribution| contribution.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ts() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn goal(target: Decimal) -> Goal {
        NewGoal::new("Travel", target, GoalType::ShortTerm)
            .into_goal(ts())
            .unwrap()
    }

    #[test]
    fn new_goal_starts_empty() {
        let created = goal(dec!(5000));
        assert_eq!(created.current_amount, Decimal::ZERO);
        assert!(created.contributions.is_empty());
        assert_eq!(created.created_at, ts());
    }

    #[test]
    fn new_goal_validates_name_and_target() {
        let err = NewGoal::new(" ", dec!(100), GoalType::MidTerm)
            .into_goal(ts())
            .unwrap_err();
        assert!(matches!(err, FinTrackError::Validation { field: "name", .. }));

        let err = NewGoal::new("Car", dec!(0), GoalType::MidTerm)
            .into_goal(ts())
            .unwrap_err();
        assert!(matches!(err, FinTrackError::Validation { field: "target amount", .. }));
    }

    #[test]
    fn saving_then_withdraw_updates_balance_and_history() {
        let mut target = goal(dec!(1000));
        target.apply(&NewContribution::saving(dec!(300)), ts()).unwrap();
        target
            .apply(&NewContribution::withdraw(dec!(120)).with_note("fees"), ts())
            .unwrap();
        assert_eq!(target.current_amount, dec!(180));
        assert_eq!(target.contributions.len(), 2);
        assert_eq!(target.total_saved(), dec!(300));
        assert_eq!(target.total_withdrawn(), dec!(120));
        let last = target.contributions.last().unwrap();
        assert_eq!(last.direction, Direction::Withdraw);
        assert_eq!(last.note.as_deref(), Some("fees"));
        assert_eq!(last.goal_id, target.id);
    }

    #[test]
    fn over_withdraw_leaves_goal_untouched() {
        let mut target = goal(dec!(1000));
        target.apply(&NewContribution::saving(dec!(100)), ts()).unwrap();
        let before = target.clone();
        let err = target
            .apply(&NewContribution::withdraw(dec!(100.01)), ts())
            .unwrap_err();
        assert!(matches!(err, FinTrackError::InsufficientFunds { .. }));
        assert_eq!(target, before);
    }

    #[test]
    fn withdraw_of_entire_balance_is_allowed() {
        let mut target = goal(dec!(1000));
        target.apply(&NewContribution::saving(dec!(100)), ts()).unwrap();
        target.apply(&NewContribution::withdraw(dec!(100)), ts()).unwrap();
        assert_eq!(target.current_amount, Decimal::ZERO);
    }

    #[test]
    fn non_positive_contribution_is_rejected() {
        let mut target = goal(dec!(1000));
        let err = target
            .apply(&NewContribution::saving(dec!(0)), ts())
            .unwrap_err();
        assert!(matches!(err, FinTrackError::Validation { field: "amount", .. }));
        assert!(target.contributions.is_empty());
    }

    #[test]
    fn saving_overflow_is_rejected() {
        let mut target = goal(dec!(1000));
        target.apply(&NewContribution::saving(Decimal::MAX), ts()).unwrap();
        let err = target
            .apply(&NewContribution::saving(Decimal::MAX), ts())
            .unwrap_err();
        assert!(matches!(err, FinTrackError::Validation { .. }));
        assert_eq!(target.current_amount, Decimal::MAX);
    }

    #[test]
    fn goal_serde_roundtrip_keeps_history() {
        let mut target = goal(dec!(1000));
        target.apply(&NewContribution::saving(dec!(250)), ts()).unwrap();
        let json = serde_json::to_string(&target).unwrap();
        assert!(json.contains(r#""goalType":"shortTerm""#));
        let back: Goal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, target);
    }
}
