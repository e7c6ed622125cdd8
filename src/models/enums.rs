//! Enumeration types for constrained ledger values.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FinTrackError;

/// Whether an entry records money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    /// Money received (salary, rent, bonus...).
    Income,
    /// Money spent.
    Expense,
}

/// Savings horizon a goal belongs to. Used purely as a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalType {
    /// Short-term goal (a laptop, a trip).
    ShortTerm,
    /// Mid-term goal (a car, a wedding).
    MidTerm,
    /// Long-term goal (a house, retirement).
    LongTerm,
}

/// Direction of a goal contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Adds the amount to the goal's balance.
    Saving,
    /// Takes the amount out of the goal's balance.
    Withdraw,
}

impl GoalType {
    /// All goal types in display order.
    pub const ALL: [Self; 3] = [Self::ShortTerm, Self::MidTerm, Self::LongTerm];

    /// Human-readable label ("Short Term", ...).
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ShortTerm => "Short Term",
            Self::MidTerm => "Mid Term",
            Self::LongTerm => "Long Term",
        }
    }
}

impl EntryKind {
    /// Human-readable label.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl Direction {
    /// Human-readable label.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Saving => "Saving",
            Self::Withdraw => "Withdraw",
        }
    }
}

impl fmt::Display for GoalType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for EntryKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Direction {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercases and strips spaces, dashes and underscores.
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !matches!(*ch, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for GoalType {
    type Err = FinTrackError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "shortterm" | "short" => Ok(Self::ShortTerm),
            "midterm" | "mid" => Ok(Self::MidTerm),
            "longterm" | "long" => Ok(Self::LongTerm),
            _ => Err(FinTrackError::validation(
                "goal type",
                format!("unknown goal type '{s}' (expected short-term, mid-term or long-term)"),
            )),
        }
    }
}

impl FromStr for EntryKind {
    type Err = FinTrackError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(FinTrackError::validation(
                "entry type",
                format!("unknown entry type '{s}' (expected income or expense)"),
            )),
        }
    }
}

impl FromStr for Direction {
    type Err = FinTrackError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "saving" | "save" => Ok(Self::Saving),
            "withdraw" | "withdrawal" => Ok(Self::Withdraw),
            _ => Err(FinTrackError::validation(
                "direction",
                format!("unknown direction '{s}' (expected saving or withdraw)"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_type_serde_is_camel_case() {
        let json = serde_json::to_string(&GoalType::ShortTerm).unwrap();
        assert_eq!(json, r#""shortTerm""#);
        let deserialized: GoalType = serde_json::from_str(r#""longTerm""#).unwrap();
        assert_eq!(deserialized, GoalType::LongTerm);
    }

    #[test]
    fn entry_kind_serde() {
        let json = serde_json::to_string(&EntryKind::Expense).unwrap();
        assert_eq!(json, r#""expense""#);
        let deserialized: EntryKind = serde_json::from_str(r#""income""#).unwrap();
        assert_eq!(deserialized, EntryKind::Income);
    }

    #[test]
    fn goal_type_parses_loose_spellings() {
        for raw in ["short-term", "Short Term", "shortterm", "SHORT", "short_term"] {
            assert_eq!(raw.parse::<GoalType>().unwrap(), GoalType::ShortTerm);
        }
        assert_eq!("Mid Term".parse::<GoalType>().unwrap(), GoalType::MidTerm);
        assert_eq!("long".parse::<GoalType>().unwrap(), GoalType::LongTerm);
    }

    #[test]
    fn goal_type_rejects_unknown() {
        let err = "weekly".parse::<GoalType>().unwrap_err();
        assert!(matches!(err, FinTrackError::Validation { field: "goal type", .. }));
    }

    #[test]
    fn direction_parses() {
        assert_eq!("Saving".parse::<Direction>().unwrap(), Direction::Saving);
        assert_eq!("withdraw".parse::<Direction>().unwrap(), Direction::Withdraw);
        assert!("deposit".parse::<Direction>().is_err());
    }

    #[test]
    fn labels_match_display() {
        assert_eq!(GoalType::MidTerm.to_string(), "Mid Term");
        assert_eq!(EntryKind::Income.to_string(), "Income");
        assert_eq!(Direction::Withdraw.to_string(), "Withdraw");
    }

    #[test]
    fn invalid_goal_type_json_fails() {
        let result = serde_json::from_str::<GoalType>(r#""Short Term""#);
        assert!(result.is_err());
    }
}
