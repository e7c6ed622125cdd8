//! Fixed category sets, goal suggestions and icon lookup.

use crate::models::{EntryKind, GoalType};

/// Catch-all category and goal name.
pub const OTHERS: &str = "Others";

/// Icon key used when a goal name has no dedicated icon.
pub const DEFAULT_GOAL_ICON: &str = "plus";

/// Categories offered for expense entries.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Shopping",
    "Food",
    "Phone",
    "Entertainment",
    "Education",
    "Beauty",
    "Transport",
    "Alcohol",
    "Pets",
    "Snacks",
    "Fruits",
    "Clothing",
    "Electronics",
    "Repairs",
    "Kids",
    "Car",
    "Travel",
    "Housing",
    "Vegetables",
    OTHERS,
];

/// Categories offered for income entries.
pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Rent", "Part Time", "Lottery", "Bonus", OTHERS];

/// Suggested short-term goals.
const SHORT_TERM_GOALS: &[&str] = &[
    "Buy a laptop",
    "Travel",
    "Fitness Equipment",
    "New Phone",
    "Emergency Fund",
    OTHERS,
];

/// Suggested mid-term goals.
const MID_TERM_GOALS: &[&str] = &["Car", "Business", "Wedding", "Education", "Home Renovation", OTHERS];

/// Suggested long-term goals.
const LONG_TERM_GOALS: &[&str] = &[
    "Own a house",
    "Higher education",
    "Retirement",
    "Children's Education",
    "Long-Term Investment",
    OTHERS,
];

/// Goal name to icon key.
const GOAL_ICONS: &[(&str, &str)] = &[
    ("Buy a laptop", "laptop"),
    ("Travel", "airplane"),
    ("Fitness Equipment", "dumbbell"),
    ("New Phone", "smartphone"),
    ("Emergency Fund", "heartbeat"),
    ("Car", "car"),
    ("Business", "business-center"),
    ("Wedding", "ring"),
    ("Education", "school"),
    ("Home Renovation", "home-modern"),
    ("Own a house", "home"),
    ("Higher education", "school"),
    ("Retirement", "beach"),
    ("Children's Education", "child"),
    ("Long-Term Investment", "line-chart"),
];

/// Returns the category list for an entry kind.
#[inline]
#[must_use]
pub const fn categories_for(kind: EntryKind) -> &'static [&'static str] {
    match kind {
        EntryKind::Expense => EXPENSE_CATEGORIES,
        EntryKind::Income => INCOME_CATEGORIES,
    }
}

/// Returns `true` if `name` is one of the fixed categories for `kind`
/// (case-insensitive). Free-form names are still accepted by the ledger.
#[inline]
#[must_use]
pub fn is_known_category(kind: EntryKind, name: &str) -> bool {
    let trimmed = name.trim();
    categories_for(kind)
        .iter()
        .any(|category| category.eq_ignore_ascii_case(trimmed))
}

/// Returns the suggested goal names for a goal type, ending with
/// [`OTHERS`].
#[inline]
#[must_use]
pub const fn goal_suggestions(goal_type: GoalType) -> &'static [&'static str] {
    match goal_type {
        GoalType::ShortTerm => SHORT_TERM_GOALS,
        GoalType::MidTerm => MID_TERM_GOALS,
        GoalType::LongTerm => LONG_TERM_GOALS,
    }
}

/// Looks up the icon key for a goal name, falling back to
/// [`DEFAULT_GOAL_ICON`].
#[inline]
#[must_use]
pub fn goal_icon(name: &str) -> &'static str {
    let trimmed = name.trim();
    GOAL_ICONS
        .iter()
        .find(|&&(goal, _)| goal.eq_ignore_ascii_case(trimmed))
        .map_or(DEFAULT_GOAL_ICON, |&(_, icon)| icon)
}
