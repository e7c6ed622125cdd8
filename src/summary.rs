//! Period totals and per-category breakdowns of ledger entries.

use core::fmt;
use core::str::FromStr;
use std::collections::HashMap;

use chrono::{Datelike as _, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinTrackError;
use crate::models::{DateRange, Entry, EntryKind};

/// Reporting period for a summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    /// Monday through Sunday.
    Weekly,
    /// Calendar month.
    #[default]
    Monthly,
    /// Calendar year.
    Annually,
}

impl Period {
    /// Human-readable label.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Annually => "Annually",
        }
    }

    /// The week, month or year that contains `day`.
    ///
    /// Clipped to the representable calendar at its extremes.
    #[inline]
    #[must_use]
    pub fn range_containing(self, day: NaiveDate) -> DateRange {
        match self {
            Self::Weekly => {
                let since_monday = u64::from(day.weekday().num_days_from_monday());
                let monday = day.checked_sub_days(Days::new(since_monday)).unwrap_or(NaiveDate::MIN);
                let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
                DateRange::spanning(monday, sunday)
            }
            Self::Monthly => {
                let first = day.with_day(1).unwrap_or(day);
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(NaiveDate::MAX);
                DateRange::spanning(first, last)
            }
            Self::Annually => {
                let first = day.with_ordinal(1).unwrap_or(day);
                let last = NaiveDate::from_ymd_opt(day.year(), 12, 31).unwrap_or(NaiveDate::MAX);
                DateRange::spanning(first, last)
            }
        }
    }
}

impl fmt::Display for Period {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Period {
    type Err = FinTrackError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "annually" | "annual" | "yearly" | "year" => Ok(Self::Annually),
            _ => Err(FinTrackError::validation(
                "period",
                format!("unknown period '{s}' (expected weekly, monthly or annually)"),
            )),
        }
    }
}

/// Total for one category within a kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// Category name as recorded.
    pub category: String,
    /// Sum of entry amounts.
    pub total: Decimal,
    /// Percentage of the kind's total, rounded to 2 dp.
    pub share: Decimal,
}

/// Income and expense totals over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Range the totals cover.
    pub range: DateRange,
    /// Sum of income entries.
    pub income: Decimal,
    /// Sum of expense entries.
    pub expense: Decimal,
    /// `income - expense`.
    pub net: Decimal,
    /// Income per category, largest first.
    pub income_by_category: Vec<CategoryTotal>,
    /// Expense per category, largest first.
    pub expense_by_category: Vec<CategoryTotal>,
}

impl Summary {
    /// Returns `true` if no entry fell inside the range.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.income_by_category.is_empty() && self.expense_by_category.is_empty()
    }

    /// Per-category totals for one kind.
    #[inline]
    #[must_use]
    pub fn by_category(&self, kind: EntryKind) -> &[CategoryTotal] {
        match kind {
            EntryKind::Income => &self.income_by_category,
            EntryKind::Expense => &self.expense_by_category,
        }
    }
}

/// Summarizes the entries whose date falls inside `range`.
#[inline]
#[must_use]
pub fn summarize(entries: &[Entry], range: &DateRange) -> Summary {
    let mut income: HashMap<&str, Decimal> = HashMap::new();
    let mut expense: HashMap<&str, Decimal> = HashMap::new();
    for entry in entries.iter().filter(|entry| range.contains(entry.date)) {
        let bucket = match entry.kind {
            EntryKind::Income => &mut income,
            EntryKind::Expense => &mut expense,
        };
        let total = bucket.entry(entry.category.as_str()).or_default();
        *total = total.saturating_add(entry.amount);
    }
    let (income_total, income_by_category) = breakdown(income);
    let (expense_total, expense_by_category) = breakdown(expense);
    Summary {
        range: *range,
        income: income_total,
        expense: expense_total,
        net: income_total.saturating_sub(expense_total),
        income_by_category,
        expense_by_category,
    }
}

/// Turns per-category sums into a sorted list with shares.
fn breakdown(totals: HashMap<&str, Decimal>) -> (Decimal, Vec<CategoryTotal>) {
    let kind_total = totals
        .values()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(*amount));
    let mut rows: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_owned(),
            total,
            share: share_of(total, kind_total),
        })
        .collect();
    rows.sort_by(|left, right| {
        right
            .total
            .cmp(&left.total)
            .then_with(|| left.category.cmp(&right.category))
    });
    (kind_total, rows)
}

/// `part` as a percentage of `whole`, 2 dp; 0 when `whole` is 0.
fn share_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .map_or(Decimal::ZERO, |share| share.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryId;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(category: &str, amount: Decimal, kind: EntryKind, date: NaiveDate) -> Entry {
        Entry {
            id: EntryId::generate(),
            category: category.to_owned(),
            amount,
            note: None,
            kind,
            date,
        }
    }

    #[test]
    fn weekly_range_runs_monday_to_sunday() {
        // 2025-01-01 is a Wednesday.
        let range = Period::Weekly.range_containing(day(2025, 1, 1));
        assert_eq!(range.start(), day(2024, 12, 30));
        assert_eq!(range.end(), day(2025, 1, 5));
    }

    #[test]
    fn monthly_range_handles_leap_february() {
        let range = Period::Monthly.range_containing(day(2024, 2, 14));
        assert_eq!(range.start(), day(2024, 2, 1));
        assert_eq!(range.end(), day(2024, 2, 29));
        let december = Period::Monthly.range_containing(day(2025, 12, 31));
        assert_eq!(december.end(), day(2025, 12, 31));
    }

    #[test]
    fn annual_range_covers_calendar_year() {
        let range = Period::Annually.range_containing(day(2025, 7, 4));
        assert_eq!(range.start(), day(2025, 1, 1));
        assert_eq!(range.end(), day(2025, 12, 31));
    }

    #[test]
    fn period_parsing() {
        assert_eq!("Weekly".parse::<Period>().unwrap(), Period::Weekly);
        assert_eq!(" month ".parse::<Period>().unwrap(), Period::Monthly);
        assert_eq!("yearly".parse::<Period>().unwrap(), Period::Annually);
        assert!("daily".parse::<Period>().is_err());
    }

    #[test]
    fn summarize_totals_and_sorts_categories() {
        let entries = [
            entry("Salary", dec!(3000), EntryKind::Income, day(2025, 1, 2)),
            entry("Food", dec!(150), EntryKind::Expense, day(2025, 1, 3)),
            entry("Travel", dec!(600), EntryKind::Expense, day(2025, 1, 10)),
            entry("Food", dec!(250), EntryKind::Expense, day(2025, 1, 20)),
            entry("Bonus", dec!(500), EntryKind::Income, day(2025, 2, 1)),
        ];
        let summary = summarize(&entries, &Period::Monthly.range_containing(day(2025, 1, 15)));

        assert_eq!(summary.income, dec!(3000));
        assert_eq!(summary.expense, dec!(1000));
        assert_eq!(summary.net, dec!(2000));
        assert_eq!(
            summary.by_category(EntryKind::Expense),
            [
                CategoryTotal {
                    category: "Travel".to_owned(),
                    total: dec!(600),
                    share: dec!(60),
                },
                CategoryTotal {
                    category: "Food".to_owned(),
                    total: dec!(400),
                    share: dec!(40),
                },
            ]
        );
        assert_eq!(summary.income_by_category.len(), 1);
    }

    #[test]
    fn equal_totals_sort_by_name_and_share_rounds() {
        let entries = [
            entry("Pets", dec!(1), EntryKind::Expense, day(2025, 1, 1)),
            entry("Kids", dec!(1), EntryKind::Expense, day(2025, 1, 1)),
            entry("Car", dec!(1), EntryKind::Expense, day(2025, 1, 1)),
        ];
        let summary = summarize(&entries, &DateRange::single_day(day(2025, 1, 1)));
        let names: Vec<&str> = summary
            .expense_by_category
            .iter()
            .map(|row| row.category.as_str())
            .collect();
        assert_eq!(names, ["Car", "Kids", "Pets"]);
        assert_eq!(summary.expense_by_category[0].share, dec!(33.33));
    }

    #[test]
    fn empty_range_yields_zero_summary() {
        let entries = [entry("Food", dec!(10), EntryKind::Expense, day(2025, 1, 1))];
        let summary = summarize(&entries, &DateRange::single_day(day(2026, 1, 1)));
        assert!(summary.is_empty());
        assert_eq!(summary.income, Decimal::ZERO);
        assert_eq!(summary.expense, Decimal::ZERO);
        assert_eq!(summary.net, Decimal::ZERO);
    }

    #[test]
    fn share_of_zero_total_is_zero() {
        assert_eq!(share_of(dec!(5), Decimal::ZERO), Decimal::ZERO);
    }
}
