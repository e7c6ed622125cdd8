//! Monetary amount helpers and the inclusive date range type.

use core::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{FinTrackError, Result};

/// Parses a raw form value ("250", " 12.50 ") into a decimal amount.
///
/// Only checks that the text is a number; sign checks belong to the
/// operation that consumes the amount.
///
/// # Errors
///
/// Returns [`FinTrackError::Validation`] if the text is empty or not a
/// decimal number.
#[inline]
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FinTrackError::validation("amount", "amount is required"));
    }
    Decimal::from_str(trimmed)
        .map_err(|err| FinTrackError::validation("amount", format!("'{trimmed}' is not a number: {err}")))
}

/// Converts a floating-point amount into a decimal.
///
/// # Errors
///
/// Returns [`FinTrackError::Validation`] for NaN, infinities, or values
/// outside the decimal range.
#[inline]
pub fn amount_from_f64(value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(FinTrackError::validation("amount", "amount must be a finite number"));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| FinTrackError::validation("amount", "amount is out of range"))
}

/// Rejects zero, negative amounts.
pub(crate) fn ensure_positive(field: &'static str, amount: Decimal) -> Result<Decimal> {
    if amount > Decimal::ZERO {
        Ok(amount)
    } else {
        Err(FinTrackError::validation(field, format!("must be greater than zero, got {amount}")))
    }
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day (inclusive).
    from: NaiveDate,
    /// Last day (inclusive).
    to: NaiveDate,
}

impl DateRange {
    /// Creates a range covering `from..=to`.
    ///
    /// # Errors
    ///
    /// Returns [`FinTrackError::Validation`] if `from` is after `to`.
    #[inline]
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(FinTrackError::validation(
                "date range",
                format!("start {from} is after end {to}"),
            ));
        }
        Ok(Self { from, to })
    }

    /// The range between two days, whichever order they are given in.
    #[inline]
    #[must_use]
    pub fn spanning(first: NaiveDate, second: NaiveDate) -> Self {
        Self {
            from: first.min(second),
            to: first.max(second),
        }
    }

    /// A range covering a single day.
    #[inline]
    #[must_use]
    pub const fn single_day(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    /// First day of the range.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.from
    }

    /// Last day of the range.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.to
    }

    /// Returns `true` if `day` falls inside the range.
    #[inline]
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_amount_trims_and_parses() {
        assert_eq!(parse_amount(" 250 ").unwrap(), dec!(250));
        assert_eq!(parse_amount("12.50").unwrap(), dec!(12.50));
        assert_eq!(parse_amount("-5").unwrap(), dec!(-5));
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert!(matches!(
            parse_amount("").unwrap_err(),
            FinTrackError::Validation { field: "amount", .. }
        ));
        assert!(parse_amount("   ").is_err());
        assert!(parse_amount("12abc").is_err());
    }

    #[test]
    fn amount_from_f64_rejects_non_finite() {
        assert!(amount_from_f64(f64::NAN).is_err());
        assert!(amount_from_f64(f64::INFINITY).is_err());
        assert!(amount_from_f64(f64::NEG_INFINITY).is_err());
        assert_eq!(amount_from_f64(12.5).unwrap(), dec!(12.5));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive("amount", dec!(0)).is_err());
        assert!(ensure_positive("amount", dec!(-0.01)).is_err());
        assert_eq!(ensure_positive("amount", dec!(0.01)).unwrap(), dec!(0.01));
    }

    #[test]
    fn date_range_is_inclusive() {
        let range = DateRange::new(day(2025, 1, 1), day(2025, 1, 31)).unwrap();
        assert!(range.contains(day(2025, 1, 1)));
        assert!(range.contains(day(2025, 1, 31)));
        assert!(!range.contains(day(2025, 2, 1)));
        assert!(!range.contains(day(2024, 12, 31)));
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        let err = DateRange::new(day(2025, 2, 1), day(2025, 1, 1)).unwrap_err();
        assert!(matches!(err, FinTrackError::Validation { field: "date range", .. }));
    }

    #[test]
    fn spanning_orders_bounds() {
        let range = DateRange::spanning(day(2025, 5, 9), day(2025, 5, 1));
        assert_eq!(range.start(), day(2025, 5, 1));
        assert_eq!(range.end(), day(2025, 5, 9));
    }

    #[test]
    fn single_day_range() {
        let range = DateRange::single_day(day(2025, 3, 3));
        assert_eq!(range.start(), range.end());
        assert!(range.contains(day(2025, 3, 3)));
    }
}
