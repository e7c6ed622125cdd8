//! Pure derivation of display metrics from a goal snapshot.
//!
//! Nothing here touches storage or mutates a [`Goal`]. Display values are
//! clamped: a goal saved past its target shows 100% and nothing remaining,
//! while [`GoalProgress::shortfall`] keeps the raw, possibly negative,
//! difference for callers that want it.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive as _;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Goal;

/// Upper bound of a completion percentage.
const FULL: Decimal = Decimal::ONE_HUNDRED;

/// Completion percentage of `goal`, clamped to `[0, 100]` and rounded to
/// the nearest integer (halves round up).
///
/// Returns 0 for a non-positive target instead of dividing by zero.
#[inline]
#[must_use]
pub fn percent_complete(goal: &Goal) -> u8 {
    if goal.target_amount <= Decimal::ZERO {
        return 0;
    }
    // A product too large for `Decimal` is necessarily past the target.
    let raw = goal
        .current_amount
        .checked_mul(FULL)
        .and_then(|scaled| scaled.checked_div(goal.target_amount))
        .unwrap_or(FULL);
    raw.clamp(Decimal::ZERO, FULL)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or(100)
}

/// Amount still missing before the target is reached, never negative.
#[inline]
#[must_use]
pub fn remaining_amount(goal: &Goal) -> Decimal {
    shortfall(goal).max(Decimal::ZERO)
}

/// Unclamped `target - current`; negative once the goal is over-saved.
#[inline]
#[must_use]
pub fn shortfall(goal: &Goal) -> Decimal {
    goal.target_amount
        .checked_sub(goal.current_amount)
        .unwrap_or(Decimal::MIN)
}

/// Length of the undrawn part of a ring gauge showing `percent`.
///
/// `percent = 0` leaves the whole `circumference` undrawn and
/// `percent = 100` closes the ring.
#[inline]
#[must_use]
pub fn stroke_offset(percent: f64, circumference: f64) -> f64 {
    circumference * (1.0_f64 - percent / 100.0_f64)
}

/// Whole days from `today` until `target`; negative once overdue.
#[inline]
#[must_use]
pub fn days_left(target: NaiveDate, today: NaiveDate) -> i64 {
    target.signed_duration_since(today).num_days()
}

/// All display metrics for one goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProgress {
    /// Amount saved so far.
    pub saved: Decimal,
    /// Target amount.
    pub target: Decimal,
    /// Clamped, rounded completion percentage.
    pub percent: u8,
    /// Clamped amount still missing.
    pub remaining: Decimal,
    /// Raw `target - saved`, may be negative.
    pub shortfall: Decimal,
    /// Whether the target has been reached.
    pub is_achieved: bool,
}

impl GoalProgress {
    /// Computes every metric for `goal`.
    #[inline]
    #[must_use]
    pub fn of(goal: &Goal) -> Self {
        Self {
            saved: goal.current_amount,
            target: goal.target_amount,
            percent: percent_complete(goal),
            remaining: remaining_amount(goal),
            shortfall: shortfall(goal),
            is_achieved: goal.current_amount >= goal.target_amount,
        }
    }
}

/// Geometry of a circular progress gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressRing {
    /// Outer size of the gauge.
    size: f64,
    /// Width of the ring stroke.
    stroke_width: f64,
}

impl ProgressRing {
    /// Creates a ring of outer `size` drawn with `stroke_width`.
    #[inline]
    #[must_use]
    pub const fn new(size: f64, stroke_width: f64) -> Self {
        Self { size, stroke_width }
    }

    /// Radius of the stroke's centre line, never negative.
    #[inline]
    #[must_use]
    pub fn radius(&self) -> f64 {
        ((self.size - self.stroke_width) / 2.0_f64).max(0.0_f64)
    }

    /// Circumference of the stroke's centre line.
    #[inline]
    #[must_use]
    pub fn circumference(&self) -> f64 {
        core::f64::consts::TAU * self.radius()
    }

    /// Stroke offset for `percent`; see [`stroke_offset`].
    #[inline]
    #[must_use]
    pub fn offset(&self, percent: u8) -> f64 {
        stroke_offset(f64::from(percent), self.circumference())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalId, GoalType};
    use chrono::DateTime;
    use rust_decimal_macros::dec;

    fn goal(target: Decimal, current: Decimal) -> Goal {
        Goal {
            id: GoalId::new("g-1".to_owned()),
            name: "Travel".to_owned(),
            target_amount: target,
            current_amount: current,
            goal_type: GoalType::ShortTerm,
            note: None,
            target_date: None,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            contributions: Vec::new(),
        }
    }

    fn approx_eq(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9_f64
    }

    #[test]
    fn half_saved_goal() {
        let half = goal(dec!(1000), dec!(500));
        assert_eq!(percent_complete(&half), 50);
        assert_eq!(remaining_amount(&half), dec!(500));
        assert_eq!(shortfall(&half), dec!(500));
    }

    #[test]
    fn over_saved_goal_is_clamped_for_display() {
        let over = goal(dec!(5000), dec!(6000));
        assert_eq!(percent_complete(&over), 100);
        assert_eq!(remaining_amount(&over), Decimal::ZERO);
        assert_eq!(shortfall(&over), dec!(-1000));
        assert!(GoalProgress::of(&over).is_achieved);
    }

    #[test]
    fn zero_target_yields_zero_percent() {
        assert_eq!(percent_complete(&goal(Decimal::ZERO, dec!(10))), 0);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent_complete(&goal(dec!(200), dec!(1))), 1);
        assert_eq!(percent_complete(&goal(dec!(1000), dec!(4))), 0);
        assert_eq!(percent_complete(&goal(dec!(3), dec!(2))), 67);
    }

    #[test]
    fn huge_balance_saturates_at_full() {
        assert_eq!(percent_complete(&goal(dec!(1), Decimal::MAX)), 100);
    }

    #[test]
    fn percent_is_monotonic_and_bounded() {
        let mut previous = 0_u8;
        for step in 0_u32..=300_u32 {
            let current = Decimal::from(step) * dec!(5);
            let percent = percent_complete(&goal(dec!(997), current));
            assert!(percent >= previous, "dropped at step {step}");
            assert!(percent <= 100);
            previous = percent;
        }
        assert_eq!(previous, 100);
    }

    #[test]
    fn goal_progress_bundles_metrics() {
        let progress = GoalProgress::of(&goal(dec!(1000), dec!(250)));
        assert_eq!(
            progress,
            GoalProgress {
                saved: dec!(250),
                target: dec!(1000),
                percent: 25,
                remaining: dec!(750),
                shortfall: dec!(750),
                is_achieved: false,
            }
        );
    }

    #[test]
    fn stroke_offset_maps_percent_to_arc() {
        assert!(approx_eq(stroke_offset(0.0_f64, 100.0_f64), 100.0_f64));
        assert!(approx_eq(stroke_offset(25.0_f64, 100.0_f64), 75.0_f64));
        assert!(approx_eq(stroke_offset(100.0_f64, 100.0_f64), 0.0_f64));
    }

    #[test]
    fn ring_geometry() {
        let ring = ProgressRing::new(120.0_f64, 10.0_f64);
        assert!(approx_eq(ring.radius(), 55.0_f64));
        assert!(approx_eq(ring.circumference(), core::f64::consts::TAU * 55.0_f64));
        assert!(approx_eq(ring.offset(50), ring.circumference() / 2.0_f64));
        assert!(approx_eq(ProgressRing::new(4.0_f64, 10.0_f64).radius(), 0.0_f64));
    }

    #[test]
    fn days_left_counts_whole_days() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let target = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(days_left(target, today), 59);
        assert_eq!(days_left(today, target), -59);
        assert_eq!(days_left(today, today), 0);
    }
}
