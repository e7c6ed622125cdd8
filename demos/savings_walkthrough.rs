//! Records a month of entries and a savings goal in memory, then prints
//! the monthly summary and the goal's progress.

use std::io::{self, Write as _};

use fintrack::error::FinTrackError;
use fintrack::ledger::{Ledger, LedgerStore as _};
use fintrack::models::{
    Decimal, EntryKind, GoalType, NaiveDate, NewContribution, NewEntry, NewGoal, parse_amount,
};
use fintrack::progress::{GoalProgress, ProgressRing, days_left};
use fintrack::storage::InMemoryStorage;
use fintrack::summary::Period;

/// Builds a date, mapping an impossible one to a validation error.
fn day(year: i32, month: u32, date: u32) -> Result<NaiveDate, FinTrackError> {
    NaiveDate::from_ymd_opt(year, month, date)
        .ok_or_else(|| FinTrackError::validation("date", format!("{year}-{month}-{date} does not exist")))
}

/// Entry point.
fn main() -> Result<(), Box<dyn core::error::Error>> {
    let ledger: Ledger<InMemoryStorage> = Ledger::default();
    let mut out = io::stdout().lock();

    let records = [
        ("Salary", "3000", EntryKind::Income, 1),
        ("Housing", "1200", EntryKind::Expense, 2),
        ("Food", "180.40", EntryKind::Expense, 6),
        ("Transport", "64.10", EntryKind::Expense, 9),
        ("Food", "95.25", EntryKind::Expense, 17),
        ("Part Time", "420", EntryKind::Income, 21),
    ];
    for (category, amount, kind, date) in records {
        drop(ledger.add_entry(NewEntry::new(category, parse_amount(amount)?, kind, day(2025, 3, date)?))?);
    }

    let summary = ledger.summary(&Period::Monthly.range_containing(day(2025, 3, 15)?))?;
    writeln!(out, "March 2025: income {} expense {} net {}", summary.income, summary.expense, summary.net)?;
    for row in &summary.expense_by_category {
        writeln!(out, "  {:<10} {:>8} {:>6}%", row.category, row.total, row.share)?;
    }

    let goal = ledger.create_goal(
        NewGoal::new("Buy a laptop", Decimal::from(1500), GoalType::ShortTerm)
            .with_target_date(day(2025, 9, 1)?),
    )?;
    drop(ledger.apply_contribution(&goal.id, NewContribution::saving(Decimal::from(900)))?);
    let goal = ledger.apply_contribution(
        &goal.id,
        NewContribution::withdraw(Decimal::from(150)).with_note("repair"),
    )?;

    let progress = GoalProgress::of(&goal);
    let ring = ProgressRing::new(120.0_f64, 12.0_f64);
    writeln!(
        out,
        "{} [{}]: {}% saved, {} remaining, ring offset {:.1}",
        goal.name,
        goal.icon(),
        progress.percent,
        progress.remaining,
        ring.offset(progress.percent)
    )?;
    if let Some(target_date) = goal.target_date {
        writeln!(out, "  {} days left", days_left(target_date, day(2025, 3, 31)?))?;
    }

    let overdraw = ledger.apply_contribution(&goal.id, NewContribution::withdraw(Decimal::from(5000)));
    if let Err(err) = overdraw {
        writeln!(out, "  rejected: {err}")?;
    }
    Ok(())
}
