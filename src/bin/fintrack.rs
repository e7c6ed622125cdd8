//! Command-line front end for the fintrack ledger.

use std::io::{self, Write as _};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, Table};
use fintrack::catalog;
use fintrack::error::{ErrorKind, FinTrackError};
use fintrack::ledger::{EntryFilter, Ledger, LedgerStore as _};
use fintrack::models::{
    DateRange, Decimal, Direction, Entry, EntryKind, Goal, GoalId, GoalType, NaiveDate,
    NewContribution, NewEntry, NewGoal, parse_amount,
};
use fintrack::progress::{GoalProgress, days_left};
use fintrack::storage::{FileStorage, Storage};
use fintrack::summary::{CategoryTotal, Period, Summary};
use owo_colors::OwoColorize;

/// Environment variable overriding the storage directory.
const DATA_DIR_ENV: &str = "FINTRACK_DATA_DIR";

/// Environment variable overriding the currency symbol.
const CURRENCY_ENV: &str = "FINTRACK_CURRENCY";

/// Currency symbol used when none is configured.
const DEFAULT_CURRENCY: &str = "\u{20b9}";

/// Number of cells in a textual progress bar.
const BAR_WIDTH: usize = 20;

/// Track income, expenses and savings goals.
#[derive(Debug, Parser)]
#[command(name = "fintrack", version, about)]
struct Cli {
    /// Override the storage directory (default: platform data dir).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Record an income or expense.
    AddEntry(AddEntryArgs),
    /// List entries, optionally filtered by date range, kind or category.
    Entries(EntryArgs),
    /// Show income and expense totals for the period containing a day.
    Summary {
        /// Reporting period.
        #[arg(long, default_value = "monthly")]
        period: Period,
        /// Any day inside the period (YYYY-MM-DD, default: today).
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Create a savings goal.
    CreateGoal(CreateGoalArgs),
    /// List goals grouped by type.
    Goals {
        /// Only show goals of this type.
        #[arg(long = "type", value_name = "TYPE")]
        goal_type: Option<GoalType>,
    },
    /// Show one goal with its progress and contribution history.
    Goal {
        /// Goal id.
        id: String,
    },
    /// Save into or withdraw from a goal.
    Contribute(ContributeArgs),
    /// List the standard entry categories.
    Categories {
        /// Only show categories for this kind.
        #[arg(long)]
        kind: Option<EntryKind>,
    },
    /// List suggested goal names with their icons.
    SuggestGoals {
        /// Goal type to suggest names for.
        #[arg(long = "type", value_name = "TYPE")]
        goal_type: GoalType,
    },
}

/// Arguments for the `add-entry` subcommand.
#[derive(Debug, Args)]
struct AddEntryArgs {
    /// Category name, e.g. Food or Salary.
    category: String,
    /// Amount, e.g. 12.50.
    #[arg(value_parser = parse_amount_arg, allow_negative_numbers = true)]
    amount: Decimal,
    /// Income or expense.
    #[arg(long, default_value = "expense")]
    kind: EntryKind,
    /// Day the entry belongs to (YYYY-MM-DD, default: today).
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Free-form note.
    #[arg(long)]
    note: Option<String>,
}

/// Arguments for the `entries` subcommand.
#[derive(Debug, Args)]
struct EntryArgs {
    /// Start date (inclusive, YYYY-MM-DD). Requires --to.
    #[arg(long, requires = "to", value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// End date (inclusive, YYYY-MM-DD). Requires --from.
    #[arg(long, requires = "from", value_parser = parse_date)]
    to: Option<NaiveDate>,
    /// Only income or only expense entries.
    #[arg(long)]
    kind: Option<EntryKind>,
    /// Filter by category (case-insensitive).
    #[arg(long)]
    category: Option<String>,
    /// Filter by note (case-insensitive substring match).
    #[arg(long)]
    note: Option<String>,
    /// Minimum amount (inclusive).
    #[arg(long, value_parser = parse_amount_arg)]
    min_amount: Option<Decimal>,
    /// Maximum amount (inclusive).
    #[arg(long, value_parser = parse_amount_arg)]
    max_amount: Option<Decimal>,
}

/// Arguments for the `create-goal` subcommand.
#[derive(Debug, Args)]
struct CreateGoalArgs {
    /// Goal name, e.g. "Buy a laptop".
    name: String,
    /// Target amount.
    #[arg(value_parser = parse_amount_arg, allow_negative_numbers = true)]
    amount: Decimal,
    /// Goal type.
    #[arg(long = "type", value_name = "TYPE", default_value = "short-term")]
    goal_type: GoalType,
    /// Free-form note.
    #[arg(long)]
    note: Option<String>,
    /// Day to reach the target by (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    target_date: Option<NaiveDate>,
}

/// Arguments for the `contribute` subcommand.
#[derive(Debug, Args)]
struct ContributeArgs {
    /// Goal id.
    id: String,
    /// Amount to move.
    #[arg(long, value_parser = parse_amount_arg, allow_negative_numbers = true)]
    amount: Decimal,
    /// Withdraw instead of saving.
    #[arg(long)]
    withdraw: bool,
    /// Free-form note.
    #[arg(long)]
    note: Option<String>,
}

/// Settings resolved from flags, environment and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    /// Storage directory; `None` means the platform default.
    data_dir: Option<PathBuf>,
    /// Symbol prefixed to every amount.
    currency: String,
}

impl Settings {
    /// Reads overrides from the process environment.
    fn from_env(cli_dir: Option<PathBuf>) -> Self {
        Self::resolve(cli_dir, env_value(DATA_DIR_ENV), env_value(CURRENCY_ENV))
    }

    /// Flag beats environment beats default.
    fn resolve(
        cli_dir: Option<PathBuf>,
        env_dir: Option<String>,
        env_currency: Option<String>,
    ) -> Self {
        Self {
            data_dir: cli_dir.or_else(|| env_dir.map(PathBuf::from)),
            currency: env_currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
        }
    }

    /// Formats an amount with the currency symbol and two decimals.
    fn money(&self, amount: Decimal) -> String {
        if amount.is_sign_negative() && !amount.is_zero() {
            format!("-{}{:.2}", self.currency, amount.abs())
        } else {
            format!("{}{amount:.2}", self.currency)
        }
    }
}

/// Non-empty, trimmed value of an environment variable.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Parses a date string in `YYYY-MM-DD` format for clap.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|err| format!("{err}"))
}

/// Parses an amount for clap; sign checks happen in the ledger.
fn parse_amount_arg(s: &str) -> Result<Decimal, String> {
    parse_amount(s).map_err(|err| err.to_string())
}

/// Current local day.
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    let settings = Settings::from_env(cli.data_dir);

    let storage = match create_storage(settings.data_dir.clone()) {
        Ok(storage) => storage,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to initialize storage: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    dispatch(&Ledger::new(storage), &settings, cli.command)
}

/// Creates the storage backend, using `data_dir` if provided or the
/// platform data directory otherwise.
fn create_storage(data_dir: Option<PathBuf>) -> fintrack::error::Result<FileStorage> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => FileStorage::default_dir()?,
    };
    FileStorage::new(dir)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch<S: Storage>(
    ledger: &Ledger<S>,
    settings: &Settings,
    command: Command,
) -> io::Result<ExitCode> {
    match command {
        Command::AddEntry(args) => cmd_add_entry(ledger, settings, args),
        Command::Entries(args) => cmd_entries(ledger, settings, args),
        Command::Summary { period, date } => {
            cmd_summary(ledger, settings, period, date.unwrap_or_else(today))
        }
        Command::CreateGoal(args) => cmd_create_goal(ledger, settings, args),
        Command::Goals { goal_type } => cmd_goals(ledger, settings, goal_type),
        Command::Goal { id } => cmd_goal(ledger, settings, &GoalId::new(id)),
        Command::Contribute(args) => cmd_contribute(ledger, settings, args),
        Command::Categories { kind } => cmd_categories(kind),
        Command::SuggestGoals { goal_type } => cmd_suggest_goals(goal_type),
    }
}

/// Writes `error: <message>` to stderr, plus a hint where one helps.
fn report_error(err: &FinTrackError) -> io::Result<ExitCode> {
    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{} {err}", "error:".red().bold())?;
    match err.kind() {
        ErrorKind::NotFound => {
            writeln!(
                stderr,
                "  {} run `fintrack goals` to list goal ids",
                "hint:".cyan()
            )?;
        }
        ErrorKind::Storage => {
            writeln!(
                stderr,
                "  {} check that --data-dir or {DATA_DIR_ENV} points to a writable directory",
                "hint:".cyan()
            )?;
        }
        ErrorKind::Validation | ErrorKind::InsufficientFunds => {}
    }
    Ok(ExitCode::FAILURE)
}

/// Executes the `add-entry` subcommand.
fn cmd_add_entry<S: Storage>(
    ledger: &Ledger<S>,
    settings: &Settings,
    args: AddEntryArgs,
) -> io::Result<ExitCode> {
    let input = NewEntry {
        category: args.category,
        amount: args.amount,
        kind: args.kind,
        date: args.date.unwrap_or_else(today),
        note: args.note,
    };
    match ledger.add_entry(input) {
        Ok(entry) => {
            print_entry_added(settings, &entry)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report_error(&err),
    }
}

/// Executes the `entries` subcommand.
fn cmd_entries<S: Storage>(
    ledger: &Ledger<S>,
    settings: &Settings,
    args: EntryArgs,
) -> io::Result<ExitCode> {
    let entries = build_entry_filter(args).and_then(|filter| ledger.filter_entries(&filter));
    match entries {
        Ok(entries) => {
            print_entries_table(settings, &entries)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report_error(&err),
    }
}

/// Builds an [`EntryFilter`] from CLI arguments.
fn build_entry_filter(args: EntryArgs) -> fintrack::error::Result<EntryFilter> {
    let date_range = match (args.from, args.to) {
        (Some(from), Some(to)) => Some(DateRange::new(from, to)?),
        (Some(_), None) | (None, Some(_)) | (None, None) => None,
    };
    Ok(EntryFilter {
        date_range,
        kind: args.kind,
        category: args.category,
        note: args.note,
        min_amount: args.min_amount,
        max_amount: args.max_amount,
    })
}

/// Executes the `summary` subcommand.
fn cmd_summary<S: Storage>(
    ledger: &Ledger<S>,
    settings: &Settings,
    period: Period,
    day: NaiveDate,
) -> io::Result<ExitCode> {
    match ledger.summary(&period.range_containing(day)) {
        Ok(summary) => {
            print_summary(settings, period, &summary)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report_error(&err),
    }
}

/// Executes the `create-goal` subcommand.
fn cmd_create_goal<S: Storage>(
    ledger: &Ledger<S>,
    settings: &Settings,
    args: CreateGoalArgs,
) -> io::Result<ExitCode> {
    let input = NewGoal {
        name: args.name,
        target_amount: args.amount,
        goal_type: args.goal_type,
        note: args.note,
        target_date: args.target_date,
    };
    match ledger.create_goal(input) {
        Ok(goal) => {
            let mut out = io::stdout().lock();
            writeln!(
                out,
                "{} {} {}",
                "Created goal".green().bold(),
                goal.name.bold(),
                format_args!("({}, target {})", goal.goal_type, settings.money(goal.target_amount))
                    .dimmed()
            )?;
            writeln!(out, "  id: {}", goal.id)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report_error(&err),
    }
}

/// Executes the `goals` subcommand.
fn cmd_goals<S: Storage>(
    ledger: &Ledger<S>,
    settings: &Settings,
    goal_type: Option<GoalType>,
) -> io::Result<ExitCode> {
    let sections = match goal_type {
        Some(only) => ledger.list_goals(only).map(|goals| vec![(only, goals)]),
        None => ledger.goals_by_type(),
    };
    match sections {
        Ok(sections) => {
            for (section_type, goals) in sections {
                print_goals_table(settings, section_type, &goals)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report_error(&err),
    }
}

/// Executes the `goal` subcommand.
fn cmd_goal<S: Storage>(
    ledger: &Ledger<S>,
    settings: &Settings,
    goal_id: &GoalId,
) -> io::Result<ExitCode> {
    match ledger.goal(goal_id) {
        Ok(goal) => {
            print_goal_details(settings, &goal, today())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report_error(&err),
    }
}

/// Executes the `contribute` subcommand.
fn cmd_contribute<S: Storage>(
    ledger: &Ledger<S>,
    settings: &Settings,
    args: ContributeArgs,
) -> io::Result<ExitCode> {
    let direction = if args.withdraw {
        Direction::Withdraw
    } else {
        Direction::Saving
    };
    let input = NewContribution {
        amount: args.amount,
        direction,
        note: args.note,
    };
    match ledger.apply_contribution(&GoalId::new(args.id), input) {
        Ok(goal) => {
            let verb = match direction {
                Direction::Saving => "Saved",
                Direction::Withdraw => "Withdrew",
            };
            let progress = GoalProgress::of(&goal);
            let mut out = io::stdout().lock();
            writeln!(
                out,
                "{} {} {}",
                verb.green().bold(),
                settings.money(args.amount),
                format_args!("({})", goal.name).dimmed()
            )?;
            writeln!(
                out,
                "  {} {}% {}",
                progress_bar(progress.percent),
                progress.percent,
                format_args!(
                    "{} of {}",
                    settings.money(progress.saved),
                    settings.money(progress.target)
                )
                .dimmed()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report_error(&err),
    }
}

/// Executes the `categories` subcommand.
fn cmd_categories(kind: Option<EntryKind>) -> io::Result<ExitCode> {
    let kinds = kind.map_or_else(|| vec![EntryKind::Income, EntryKind::Expense], |only| vec![only]);
    let mut out = io::stdout().lock();
    for listed in kinds {
        let names = catalog::categories_for(listed);
        writeln!(
            out,
            "{} {}",
            format_args!("{listed} categories").green().bold(),
            format_args!("({})", names.len()).dimmed()
        )?;
        for name in names {
            writeln!(out, "  \u{2022} {name}")?;
        }
        writeln!(out)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `suggest-goals` subcommand.
fn cmd_suggest_goals(goal_type: GoalType) -> io::Result<ExitCode> {
    let names = catalog::goal_suggestions(goal_type);
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Goal").fg(Color::Cyan),
        Cell::new("Icon").fg(Color::Cyan),
    ]);
    for name in names {
        _ = table.add_row(vec![Cell::new(name), Cell::new(catalog::goal_icon(name))]);
    }

    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} {}",
        format_args!("Suggested {goal_type} goals").green().bold(),
        format_args!("({})", names.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(ExitCode::SUCCESS)
}

/// Renders `percent` as a fixed-width bar of full and light blocks.
fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent).saturating_mul(BAR_WIDTH);
    (0..BAR_WIDTH)
        .map(|slot| {
            if slot.saturating_mul(100) < filled {
                '\u{2588}'
            } else {
                '\u{2591}'
            }
        })
        .collect()
}

/// Colored amount cell: green for income, red for expense.
fn amount_cell(settings: &Settings, kind: EntryKind, amount: Decimal) -> Cell {
    let cell = Cell::new(settings.money(amount)).set_alignment(CellAlignment::Right);
    match kind {
        EntryKind::Income => cell.fg(Color::Green),
        EntryKind::Expense => cell.fg(Color::Red),
    }
}

/// Prints confirmation for a freshly recorded entry.
fn print_entry_added(settings: &Settings, entry: &Entry) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} {} {} {}",
        format_args!("Recorded {}", entry.kind.label().to_lowercase()).green().bold(),
        entry.category.bold(),
        settings.money(entry.amount),
        format_args!("on {}", entry.date).dimmed()
    )?;
    writeln!(out, "  id: {}", entry.id)?;
    if !catalog::is_known_category(entry.kind, &entry.category) {
        writeln!(
            out,
            "  {} '{}' is not a standard {} category",
            "note:".cyan(),
            entry.category,
            entry.kind.label().to_lowercase()
        )?;
    }
    Ok(())
}

/// Prints entries in a table.
fn print_entries_table(settings: &Settings, entries: &[Entry]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if entries.is_empty() {
        writeln!(out, "{}", "No entries found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Date").fg(Color::Cyan),
        Cell::new("Type").fg(Color::Cyan),
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Amount").fg(Color::Cyan),
        Cell::new("Note").fg(Color::Cyan),
    ]);

    for entry in entries {
        _ = table.add_row(vec![
            Cell::new(entry.date),
            Cell::new(entry.kind),
            Cell::new(&entry.category),
            amount_cell(settings, entry.kind, entry.amount),
            Cell::new(entry.note.as_deref().unwrap_or("")),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Entries".green().bold(),
        format_args!("({})", entries.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints a period summary with totals and per-category breakdowns.
fn print_summary(settings: &Settings, period: Period, summary: &Summary) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} {}",
        format_args!("{period} summary").green().bold(),
        format_args!("({} to {})", summary.range.start(), summary.range.end()).dimmed()
    )?;
    writeln!(out)?;
    if summary.is_empty() {
        writeln!(out, "{}", "No data available for this period.".dimmed())?;
        return Ok(());
    }

    let mut totals = Table::new();
    _ = totals.load_preset(UTF8_FULL);
    _ = totals.set_header(vec![
        Cell::new("Income").fg(Color::Cyan),
        Cell::new("Expense").fg(Color::Cyan),
        Cell::new("Net").fg(Color::Cyan),
    ]);
    let net_color = if summary.net.is_sign_negative() {
        Color::Red
    } else {
        Color::Green
    };
    _ = totals.add_row(vec![
        amount_cell(settings, EntryKind::Income, summary.income),
        amount_cell(settings, EntryKind::Expense, summary.expense),
        Cell::new(settings.money(summary.net)).fg(net_color),
    ]);
    writeln!(out, "{totals}")?;

    for kind in [EntryKind::Income, EntryKind::Expense] {
        let rows = summary.by_category(kind);
        if rows.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{}", format_args!("{kind} by category").bold())?;
        writeln!(out, "{}", category_table(settings, kind, rows))?;
    }
    Ok(())
}

/// Builds the breakdown table for one kind.
fn category_table(settings: &Settings, kind: EntryKind, rows: &[CategoryTotal]) -> Table {
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Amount").fg(Color::Cyan),
        Cell::new("Share").fg(Color::Cyan),
    ]);
    for row in rows {
        _ = table.add_row(vec![
            Cell::new(&row.category),
            amount_cell(settings, kind, row.total),
            Cell::new(format!("{:.2}%", row.share)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Prints one goal section.
fn print_goals_table(settings: &Settings, goal_type: GoalType, goals: &[Goal]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} {}",
        format_args!("{goal_type} goals").green().bold(),
        format_args!("({})", goals.len()).dimmed()
    )?;
    if goals.is_empty() {
        writeln!(out, "{}", "No goals found.".dimmed())?;
        writeln!(out)?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Saved").fg(Color::Cyan),
        Cell::new("Target").fg(Color::Cyan),
        Cell::new("Progress").fg(Color::Cyan),
    ]);

    for goal in goals {
        let progress = GoalProgress::of(goal);
        let percent_cell = if progress.is_achieved {
            Cell::new(format!("{}%", progress.percent)).fg(Color::Green)
        } else {
            Cell::new(format!("{}%", progress.percent))
        };
        _ = table.add_row(vec![
            Cell::new(&goal.id).fg(Color::DarkGrey),
            Cell::new(&goal.name),
            Cell::new(settings.money(progress.saved)),
            Cell::new(settings.money(progress.target)),
            percent_cell,
        ]);
    }

    writeln!(out, "{table}")?;
    writeln!(out)?;
    Ok(())
}

/// Prints one goal with its progress bar, deadline and contributions.
fn print_goal_details(settings: &Settings, goal: &Goal, today: NaiveDate) -> io::Result<()> {
    let progress = GoalProgress::of(goal);
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} {}",
        goal.name.green().bold(),
        format_args!("({}, icon: {})", goal.goal_type, goal.icon()).dimmed()
    )?;
    writeln!(out, "  id: {}", goal.id)?;
    if let Some(note) = goal.note.as_deref() {
        writeln!(out, "  note: {note}")?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "  {} {}%",
        progress_bar(progress.percent),
        progress.percent
    )?;
    writeln!(
        out,
        "  saved {} of {}",
        settings.money(progress.saved).bold(),
        settings.money(progress.target)
    )?;
    if progress.is_achieved {
        writeln!(out, "  {}", "Target reached!".green().bold())?;
        if progress.shortfall.is_sign_negative() && !progress.shortfall.is_zero() {
            writeln!(
                out,
                "  over target by {}",
                settings.money(progress.shortfall.abs())
            )?;
        }
    } else {
        writeln!(out, "  remaining {}", settings.money(progress.remaining))?;
    }
    if let Some(target_date) = goal.target_date {
        let days = days_left(target_date, today);
        if days >= 0 {
            writeln!(out, "  {days} days left (by {target_date})")?;
        } else {
            writeln!(
                out,
                "  {}",
                format_args!("{} days overdue (was due {target_date})", days.unsigned_abs()).red()
            )?;
        }
    }
    writeln!(out)?;

    if goal.contributions.is_empty() {
        writeln!(out, "{}", "No contributions yet.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("When").fg(Color::Cyan),
        Cell::new("Direction").fg(Color::Cyan),
        Cell::new("Amount").fg(Color::Cyan),
        Cell::new("Note").fg(Color::Cyan),
    ]);
    for contribution in &goal.contributions {
        let amount = Cell::new(settings.money(contribution.amount));
        let amount = match contribution.direction {
            Direction::Saving => amount.fg(Color::Green),
            Direction::Withdraw => amount.fg(Color::Red),
        };
        _ = table.add_row(vec![
            Cell::new(contribution.recorded_at.format("%Y-%m-%d %H:%M")),
            Cell::new(contribution.direction),
            amount,
            Cell::new(contribution.note.as_deref().unwrap_or("")),
        ]);
    }
    writeln!(
        out,
        "{} {}",
        "Contributions".bold(),
        format_args!(
            "(saved {}, withdrawn {})",
            settings.money(goal.total_saved()),
            settings.money(goal.total_withdrawn())
        )
        .dimmed()
    )?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            // If stderr itself failed there is nothing left to report to.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
