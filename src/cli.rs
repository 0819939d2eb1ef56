use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::database::{Database, DatabaseError};
use crate::engine::{self, OrderingSession, WeekTotals};
use crate::models::{Habit, HabitKind, HabitValue};
use crate::utils::{get_current_date_string, parse_date, week_dates};

#[derive(Parser)]
#[command(name = "hbt")]
#[command(about = "Habit tracker - weekly grids, schedules and versioned goals")]
#[command(version)]
pub struct Cli {
    /// Owner profile to operate on (overrides the configured owner)
    #[arg(long)]
    pub owner: Option<String>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Quickly add a new habit
    AddHabit {
        /// Habit name
        name: String,
        /// Habit kind: todo, todont or hours
        #[arg(long, default_value = "todo")]
        kind: String,
        /// Daily hours target for workdays (hours habits)
        #[arg(long)]
        goal_workdays: Option<f64>,
        /// Daily hours target for weekends (hours habits)
        #[arg(long)]
        goal_weekends: Option<f64>,
        /// Scheduled days, comma-separated (e.g. mon,wed,fri); omit for every day
        #[arg(long)]
        days: Option<String>,
    },
    /// Record progress for a habit
    Log {
        /// Habit name
        name: String,
        /// Date to record (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Hours value (hours habits)
        #[arg(long)]
        value: Option<f64>,
        /// Mark a binary habit as not done instead of done
        #[arg(long)]
        not_done: bool,
    },
    /// List habits with their goals and schedules
    List,
    /// Show this week's summary
    Week,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Unknown habit kind: {0} (expected todo, todont or hours)")]
    UnknownKind(String),
    #[error("Unknown habit: {0}")]
    UnknownHabit(String),
    #[error("Invalid day list: {0}")]
    InvalidDays(String),
    #[error("Hours habits need --value to log progress")]
    MissingValue,
}

/// Parse a comma-separated day list into the 0 = Sunday .. 6 = Saturday
/// encoding. Accepts three-letter names and raw indices; an explicitly given
/// list must not be empty.
fn parse_days(raw: &str) -> Result<Vec<u8>, CliError> {
    let mut days = Vec::new();
    for part in raw.split(',') {
        let part = part.trim().to_lowercase();
        if part.is_empty() {
            continue;
        }
        let day = match part.as_str() {
            "sun" | "sunday" | "0" => 0,
            "mon" | "monday" | "1" => 1,
            "tue" | "tuesday" | "2" => 2,
            "wed" | "wednesday" | "3" => 3,
            "thu" | "thursday" | "4" => 4,
            "fri" | "friday" | "5" => 5,
            "sat" | "saturday" | "6" => 6,
            _ => return Err(CliError::InvalidDays(part)),
        };
        if !days.contains(&day) {
            days.push(day);
        }
    }
    if days.is_empty() {
        return Err(CliError::InvalidDays(raw.to_string()));
    }
    days.sort();
    Ok(days)
}

fn find_habit(db: &Database, owner: &str, name: &str) -> Result<Habit, CliError> {
    db.get_habits_for_owner(owner)?
        .into_iter()
        .find(|h| h.name == name)
        .ok_or_else(|| CliError::UnknownHabit(name.to_string()))
}

/// Handle the add-habit command
pub fn handle_add_habit(
    name: String,
    kind: String,
    goal_workdays: Option<f64>,
    goal_weekends: Option<f64>,
    days: Option<String>,
    owner: &str,
    db: &Database,
) -> Result<(), CliError> {
    let kind = HabitKind::parse(&kind).ok_or(CliError::UnknownKind(kind))?;

    let mut habit = Habit::new(owner.to_string(), name, kind);
    if let Some(raw) = days {
        habit.scheduled_days = parse_days(&raw)?;
    }
    if kind == HabitKind::Hours {
        // Initial timeline entry dated the creation day
        habit.set_goals(
            goal_workdays.unwrap_or(8.0),
            goal_weekends.unwrap_or(2.0),
            &get_current_date_string(),
        );
    }

    // Place after all habits of the same kind
    let max_order = db.get_max_order_for_kind(owner, kind)?;
    habit.order = Some(max_order + 1);

    let id = db.insert_habit(&habit)?;
    println!("Habit created successfully (ID: {})", id);

    Ok(())
}

/// Handle the log command
pub fn handle_log(
    name: String,
    date: Option<String>,
    value: Option<f64>,
    not_done: bool,
    owner: &str,
    db: &Database,
) -> Result<(), CliError> {
    let date = match date {
        Some(date_str) => {
            parse_date(&date_str).map_err(|e| {
                CliError::DateParseError(format!("Invalid date format '{}': {}", date_str, e))
            })?;
            date_str
        }
        None => get_current_date_string(),
    };

    let habit = find_habit(db, owner, &name)?;
    let habit_id = habit.id.ok_or(DatabaseError::MissingId)?;

    let recorded = match habit.kind {
        HabitKind::Todo | HabitKind::Todont => HabitValue::Done(!not_done),
        HabitKind::Hours => {
            let value = value.ok_or(CliError::MissingValue)?;
            HabitValue::Hours(value.max(0.0))
        }
    };
    db.set_history_value(habit_id, &date, recorded)?;

    let updated = db.get_habit(habit_id)?;
    if engine::is_completed(&updated, &date) {
        println!("{}: {} - completed", date, updated.name);
    } else {
        println!("{}: {} - recorded", date, updated.name);
    }

    Ok(())
}

/// Handle the list command
pub fn handle_list(owner: &str, db: &Database) -> Result<(), CliError> {
    let habits = db.get_habits_for_owner(owner)?;
    if habits.is_empty() {
        println!("No habits yet. Create one with `hbt add-habit`.");
        return Ok(());
    }

    let session = OrderingSession::new();
    for kind in HabitKind::ALL {
        let group = session.ordered_group(&habits, kind);
        if group.is_empty() {
            continue;
        }
        println!("{}:", kind.label());
        for habit in group {
            let days = if habit.scheduled_days.is_empty() {
                "every day".to_string()
            } else {
                habit
                    .scheduled_days
                    .iter()
                    .map(|d| day_name(*d))
                    .collect::<Vec<_>>()
                    .join(",")
            };
            match habit.kind {
                HabitKind::Hours => {
                    let today = get_current_date_string();
                    println!(
                        "  {} ({}h today, {})",
                        habit.name,
                        engine::resolve_goal(habit, &today),
                        days
                    );
                }
                _ => println!("  {} ({})", habit.name, days),
            }
        }
    }

    Ok(())
}

/// Handle the week command
pub fn handle_week(owner: &str, db: &Database) -> Result<(), CliError> {
    let habits = db.get_habits_for_owner(owner)?;
    if habits.is_empty() {
        println!("No habits yet. Create one with `hbt add-habit`.");
        return Ok(());
    }

    let today = get_current_date_string();
    let today_date = parse_date(&today).map_err(|e| CliError::DateParseError(e.to_string()))?;
    let week = week_dates(today_date);

    println!(
        "Week {}/{} ({} - {})",
        crate::utils::iso_week_number(today_date),
        crate::utils::total_iso_weeks_in_year(
            chrono::Datelike::year(&crate::utils::monday_of_week(today_date))
        ),
        week[0],
        week[6]
    );

    let session = OrderingSession::new();
    for kind in HabitKind::ALL {
        for habit in session.ordered_group(&habits, kind) {
            if !engine::applies_in_week(habit, &week) {
                continue;
            }
            match engine::weekly_totals(habit, &week, None) {
                WeekTotals::Binary {
                    completed,
                    applicable,
                } => println!("  {}: {}/{} days", habit.name, completed, applicable),
                WeekTotals::Hours { logged, goal } => {
                    println!("  {}: {:.1}h / {:.1}h", habit.name, logged, goal)
                }
            }
        }
    }

    if let Some(summary) = engine::daily_summary(&habits, &today) {
        println!(
            "Today: {}/{} ({}%), {} actions logged in total",
            summary.completed,
            summary.total,
            summary.percent,
            engine::total_actions(&habits)
        );
    } else {
        println!("Today: no habits scheduled");
    }

    Ok(())
}

fn day_name(day: u8) -> &'static str {
    match day {
        0 => "sun",
        1 => "mon",
        2 => "tue",
        3 => "wed",
        4 => "thu",
        5 => "fri",
        6 => "sat",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_days_accepts_names_and_indices() {
        assert_eq!(parse_days("mon,wed,fri").unwrap(), vec![1, 3, 5]);
        assert_eq!(parse_days("0,6").unwrap(), vec![0, 6]);
        assert_eq!(parse_days("Sun, sat").unwrap(), vec![0, 6]);
    }

    #[test]
    fn parse_days_dedupes_and_sorts() {
        assert_eq!(parse_days("fri,mon,fri").unwrap(), vec![1, 5]);
    }

    #[test]
    fn parse_days_rejects_empty_and_unknown() {
        assert!(parse_days("").is_err());
        assert!(parse_days(",").is_err());
        assert!(parse_days("funday").is_err());
    }
}
