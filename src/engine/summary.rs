use std::collections::BTreeMap;

use crate::engine::completion::is_completed;
use crate::engine::goals::resolve_goal;
use crate::engine::schedule::applies_on;
use crate::models::{Habit, HabitKind};

/// Unsaved hours edits for one habit: date string to tentative value.
/// Aggregation reads through this overlay so the grid totals reflect edits
/// before they are written to the store.
pub type PendingValues = BTreeMap<String, f64>;

/// Completion counts for one date over the habits scheduled on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySummary {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

/// Summarize one date over a habit set. Only habits scheduled on the date
/// count; when none are, there is no summary (a rest day is not "0%").
pub fn daily_summary(habits: &[Habit], date_str: &str) -> Option<DailySummary> {
    let applicable: Vec<&Habit> = habits.iter().filter(|h| applies_on(h, date_str)).collect();
    if applicable.is_empty() {
        return None;
    }
    let completed = applicable
        .iter()
        .filter(|h| is_completed(h, date_str))
        .count();
    let percent = ((completed as f64 / applicable.len() as f64) * 100.0).round() as u32;
    Some(DailySummary {
        completed,
        total: applicable.len(),
        percent,
    })
}

/// Lifetime count of logged actions: every history entry of every habit,
/// regardless of schedule or completion.
pub fn total_actions(habits: &[Habit]) -> usize {
    habits.iter().map(|h| h.history.len()).sum()
}

/// Weekly totals for one habit, shown in the grid's Totals column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeekTotals {
    /// Completed days out of the week's scheduled days.
    Binary { completed: u32, applicable: u32 },
    /// Logged hours against the summed per-date goals.
    Hours { logged: f64, goal: f64 },
}

/// Accumulate a habit's totals over a 7-date week window.
///
/// Scheduled future dates count toward the denominator (they cannot be
/// completed yet, which is the point of showing them). For hours habits a
/// pending-edit overlay, when given, takes precedence over recorded values.
pub fn weekly_totals(habit: &Habit, week: &[String], pending: Option<&PendingValues>) -> WeekTotals {
    match habit.kind {
        HabitKind::Todo | HabitKind::Todont => {
            let mut completed = 0;
            let mut applicable = 0;
            for date in week {
                if !applies_on(habit, date) {
                    continue;
                }
                applicable += 1;
                if is_completed(habit, date) {
                    completed += 1;
                }
            }
            WeekTotals::Binary {
                completed,
                applicable,
            }
        }
        HabitKind::Hours => {
            let mut logged = 0.0;
            let mut goal = 0.0;
            for date in week {
                if !applies_on(habit, date) {
                    continue;
                }
                goal += resolve_goal(habit, date);
                let recorded = habit
                    .history
                    .get(date)
                    .map(|value| value.as_hours())
                    .unwrap_or(0.0);
                logged += pending
                    .and_then(|p| p.get(date).copied())
                    .unwrap_or(recorded);
            }
            WeekTotals::Hours { logged, goal }
        }
    }
}

/// Whether every habit scheduled on `date_str` is completed. Future dates and
/// dates with no scheduled habit report false; the grid header only lights up
/// for days that were actually, fully done.
pub fn day_complete(habits: &[Habit], date_str: &str, today: &str) -> bool {
    if date_str > today {
        return false;
    }
    let applicable: Vec<&Habit> = habits.iter().filter(|h| applies_on(h, date_str)).collect();
    if applicable.is_empty() {
        return false;
    }
    applicable.iter().all(|h| is_completed(h, date_str))
}

/// Per-day completion count over all habits, for the calendar view. Unlike
/// `daily_summary` this is not schedule-filtered; the calendar paints raw
/// completion density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub completed: usize,
    pub total: usize,
}

pub fn calendar_day(habits: &[Habit], date_str: &str) -> CalendarDay {
    let completed = habits
        .iter()
        .filter(|h| is_completed(h, date_str))
        .count();
    CalendarDay {
        completed,
        total: habits.len(),
    }
}

/// Lifetime per-habit stats for the stats view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitStats {
    pub days_logged: usize,
    pub days_completed: usize,
}

pub fn habit_stats(habit: &Habit) -> HabitStats {
    let days_completed = habit
        .history
        .keys()
        .filter(|date| is_completed(habit, date))
        .count();
    HabitStats {
        days_logged: habit.history.len(),
        days_completed,
    }
}
