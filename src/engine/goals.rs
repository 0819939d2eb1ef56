use std::collections::BTreeMap;

use crate::models::{GoalEntry, Habit};
use crate::utils;

/// Resolve the daily goal of an hours habit for a given date.
///
/// The goal timeline is consulted first: among entries effective on or before
/// the date, the one with the latest effective date applies; entries sharing
/// an effective date are superseded by the one appended last. Dates before
/// every timeline entry, and habits without a timeline, fall back to the
/// current workday/weekend fields and then the legacy single goal.
///
/// Editing today's goal therefore never changes what any earlier date
/// resolves to. A malformed date string resolves to 0.
pub fn resolve_goal(habit: &Habit, date_str: &str) -> f64 {
    let Ok(date) = utils::parse_date(date_str) else {
        return 0.0;
    };
    let workday = utils::is_workday(date);

    // Canonical YYYY-MM-DD strings compare correctly as strings.
    let mut chosen: Option<&GoalEntry> = None;
    for entry in &habit.goal_history {
        if entry.effective_date.as_str() > date_str {
            continue;
        }
        match chosen {
            Some(current) if entry.effective_date < current.effective_date => {}
            _ => chosen = Some(entry),
        }
    }

    match chosen {
        Some(entry) => {
            if workday {
                entry.goal_workdays
            } else {
                entry.goal_weekends
            }
        }
        None => current_goal(habit, workday),
    }
}

fn current_goal(habit: &Habit, workday: bool) -> f64 {
    let split = if workday {
        habit.goal_workdays
    } else {
        habit.goal_weekends
    };
    split.or(habit.goal).unwrap_or(0.0)
}

/// Deduplicate a goal timeline: one entry per effective date, the
/// last-appended entry winning, output sorted ascending by date.
///
/// Duplicate dates appear when the goal is edited twice on the same day (the
/// second edit supersedes the first). Idempotent, never grows the input.
pub fn compact_goal_history(entries: &[GoalEntry]) -> Vec<GoalEntry> {
    let mut latest: BTreeMap<&str, &GoalEntry> = BTreeMap::new();
    for entry in entries {
        latest.insert(entry.effective_date.as_str(), entry);
    }
    latest.into_values().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HabitKind;

    fn hours_habit() -> Habit {
        let mut habit = Habit::new("ana".to_string(), "Deep work".to_string(), HabitKind::Hours);
        habit.created_at = "2024-01-01 09:00:00".to_string();
        habit.set_goals(8.0, 2.0, "2024-01-01");
        habit
    }

    fn entry(date: &str, workdays: f64, weekends: f64) -> GoalEntry {
        GoalEntry {
            effective_date: date.to_string(),
            goal_workdays: workdays,
            goal_weekends: weekends,
        }
    }

    #[test]
    fn selects_workday_or_weekend_target() {
        let habit = hours_habit();
        assert_eq!(resolve_goal(&habit, "2024-01-03"), 8.0); // Wednesday
        assert_eq!(resolve_goal(&habit, "2024-01-06"), 2.0); // Saturday
    }

    #[test]
    fn goal_edit_leaves_earlier_dates_untouched() {
        let mut habit = hours_habit();
        habit.set_goals(4.0, 1.0, "2024-01-10");

        assert_eq!(resolve_goal(&habit, "2024-01-03"), 8.0);
        assert_eq!(resolve_goal(&habit, "2024-01-09"), 8.0);
        assert_eq!(resolve_goal(&habit, "2024-01-10"), 4.0);
        assert_eq!(resolve_goal(&habit, "2024-02-01"), 4.0);
    }

    #[test]
    fn same_day_edits_resolve_to_the_last_one() {
        let mut habit = hours_habit();
        habit.set_goals(6.0, 2.0, "2024-01-10");
        habit.set_goals(5.0, 2.0, "2024-01-10");

        assert_eq!(resolve_goal(&habit, "2024-01-10"), 5.0);
        assert_eq!(resolve_goal(&habit, "2024-01-11"), 5.0);
    }

    #[test]
    fn dates_before_the_timeline_use_current_fields() {
        let mut habit = Habit::new("ana".to_string(), "Read".to_string(), HabitKind::Hours);
        habit.goal_workdays = Some(3.0);
        habit.goal_weekends = Some(1.0);
        habit.goal_history.push(entry("2024-06-01", 2.0, 1.0));

        // 2024-01-05 is a Friday, before any timeline entry qualifies.
        assert_eq!(resolve_goal(&habit, "2024-01-05"), 3.0);
        assert_eq!(resolve_goal(&habit, "2024-06-03"), 2.0);
    }

    #[test]
    fn falls_back_to_legacy_goal_then_zero() {
        let mut habit = Habit::new("ana".to_string(), "Read".to_string(), HabitKind::Hours);
        habit.goal = Some(1.5);
        assert_eq!(resolve_goal(&habit, "2024-01-03"), 1.5);

        habit.goal = None;
        assert_eq!(resolve_goal(&habit, "2024-01-03"), 0.0);
    }

    #[test]
    fn malformed_date_resolves_to_zero() {
        let habit = hours_habit();
        assert_eq!(resolve_goal(&habit, "not-a-date"), 0.0);
        assert_eq!(resolve_goal(&habit, "2024-13-40"), 0.0);
    }

    #[test]
    fn compaction_keeps_the_last_entry_per_date() {
        let entries = vec![
            entry("2024-01-10", 6.0, 2.0),
            entry("2024-01-01", 8.0, 2.0),
            entry("2024-01-10", 5.0, 2.0),
        ];
        let compacted = compact_goal_history(&entries);
        assert_eq!(compacted.len(), 2);
        assert_eq!(compacted[0].effective_date, "2024-01-01");
        assert_eq!(compacted[1].effective_date, "2024-01-10");
        assert_eq!(compacted[1].goal_workdays, 5.0);
    }

    #[test]
    fn compaction_is_idempotent() {
        let entries = vec![
            entry("2024-01-10", 6.0, 2.0),
            entry("2024-01-10", 5.0, 2.0),
            entry("2024-01-01", 8.0, 2.0),
        ];
        let once = compact_goal_history(&entries);
        let twice = compact_goal_history(&once);
        assert_eq!(once, twice);
        assert!(once.len() <= entries.len());
    }

    #[test]
    fn compaction_agrees_with_resolution() {
        let mut habit = hours_habit();
        habit.set_goals(6.0, 2.0, "2024-01-10");
        habit.set_goals(5.0, 3.0, "2024-01-10");

        let before = resolve_goal(&habit, "2024-01-12");
        habit.goal_history = compact_goal_history(&habit.goal_history);
        assert_eq!(resolve_goal(&habit, "2024-01-12"), before);
    }
}
