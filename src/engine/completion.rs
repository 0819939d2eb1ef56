use crate::engine::goals::resolve_goal;
use crate::models::{Habit, HabitKind};

/// Whether a habit counts as completed on the given date.
///
/// Binary habits require the recorded boolean `true`; any other recorded
/// value (a number, `false`, nothing) is incomplete. Hours habits compare the
/// recorded value (absent reads as 0) against the date's resolved goal, so a
/// goal of 0 is always met.
///
/// Deliberately ignores the schedule: completion and applicability are
/// orthogonal, and aggregation decides which dates count.
pub fn is_completed(habit: &Habit, date_str: &str) -> bool {
    match habit.kind {
        HabitKind::Todo | HabitKind::Todont => habit
            .history
            .get(date_str)
            .map(|value| value.as_done())
            .unwrap_or(false),
        HabitKind::Hours => {
            let value = habit
                .history
                .get(date_str)
                .map(|value| value.as_hours())
                .unwrap_or(0.0);
            value >= resolve_goal(habit, date_str)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HabitValue;

    fn todo_habit() -> Habit {
        Habit::new("ana".to_string(), "Stretch".to_string(), HabitKind::Todo)
    }

    fn hours_habit() -> Habit {
        let mut habit = Habit::new("ana".to_string(), "Deep work".to_string(), HabitKind::Hours);
        habit.set_goals(8.0, 2.0, "2024-01-01");
        habit
    }

    #[test]
    fn binary_completion_requires_literal_true() {
        let mut habit = todo_habit();
        habit
            .history
            .insert("2024-01-03".to_string(), HabitValue::Done(true));
        habit
            .history
            .insert("2024-01-04".to_string(), HabitValue::Done(false));
        habit
            .history
            .insert("2024-01-05".to_string(), HabitValue::Hours(1.0));

        assert!(is_completed(&habit, "2024-01-03"));
        assert!(!is_completed(&habit, "2024-01-04"));
        assert!(!is_completed(&habit, "2024-01-05")); // a number is not `true`
        assert!(!is_completed(&habit, "2024-01-06")); // nothing recorded
    }

    #[test]
    fn hours_completion_compares_against_resolved_goal() {
        let mut habit = hours_habit();
        habit
            .history
            .insert("2024-01-03".to_string(), HabitValue::Hours(8.0));
        habit
            .history
            .insert("2024-01-04".to_string(), HabitValue::Hours(7.5));

        assert!(is_completed(&habit, "2024-01-03"));
        assert!(!is_completed(&habit, "2024-01-04"));
    }

    #[test]
    fn hours_goal_change_does_not_rewrite_the_past() {
        let mut habit = hours_habit();
        habit
            .history
            .insert("2024-01-03".to_string(), HabitValue::Hours(8.0));
        habit.set_goals(10.0, 2.0, "2024-01-10");

        assert!(is_completed(&habit, "2024-01-03"));
        habit
            .history
            .insert("2024-01-10".to_string(), HabitValue::Hours(8.0));
        assert!(!is_completed(&habit, "2024-01-10"));
    }

    #[test]
    fn zero_goal_is_always_met() {
        let habit = Habit::new("ana".to_string(), "Walk".to_string(), HabitKind::Hours);
        assert!(is_completed(&habit, "2024-01-03"));
    }

    #[test]
    fn completion_ignores_the_schedule() {
        let mut habit = todo_habit();
        habit.scheduled_days = vec![1]; // Mondays only
        habit
            .history
            .insert("2024-01-06".to_string(), HabitValue::Done(true)); // a Saturday
        assert!(is_completed(&habit, "2024-01-06"));
    }
}
