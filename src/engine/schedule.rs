use crate::models::Habit;
use crate::utils;

/// Whether a habit is active on the given date according to its day-of-week
/// mask. An empty mask means every day: habits created before scheduling
/// existed carry no mask and keep their old behavior.
pub fn applies_on(habit: &Habit, date_str: &str) -> bool {
    if habit.scheduled_days.is_empty() {
        return true;
    }
    match utils::day_of_week_str(date_str) {
        Some(dow) => habit.scheduled_days.contains(&dow),
        None => false,
    }
}

/// Whether a habit is active on at least one date of a week window. Decides
/// if the habit gets a row in the weekly grid at all; individual cells still
/// go through `applies_on`.
pub fn applies_in_week(habit: &Habit, week: &[String]) -> bool {
    week.iter().any(|date| applies_on(habit, date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HabitKind;
    use crate::utils::week_dates;

    fn habit_with_days(days: &[u8]) -> Habit {
        let mut habit = Habit::new("ana".to_string(), "Gym".to_string(), HabitKind::Todo);
        habit.scheduled_days = days.to_vec();
        habit
    }

    #[test]
    fn empty_mask_applies_every_day() {
        let habit = habit_with_days(&[]);
        assert!(applies_on(&habit, "2024-01-01"));
        assert!(applies_on(&habit, "2024-01-06"));
        assert!(applies_on(&habit, "2024-01-07"));
    }

    #[test]
    fn mask_selects_matching_weekdays() {
        // Monday, Wednesday, Friday
        let habit = habit_with_days(&[1, 3, 5]);
        assert!(applies_on(&habit, "2024-01-01")); // Monday
        assert!(!applies_on(&habit, "2024-01-02")); // Tuesday
        assert!(applies_on(&habit, "2024-01-03")); // Wednesday
        assert!(!applies_on(&habit, "2024-01-07")); // Sunday
    }

    #[test]
    fn malformed_date_does_not_apply_under_a_mask() {
        let habit = habit_with_days(&[1]);
        assert!(!applies_on(&habit, "garbage"));
        // ...but an unmasked habit still applies, date never inspected.
        let every_day = habit_with_days(&[]);
        assert!(applies_on(&every_day, "garbage"));
    }

    #[test]
    fn week_applicability_needs_one_active_day() {
        let week = week_dates(crate::utils::parse_date("2024-01-03").unwrap());
        let sunday_only = habit_with_days(&[0]);
        assert!(applies_in_week(&sunday_only, &week));

        let never = habit_with_days(&[7]); // no date maps to index 7
        assert!(!applies_in_week(&never, &week));
    }
}
