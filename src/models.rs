use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Habit variants. Legacy databases spell these "boolean" and "numeric";
/// `HabitKind::parse` normalizes those at the store boundary so the rest of
/// the crate only ever sees the closed enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    /// Something to do daily (checked off as done).
    Todo,
    /// Something to avoid daily (checked off as avoided).
    Todont,
    /// A numeric hours target, split by workday/weekend.
    Hours,
}

impl HabitKind {
    /// Parse a stored kind string, accepting the legacy spellings.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todo" | "boolean" => Some(HabitKind::Todo),
            "todont" => Some(HabitKind::Todont),
            "hours" | "numeric" => Some(HabitKind::Hours),
            _ => None,
        }
    }

    /// Canonical storage spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitKind::Todo => "todo",
            HabitKind::Todont => "todont",
            HabitKind::Hours => "hours",
        }
    }

    /// Display label for lists and group headers.
    pub fn label(&self) -> &'static str {
        match self {
            HabitKind::Todo => "To Do",
            HabitKind::Todont => "To Don't",
            HabitKind::Hours => "Hours",
        }
    }

    pub const ALL: [HabitKind; 3] = [HabitKind::Todo, HabitKind::Todont, HabitKind::Hours];
}

/// A recorded value for one date: a boolean for Todo/Todont habits, a
/// non-negative number for Hours habits. Stored untagged so the history JSON
/// reads as plain `true`/`false`/numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HabitValue {
    Done(bool),
    Hours(f64),
}

impl HabitValue {
    /// Strict boolean completion: only a recorded `true` counts. A number
    /// stored on a binary habit never reads as done.
    pub fn as_done(&self) -> bool {
        matches!(self, HabitValue::Done(true))
    }

    /// Numeric reading: numbers pass through, anything else reads as 0.
    pub fn as_hours(&self) -> f64 {
        match self {
            HabitValue::Hours(v) => *v,
            HabitValue::Done(_) => 0.0,
        }
    }
}

/// One entry in a habit's goal timeline. The targets apply to every date
/// on or after `effective_date` until a later-effective entry supersedes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalEntry {
    pub effective_date: String, // ISO 8601: YYYY-MM-DD
    pub goal_workdays: f64,
    pub goal_weekends: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: Option<i64>,
    pub owner: String,
    pub name: String,
    pub kind: HabitKind,
    /// Scheduled weekdays, 0 = Sunday .. 6 = Saturday. Empty means every day
    /// (habits created before scheduling existed have no entry at all).
    pub scheduled_days: Vec<u8>,
    /// Legacy single daily goal, kept as a read fallback.
    pub goal: Option<f64>,
    pub goal_workdays: Option<f64>,
    pub goal_weekends: Option<f64>,
    /// Goal timeline, append-only; insertion order matters for tie-breaks.
    pub goal_history: Vec<GoalEntry>,
    /// Recorded values keyed by date string (YYYY-MM-DD).
    pub history: BTreeMap<String, HabitValue>,
    /// Manual position among habits of the same kind (lower sorts first).
    pub order: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl Habit {
    pub fn new(owner: String, name: String, kind: HabitKind) -> Self {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self {
            id: None,
            owner,
            name,
            kind,
            scheduled_days: Vec::new(),
            goal: None,
            goal_workdays: None,
            goal_weekends: None,
            goal_history: Vec::new(),
            history: BTreeMap::new(),
            order: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Set the current workday/weekend targets and append the matching
    /// timeline entry effective on `effective_date`. Used both at creation
    /// (initial entry dated the creation day) and on goal edits.
    pub fn set_goals(&mut self, goal_workdays: f64, goal_weekends: f64, effective_date: &str) {
        self.goal_workdays = Some(goal_workdays);
        self.goal_weekends = Some(goal_weekends);
        self.goal_history.push(GoalEntry {
            effective_date: effective_date.to_string(),
            goal_workdays,
            goal_weekends,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parse_accepts_legacy_spellings() {
        assert_eq!(HabitKind::parse("boolean"), Some(HabitKind::Todo));
        assert_eq!(HabitKind::parse("numeric"), Some(HabitKind::Hours));
        assert_eq!(HabitKind::parse("todont"), Some(HabitKind::Todont));
        assert_eq!(HabitKind::parse("weekly"), None);
    }

    #[test]
    fn value_as_done_is_strict() {
        assert!(HabitValue::Done(true).as_done());
        assert!(!HabitValue::Done(false).as_done());
        assert!(!HabitValue::Hours(1.0).as_done());
    }

    #[test]
    fn value_round_trips_as_plain_json() {
        let done: HabitValue = serde_json::from_str("true").unwrap();
        assert_eq!(done, HabitValue::Done(true));
        let hours: HabitValue = serde_json::from_str("2.5").unwrap();
        assert_eq!(hours, HabitValue::Hours(2.5));
        assert_eq!(serde_json::to_string(&done).unwrap(), "true");
        assert_eq!(serde_json::to_string(&hours).unwrap(), "2.5");
    }

    #[test]
    fn set_goals_appends_timeline_entry() {
        let mut habit = Habit::new("ana".to_string(), "Deep work".to_string(), HabitKind::Hours);
        habit.set_goals(8.0, 2.0, "2024-01-01");
        assert_eq!(habit.goal_workdays, Some(8.0));
        assert_eq!(habit.goal_history.len(), 1);
        assert_eq!(habit.goal_history[0].effective_date, "2024-01-01");
    }
}
