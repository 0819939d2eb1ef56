use std::collections::HashMap;

use thiserror::Error;

use crate::models::{Habit, HabitKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderingError {
    #[error("no reorder session is active")]
    NotStaging,
    #[error("unknown habit id: {0}")]
    UnknownHabit(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// One order write for the store, emitted by `commit_plan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderUpdate {
    pub habit_id: i64,
    pub order: i64,
}

/// Interactive reorder session over a habit collection.
///
/// Starts Live (no overlay, reads persisted orders). `enter_staging` opens a
/// staging overlay that accumulates pairwise swaps without touching the
/// store; `commit_plan` turns the net effect into a minimal batch of order
/// writes, and `complete`/`discard` return to Live. One session per habit set
/// at a time; the UI enforces that by keeping a single session.
#[derive(Debug, Default)]
pub struct OrderingSession {
    overlay: HashMap<i64, i64>,
    staging: bool,
}

impl OrderingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_staging(&self) -> bool {
        self.staging
    }

    /// Whether any swap has been staged since entering.
    pub fn has_moves(&self) -> bool {
        !self.overlay.is_empty()
    }

    /// Open a staging session, dropping any leftover overlay.
    pub fn enter_staging(&mut self) {
        self.overlay.clear();
        self.staging = true;
    }

    /// Drop all staged moves and return to Live without writing anything.
    pub fn discard(&mut self) {
        self.overlay.clear();
        self.staging = false;
    }

    /// Clear the overlay after the commit batch was written successfully.
    /// Not called on a failed write, so the session stays staged and the
    /// commit can be retried without redoing the moves.
    pub fn complete(&mut self) {
        self.overlay.clear();
        self.staging = false;
    }

    /// Effective order of a habit: staged value, else persisted order, else a
    /// creation-timestamp fallback. The fallback is epoch seconds, so habits
    /// that never got an order sort after every manually ordered one, oldest
    /// first.
    pub fn effective_order(&self, habit: &Habit) -> i64 {
        if let Some(id) = habit.id {
            if let Some(staged) = self.overlay.get(&id) {
                return *staged;
            }
        }
        match habit.order {
            Some(order) => order,
            None => creation_rank(habit),
        }
    }

    /// Habits of one kind in display order under the current overlay.
    pub fn ordered_group<'a>(&self, habits: &'a [Habit], kind: HabitKind) -> Vec<&'a Habit> {
        let mut group: Vec<&Habit> = habits.iter().filter(|h| h.kind == kind).collect();
        group.sort_by_key(|h| self.effective_order(h));
        group
    }

    /// Swap the habit with its neighbor above or below within its kind group.
    /// Returns false (and stages nothing) when the habit is already at the
    /// edge. Only valid while staging.
    pub fn move_adjacent(
        &mut self,
        habits: &[Habit],
        habit_id: i64,
        direction: MoveDirection,
    ) -> Result<bool, OrderingError> {
        if !self.staging {
            return Err(OrderingError::NotStaging);
        }
        let kind = habits
            .iter()
            .find(|h| h.id == Some(habit_id))
            .map(|h| h.kind)
            .ok_or(OrderingError::UnknownHabit(habit_id))?;

        let group = self.ordered_group(habits, kind);
        let Some(index) = group.iter().position(|h| h.id == Some(habit_id)) else {
            return Err(OrderingError::UnknownHabit(habit_id));
        };
        let target = match direction {
            MoveDirection::Up => {
                if index == 0 {
                    return Ok(false);
                }
                index - 1
            }
            MoveDirection::Down => {
                if index + 1 >= group.len() {
                    return Ok(false);
                }
                index + 1
            }
        };

        let current_order = self.effective_order(group[index]);
        let target_order = self.effective_order(group[target]);
        let Some(target_id) = group[target].id else {
            return Ok(false);
        };
        self.overlay.insert(habit_id, target_order);
        self.overlay.insert(target_id, current_order);
        Ok(true)
    }

    /// Renumber every kind group densely 0..N-1 under the current overlay and
    /// return only the orders that differ from what is persisted. Only valid
    /// while staging.
    pub fn commit_plan(&self, habits: &[Habit]) -> Result<Vec<OrderUpdate>, OrderingError> {
        if !self.staging {
            return Err(OrderingError::NotStaging);
        }
        let mut updates = Vec::new();
        for kind in HabitKind::ALL {
            for (index, habit) in self.ordered_group(habits, kind).into_iter().enumerate() {
                let new_order = index as i64;
                if habit.order != Some(new_order) {
                    if let Some(habit_id) = habit.id {
                        updates.push(OrderUpdate {
                            habit_id,
                            order: new_order,
                        });
                    }
                }
            }
        }
        Ok(updates)
    }
}

/// Creation-time rank for habits without a persisted order. Epoch seconds
/// dwarf any dense order value, matching "after all ordered habits, by
/// creation time".
fn creation_rank(habit: &Habit) -> i64 {
    chrono::NaiveDateTime::parse_from_str(&habit.created_at, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn habit(id: i64, name: &str, kind: HabitKind, order: Option<i64>) -> Habit {
        let mut habit = Habit::new("ana".to_string(), name.to_string(), kind);
        habit.id = Some(id);
        habit.order = order;
        habit.created_at = format!("2024-01-01 09:00:{:02}", id);
        habit
    }

    fn fixture() -> Vec<Habit> {
        vec![
            habit(1, "A", HabitKind::Todo, Some(0)),
            habit(2, "B", HabitKind::Todo, Some(1)),
            habit(3, "C", HabitKind::Todo, Some(2)),
            habit(4, "Read", HabitKind::Hours, Some(0)),
        ]
    }

    fn names(group: &[&Habit]) -> Vec<String> {
        group.iter().map(|h| h.name.clone()).collect()
    }

    #[test]
    fn moves_require_a_staging_session() {
        let habits = fixture();
        let mut session = OrderingSession::new();
        assert_eq!(
            session.move_adjacent(&habits, 3, MoveDirection::Up),
            Err(OrderingError::NotStaging)
        );
        assert_eq!(session.commit_plan(&habits), Err(OrderingError::NotStaging));
    }

    #[test]
    fn two_upward_swaps_commit_as_a_dense_permutation() {
        let habits = fixture();
        let mut session = OrderingSession::new();
        session.enter_staging();

        assert!(session.move_adjacent(&habits, 3, MoveDirection::Up).unwrap());
        assert!(session.move_adjacent(&habits, 3, MoveDirection::Up).unwrap());
        assert_eq!(
            names(&session.ordered_group(&habits, HabitKind::Todo)),
            ["C", "A", "B"]
        );

        let plan = session.commit_plan(&habits).unwrap();
        let mut orders: Vec<(i64, i64)> = plan.iter().map(|u| (u.habit_id, u.order)).collect();
        orders.sort();
        assert_eq!(orders, [(1, 1), (2, 2), (3, 0)]);
    }

    #[test]
    fn edge_moves_are_no_ops() {
        let habits = fixture();
        let mut session = OrderingSession::new();
        session.enter_staging();

        assert!(!session.move_adjacent(&habits, 1, MoveDirection::Up).unwrap());
        assert!(!session.move_adjacent(&habits, 3, MoveDirection::Down).unwrap());
        assert!(!session.has_moves());
    }

    #[test]
    fn discard_drops_moves_without_writes() {
        let habits = fixture();
        let mut session = OrderingSession::new();
        session.enter_staging();
        session.move_adjacent(&habits, 2, MoveDirection::Up).unwrap();
        assert!(session.has_moves());

        session.discard();
        assert!(!session.is_staging());
        assert!(!session.has_moves());
        // Live again: effective orders read straight from the habits.
        assert_eq!(
            names(&session.ordered_group(&habits, HabitKind::Todo)),
            ["A", "B", "C"]
        );
    }

    #[test]
    fn commit_emits_only_changed_orders() {
        let habits = fixture();
        let mut session = OrderingSession::new();
        session.enter_staging();
        // No moves: everything already dense, nothing to write.
        assert!(session.commit_plan(&habits).unwrap().is_empty());

        session.move_adjacent(&habits, 2, MoveDirection::Up).unwrap();
        let plan = session.commit_plan(&habits).unwrap();
        // A and B swap; C and the hours habit keep their orders.
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|u| u.habit_id == 1 || u.habit_id == 2));
    }

    #[test]
    fn unordered_habits_rank_after_ordered_ones() {
        let mut habits = fixture();
        habits.push(habit(5, "D", HabitKind::Todo, None));
        habits.push(habit(6, "E", HabitKind::Todo, None));

        let session = OrderingSession::new();
        assert_eq!(
            names(&session.ordered_group(&habits, HabitKind::Todo)),
            ["A", "B", "C", "D", "E"]
        );

        // Committing assigns them dense orders continuing the sequence.
        let mut session = OrderingSession::new();
        session.enter_staging();
        let plan = session.commit_plan(&habits).unwrap();
        let mut orders: Vec<(i64, i64)> = plan.iter().map(|u| (u.habit_id, u.order)).collect();
        orders.sort();
        assert_eq!(orders, [(5, 3), (6, 4)]);
    }

    #[test]
    fn kind_groups_are_isolated() {
        let habits = fixture();
        let mut session = OrderingSession::new();
        session.enter_staging();
        session.move_adjacent(&habits, 3, MoveDirection::Up).unwrap();

        let plan = session.commit_plan(&habits).unwrap();
        assert!(plan.iter().all(|u| u.habit_id != 4));
        assert_eq!(
            names(&session.ordered_group(&habits, HabitKind::Hours)),
            ["Read"]
        );
    }

    #[test]
    fn reentering_staging_clears_a_stale_overlay() {
        let habits = fixture();
        let mut session = OrderingSession::new();
        session.enter_staging();
        session.move_adjacent(&habits, 2, MoveDirection::Up).unwrap();

        session.enter_staging();
        assert!(!session.has_moves());
        assert_eq!(
            names(&session.ordered_group(&habits, HabitKind::Todo)),
            ["A", "B", "C"]
        );
    }
}
