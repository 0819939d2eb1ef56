pub mod completion;
pub mod goals;
pub mod ordering;
pub mod schedule;
pub mod summary;

pub use completion::is_completed;
pub use goals::{compact_goal_history, resolve_goal};
pub use ordering::{MoveDirection, OrderUpdate, OrderingError, OrderingSession};
pub use schedule::{applies_in_week, applies_on};
pub use summary::{
    calendar_day, daily_summary, day_complete, habit_stats, total_actions, weekly_totals, CalendarDay,
    DailySummary, HabitStats, PendingValues, WeekTotals,
};
