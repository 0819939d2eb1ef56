pub mod cli;
pub mod config;
pub mod database;
pub mod engine;
pub mod models;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use database::Database;
pub use models::{GoalEntry, Habit, HabitKind, HabitValue};
pub use utils::Profile;
