pub mod calendar;
pub mod color;
pub mod confirm_delete;
pub mod day_list;
pub mod form;
pub mod habit_list;
pub mod help;
pub mod stats;
pub mod status_bar;
pub mod tabs;
pub mod week_grid;
