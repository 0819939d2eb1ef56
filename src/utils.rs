use chrono::{Datelike, Days, NaiveDate};
use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

/// Get the configuration directory path for HBT
/// If profile is Dev, uses "hbt-dev" instead of "hbt"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "hbt-dev",
        Profile::Prod => "hbt",
    };
    ProjectDirs::from("com", "hbt", app_name).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for HBT
/// If profile is Dev, uses "hbt-dev" instead of "hbt"
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "hbt-dev",
        Profile::Prod => "hbt",
    };
    ProjectDirs::from("com", "hbt", app_name).map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
}

/// Format a date as an ISO 8601 string (YYYY-MM-DD)
pub fn date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Get the current date as an ISO 8601 string (YYYY-MM-DD)
pub fn get_current_date_string() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Day of week as the stored index: 0 = Sunday .. 6 = Saturday.
/// This matches the encoding of `Habit::scheduled_days`.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Day-of-week index for a date string; None if the string is malformed.
pub fn day_of_week_str(date_str: &str) -> Option<u8> {
    parse_date(date_str).ok().map(day_of_week)
}

/// Monday through Friday.
pub fn is_workday(date: NaiveDate) -> bool {
    let dow = day_of_week(date);
    (1..=5).contains(&dow)
}

/// ISO 8601 week number (week 1 contains the year's first Thursday).
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Number of ISO weeks in a year (52 or 53). December 28 always falls in
/// the year's final ISO week, so its week number is the total.
pub fn total_iso_weeks_in_year(year: i32) -> u32 {
    match NaiveDate::from_ymd_opt(year, 12, 28) {
        Some(dec28) => iso_week_number(dec28),
        None => 52,
    }
}

/// The Monday on or before `date` (weeks run Monday through Sunday).
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// The seven date strings of the week containing `date`, Monday first.
pub fn week_dates(date: NaiveDate) -> Vec<String> {
    let monday = monday_of_week(date);
    (0..7)
        .filter_map(|i| monday.checked_add_days(Days::new(i)))
        .map(date_string)
        .collect()
}

/// Parsed key binding information
#[derive(Debug, Clone)]
pub struct ParsedKeyBinding {
    pub key_code: crossterm::event::KeyCode,
    pub requires_ctrl: bool,
}

/// Check if a key event has the primary modifier (Ctrl on Windows/Linux, Option/Alt on macOS)
pub fn has_primary_modifier(modifiers: crossterm::event::KeyModifiers) -> bool {
    #[cfg(target_os = "macos")]
    {
        modifiers.contains(crossterm::event::KeyModifiers::CONTROL)
            || modifiers.contains(crossterm::event::KeyModifiers::ALT)
    }

    #[cfg(not(target_os = "macos"))]
    {
        modifiers.contains(crossterm::event::KeyModifiers::CONTROL)
    }
}

/// Format a key binding string for display, showing the platform-appropriate
/// modifier ("Ctrl+" reads as "Opt+" on macOS)
pub fn format_key_binding_for_display(key_binding: &str) -> String {
    #[cfg(target_os = "macos")]
    {
        key_binding.replace("Ctrl+", "Opt+")
    }

    #[cfg(not(target_os = "macos"))]
    {
        key_binding.to_string()
    }
}

/// Parse a key binding string from config into a ParsedKeyBinding
/// Supports single keys ("q", "n"), special keys ("Enter", "Left") and a
/// "Ctrl+" modifier prefix ("Ctrl+s")
pub fn parse_key_binding(key_str: &str) -> Result<ParsedKeyBinding, String> {
    let key_str = key_str.trim();

    if let Some(key_part) = key_str.strip_prefix("Ctrl+") {
        let key_code = parse_key_code(key_part)?;
        return Ok(ParsedKeyBinding {
            key_code,
            requires_ctrl: true,
        });
    }

    let key_code = parse_key_code(key_str)?;
    Ok(ParsedKeyBinding {
        key_code,
        requires_ctrl: false,
    })
}

/// Parse a key code from a string (without modifiers)
fn parse_key_code(key_str: &str) -> Result<crossterm::event::KeyCode, String> {
    match key_str {
        "Enter" => Ok(crossterm::event::KeyCode::Enter),
        "Esc" | "Escape" => Ok(crossterm::event::KeyCode::Esc),
        "Backspace" => Ok(crossterm::event::KeyCode::Backspace),
        "Tab" => Ok(crossterm::event::KeyCode::Tab),
        "Space" | " " => Ok(crossterm::event::KeyCode::Char(' ')),
        "Left" => Ok(crossterm::event::KeyCode::Left),
        "Right" => Ok(crossterm::event::KeyCode::Right),
        "Up" => Ok(crossterm::event::KeyCode::Up),
        "Down" => Ok(crossterm::event::KeyCode::Down),
        "Home" => Ok(crossterm::event::KeyCode::Home),
        "End" => Ok(crossterm::event::KeyCode::End),
        "PageUp" => Ok(crossterm::event::KeyCode::PageUp),
        "PageDown" => Ok(crossterm::event::KeyCode::PageDown),
        "Delete" => Ok(crossterm::event::KeyCode::Delete),
        "F1" => Ok(crossterm::event::KeyCode::F(1)),
        "F2" => Ok(crossterm::event::KeyCode::F(2)),
        "F3" => Ok(crossterm::event::KeyCode::F(3)),
        "F4" => Ok(crossterm::event::KeyCode::F(4)),
        _ => {
            if key_str.len() == 1 {
                match key_str.chars().next() {
                    Some(c) => Ok(crossterm::event::KeyCode::Char(c)),
                    None => Err("Empty key string".to_string()),
                }
            } else {
                Err(format!("Unknown key binding: {}", key_str))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn day_of_week_uses_sunday_zero() {
        assert_eq!(day_of_week(d("2024-01-07")), 0); // Sunday
        assert_eq!(day_of_week(d("2024-01-01")), 1); // Monday
        assert_eq!(day_of_week(d("2024-01-06")), 6); // Saturday
    }

    #[test]
    fn workdays_are_monday_through_friday() {
        assert!(is_workday(d("2024-01-03"))); // Wednesday
        assert!(is_workday(d("2024-01-05"))); // Friday
        assert!(!is_workday(d("2024-01-06"))); // Saturday
        assert!(!is_workday(d("2024-01-07"))); // Sunday
    }

    #[test]
    fn iso_week_numbers_match_known_dates() {
        assert_eq!(iso_week_number(d("2024-01-01")), 1); // a Monday, week 1
        assert_eq!(iso_week_number(d("2021-01-01")), 53); // Friday of 2020-W53
        assert_eq!(iso_week_number(d("2020-12-28")), 53);
    }

    #[test]
    fn week_totals_for_long_and_short_years() {
        assert_eq!(total_iso_weeks_in_year(2020), 53);
        assert_eq!(total_iso_weeks_in_year(2021), 52);
        assert_eq!(total_iso_weeks_in_year(2024), 52);
        assert_eq!(total_iso_weeks_in_year(2026), 53);
    }

    #[test]
    fn monday_of_week_handles_sunday() {
        // A Sunday belongs to the week that started six days earlier.
        assert_eq!(monday_of_week(d("2024-01-07")), d("2024-01-01"));
        assert_eq!(monday_of_week(d("2024-01-01")), d("2024-01-01"));
        assert_eq!(monday_of_week(d("2024-01-04")), d("2024-01-01"));
    }

    #[test]
    fn week_dates_span_monday_to_sunday() {
        let week = week_dates(d("2024-01-03"));
        assert_eq!(week.len(), 7);
        assert_eq!(week[0], "2024-01-01");
        assert_eq!(week[6], "2024-01-07");
    }

    #[test]
    fn parse_key_binding_handles_ctrl_prefix() {
        let parsed = parse_key_binding("Ctrl+s").unwrap();
        assert!(parsed.requires_ctrl);
        assert_eq!(parsed.key_code, crossterm::event::KeyCode::Char('s'));
        assert!(parse_key_binding("NoSuchKey").is_err());
    }
}
