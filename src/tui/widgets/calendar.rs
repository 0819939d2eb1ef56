use chrono::Days;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::engine;
use crate::tui::app::App;
use crate::tui::widgets::color::parse_color;
use crate::utils;

/// Rolling 35-day calendar (the last ~30 days padded back to a full week),
/// each cell showing the day number and how many habits were completed.
pub fn render_calendar(f: &mut Frame, area: Rect, app: &App) {
    let active_theme = app.config.get_active_theme();
    let fg = parse_color(&active_theme.fg);
    let bg = parse_color(&active_theme.bg);
    let done_fg = parse_color(&active_theme.done_fg);
    let pending_fg = parse_color(&active_theme.pending_fg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Last 30 days")
        .style(Style::default().fg(fg).bg(bg));

    if app.habits.is_empty() {
        let paragraph = Paragraph::new("No habits to show on the calendar yet.")
            .block(block)
            .style(Style::default().fg(pending_fg));
        f.render_widget(paragraph, area);
        return;
    }

    let Ok(today) = utils::parse_date(&app.today) else {
        f.render_widget(block, area);
        return;
    };
    // Window start: 29 days back, snapped to the Monday of that week
    let window_start = today
        .checked_sub_days(Days::new(29))
        .map(utils::monday_of_week)
        .unwrap_or(today);

    let header = Row::new(
        ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
            .iter()
            .map(|d| Cell::from(*d).style(Style::default().add_modifier(Modifier::BOLD))),
    );

    let mut rows: Vec<Row> = Vec::new();
    for week in 0..5u64 {
        let mut cells: Vec<Cell> = Vec::new();
        for day in 0..7u64 {
            let Some(date) = window_start.checked_add_days(Days::new(week * 7 + day)) else {
                cells.push(Cell::from(""));
                continue;
            };
            let date_str = utils::date_string(date);
            let future = date_str.as_str() > app.today.as_str();

            let day_number = chrono::Datelike::day(&date);
            if future {
                cells.push(
                    Cell::from(format!("{:>2}", day_number))
                        .style(Style::default().fg(pending_fg)),
                );
                continue;
            }

            let summary = engine::calendar_day(&app.habits, &date_str);
            let rate = if summary.total > 0 {
                summary.completed as f64 / summary.total as f64
            } else {
                0.0
            };
            let rate_color = if rate >= 1.0 {
                done_fg
            } else if rate >= 0.5 {
                Color::Yellow
            } else if rate > 0.0 {
                Color::Magenta
            } else {
                pending_fg
            };

            let text = if summary.completed > 0 {
                format!("{:>2} {}/{}", day_number, summary.completed, summary.total)
            } else {
                format!("{:>2}", day_number)
            };

            let mut style = Style::default().fg(rate_color);
            if date_str == app.today {
                style = style.add_modifier(Modifier::BOLD);
            }
            if date_str == app.selected_date {
                style = style.bg(highlight_bg);
            }
            cells.push(Cell::from(text).style(style));
        }
        rows.push(Row::new(cells));
    }

    let widths = vec![Constraint::Length(8); 7];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    f.render_widget(table, area);
}
