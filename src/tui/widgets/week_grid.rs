use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::engine::{self, WeekTotals};
use crate::models::{Habit, HabitKind};
use crate::tui::app::{App, Mode};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::utils;

fn kind_color(kind: HabitKind) -> Color {
    match kind {
        HabitKind::Todo => Color::Green,
        HabitKind::Todont => Color::Red,
        HabitKind::Hours => Color::Blue,
    }
}

fn fmt_hours(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Header label for a week header: "Jan 1 - Jan 7 • Week 1/52"
fn week_header(week: &[String]) -> String {
    let Some(first) = week.first().and_then(|d| utils::parse_date(d).ok()) else {
        return String::new();
    };
    let Some(last) = week.last().and_then(|d| utils::parse_date(d).ok()) else {
        return String::new();
    };
    let week_number = utils::iso_week_number(first);
    let total_weeks = utils::total_iso_weeks_in_year(chrono::Datelike::year(&first));
    format!(
        "{} - {} • Week {}/{}",
        first.format("%b %-d"),
        last.format("%b %-d"),
        week_number,
        total_weeks
    )
}

pub fn render_week_grid(f: &mut Frame, area: Rect, app: &App) {
    let active_theme = app.config.get_active_theme();
    let fg = parse_color(&active_theme.fg);
    let bg = parse_color(&active_theme.bg);
    let done_fg = parse_color(&active_theme.done_fg);
    let pending_fg = parse_color(&active_theme.pending_fg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let week = app.week();
    if week.len() != 7 {
        let paragraph = Paragraph::new("Invalid date selection")
            .block(Block::default().borders(Borders::ALL).title("Week"));
        f.render_widget(paragraph, area);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(week_header(&week))
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(fg).bg(bg));

    let rows_empty = app.week_rows().is_empty();
    if rows_empty {
        let paragraph = Paragraph::new("No habits scheduled this week. Press 'n' to create one.")
            .block(block)
            .style(Style::default().fg(pending_fg));
        f.render_widget(paragraph, area);
        return;
    }

    // Header: habit column, one column per day, totals
    let mut header_cells: Vec<Cell> = vec![Cell::from("Habit")];
    for (col, date) in week.iter().enumerate() {
        let label = utils::parse_date(date)
            .map(|d| d.format("%a %-d").to_string())
            .unwrap_or_else(|_| date.clone());
        let all_done = engine::day_complete(&app.habits, date, &app.today);
        let mut style = Style::default().fg(fg);
        if all_done {
            style = Style::default().fg(done_fg).add_modifier(Modifier::BOLD);
        } else if *date == app.today {
            style = Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD);
        }
        if col == app.ui.selected_col {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        header_cells.push(Cell::from(label).style(style));
    }
    header_cells.push(Cell::from("Totals"));
    let header = Row::new(header_cells).style(Style::default().add_modifier(Modifier::BOLD));

    let mut rows: Vec<Row> = Vec::new();
    let mut flat_index = 0usize;
    for kind in HabitKind::ALL {
        let group: Vec<&Habit> = app
            .ordering
            .ordered_group(&app.habits, kind)
            .into_iter()
            .filter(|h| engine::applies_in_week(h, &week))
            .collect();
        if group.is_empty() {
            continue;
        }

        // Kind group header row
        rows.push(
            Row::new(vec![Cell::from(kind.label().to_uppercase())]).style(
                Style::default()
                    .fg(kind_color(kind))
                    .add_modifier(Modifier::BOLD),
            ),
        );

        for habit in group {
            let selected = flat_index == app.ui.selected_row;
            let pending = app.pending_for(habit.id);
            let has_pending = pending.map(|p| !p.is_empty()).unwrap_or(false);

            let mut name = habit.name.clone();
            if has_pending {
                name.push_str(" *");
            }
            if selected && app.ui.mode == Mode::Sort {
                name = format!("↕ {}", name);
            }
            let name_style = if selected {
                Style::default().fg(highlight_fg).bg(highlight_bg)
            } else {
                Style::default().fg(fg)
            };
            let mut cells: Vec<Cell> = vec![Cell::from(name).style(name_style)];

            for (col, date) in week.iter().enumerate() {
                let cell = week_cell(app, habit, date, fg, done_fg, pending_fg);
                let cell = if selected && col == app.ui.selected_col {
                    cell.style(Style::default().fg(highlight_fg).bg(highlight_bg))
                } else {
                    cell
                };
                cells.push(cell);
            }

            cells.push(totals_cell(habit, &week, pending, fg, done_fg, has_pending));
            rows.push(Row::new(cells));
            flat_index += 1;
        }
    }

    let mut widths: Vec<Constraint> = vec![Constraint::Min(16)];
    widths.extend(std::iter::repeat(Constraint::Length(7)).take(7));
    widths.push(Constraint::Length(12));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    f.render_widget(table, area);
}

/// One day cell: "-" when not scheduled, a check mark or circle for binary
/// habits, "value/goal" for hours habits (staged edits shown with a *).
fn week_cell<'a>(
    app: &App,
    habit: &Habit,
    date: &str,
    fg: Color,
    done_fg: Color,
    pending_fg: Color,
) -> Cell<'a> {
    let future = date > app.today.as_str();
    if !engine::applies_on(habit, date) {
        return Cell::from("-").style(Style::default().fg(pending_fg));
    }

    match habit.kind {
        HabitKind::Todo | HabitKind::Todont => {
            if engine::is_completed(habit, date) {
                Cell::from("✓").style(Style::default().fg(done_fg))
            } else if future {
                Cell::from("·").style(Style::default().fg(pending_fg))
            } else {
                Cell::from("○").style(Style::default().fg(fg))
            }
        }
        HabitKind::Hours => {
            let recorded = habit
                .history
                .get(date)
                .map(|v| v.as_hours())
                .unwrap_or(0.0);
            let staged = app
                .pending_for(habit.id)
                .and_then(|p| p.get(date))
                .copied();
            let value = staged.unwrap_or(recorded);
            let goal = engine::resolve_goal(habit, date);
            let mut text = format!("{}/{}", fmt_hours(value), fmt_hours(goal));
            if staged.is_some() {
                text.push('*');
            }
            let style = if staged.is_some() {
                Style::default().fg(Color::Yellow)
            } else if value >= goal && !future {
                Style::default().fg(done_fg)
            } else if future {
                Style::default().fg(pending_fg)
            } else {
                Style::default().fg(fg)
            };
            Cell::from(text).style(style)
        }
    }
}

/// Totals column: days done / days scheduled, or logged / goal hours
fn totals_cell<'a>(
    habit: &Habit,
    week: &[String],
    pending: Option<&engine::PendingValues>,
    fg: Color,
    done_fg: Color,
    has_pending: bool,
) -> Cell<'a> {
    let (mut text, met) = match engine::weekly_totals(habit, week, pending) {
        WeekTotals::Binary {
            completed,
            applicable,
        } => (
            format!("{}/{} days", completed, applicable),
            applicable > 0 && completed == applicable,
        ),
        WeekTotals::Hours { logged, goal } => (
            format!("{}/{}h", fmt_hours(logged), fmt_hours(goal)),
            goal > 0.0 && logged >= goal,
        ),
    };
    if has_pending {
        text.push('*');
    }
    let style = if met {
        Style::default().fg(done_fg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(fg)
    };
    Cell::from(Line::from(Span::styled(text, style)))
}
