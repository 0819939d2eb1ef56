use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::engine;
use crate::models::HabitKind;
use crate::tui::app::App;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::utils;

/// Daily list: the habits scheduled on the selected date, with a one-line
/// summary of the day above them.
pub fn render_day_list(f: &mut Frame, area: Rect, app: &mut App) {
    let active_theme = app.config.get_active_theme();
    let fg = parse_color(&active_theme.fg);
    let bg = parse_color(&active_theme.bg);
    let done_fg = parse_color(&active_theme.done_fg);
    let pending_fg = parse_color(&active_theme.pending_fg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let date_label = utils::parse_date(&app.selected_date)
        .map(|d| d.format("%A, %b %-d %Y").to_string())
        .unwrap_or_else(|_| app.selected_date.clone());
    let title = if app.selected_date == app.today {
        format!("Today — {}", date_label)
    } else {
        date_label
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(fg).bg(bg));

    let rows = app.day_rows();
    if rows.is_empty() {
        let text = if app.habits.is_empty() {
            "No habits yet. Press 'n' to create one."
        } else {
            "No habits scheduled for this day."
        };
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(pending_fg));
        f.render_widget(paragraph, area);
        return;
    }

    let mut items: Vec<ListItem> = Vec::new();

    // Day summary over the scheduled habits, plus the lifetime action count
    if let Some(summary) = engine::daily_summary(&app.habits, &app.selected_date) {
        let summary_line = format!(
            "{}/{} done ({}%) • {} total actions",
            summary.completed,
            summary.total,
            summary.percent,
            engine::total_actions(&app.habits)
        );
        items.push(ListItem::new(Line::from(Span::styled(
            summary_line,
            Style::default().fg(pending_fg),
        ))));
        items.push(ListItem::new(Line::from("")));
    }

    // Selection index offset: two header lines above the habit rows
    let header_lines = items.len();

    for habit in &rows {
        let completed = engine::is_completed(habit, &app.selected_date);
        let marker = if completed { "✓" } else { "○" };
        let marker_style = if completed {
            Style::default().fg(done_fg)
        } else {
            Style::default().fg(fg)
        };

        let mut spans = vec![
            Span::styled(format!("{} ", marker), marker_style),
            Span::styled(habit.name.clone(), Style::default().fg(fg)),
        ];

        if habit.kind == HabitKind::Hours {
            let value = habit
                .history
                .get(&app.selected_date)
                .map(|v| v.as_hours())
                .unwrap_or(0.0);
            let goal = engine::resolve_goal(habit, &app.selected_date);
            spans.push(Span::styled(
                format!("  {:.1} / {:.1}h", value, goal),
                Style::default().fg(if completed { done_fg } else { pending_fg }),
            ));
        }
        spans.push(Span::styled(
            format!("  [{}]", habit.kind.label()),
            Style::default().fg(pending_fg),
        ));

        items.push(ListItem::new(Line::from(spans)));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(highlight_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        );

    // Offset the shared selection index past the summary lines
    let mut state = app.ui.list_state.clone();
    state.select(Some(app.ui.selected_row + header_lines));
    f.render_stateful_widget(list, area, &mut state);
}
