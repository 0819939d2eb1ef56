use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::engine;
use crate::models::HabitKind;
use crate::tui::app::App;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

const DAY_LETTERS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

fn schedule_label(days: &[u8]) -> String {
    if days.is_empty() || days.len() == 7 {
        return "every day".to_string();
    }
    days.iter()
        .filter(|d| (**d as usize) < 7)
        .map(|d| DAY_LETTERS[*d as usize])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Management view: every habit with its kind, goals and schedule.
pub fn render_habit_list(f: &mut Frame, area: Rect, app: &mut App) {
    let active_theme = app.config.get_active_theme();
    let fg = parse_color(&active_theme.fg);
    let bg = parse_color(&active_theme.bg);
    let pending_fg = parse_color(&active_theme.pending_fg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Habits")
        .style(Style::default().fg(fg).bg(bg));

    let rows = app.all_rows();
    if rows.is_empty() {
        let paragraph = Paragraph::new("No habits yet. Press 'n' to create your first habit.")
            .block(block)
            .style(Style::default().fg(pending_fg));
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .map(|habit| {
            let mut spans = vec![
                Span::styled(habit.name.clone(), Style::default().fg(fg)),
                Span::styled(
                    format!("  [{}]", habit.kind.label()),
                    Style::default().fg(pending_fg),
                ),
            ];
            if habit.kind == HabitKind::Hours {
                let workdays = habit.goal_workdays.or(habit.goal).unwrap_or(0.0);
                let weekends = habit.goal_weekends.or(habit.goal).unwrap_or(0.0);
                spans.push(Span::styled(
                    format!("  {:.1}h workdays / {:.1}h weekends", workdays, weekends),
                    Style::default().fg(fg),
                ));
                if habit.goal_history.len() > 1 {
                    spans.push(Span::styled(
                        format!("  ({} goal changes)", habit.goal_history.len() - 1),
                        Style::default().fg(pending_fg),
                    ));
                }
            }
            spans.push(Span::styled(
                format!("  {}", schedule_label(&habit.scheduled_days)),
                Style::default().fg(pending_fg),
            ));
            spans.push(Span::styled(
                format!("  {} entries", engine::habit_stats(habit).days_logged),
                Style::default().fg(pending_fg),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(highlight_fg)
            .bg(highlight_bg)
            .add_modifier(Modifier::BOLD),
    );

    f.render_stateful_widget(list, area, &mut app.ui.list_state);
}
