use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::engine;
use crate::models::HabitKind;
use crate::tui::app::App;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

/// Lifetime per-habit stats: days with any record and days completed.
pub fn render_stats(f: &mut Frame, area: Rect, app: &mut App) {
    let active_theme = app.config.get_active_theme();
    let fg = parse_color(&active_theme.fg);
    let bg = parse_color(&active_theme.bg);
    let done_fg = parse_color(&active_theme.done_fg);
    let pending_fg = parse_color(&active_theme.pending_fg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Statistics")
        .style(Style::default().fg(fg).bg(bg));

    let rows = app.all_rows();
    if rows.is_empty() {
        let paragraph = Paragraph::new("No statistics available yet.")
            .block(block)
            .style(Style::default().fg(pending_fg));
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .map(|habit| {
            let stats = engine::habit_stats(habit);
            let mut spans = vec![
                Span::styled(habit.name.clone(), Style::default().fg(fg)),
                Span::styled(
                    format!("  [{}]", habit.kind.label()),
                    Style::default().fg(pending_fg),
                ),
                Span::styled(
                    format!("  {} completed", stats.days_completed),
                    Style::default().fg(done_fg),
                ),
                Span::styled(
                    format!(" / {} logged", stats.days_logged),
                    Style::default().fg(fg),
                ),
            ];
            if habit.kind == HabitKind::Hours {
                let goal_today = engine::resolve_goal(habit, &app.today);
                spans.push(Span::styled(
                    format!("  (today's goal: {:.1}h)", goal_today),
                    Style::default().fg(pending_fg),
                ));
            }
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
