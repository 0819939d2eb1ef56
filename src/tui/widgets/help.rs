use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::widgets::color::parse_color;
use crate::utils::format_key_binding_for_display;
use crate::Config;

/// Help overlay listing the configured key bindings.
pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    let popup_area = popup_area(area, 60, 80);
    f.render_widget(Clear, popup_area);

    let bindings = &config.key_bindings;
    let entries: Vec<(String, &str)> = vec![
        (bindings.quit.clone(), "Quit"),
        (bindings.new.clone(), "New habit"),
        (bindings.edit.clone(), "Edit habit"),
        (bindings.delete.clone(), "Delete habit"),
        (
            format!("{} / {}", bindings.select, bindings.toggle),
            "Toggle / +1 hour",
        ),
        (
            format!("{} / {}", bindings.increment, bindings.decrement),
            "Adjust hours by 0.5 (staged on Week tab)",
        ),
        (bindings.save.clone(), "Save staged hour edits"),
        (bindings.sort_mode.clone(), "Reorder habits (Week tab)"),
        (
            format!("{} / {}", bindings.list_up, bindings.list_down),
            "Select habit",
        ),
        (
            format!("{} / {}", bindings.day_left, bindings.day_right),
            "Move day cursor / change day",
        ),
        ("PageUp / PageDown".to_string(), "Previous / next week"),
        (bindings.today.clone(), "Jump to today"),
        (
            format!("{} / {}", bindings.tab_left, bindings.tab_right),
            "Switch tab",
        ),
        ("1-5".to_string(), "Jump to tab"),
        (bindings.help.clone(), "This help"),
    ];

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Key Bindings",
            Style::default()
                .fg(fg_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (key, description) in entries {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>18}  ", format_key_binding_for_display(&key)),
                Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(description, Style::default().fg(fg_color)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Esc to close",
        Style::default().fg(fg_color),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color));

    f.render_widget(paragraph, popup_area);
}

/// Centered rect taking a percentage of the available area
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
