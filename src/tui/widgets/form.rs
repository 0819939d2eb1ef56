use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::models::HabitKind;
use crate::tui::app::{FormField, HabitForm};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::Config;

const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Create/edit habit form rendered as a centered modal.
pub fn render_habit_form(f: &mut Frame, area: Rect, form: &HabitForm, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg = parse_color(&active_theme.fg);
    let bg = parse_color(&active_theme.bg);
    let pending_fg = parse_color(&active_theme.pending_fg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let popup_area = popup_area(area, 60, 60);
    f.render_widget(Clear, popup_area);

    let title = if form.editing_id.is_some() {
        "Edit Habit"
    } else {
        "New Habit"
    };

    let field_style = |field: FormField| {
        if form.current_field == field {
            Style::default().fg(highlight_fg).bg(highlight_bg)
        } else {
            Style::default().fg(fg).bg(bg)
        }
    };
    let label_style = Style::default().fg(pending_fg);

    let mut lines: Vec<Line> = Vec::new();

    let name_display = if form.current_field == FormField::Name {
        format!("{}_", form.name)
    } else {
        form.name.clone()
    };
    lines.push(Line::from(vec![
        Span::styled("Name: ", label_style),
        Span::styled(name_display, field_style(FormField::Name)),
    ]));
    lines.push(Line::from(""));

    if form.editing_id.is_none() {
        lines.push(Line::from(vec![
            Span::styled("Kind: ", label_style),
            Span::styled(
                format!("< {} >", form.kind().label()),
                field_style(FormField::Kind),
            ),
        ]));
        lines.push(Line::from(""));
    }

    if form.kind() == HabitKind::Hours {
        let workdays_display = if form.current_field == FormField::GoalWorkdays {
            format!("{}_", form.goal_workdays)
        } else {
            form.goal_workdays.clone()
        };
        let weekends_display = if form.current_field == FormField::GoalWeekends {
            format!("{}_", form.goal_weekends)
        } else {
            form.goal_weekends.clone()
        };
        lines.push(Line::from(vec![
            Span::styled("Workday goal (Mon-Fri, hours): ", label_style),
            Span::styled(workdays_display, field_style(FormField::GoalWorkdays)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Weekend goal (Sat-Sun, hours): ", label_style),
            Span::styled(weekends_display, field_style(FormField::GoalWeekends)),
        ]));
        if form.editing_id.is_some() {
            lines.push(Line::from(Span::styled(
                "Goal changes apply from today; past dates keep their goals.",
                label_style,
            )));
        }
        lines.push(Line::from(""));
    }

    let mut day_spans: Vec<Span> = vec![Span::styled("Days: ", label_style)];
    for (index, label) in DAY_LABELS.iter().enumerate() {
        let toggled = form.days[index];
        let mut style = if toggled {
            Style::default().fg(highlight_fg).bg(highlight_bg)
        } else {
            Style::default().fg(pending_fg)
        };
        if form.current_field == FormField::Days && form.day_cursor == index {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        day_spans.push(Span::styled(format!(" {} ", label), style));
    }
    lines.push(Line::from(day_spans));
    lines.push(Line::from(Span::styled(
        "No day selected means the habit applies every day.",
        label_style,
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab: next field • Space: toggle • Ctrl+s: save • Esc: cancel",
        label_style,
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg).bg(bg)),
        )
        .style(Style::default().fg(fg).bg(bg));

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
