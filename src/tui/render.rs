use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::tui::app::{App, Mode, Tab};
use crate::tui::widgets::{
    calendar::render_calendar, color::parse_color, confirm_delete::render_confirm_delete,
    day_list::render_day_list, form::render_habit_form, habit_list::render_habit_list,
    help::render_help, stats::render_stats, status_bar::render_status_bar, tabs::render_tabs,
    week_grid::render_week_grid,
};
use crate::tui::Layout;
use crate::utils::format_key_binding_for_display;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    // Outer border with the app title centered in the top line
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("HBT")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    render_tabs(f, layout.tabs_area, app.ui.current_tab, &app.config);

    match app.ui.current_tab {
        Tab::Week => render_week_grid(f, layout.main_area, app),
        Tab::Day => render_day_list(f, layout.main_area, app),
        Tab::Calendar => render_calendar(f, layout.main_area, app),
        Tab::Stats => render_stats(f, layout.main_area, app),
        Tab::Habits => render_habit_list(f, layout.main_area, app),
    }

    // Overlays on top of the normal content
    if app.ui.mode == Mode::Form {
        if let Some(ref form) = app.form {
            render_habit_form(f, f.area(), form, &app.config);
        }
    }

    if app.ui.mode == Mode::Help {
        render_help(f, f.area(), &app.config);
    }

    if let Some(ref habit) = app.delete_confirmation {
        render_confirm_delete(f, f.area(), habit, app.delete_modal_selection, &app.config);
    }

    let key_hints = get_key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status.message.as_ref(),
        &key_hints,
        &app.config,
    );
}

fn get_key_hints(app: &App) -> Vec<String> {
    let bindings = &app.config.key_bindings;
    match app.ui.mode {
        Mode::Help => {
            vec![format!(
                "Esc or {}: Exit help",
                format_key_binding_for_display(&bindings.help)
            )]
        }
        Mode::Sort => {
            vec![
                "↑/↓: Move habit".to_string(),
                format!(
                    "{}/{}: Select",
                    format_key_binding_for_display(&bindings.list_up),
                    format_key_binding_for_display(&bindings.list_down)
                ),
                "Enter: Confirm order".to_string(),
                "Esc: Discard".to_string(),
            ]
        }
        Mode::Form => {
            vec![
                "Tab: Next field".to_string(),
                "Space: Toggle".to_string(),
                format!("{}: Save", format_key_binding_for_display(&bindings.save)),
                "Esc: Cancel".to_string(),
            ]
        }
        Mode::ConfirmDelete => {
            vec![
                "↑/↓: Navigate".to_string(),
                "Enter: Confirm".to_string(),
                "Esc: Cancel".to_string(),
            ]
        }
        Mode::View => {
            let mut hints = vec![
                format!("{}: Quit", format_key_binding_for_display(&bindings.quit)),
                format!("{}: New", format_key_binding_for_display(&bindings.new)),
                format!(
                    "{}: Toggle",
                    format_key_binding_for_display(&bindings.toggle)
                ),
            ];
            if app.ui.current_tab == Tab::Week {
                hints.push(format!(
                    "{}/{}: Hours",
                    format_key_binding_for_display(&bindings.increment),
                    format_key_binding_for_display(&bindings.decrement)
                ));
                hints.push(format!(
                    "{}: Reorder",
                    format_key_binding_for_display(&bindings.sort_mode)
                ));
                if app.has_pending() {
                    hints.push(format!(
                        "{}: Save edits",
                        format_key_binding_for_display(&bindings.save)
                    ));
                }
            }
            hints.push(format!(
                "{}: Today",
                format_key_binding_for_display(&bindings.today)
            ));
            hints.push(format!(
                "{}/{}: Tabs",
                format_key_binding_for_display(&bindings.tab_left),
                format_key_binding_for_display(&bindings.tab_right)
            ));
            hints.push(format!(
                "{}: Help",
                format_key_binding_for_display(&bindings.help)
            ));
            hints
        }
    }
}
