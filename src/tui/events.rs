use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size as terminal_size, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::Duration;

use crate::engine::MoveDirection;
use crate::tui::app::{App, FormField, Mode, Tab};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::utils::{has_primary_modifier, parse_key_binding};

/// Guard that ensures terminal state is restored even on panic.
/// If the terminal is left in raw mode or the alternate screen, the user's
/// shell becomes unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Manually restore terminal state (called on normal exit)
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Ignore errors in drop - we're already in a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

/// Whether a key event matches a configured binding string
fn matches_binding(key: &KeyEvent, binding: &str) -> bool {
    let Ok(parsed) = parse_key_binding(binding) else {
        return false;
    };
    if key.code != parsed.key_code {
        return false;
    }
    parsed.requires_ctrl == has_primary_modifier(key.modifiers)
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering alternate screen so the error
    // message lands in the normal terminal
    let (width, height) = terminal_size()?;
    let min_width_with_border = Layout::MIN_WIDTH + 2;
    let min_height_with_border = Layout::MIN_HEIGHT + 2;

    if width < min_width_with_border || height < min_height_with_border {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width_with_border, min_height_with_border
        )));
    }

    // Setup terminal with guard to ensure restoration on panic
    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.check_status_message_timeout();

        terminal.draw(|f| {
            let layout = Layout::calculate(f.area());
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        // Poll with a timeout so status messages expire without input
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(&mut app, &key)? {
                    break;
                }
            }
            _ => {}
        }
    }

    guard.restore()?;
    Ok(())
}

/// Dispatch one key press; returns true to quit
fn handle_key(app: &mut App, key: &KeyEvent) -> Result<bool, TuiError> {
    match app.ui.mode {
        Mode::Help => handle_help_key(app, key),
        Mode::ConfirmDelete => handle_confirm_delete_key(app, key)?,
        Mode::Form => handle_form_key(app, key)?,
        Mode::Sort => handle_sort_key(app, key),
        Mode::View => return handle_view_key(app, key),
    }
    Ok(false)
}

fn handle_view_key(app: &mut App, key: &KeyEvent) -> Result<bool, TuiError> {
    let bindings = app.config.key_bindings.clone();

    if matches_binding(key, &bindings.quit) {
        if app.has_pending() {
            app.set_status("Unsaved hour edits (Ctrl+s to save, Esc to discard)");
            return Ok(false);
        }
        return Ok(true);
    }

    if matches_binding(key, &bindings.help) {
        app.ui.mode = Mode::Help;
    } else if matches_binding(key, &bindings.new) {
        app.open_create_form();
    } else if matches_binding(key, &bindings.edit) {
        app.open_edit_form();
    } else if matches_binding(key, &bindings.delete) {
        app.request_delete();
    } else if matches_binding(key, &bindings.select) || matches_binding(key, &bindings.toggle) {
        app.toggle_selected()?;
    } else if matches_binding(key, &bindings.increment) {
        app.adjust_hours(0.5)?;
    } else if matches_binding(key, &bindings.decrement) {
        app.adjust_hours(-0.5)?;
    } else if matches_binding(key, &bindings.save) {
        app.save_pending()?;
    } else if matches_binding(key, &bindings.sort_mode) {
        app.enter_sort_mode();
    } else if matches_binding(key, &bindings.today) {
        app.goto_today();
    } else if matches_binding(key, &bindings.list_up) || key.code == KeyCode::Up {
        app.move_selection(-1);
    } else if matches_binding(key, &bindings.list_down) || key.code == KeyCode::Down {
        app.move_selection(1);
    } else if matches_binding(key, &bindings.day_left) {
        match app.ui.current_tab {
            Tab::Week => app.move_column(false),
            _ => app.shift_date(false),
        }
    } else if matches_binding(key, &bindings.day_right) {
        match app.ui.current_tab {
            Tab::Week => app.move_column(true),
            _ => app.shift_date(true),
        }
    } else if key.code == KeyCode::PageUp {
        app.shift_date(false);
    } else if key.code == KeyCode::PageDown {
        app.shift_date(true);
    } else if matches_binding(key, &bindings.tab_left) {
        app.prev_tab();
    } else if matches_binding(key, &bindings.tab_right) {
        app.next_tab();
    } else if matches_binding(key, &bindings.tab_1) {
        app.set_tab(Tab::Week);
    } else if matches_binding(key, &bindings.tab_2) {
        app.set_tab(Tab::Day);
    } else if matches_binding(key, &bindings.tab_3) {
        app.set_tab(Tab::Calendar);
    } else if matches_binding(key, &bindings.tab_4) {
        app.set_tab(Tab::Stats);
    } else if matches_binding(key, &bindings.tab_5) {
        app.set_tab(Tab::Habits);
    } else if key.code == KeyCode::Esc {
        if app.has_pending() {
            app.discard_pending();
        } else {
            app.status.message = None;
        }
    }

    Ok(false)
}

fn handle_sort_key(app: &mut App, key: &KeyEvent) {
    let bindings = app.config.key_bindings.clone();

    if key.code == KeyCode::Up {
        app.move_selected_habit(MoveDirection::Up);
    } else if key.code == KeyCode::Down {
        app.move_selected_habit(MoveDirection::Down);
    } else if matches_binding(key, &bindings.list_up) {
        app.move_selection(-1);
    } else if matches_binding(key, &bindings.list_down) {
        app.move_selection(1);
    } else if matches_binding(key, &bindings.select) {
        app.commit_sort();
    } else if key.code == KeyCode::Esc {
        app.discard_sort();
    } else if matches_binding(key, &bindings.quit) {
        app.set_status("Finish reordering first (Enter to confirm, Esc to discard)");
    }
}

fn handle_confirm_delete_key(app: &mut App, key: &KeyEvent) -> Result<(), TuiError> {
    match key.code {
        KeyCode::Up | KeyCode::Down => {
            app.delete_modal_selection = 1 - app.delete_modal_selection;
        }
        KeyCode::Enter => {
            app.confirm_delete_choice()?;
        }
        KeyCode::Esc => {
            app.cancel_delete();
        }
        _ => {}
    }
    Ok(())
}

fn handle_help_key(app: &mut App, key: &KeyEvent) {
    let help = app.config.key_bindings.help.clone();
    if key.code == KeyCode::Esc
        || key.code == KeyCode::Char('q')
        || matches_binding(key, &help)
    {
        app.ui.mode = Mode::View;
    }
}

fn handle_form_key(app: &mut App, key: &KeyEvent) -> Result<(), TuiError> {
    let save = app.config.key_bindings.save.clone();

    if key.code == KeyCode::Esc {
        app.cancel_form();
        return Ok(());
    }
    if matches_binding(key, &save) {
        app.submit_form()?;
        return Ok(());
    }

    let Some(form) = app.form.as_mut() else {
        return Ok(());
    };

    match key.code {
        KeyCode::Tab | KeyCode::Enter => form.next_field(),
        KeyCode::BackTab => form.prev_field(),
        KeyCode::Backspace => match form.current_field {
            FormField::Name => {
                form.name.pop();
            }
            FormField::GoalWorkdays => {
                form.goal_workdays.pop();
            }
            FormField::GoalWeekends => {
                form.goal_weekends.pop();
            }
            _ => {}
        },
        KeyCode::Left => match form.current_field {
            FormField::Kind => {
                form.kind_index =
                    (form.kind_index + crate::models::HabitKind::ALL.len() - 1)
                        % crate::models::HabitKind::ALL.len();
            }
            FormField::Days => {
                form.day_cursor = (form.day_cursor + 6) % 7;
            }
            _ => {}
        },
        KeyCode::Right => match form.current_field {
            FormField::Kind => {
                form.kind_index = (form.kind_index + 1) % crate::models::HabitKind::ALL.len();
            }
            FormField::Days => {
                form.day_cursor = (form.day_cursor + 1) % 7;
            }
            _ => {}
        },
        KeyCode::Char(' ') => match form.current_field {
            FormField::Kind => {
                form.kind_index = (form.kind_index + 1) % crate::models::HabitKind::ALL.len();
            }
            FormField::Days => {
                form.days[form.day_cursor] = !form.days[form.day_cursor];
            }
            FormField::Name => form.name.push(' '),
            _ => {}
        },
        KeyCode::Char(c) if !has_primary_modifier(key.modifiers) => match form.current_field {
            FormField::Name => form.name.push(c),
            FormField::GoalWorkdays => {
                if c.is_ascii_digit() || c == '.' {
                    form.goal_workdays.push(c);
                }
            }
            FormField::GoalWeekends => {
                if c.is_ascii_digit() || c == '.' {
                    form.goal_weekends.push(c);
                }
            }
            _ => {}
        },
        _ => {}
    }

    Ok(())
}
