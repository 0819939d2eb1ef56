use std::collections::HashMap;
use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::database::DatabaseError;
use crate::engine::{self, MoveDirection, OrderingSession};
use crate::engine::summary::PendingValues;
use crate::models::{Habit, HabitKind, HabitValue};
use crate::utils;
use crate::{Config, Database};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Week,
    Day,
    Calendar,
    Stats,
    Habits,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Week, Tab::Day, Tab::Calendar, Tab::Stats, Tab::Habits];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Week => "Week",
            Tab::Day => "Day",
            Tab::Calendar => "Calendar",
            Tab::Stats => "Stats",
            Tab::Habits => "Habits",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    /// Staged reordering of habits within their kind group (Week tab).
    Sort,
    /// Create/edit habit form.
    Form,
    ConfirmDelete,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Kind,
    GoalWorkdays,
    GoalWeekends,
    Days,
}

/// Create/edit form state. `kind` is locked once a habit exists (there is no
/// migration path between kinds), and the goal fields only apply to hours
/// habits.
#[derive(Debug, Clone)]
pub struct HabitForm {
    pub current_field: FormField,
    pub name: String,
    pub kind_index: usize,
    pub goal_workdays: String,
    pub goal_weekends: String,
    /// Day toggles, 0 = Sunday .. 6 = Saturday. None selected means every day.
    pub days: [bool; 7],
    pub day_cursor: usize,
    pub editing_id: Option<i64>,
}

impl HabitForm {
    pub fn new() -> Self {
        Self {
            current_field: FormField::Name,
            name: String::new(),
            kind_index: 0,
            goal_workdays: "8".to_string(),
            goal_weekends: "2".to_string(),
            days: [false; 7],
            day_cursor: 1, // Monday
            editing_id: None,
        }
    }

    pub fn from_habit(habit: &Habit) -> Self {
        let mut days = [false; 7];
        for day in &habit.scheduled_days {
            if (*day as usize) < 7 {
                days[*day as usize] = true;
            }
        }
        Self {
            current_field: FormField::Name,
            name: habit.name.clone(),
            kind_index: HabitKind::ALL
                .iter()
                .position(|k| *k == habit.kind)
                .unwrap_or(0),
            goal_workdays: habit
                .goal_workdays
                .or(habit.goal)
                .map(|g| format_goal(g))
                .unwrap_or_else(|| "8".to_string()),
            goal_weekends: habit
                .goal_weekends
                .or(habit.goal)
                .map(|g| format_goal(g))
                .unwrap_or_else(|| "2".to_string()),
            days,
            day_cursor: 1,
            editing_id: habit.id,
        }
    }

    pub fn kind(&self) -> HabitKind {
        HabitKind::ALL[self.kind_index % HabitKind::ALL.len()]
    }

    pub fn scheduled_days(&self) -> Vec<u8> {
        (0..7u8).filter(|d| self.days[*d as usize]).collect()
    }

    fn field_sequence(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::Name];
        if self.editing_id.is_none() {
            fields.push(FormField::Kind);
        }
        if self.kind() == HabitKind::Hours {
            fields.push(FormField::GoalWorkdays);
            fields.push(FormField::GoalWeekends);
        }
        fields.push(FormField::Days);
        fields
    }

    pub fn next_field(&mut self) {
        let fields = self.field_sequence();
        let index = fields
            .iter()
            .position(|f| *f == self.current_field)
            .unwrap_or(0);
        self.current_field = fields[(index + 1) % fields.len()];
    }

    pub fn prev_field(&mut self) {
        let fields = self.field_sequence();
        let index = fields
            .iter()
            .position(|f| *f == self.current_field)
            .unwrap_or(0);
        self.current_field = fields[(index + fields.len() - 1) % fields.len()];
    }
}

fn format_goal(goal: f64) -> String {
    if goal.fract() == 0.0 {
        format!("{}", goal as i64)
    } else {
        format!("{}", goal)
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub current_tab: Tab,
    pub mode: Mode,
    /// Index into the current tab's habit rows (headers excluded).
    pub selected_row: usize,
    /// Day column on the Week tab, 0 = Monday .. 6 = Sunday.
    pub selected_col: usize,
    pub list_state: ListState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            current_tab: Tab::Week,
            mode: Mode::View,
            selected_row: 0,
            selected_col: 0,
            list_state: ListState::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App {
    // Core infrastructure
    pub config: Config,
    pub database: Database,
    pub owner: String,

    // Data
    pub habits: Vec<Habit>,
    pub today: String,
    pub selected_date: String,

    // Grouped state
    pub ui: UiState,
    pub ordering: OrderingSession,
    /// Unsaved hours edits on the Week tab: habit id -> date -> value.
    pub pending: HashMap<i64, PendingValues>,
    pub form: Option<HabitForm>,
    pub delete_confirmation: Option<Habit>,
    pub delete_modal_selection: usize,
    pub status: StatusState,
}

impl App {
    pub fn new(config: Config, database: Database, owner: String) -> Result<Self, DatabaseError> {
        let today = utils::get_current_date_string();

        let mut app = Self {
            config,
            database,
            owner,
            habits: Vec::new(),
            today: today.clone(),
            selected_date: today.clone(),
            ui: UiState::default(),
            ordering: OrderingSession::new(),
            pending: HashMap::new(),
            form: None,
            delete_confirmation: None,
            delete_modal_selection: 0,
            status: StatusState::default(),
        };

        // Start the week cursor on today's column
        if let Ok(date) = utils::parse_date(&today) {
            app.ui.selected_col = chrono::Datelike::weekday(&date).num_days_from_monday() as usize;
        }

        app.load_data()?;
        Ok(app)
    }

    pub fn load_data(&mut self) -> Result<(), DatabaseError> {
        self.habits = self.database.get_habits_for_owner(&self.owner)?;
        self.migrate_missing_orders()?;
        self.compact_goal_histories()?;
        self.adjust_selection();
        Ok(())
    }

    /// Assign per-kind orders to habits that don't have one (migration).
    /// New orders continue after the current per-kind maximum, oldest habit
    /// first, and are persisted once.
    fn migrate_missing_orders(&mut self) -> Result<(), DatabaseError> {
        let mut assignments: Vec<(i64, i64)> = Vec::new();
        for kind in HabitKind::ALL {
            let mut next = self
                .habits
                .iter()
                .filter(|h| h.kind == kind)
                .filter_map(|h| h.order)
                .max()
                .map(|max| max + 1)
                .unwrap_or(0);
            let mut missing: Vec<(i64, String)> = self
                .habits
                .iter()
                .filter(|h| h.kind == kind && h.order.is_none())
                .filter_map(|h| h.id.map(|id| (id, h.created_at.clone())))
                .collect();
            missing.sort_by(|a, b| a.1.cmp(&b.1));
            for (id, _) in missing {
                assignments.push((id, next));
                next += 1;
            }
        }

        for (id, order) in &assignments {
            self.database.update_habit_order(*id, *order)?;
            if let Some(habit) = self.habits.iter_mut().find(|h| h.id == Some(*id)) {
                habit.order = Some(*order);
            }
        }
        Ok(())
    }

    /// Deduplicate goal timelines lazily on load, persisting only when the
    /// compaction actually removed entries.
    fn compact_goal_histories(&mut self) -> Result<(), DatabaseError> {
        for habit in &mut self.habits {
            let compacted = engine::compact_goal_history(&habit.goal_history);
            if compacted.len() < habit.goal_history.len() {
                if let Some(id) = habit.id {
                    self.database.replace_goal_history(id, &compacted)?;
                }
                habit.goal_history = compacted;
            }
        }
        Ok(())
    }

    /// The seven dates (Monday first) of the week containing the selected date
    pub fn week(&self) -> Vec<String> {
        utils::parse_date(&self.selected_date)
            .map(utils::week_dates)
            .unwrap_or_default()
    }

    /// Habit rows of the Week tab: per-kind manual order, habits active at
    /// least one day of the week
    pub fn week_rows(&self) -> Vec<Habit> {
        let week = self.week();
        let mut rows = Vec::new();
        for kind in HabitKind::ALL {
            for habit in self.ordering.ordered_group(&self.habits, kind) {
                if engine::applies_in_week(habit, &week) {
                    rows.push(habit.clone());
                }
            }
        }
        rows
    }

    /// Habit rows of the Day tab: habits scheduled on the selected date
    pub fn day_rows(&self) -> Vec<Habit> {
        let mut rows = Vec::new();
        for kind in HabitKind::ALL {
            for habit in self.ordering.ordered_group(&self.habits, kind) {
                if engine::applies_on(habit, &self.selected_date) {
                    rows.push(habit.clone());
                }
            }
        }
        rows
    }

    /// All habits in display order (Stats and Habits tabs)
    pub fn all_rows(&self) -> Vec<Habit> {
        let mut rows = Vec::new();
        for kind in HabitKind::ALL {
            for habit in self.ordering.ordered_group(&self.habits, kind) {
                rows.push(habit.clone());
            }
        }
        rows
    }

    pub fn current_rows(&self) -> Vec<Habit> {
        match self.ui.current_tab {
            Tab::Week => self.week_rows(),
            Tab::Day => self.day_rows(),
            Tab::Calendar => Vec::new(),
            Tab::Stats | Tab::Habits => self.all_rows(),
        }
    }

    pub fn selected_habit(&self) -> Option<Habit> {
        self.current_rows().get(self.ui.selected_row).cloned()
    }

    pub fn adjust_selection(&mut self) {
        let len = self.current_rows().len();
        if len == 0 {
            self.ui.selected_row = 0;
            self.ui.list_state.select(None);
        } else {
            if self.ui.selected_row >= len {
                self.ui.selected_row = len - 1;
            }
            self.ui.list_state.select(Some(self.ui.selected_row));
        }
        if self.ui.selected_col > 6 {
            self.ui.selected_col = 6;
        }
    }

    pub fn move_selection(&mut self, delta: i64) {
        let len = self.current_rows().len();
        if len == 0 {
            return;
        }
        let current = self.ui.selected_row as i64;
        let next = (current + delta).clamp(0, len as i64 - 1);
        self.ui.selected_row = next as usize;
        self.ui.list_state.select(Some(self.ui.selected_row));
    }

    /// Switch tab, refusing while a reorder session or unsaved hours edits
    /// are open (they must be confirmed or discarded first)
    pub fn set_tab(&mut self, tab: Tab) {
        if self.ordering.is_staging() {
            self.set_status("Finish reordering first (Enter to confirm, Esc to discard)");
            return;
        }
        if self.has_pending() {
            self.set_status("Unsaved hour edits (Ctrl+s to save, Esc to discard)");
            return;
        }
        if self.ui.current_tab != tab {
            self.ui.current_tab = tab;
            self.ui.selected_row = 0;
            self.adjust_selection();
        }
    }

    pub fn next_tab(&mut self) {
        let index = (self.ui.current_tab.index() + 1) % Tab::ALL.len();
        self.set_tab(Tab::ALL[index]);
    }

    pub fn prev_tab(&mut self) {
        let index = (self.ui.current_tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len();
        self.set_tab(Tab::ALL[index]);
    }

    /// Move the selected date: one day on the Day tab, one week elsewhere
    pub fn shift_date(&mut self, forward: bool) {
        let step = if self.ui.current_tab == Tab::Day { 1 } else { 7 };
        let Ok(date) = utils::parse_date(&self.selected_date) else {
            return;
        };
        let shifted = if forward {
            date.checked_add_days(chrono::Days::new(step))
        } else {
            date.checked_sub_days(chrono::Days::new(step))
        };
        if let Some(shifted) = shifted {
            self.selected_date = utils::date_string(shifted);
            self.adjust_selection();
        }
    }

    pub fn goto_today(&mut self) {
        self.selected_date = self.today.clone();
        if let Ok(date) = utils::parse_date(&self.today) {
            self.ui.selected_col = chrono::Datelike::weekday(&date).num_days_from_monday() as usize;
        }
        self.adjust_selection();
    }

    pub fn move_column(&mut self, forward: bool) {
        if forward {
            if self.ui.selected_col < 6 {
                self.ui.selected_col += 1;
            }
        } else if self.ui.selected_col > 0 {
            self.ui.selected_col -= 1;
        }
    }

    /// The date under the cursor: the selected column on the Week tab, the
    /// selected date elsewhere
    pub fn cursor_date(&self) -> Option<String> {
        match self.ui.current_tab {
            Tab::Week => self.week().get(self.ui.selected_col).cloned(),
            _ => Some(self.selected_date.clone()),
        }
    }

    /// Toggle the cell under the cursor. Binary habits flip and write
    /// immediately; hours habits route to a +1 adjustment.
    pub fn toggle_selected(&mut self) -> Result<(), DatabaseError> {
        let Some(habit) = self.selected_habit() else {
            return Ok(());
        };
        let Some(date) = self.cursor_date() else {
            return Ok(());
        };
        if date.as_str() > self.today.as_str() {
            self.set_status("Future dates cannot be edited");
            return Ok(());
        }
        if !engine::applies_on(&habit, &date) {
            self.set_status("Habit is not scheduled on this day");
            return Ok(());
        }

        match habit.kind {
            HabitKind::Todo | HabitKind::Todont => {
                let Some(id) = habit.id else { return Ok(()) };
                let current = habit
                    .history
                    .get(&date)
                    .map(|v| v.as_done())
                    .unwrap_or(false);
                self.database
                    .set_history_value(id, &date, HabitValue::Done(!current))?;
                self.load_data()?;
            }
            HabitKind::Hours => {
                self.adjust_hours(1.0)?;
            }
        }
        Ok(())
    }

    /// Adjust an hours cell. On the Week tab the change is staged in the
    /// pending overlay (saved as a batch with Ctrl+s); on the Day tab it is
    /// written immediately.
    pub fn adjust_hours(&mut self, delta: f64) -> Result<(), DatabaseError> {
        let Some(habit) = self.selected_habit() else {
            return Ok(());
        };
        if habit.kind != HabitKind::Hours {
            return Ok(());
        }
        let Some(date) = self.cursor_date() else {
            return Ok(());
        };
        if date.as_str() > self.today.as_str() {
            self.set_status("Future dates cannot be edited");
            return Ok(());
        }
        if !engine::applies_on(&habit, &date) {
            self.set_status("Habit is not scheduled on this day");
            return Ok(());
        }
        let Some(id) = habit.id else { return Ok(()) };

        let recorded = habit
            .history
            .get(&date)
            .map(|v| v.as_hours())
            .unwrap_or(0.0);

        if self.ui.current_tab == Tab::Week {
            let staged = self
                .pending
                .get(&id)
                .and_then(|p| p.get(&date))
                .copied()
                .unwrap_or(recorded);
            let new_value = (staged + delta).max(0.0);
            let entry = self.pending.entry(id).or_default();
            if new_value == recorded {
                // Back to the recorded value: no longer a pending change
                entry.remove(&date);
                if entry.is_empty() {
                    self.pending.remove(&id);
                }
            } else {
                entry.insert(date, new_value);
            }
        } else {
            let new_value = (recorded + delta).max(0.0);
            self.database
                .set_history_value(id, &date, HabitValue::Hours(new_value))?;
            self.load_data()?;
        }
        Ok(())
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_for(&self, habit_id: Option<i64>) -> Option<&PendingValues> {
        habit_id.and_then(|id| self.pending.get(&id))
    }

    /// Write every staged hours edit. Each write targets a single habit/date
    /// field, so partial failure leaves the rest of the overlay intact.
    pub fn save_pending(&mut self) -> Result<(), DatabaseError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let staged: Vec<(i64, String, f64)> = self
            .pending
            .iter()
            .flat_map(|(id, values)| {
                values
                    .iter()
                    .map(|(date, value)| (*id, date.clone(), *value))
            })
            .collect();
        let mut written = 0usize;
        for (id, date, value) in staged {
            self.database
                .set_history_value(id, &date, HabitValue::Hours(value))?;
            if let Some(entry) = self.pending.get_mut(&id) {
                entry.remove(&date);
                if entry.is_empty() {
                    self.pending.remove(&id);
                }
            }
            written += 1;
        }
        self.load_data()?;
        self.set_status(format!("Saved {} hour edit(s)", written));
        Ok(())
    }

    pub fn discard_pending(&mut self) {
        if !self.pending.is_empty() {
            self.pending.clear();
            self.set_status("Discarded unsaved hour edits");
        }
    }

    /// Enter the staged reorder mode (Week tab only)
    pub fn enter_sort_mode(&mut self) {
        if self.ui.current_tab != Tab::Week {
            self.set_status("Reordering is available on the Week tab");
            return;
        }
        if self.has_pending() {
            self.set_status("Save or discard hour edits before reordering");
            return;
        }
        self.ordering.enter_staging();
        self.ui.mode = Mode::Sort;
        self.set_status("Reorder: Up/Down to move, Enter to confirm, Esc to discard");
    }

    /// Move the selected habit within its kind group, keeping the cursor on it
    pub fn move_selected_habit(&mut self, direction: MoveDirection) {
        let Some(habit) = self.selected_habit() else {
            return;
        };
        let Some(id) = habit.id else { return };
        match self.ordering.move_adjacent(&self.habits, id, direction) {
            Ok(true) => {
                let rows = self.current_rows();
                if let Some(index) = rows.iter().position(|h| h.id == Some(id)) {
                    self.ui.selected_row = index;
                    self.ui.list_state.select(Some(index));
                }
            }
            Ok(false) => {}
            Err(e) => self.set_status(format!("Reorder error: {}", e)),
        }
    }

    /// Commit the staged order: bulk-write the changed pairs, then leave
    /// staging. A failed write keeps the session staged so Enter retries it.
    pub fn commit_sort(&mut self) {
        let plan = match self.ordering.commit_plan(&self.habits) {
            Ok(plan) => plan,
            Err(e) => {
                self.set_status(format!("Reorder error: {}", e));
                return;
            }
        };
        if plan.is_empty() {
            self.ordering.complete();
            self.ui.mode = Mode::View;
            self.set_status("Order unchanged");
            return;
        }
        match self.database.update_habit_orders(&plan) {
            Ok(()) => {
                self.ordering.complete();
                self.ui.mode = Mode::View;
                match self.load_data() {
                    Ok(()) => self.set_status("Order saved"),
                    Err(e) => self.set_status(format!("Order saved, reload failed: {}", e)),
                }
            }
            Err(e) => {
                // Overlay stays staged; the user can retry the commit
                self.set_status(format!("Failed to save order ({}), press Enter to retry", e));
            }
        }
    }

    pub fn discard_sort(&mut self) {
        self.ordering.discard();
        self.ui.mode = Mode::View;
        self.set_status("Order changes discarded");
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(HabitForm::new());
        self.ui.mode = Mode::Form;
    }

    pub fn open_edit_form(&mut self) {
        if let Some(habit) = self.selected_habit() {
            self.form = Some(HabitForm::from_habit(&habit));
            self.ui.mode = Mode::Form;
        }
    }

    /// Create or update a habit from the form
    pub fn submit_form(&mut self) -> Result<(), DatabaseError> {
        let Some(form) = self.form.clone() else {
            return Ok(());
        };
        let name = form.name.trim().to_string();
        if name.is_empty() {
            self.set_status("Habit name cannot be empty");
            return Ok(());
        }

        let goals = if form.kind() == HabitKind::Hours {
            let workdays: f64 = match form.goal_workdays.trim().parse() {
                Ok(v) if v >= 0.0 => v,
                _ => {
                    self.set_status("Workday goal must be a non-negative number");
                    return Ok(());
                }
            };
            let weekends: f64 = match form.goal_weekends.trim().parse() {
                Ok(v) if v >= 0.0 => v,
                _ => {
                    self.set_status("Weekend goal must be a non-negative number");
                    return Ok(());
                }
            };
            Some((workdays, weekends))
        } else {
            None
        };

        match form.editing_id {
            None => {
                let mut habit = Habit::new(self.owner.clone(), name, form.kind());
                habit.scheduled_days = form.scheduled_days();
                if let Some((workdays, weekends)) = goals {
                    habit.set_goals(workdays, weekends, &self.today);
                }
                let max_order = self
                    .database
                    .get_max_order_for_kind(&self.owner, form.kind())?;
                habit.order = Some(max_order + 1);
                self.database.insert_habit(&habit)?;
                self.set_status("Habit created");
            }
            Some(id) => {
                let Some(existing) = self.habits.iter().find(|h| h.id == Some(id)).cloned()
                else {
                    self.set_status("Habit no longer exists");
                    self.form = None;
                    self.ui.mode = Mode::View;
                    return Ok(());
                };
                let mut updated = existing.clone();
                updated.name = name;
                updated.scheduled_days = form.scheduled_days();
                self.database.update_habit(&updated)?;

                // Goal changes take effect from today; the past keeps its goals
                if let Some((workdays, weekends)) = goals {
                    let changed = existing.goal_workdays != Some(workdays)
                        || existing.goal_weekends != Some(weekends);
                    if changed {
                        self.database
                            .update_goals(id, workdays, weekends, &self.today)?;
                    }
                }
                self.set_status("Habit updated");
            }
        }

        self.form = None;
        self.ui.mode = Mode::View;
        self.load_data()?;
        Ok(())
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.ui.mode = Mode::View;
    }

    pub fn request_delete(&mut self) {
        if let Some(habit) = self.selected_habit() {
            self.delete_confirmation = Some(habit);
            self.delete_modal_selection = 0;
            self.ui.mode = Mode::ConfirmDelete;
        }
    }

    /// Execute the delete modal choice (0 = Delete, 1 = Cancel)
    pub fn confirm_delete_choice(&mut self) -> Result<(), DatabaseError> {
        let confirmation = self.delete_confirmation.take();
        self.ui.mode = Mode::View;
        if self.delete_modal_selection == 0 {
            if let Some(habit) = confirmation {
                if let Some(id) = habit.id {
                    self.database.delete_habit(id)?;
                    self.pending.remove(&id);
                    self.load_data()?;
                    self.set_status(format!("Deleted '{}'", habit.name));
                }
            }
        }
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirmation = None;
        self.ui.mode = Mode::View;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status.message = Some(message.into());
        self.status.message_time = Some(Instant::now());
    }

    /// Auto-clear transient status messages
    pub fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status.message_time {
            if time.elapsed() > Duration::from_secs(4) {
                self.status.message = None;
                self.status.message_time = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_field_sequence_skips_goals_for_binary_kinds() {
        let mut form = HabitForm::new();
        assert_eq!(form.kind(), HabitKind::Todo);
        form.current_field = FormField::Name;
        form.next_field();
        assert_eq!(form.current_field, FormField::Kind);
        form.next_field();
        assert_eq!(form.current_field, FormField::Days);
        form.next_field();
        assert_eq!(form.current_field, FormField::Name);
    }

    #[test]
    fn form_field_sequence_includes_goals_for_hours() {
        let mut form = HabitForm::new();
        form.kind_index = 2; // Hours
        form.current_field = FormField::Kind;
        form.next_field();
        assert_eq!(form.current_field, FormField::GoalWorkdays);
        form.next_field();
        assert_eq!(form.current_field, FormField::GoalWeekends);
        form.next_field();
        assert_eq!(form.current_field, FormField::Days);
    }

    #[test]
    fn editing_form_locks_the_kind_field() {
        let mut habit = Habit::new("ana".to_string(), "Gym".to_string(), HabitKind::Todo);
        habit.id = Some(7);
        let mut form = HabitForm::from_habit(&habit);
        form.next_field();
        // Kind is skipped entirely when editing
        assert_eq!(form.current_field, FormField::Days);
    }

    #[test]
    fn scheduled_days_collects_toggled_indices() {
        let mut form = HabitForm::new();
        form.days[1] = true;
        form.days[3] = true;
        assert_eq!(form.scheduled_days(), vec![1, 3]);
        form.days = [false; 7];
        assert!(form.scheduled_days().is_empty());
    }
}
