use hbt_tui::engine::{self, MoveDirection};
use hbt_tui::models::{Habit, HabitKind, HabitValue};
use hbt_tui::tui::App;
use hbt_tui::{Config, Database};
use tempfile::TempDir;

fn open_db(dir: &TempDir) -> Database {
    let path = dir.path().join("habits.db");
    Database::new(path.to_str().unwrap()).unwrap()
}

fn hours_habit(owner: &str, name: &str) -> Habit {
    let mut habit = Habit::new(owner.to_string(), name.to_string(), HabitKind::Hours);
    habit.created_at = "2024-01-01 09:00:00".to_string();
    habit.set_goals(8.0, 2.0, "2024-01-01");
    habit
}

#[test]
fn goal_edits_never_rewrite_history() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);

    let id = db.insert_habit(&hours_habit("ana", "Deep work")).unwrap();

    // Wednesday, 8 hours logged against the 8-hour workday goal.
    db.set_history_value(id, "2024-01-03", HabitValue::Hours(8.0))
        .unwrap();
    let habit = db.get_habit(id).unwrap();
    assert!(engine::is_completed(&habit, "2024-01-03"));

    // A week later the goal drops to 4 workday hours.
    db.update_goals(id, 4.0, 2.0, "2024-01-10").unwrap();
    let habit = db.get_habit(id).unwrap();

    // The past keeps its goal; the edit applies from its effective date on.
    assert_eq!(engine::resolve_goal(&habit, "2024-01-03"), 8.0);
    assert_eq!(engine::resolve_goal(&habit, "2024-01-10"), 4.0);
    assert!(engine::is_completed(&habit, "2024-01-03"));

    // 4 hours logged on the 10th now completes the day...
    db.set_history_value(id, "2024-01-10", HabitValue::Hours(4.0))
        .unwrap();
    let habit = db.get_habit(id).unwrap();
    assert!(engine::is_completed(&habit, "2024-01-10"));
    // ...while the same value would not have met the original goal.
    assert!(engine::resolve_goal(&habit, "2024-01-09") > 4.0);
}

#[test]
fn unordered_habits_get_dense_orders_on_load() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);

    // Habits stored without any order, as an old database would have them.
    for (name, created) in [
        ("Gym", "2023-01-02 08:00:00"),
        ("Stretch", "2023-01-01 08:00:00"),
        ("Read", "2023-01-03 08:00:00"),
    ] {
        let mut habit = Habit::new("ana".to_string(), name.to_string(), HabitKind::Todo);
        habit.created_at = created.to_string();
        habit.updated_at = created.to_string();
        db.insert_habit(&habit).unwrap();
    }

    let app = App::new(Config::default(), db, "ana".to_string()).unwrap();

    // Oldest first, dense from zero, persisted.
    let ordered: Vec<(String, Option<i64>)> = app
        .all_rows()
        .iter()
        .map(|h| (h.name.clone(), h.order))
        .collect();
    assert_eq!(
        ordered,
        [
            ("Stretch".to_string(), Some(0)),
            ("Gym".to_string(), Some(1)),
            ("Read".to_string(), Some(2)),
        ]
    );
    let reloaded = app.database.get_habits_for_owner("ana").unwrap();
    assert!(reloaded.iter().all(|h| h.order.is_some()));
}

#[test]
fn duplicate_goal_entries_are_compacted_on_load() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);

    let mut habit = hours_habit("ana", "Deep work");
    // Two same-day edits: only the later one should survive the load.
    habit.set_goals(6.0, 2.0, "2024-01-05");
    habit.set_goals(5.0, 2.0, "2024-01-05");
    let id = db.insert_habit(&habit).unwrap();

    let app = App::new(Config::default(), db, "ana".to_string()).unwrap();

    let loaded = app.habits.iter().find(|h| h.id == Some(id)).unwrap();
    assert_eq!(loaded.goal_history.len(), 2);
    assert_eq!(engine::resolve_goal(loaded, "2024-01-08"), 5.0);

    // The compacted timeline was persisted, not just held in memory.
    let persisted = app.database.get_habit(id).unwrap();
    assert_eq!(persisted.goal_history.len(), 2);
}

#[test]
fn staged_reorder_commits_as_one_batch() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);

    for (name, order) in [("A", 0), ("B", 1), ("C", 2)] {
        let mut habit = Habit::new("ana".to_string(), name.to_string(), HabitKind::Todo);
        habit.order = Some(order);
        db.insert_habit(&habit).unwrap();
    }

    let mut app = App::new(Config::default(), db, "ana".to_string()).unwrap();

    app.enter_sort_mode();
    assert!(app.ordering.is_staging());

    // Move C up twice: C A B.
    app.ui.selected_row = 2;
    app.move_selected_habit(MoveDirection::Up);
    app.move_selected_habit(MoveDirection::Up);
    app.commit_sort();
    assert!(!app.ordering.is_staging());

    let names: Vec<String> = app.all_rows().iter().map(|h| h.name.clone()).collect();
    assert_eq!(names, ["C", "A", "B"]);

    // Persisted orders are a dense permutation of 0..N-1.
    let mut orders: Vec<i64> = app
        .database
        .get_habits_for_owner("ana")
        .unwrap()
        .iter()
        .filter_map(|h| h.order)
        .collect();
    orders.sort();
    assert_eq!(orders, [0, 1, 2]);
}

#[test]
fn discarded_reorder_leaves_the_store_untouched() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);

    for (name, order) in [("A", 0), ("B", 1)] {
        let mut habit = Habit::new("ana".to_string(), name.to_string(), HabitKind::Todo);
        habit.order = Some(order);
        db.insert_habit(&habit).unwrap();
    }

    let mut app = App::new(Config::default(), db, "ana".to_string()).unwrap();
    app.enter_sort_mode();
    app.ui.selected_row = 1;
    app.move_selected_habit(MoveDirection::Up);
    app.discard_sort();

    let names: Vec<String> = app.all_rows().iter().map(|h| h.name.clone()).collect();
    assert_eq!(names, ["A", "B"]);
    let habits = app.database.get_habits_for_owner("ana").unwrap();
    assert_eq!(habits.iter().find(|h| h.name == "A").unwrap().order, Some(0));
    assert_eq!(habits.iter().find(|h| h.name == "B").unwrap().order, Some(1));
}

#[test]
fn pending_hour_edits_stage_then_save() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let id = db.insert_habit(&hours_habit("ana", "Deep work")).unwrap();

    let mut app = App::new(Config::default(), db, "ana".to_string()).unwrap();
    app.ui.selected_row = 0;
    // Stage +1h on the cursor date (today's column on the Week tab).
    app.adjust_hours(0.5).unwrap();
    app.adjust_hours(0.5).unwrap();
    assert!(app.has_pending());

    // Nothing written yet.
    let stored = app.database.get_habit(id).unwrap();
    assert!(stored.history.is_empty());

    app.save_pending().unwrap();
    assert!(!app.has_pending());
    let stored = app.database.get_habit(id).unwrap();
    let value = stored.history.values().next().expect("one recorded value");
    assert_eq!(value.as_hours(), 1.0);
}
