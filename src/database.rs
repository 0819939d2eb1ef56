use std::collections::BTreeMap;
use std::path::PathBuf;

use rusqlite::Connection;
use thiserror::Error;

use crate::engine::OrderUpdate;
use crate::models::{GoalEntry, Habit, HabitKind, HabitValue};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create database directory: {0}")]
    DirectoryError(String),
    #[error("JSON column error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Habit has no id")]
    MissingId,
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database connection and initialize the schema
    pub fn new(path: &str) -> Result<Self, DatabaseError> {
        let db_path = PathBuf::from(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(&db_path)?;

        let db = Database { conn };
        db.initialize_schema()?;

        Ok(db)
    }

    /// Initialize the database schema (table, indexes, migrations)
    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS habits (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                owner           TEXT NOT NULL,
                name            TEXT NOT NULL,
                kind            TEXT NOT NULL,
                scheduled_days  TEXT,
                goal            REAL,
                goal_workdays   REAL,
                goal_weekends   REAL,
                goal_history    TEXT,
                history         TEXT,
                \"order\"       INTEGER,
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_habits_owner ON habits(owner)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_habits_owner_kind ON habits(owner, kind)",
            [],
        )?;

        // Migrate databases created before goal versioning and scheduling
        self.migrate_add_versioning_columns()?;

        Ok(())
    }

    /// Migrate old tables to add the scheduling and goal-versioning columns
    fn migrate_add_versioning_columns(&self) -> Result<(), DatabaseError> {
        // Helper to check if a column exists
        fn column_exists(
            conn: &Connection,
            table: &str,
            column: &str,
        ) -> Result<bool, DatabaseError> {
            let mut stmt =
                conn.prepare("SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2")?;
            let count: i64 = stmt.query_row(rusqlite::params![table, column], |row| row.get(0))?;
            Ok(count > 0)
        }

        for column in ["scheduled_days", "goal_workdays", "goal_weekends", "goal_history"] {
            if !column_exists(&self.conn, "habits", column)? {
                let kind = if column == "goal_workdays" || column == "goal_weekends" {
                    "REAL"
                } else {
                    "TEXT"
                };
                self.conn.execute(
                    &format!("ALTER TABLE habits ADD COLUMN {} {}", column, kind),
                    [],
                )?;
            }
        }

        Ok(())
    }

    /// Get a reference to the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Insert a habit into the database and return its ID
    pub fn insert_habit(&self, habit: &Habit) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO habits (owner, name, kind, scheduled_days, goal, goal_workdays, goal_weekends, goal_history, history, \"order\", created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            rusqlite::params![
                habit.owner,
                habit.name,
                habit.kind.as_str(),
                serde_json::to_string(&habit.scheduled_days)?,
                habit.goal,
                habit.goal_workdays,
                habit.goal_weekends,
                serde_json::to_string(&habit.goal_history)?,
                serde_json::to_string(&habit.history)?,
                habit.order,
                habit.created_at,
                habit.updated_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Helper function to map a row to a Habit. Legacy kind spellings are
    /// normalized here; nothing past this boundary sees them.
    fn row_to_habit(row: &rusqlite::Row) -> Result<Habit, rusqlite::Error> {
        let kind_raw: String = row.get(3)?;
        let kind = HabitKind::parse(&kind_raw).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                format!("unknown habit kind: {}", kind_raw).into(),
            )
        })?;

        let scheduled_days: Vec<u8> = parse_json_column(row, 4)?.unwrap_or_default();
        let goal_history: Vec<GoalEntry> = parse_json_column(row, 8)?.unwrap_or_default();
        let history: BTreeMap<String, HabitValue> = parse_json_column(row, 9)?.unwrap_or_default();

        Ok(Habit {
            id: Some(row.get(0)?),
            owner: row.get(1)?,
            name: row.get(2)?,
            kind,
            scheduled_days,
            goal: row.get(5)?,
            goal_workdays: row.get(6)?,
            goal_weekends: row.get(7)?,
            goal_history,
            history,
            order: row.get(10)?,
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
        })
    }

    /// Get all habits belonging to one owner, ordered by creation time.
    /// Display ordering (per-kind manual order) is applied by the caller.
    pub fn get_habits_for_owner(&self, owner: &str) -> Result<Vec<Habit>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner, name, kind, scheduled_days, goal, goal_workdays, goal_weekends, goal_history, history, \"order\", created_at, updated_at
             FROM habits WHERE owner = ?1 ORDER BY created_at ASC, id ASC",
        )?;
        let habits = stmt
            .query_map(rusqlite::params![owner], Self::row_to_habit)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(habits)
    }

    /// Get a single habit by ID
    pub fn get_habit(&self, id: i64) -> Result<Habit, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner, name, kind, scheduled_days, goal, goal_workdays, goal_weekends, goal_history, history, \"order\", created_at, updated_at
             FROM habits WHERE id = ?1",
        )?;

        stmt.query_row(rusqlite::params![id], Self::row_to_habit)
            .map_err(DatabaseError::from)
    }

    /// Update a habit's editable fields (name, schedule, goal fields)
    pub fn update_habit(&self, habit: &Habit) -> Result<(), DatabaseError> {
        let id = habit.id.ok_or(DatabaseError::MissingId)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE habits SET name = ?1, scheduled_days = ?2, goal = ?3, goal_workdays = ?4,
             goal_weekends = ?5, goal_history = ?6, updated_at = ?7 WHERE id = ?8",
            rusqlite::params![
                habit.name,
                serde_json::to_string(&habit.scheduled_days)?,
                habit.goal,
                habit.goal_workdays,
                habit.goal_weekends,
                serde_json::to_string(&habit.goal_history)?,
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                id
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Record a value for one date, leaving every other date untouched.
    /// This is the single-field progress write: concurrent writes for
    /// different dates only conflict on the JSON column, which the
    /// transaction serializes.
    pub fn set_history_value(
        &self,
        habit_id: i64,
        date: &str,
        value: HabitValue,
    ) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        let raw: Option<String> = tx.query_row(
            "SELECT history FROM habits WHERE id = ?1",
            rusqlite::params![habit_id],
            |row| row.get(0),
        )?;
        let mut history: BTreeMap<String, HabitValue> = match raw {
            Some(raw) => serde_json::from_str(&raw)?,
            None => BTreeMap::new(),
        };
        history.insert(date.to_string(), value);
        tx.execute(
            "UPDATE habits SET history = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![
                serde_json::to_string(&history)?,
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                habit_id
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Change an hours habit's targets effective from `effective_date`:
    /// appends the timeline entry and updates the current fields in one
    /// transaction. Earlier dates keep resolving to their old goals.
    pub fn update_goals(
        &self,
        habit_id: i64,
        goal_workdays: f64,
        goal_weekends: f64,
        effective_date: &str,
    ) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        let raw: Option<String> = tx.query_row(
            "SELECT goal_history FROM habits WHERE id = ?1",
            rusqlite::params![habit_id],
            |row| row.get(0),
        )?;
        let mut goal_history: Vec<GoalEntry> = match raw {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        goal_history.push(GoalEntry {
            effective_date: effective_date.to_string(),
            goal_workdays,
            goal_weekends,
        });
        tx.execute(
            "UPDATE habits SET goal_workdays = ?1, goal_weekends = ?2, goal_history = ?3, updated_at = ?4 WHERE id = ?5",
            rusqlite::params![
                goal_workdays,
                goal_weekends,
                serde_json::to_string(&goal_history)?,
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                habit_id
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Overwrite a habit's goal timeline. Used to persist compaction when it
    /// actually shrank the log.
    pub fn replace_goal_history(
        &self,
        habit_id: i64,
        entries: &[GoalEntry],
    ) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE habits SET goal_history = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![
                serde_json::to_string(entries)?,
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                habit_id
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Get the maximum order value among one owner's habits of one kind
    pub fn get_max_order_for_kind(
        &self,
        owner: &str,
        kind: HabitKind,
    ) -> Result<i64, DatabaseError> {
        let max_order: Option<i64> = self.conn.query_row(
            "SELECT MAX(\"order\") FROM habits WHERE owner = ?1 AND kind = ?2",
            rusqlite::params![owner, kind.as_str()],
            |row| row.get(0),
        )?;
        Ok(max_order.unwrap_or(-1))
    }

    /// Update a single habit's order value
    pub fn update_habit_order(&self, habit_id: i64, new_order: i64) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE habits SET \"order\" = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![
                new_order,
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                habit_id
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Apply an order-commit batch in one transaction
    pub fn update_habit_orders(&self, updates: &[OrderUpdate]) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        for update in updates {
            tx.execute(
                "UPDATE habits SET \"order\" = ?1, updated_at = ?2 WHERE id = ?3",
                rusqlite::params![update.order, now, update.habit_id],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Delete a habit by ID
    pub fn delete_habit(&self, id: i64) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM habits WHERE id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(())
    }
}

/// Read an optional JSON text column into a deserialized value, mapping
/// malformed JSON to a row conversion error so a broken row fails loudly
/// instead of silently emptying.
fn parse_json_column<T: serde::de::DeserializeOwned>(
    row: &rusqlite::Row,
    index: usize,
) -> Result<Option<T>, rusqlite::Error> {
    let raw: Option<String> = row.get(index)?;
    match raw {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    index,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HabitValue;
    use tempfile::TempDir;

    fn open_db(dir: &TempDir) -> Database {
        let path = dir.path().join("habits.db");
        Database::new(path.to_str().unwrap()).unwrap()
    }

    fn sample_habit(owner: &str, name: &str, kind: HabitKind) -> Habit {
        let mut habit = Habit::new(owner.to_string(), name.to_string(), kind);
        if kind == HabitKind::Hours {
            habit.set_goals(8.0, 2.0, "2024-01-01");
        }
        habit
    }

    #[test]
    fn insert_and_load_round_trips_all_fields() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        let mut habit = sample_habit("ana", "Deep work", HabitKind::Hours);
        habit.scheduled_days = vec![1, 2, 3, 4, 5];
        habit
            .history
            .insert("2024-01-03".to_string(), HabitValue::Hours(8.0));
        let id = db.insert_habit(&habit).unwrap();

        let loaded = db.get_habit(id).unwrap();
        assert_eq!(loaded.name, "Deep work");
        assert_eq!(loaded.kind, HabitKind::Hours);
        assert_eq!(loaded.scheduled_days, vec![1, 2, 3, 4, 5]);
        assert_eq!(loaded.goal_workdays, Some(8.0));
        assert_eq!(loaded.goal_history.len(), 1);
        assert_eq!(
            loaded.history.get("2024-01-03"),
            Some(&HabitValue::Hours(8.0))
        );
    }

    #[test]
    fn habits_are_scoped_by_owner() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        db.insert_habit(&sample_habit("ana", "Gym", HabitKind::Todo))
            .unwrap();
        db.insert_habit(&sample_habit("bruno", "Gym", HabitKind::Todo))
            .unwrap();

        let anas = db.get_habits_for_owner("ana").unwrap();
        assert_eq!(anas.len(), 1);
        assert_eq!(anas[0].owner, "ana");
    }

    #[test]
    fn set_history_value_touches_only_one_date() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        let mut habit = sample_habit("ana", "Gym", HabitKind::Todo);
        habit
            .history
            .insert("2024-01-01".to_string(), HabitValue::Done(true));
        let id = db.insert_habit(&habit).unwrap();

        db.set_history_value(id, "2024-01-02", HabitValue::Done(true))
            .unwrap();
        db.set_history_value(id, "2024-01-01", HabitValue::Done(false))
            .unwrap();

        let loaded = db.get_habit(id).unwrap();
        assert_eq!(
            loaded.history.get("2024-01-01"),
            Some(&HabitValue::Done(false))
        );
        assert_eq!(
            loaded.history.get("2024-01-02"),
            Some(&HabitValue::Done(true))
        );
        assert_eq!(loaded.history.len(), 2);
    }

    #[test]
    fn update_goals_appends_to_the_timeline() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        let habit = sample_habit("ana", "Deep work", HabitKind::Hours);
        let id = db.insert_habit(&habit).unwrap();

        db.update_goals(id, 4.0, 1.0, "2024-01-10").unwrap();

        let loaded = db.get_habit(id).unwrap();
        assert_eq!(loaded.goal_workdays, Some(4.0));
        assert_eq!(loaded.goal_history.len(), 2);
        assert_eq!(loaded.goal_history[1].effective_date, "2024-01-10");
        // The engine keeps resolving old dates with the old entry.
        assert_eq!(crate::engine::resolve_goal(&loaded, "2024-01-03"), 8.0);
        assert_eq!(crate::engine::resolve_goal(&loaded, "2024-01-10"), 4.0);
    }

    #[test]
    fn bulk_order_update_applies_every_pair() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        let a = db
            .insert_habit(&sample_habit("ana", "A", HabitKind::Todo))
            .unwrap();
        let b = db
            .insert_habit(&sample_habit("ana", "B", HabitKind::Todo))
            .unwrap();

        db.update_habit_orders(&[
            OrderUpdate {
                habit_id: a,
                order: 1,
            },
            OrderUpdate {
                habit_id: b,
                order: 0,
            },
        ])
        .unwrap();

        assert_eq!(db.get_habit(a).unwrap().order, Some(1));
        assert_eq!(db.get_habit(b).unwrap().order, Some(0));
    }

    #[test]
    fn max_order_is_per_owner_and_kind() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        let mut habit = sample_habit("ana", "A", HabitKind::Todo);
        habit.order = Some(4);
        db.insert_habit(&habit).unwrap();

        assert_eq!(db.get_max_order_for_kind("ana", HabitKind::Todo).unwrap(), 4);
        assert_eq!(
            db.get_max_order_for_kind("ana", HabitKind::Hours).unwrap(),
            -1
        );
        assert_eq!(
            db.get_max_order_for_kind("bruno", HabitKind::Todo).unwrap(),
            -1
        );
    }

    #[test]
    fn legacy_kind_spellings_are_normalized_on_load() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        db.conn()
            .execute(
                "INSERT INTO habits (owner, name, kind, goal, history, created_at, updated_at)
                 VALUES ('ana', 'Old habit', 'numeric', 3.0, '{\"2024-01-02\": 3}', '2023-05-01 08:00:00', '2023-05-01 08:00:00')",
                [],
            )
            .unwrap();

        let habits = db.get_habits_for_owner("ana").unwrap();
        assert_eq!(habits[0].kind, HabitKind::Hours);
        assert_eq!(habits[0].goal, Some(3.0));
        assert!(habits[0].scheduled_days.is_empty());
        assert!(habits[0].goal_history.is_empty());
        // Legacy scalar goal still drives resolution.
        assert_eq!(crate::engine::resolve_goal(&habits[0], "2024-01-02"), 3.0);
    }

    #[test]
    fn old_schema_gains_versioning_columns_on_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("habits.db");

        {
            let conn = Connection::open(&path).unwrap();
            conn.execute(
                "CREATE TABLE habits (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    owner TEXT NOT NULL,
                    name TEXT NOT NULL,
                    kind TEXT NOT NULL,
                    goal REAL,
                    history TEXT,
                    \"order\" INTEGER,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )",
                [],
            )
            .unwrap();
            conn.execute(
                "INSERT INTO habits (owner, name, kind, history, created_at, updated_at)
                 VALUES ('ana', 'Gym', 'boolean', '{\"2024-01-01\": true}', '2023-01-01 08:00:00', '2023-01-01 08:00:00')",
                [],
            )
            .unwrap();
        }

        let db = Database::new(path.to_str().unwrap()).unwrap();
        let habits = db.get_habits_for_owner("ana").unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].kind, HabitKind::Todo);
        assert_eq!(
            habits[0].history.get("2024-01-01"),
            Some(&HabitValue::Done(true))
        );
    }

    #[test]
    fn replace_goal_history_persists_compaction() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir);

        let mut habit = sample_habit("ana", "Deep work", HabitKind::Hours);
        habit.set_goals(6.0, 2.0, "2024-01-01"); // duplicate effective date
        let id = db.insert_habit(&habit).unwrap();

        let loaded = db.get_habit(id).unwrap();
        let compacted = crate::engine::compact_goal_history(&loaded.goal_history);
        assert!(compacted.len() < loaded.goal_history.len());

        db.replace_goal_history(id, &compacted).unwrap();
        let reloaded = db.get_habit(id).unwrap();
        assert_eq!(reloaded.goal_history, compacted);
        assert_eq!(reloaded.goal_history[0].goal_workdays, 6.0);
    }
}
