//! SQLite storage backend.
//!
//! A single database file holds the reference taxonomy, the workout sets and
//! the daily comments. Every write runs in its own transaction and commits
//! before the call returns.

mod row;
mod schema;
pub mod validation;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Params};
use tracing::{debug, info};

use crate::error::{FitlogError, Result};
use crate::storage::traits::WorkoutStore;
use crate::storage::types::{
    Category, Comment, CommentChange, Exercise, MeasurementType, NewWorkout, StoreMetadata, Unit,
    UnitKind, Workout, WorkoutDetail, WorkoutPage, WorkoutPatch,
};

use row::{format_date, parse_date, WorkoutRow, DETAIL_SELECT};
use schema::{create_tables, seed_reference_data, FORMAT_VERSION, REQUIRED_TABLES};
use validation::{normalize_comment, strip_foreign_fields, validate_measurement};

const EXERCISE_SELECT: &str = r#"
    SELECT e.id, e.name, e.category_id, c.name, m.name
    FROM exercises e
    JOIN categories c ON c.id = e.category_id
    JOIN measurement_types m ON m.id = e.measurement_type_id
"#;

/// SQLite storage engine.
pub struct SqliteStorage {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open a fresh, seeded database that lives only in memory.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        Self::initialize(&mut conn)?;
        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn: Mutex::new(conn),
        })
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| FitlogError::Storage("SQLite connection poisoned".to_string()))
    }

    fn initialize(conn: &mut Connection) -> Result<()> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let tx = conn.transaction()?;
        create_tables(&tx)?;
        seed_reference_data(&tx)?;

        let created_at = Utc::now().to_rfc3339();
        tx.execute(
            "INSERT INTO meta (key, value) VALUES (?, ?)",
            ["format_version", FORMAT_VERSION],
        )?;
        tx.execute(
            "INSERT INTO meta (key, value) VALUES (?, ?)",
            ["created_at", &created_at],
        )?;
        tx.execute(
            "INSERT INTO meta (key, value) VALUES (?, ?)",
            ["last_modified", &created_at],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn touch(conn: &Connection) -> Result<()> {
        conn.execute(
            "UPDATE meta SET value = ? WHERE key = 'last_modified'",
            [Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn query_details<P: Params>(
        conn: &Connection,
        clause: &str,
        params: P,
    ) -> Result<Vec<WorkoutDetail>> {
        let sql = format!("{} {}", DETAIL_SELECT, clause);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params, WorkoutRow::from_row)?;

        let mut workouts = Vec::new();
        for row in rows {
            workouts.push(WorkoutDetail::try_from(row?)?);
        }
        Ok(workouts)
    }

    fn detail_by_id(conn: &Connection, id: i64) -> Result<Option<WorkoutDetail>> {
        let mut found = Self::query_details(conn, "WHERE w.id = ?", [id])?;
        Ok(found.pop())
    }

    fn query_exercises<P: Params>(
        conn: &Connection,
        clause: &str,
        params: P,
    ) -> Result<Vec<Exercise>> {
        let sql = format!("{} {}", EXERCISE_SELECT, clause);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params, |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut exercises = Vec::new();
        for row in rows {
            let (id, name, category_id, category_name, kind) = row?;
            exercises.push(Exercise {
                id,
                name,
                category_id,
                category_name,
                measurement_type: kind.parse()?,
            });
        }
        Ok(exercises)
    }

    fn exercise_by_id(conn: &Connection, id: i64) -> Result<Option<Exercise>> {
        let mut found = Self::query_exercises(conn, "WHERE e.id = ?", [id])?;
        Ok(found.pop())
    }

    fn require_exercise(conn: &Connection, id: i64) -> Result<Exercise> {
        Self::exercise_by_id(conn, id)?
            .ok_or_else(|| FitlogError::Validation(format!("Exercise {} does not exist", id)))
    }

    fn check_unit(conn: &Connection, kind: UnitKind, id: Option<i64>) -> Result<()> {
        let Some(id) = id else {
            return Ok(());
        };
        let sql = format!("SELECT id FROM {} WHERE id = ?", kind.table());
        let exists: Option<i64> = conn.query_row(&sql, [id], |row| row.get(0)).optional()?;
        if exists.is_none() {
            let label = match kind {
                UnitKind::Weight => "Weight",
                UnitKind::Distance => "Distance",
            };
            return Err(FitlogError::Validation(format!(
                "{} unit {} does not exist",
                label, id
            )));
        }
        Ok(())
    }

    fn to_sql_count(value: usize, name: &str) -> Result<i64> {
        i64::try_from(value)
            .map_err(|_| FitlogError::InvalidInput(format!("{} is too large", name)))
    }
}

impl WorkoutStore for SqliteStorage {
    fn create(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(FitlogError::Storage(
                "Database file already exists".to_string(),
            ));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut conn = Connection::open(path)?;
        if let Err(err) = Self::initialize(&mut conn) {
            drop(conn);
            let _ = fs::remove_file(path);
            return Err(err);
        }

        info!(path = %path.display(), "created database");
        Ok(())
    }

    fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FitlogError::DatabaseNotFound);
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|_| FitlogError::Storage("Not a fitlog database".to_string()))?;
        let Some(version) = version else {
            return Err(FitlogError::Storage(
                "Database metadata missing format version".to_string(),
            ));
        };
        debug!(path = %path.display(), %version, "opened database");

        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
        })
    }

    fn metadata(&self) -> Result<StoreMetadata> {
        let conn = self.lock_conn()?;

        let read = |key: &str| -> Result<String> {
            Ok(conn.query_row("SELECT value FROM meta WHERE key = ?", [key], |row| {
                row.get(0)
            })?)
        };
        let timestamp = |key: &str| -> Result<DateTime<Utc>> {
            let value = read(key)?;
            Ok(DateTime::parse_from_rfc3339(&value)
                .map_err(|e| FitlogError::Storage(format!("Invalid {} timestamp: {}", key, e)))?
                .with_timezone(&Utc))
        };

        Ok(StoreMetadata {
            format_version: read("format_version")?,
            created_at: timestamp("created_at")?,
            last_modified: timestamp("last_modified")?,
        })
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn list_exercises(&self, category_id: Option<i64>) -> Result<Vec<Exercise>> {
        let conn = self.lock_conn()?;
        match category_id {
            Some(id) => Self::query_exercises(
                &conn,
                "WHERE e.category_id = ? ORDER BY e.name COLLATE NOCASE",
                [id],
            ),
            None => Self::query_exercises(&conn, "ORDER BY e.name COLLATE NOCASE", []),
        }
    }

    fn get_exercise(&self, id: i64) -> Result<Option<Exercise>> {
        let conn = self.lock_conn()?;
        Self::exercise_by_id(&conn, id)
    }

    fn find_exercise(&self, name: &str) -> Result<Option<Exercise>> {
        let conn = self.lock_conn()?;
        let mut found =
            Self::query_exercises(&conn, "WHERE e.name = ? COLLATE NOCASE", [name.trim()])?;
        Ok(found.pop())
    }

    fn list_units(&self, kind: UnitKind) -> Result<Vec<Unit>> {
        let conn = self.lock_conn()?;
        let sql = format!("SELECT id, name FROM {} ORDER BY name", kind.table());
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(Unit {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn create_workout(&mut self, draft: &NewWorkout) -> Result<WorkoutDetail> {
        let date = draft
            .date
            .ok_or_else(|| FitlogError::Validation("Date is required".to_string()))?;

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let exercise = Self::require_exercise(&tx, draft.exercise_id)?;
        let workout = Workout {
            id: 0,
            date,
            exercise_id: exercise.id,
            category_id: exercise.category_id,
            weight: draft.weight,
            weight_unit_id: draft.weight_unit_id,
            reps: draft.reps,
            distance: draft.distance,
            distance_unit_id: draft.distance_unit_id,
            time: draft.time.as_ref().map(|t| t.trim().to_string()),
            comment: normalize_comment(draft.comment.as_deref())?,
        };
        validate_measurement(&workout, exercise.measurement_type)?;
        Self::check_unit(&tx, UnitKind::Weight, workout.weight_unit_id)?;
        Self::check_unit(&tx, UnitKind::Distance, workout.distance_unit_id)?;

        tx.execute(
            r#"
            INSERT INTO workouts (
                date,
                exercise_id,
                category_id,
                weight,
                weight_unit_id,
                reps,
                distance,
                distance_unit_id,
                time,
                comment
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            (
                format_date(workout.date),
                workout.exercise_id,
                workout.category_id,
                workout.weight,
                workout.weight_unit_id,
                workout.reps,
                workout.distance,
                workout.distance_unit_id,
                workout.time.as_deref(),
                workout.comment.as_deref(),
            ),
        )?;
        let id = tx.last_insert_rowid();
        Self::touch(&tx)?;

        let detail = Self::detail_by_id(&tx, id)?
            .ok_or_else(|| FitlogError::Storage("Inserted workout not readable".to_string()))?;
        tx.commit()?;

        info!(id, exercise = %detail.exercise_name, date = %date, "logged set");
        Ok(detail)
    }

    fn get_workout(&self, id: i64) -> Result<Option<WorkoutDetail>> {
        let conn = self.lock_conn()?;
        Self::detail_by_id(&conn, id)
    }

    fn update_workout(&mut self, id: i64, patch: &WorkoutPatch) -> Result<WorkoutDetail> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let current = Self::detail_by_id(&tx, id)?
            .ok_or_else(|| FitlogError::NotFound(format!("Workout {}", id)))?;
        let mut kind = current.measurement_type;
        let mut workout = current.workout;

        if let Some(exercise_id) = patch.exercise_id.filter(|e| *e != workout.exercise_id) {
            let exercise = Self::require_exercise(&tx, exercise_id)?;
            workout.exercise_id = exercise.id;
            workout.category_id = exercise.category_id;
            if exercise.measurement_type != kind {
                strip_foreign_fields(&mut workout, exercise.measurement_type);
                kind = exercise.measurement_type;
            }
        }

        if let Some(date) = patch.date {
            workout.date = date;
        }
        if let Some(weight) = patch.weight {
            workout.weight = weight;
        }
        if let Some(unit) = patch.weight_unit_id {
            workout.weight_unit_id = unit;
        }
        if let Some(reps) = patch.reps {
            workout.reps = reps;
        }
        if let Some(distance) = patch.distance {
            workout.distance = distance;
        }
        if let Some(unit) = patch.distance_unit_id {
            workout.distance_unit_id = unit;
        }
        if let Some(time) = &patch.time {
            workout.time = time.as_ref().map(|t| t.trim().to_string());
        }
        if let Some(comment) = &patch.comment {
            workout.comment = normalize_comment(comment.as_deref())?;
        }

        validate_measurement(&workout, kind)?;
        Self::check_unit(&tx, UnitKind::Weight, workout.weight_unit_id)?;
        Self::check_unit(&tx, UnitKind::Distance, workout.distance_unit_id)?;

        tx.execute(
            r#"
            UPDATE workouts SET
                date = ?,
                exercise_id = ?,
                category_id = ?,
                weight = ?,
                weight_unit_id = ?,
                reps = ?,
                distance = ?,
                distance_unit_id = ?,
                time = ?,
                comment = ?
            WHERE id = ?
            "#,
            (
                format_date(workout.date),
                workout.exercise_id,
                workout.category_id,
                workout.weight,
                workout.weight_unit_id,
                workout.reps,
                workout.distance,
                workout.distance_unit_id,
                workout.time.as_deref(),
                workout.comment.as_deref(),
                id,
            ),
        )?;
        Self::touch(&tx)?;

        let detail = Self::detail_by_id(&tx, id)?
            .ok_or_else(|| FitlogError::Storage("Updated workout not readable".to_string()))?;
        tx.commit()?;

        info!(id, "updated set");
        Ok(detail)
    }

    fn delete_workout(&mut self, id: i64) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let deleted = tx.execute("DELETE FROM workouts WHERE id = ?", [id])?;
        if deleted == 0 {
            return Err(FitlogError::NotFound(format!("Workout {}", id)));
        }
        Self::touch(&tx)?;
        tx.commit()?;

        info!(id, "deleted set");
        Ok(())
    }

    fn list_by_date(&self, date: NaiveDate) -> Result<Vec<WorkoutDetail>> {
        let conn = self.lock_conn()?;
        debug!(%date, "listing sets by date");
        Self::query_details(&conn, "WHERE w.date = ? ORDER BY w.id", [format_date(date)])
    }

    fn list_by_exercise(&self, exercise_id: i64) -> Result<Vec<WorkoutDetail>> {
        let conn = self.lock_conn()?;
        debug!(exercise_id, "listing sets by exercise");
        Self::query_details(
            &conn,
            "WHERE w.exercise_id = ? ORDER BY w.date DESC, w.id ASC",
            [exercise_id],
        )
    }

    fn list_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<WorkoutDetail>> {
        let conn = self.lock_conn()?;
        debug!(%start, %end, "listing sets by date range");
        Self::query_details(
            &conn,
            "WHERE w.date >= ? AND w.date <= ? ORDER BY w.date, w.id",
            [format_date(start), format_date(end)],
        )
    }

    fn list_page(&self, offset: usize, limit: usize) -> Result<WorkoutPage> {
        let sql_offset = Self::to_sql_count(offset, "Offset")?;
        let sql_limit = Self::to_sql_count(limit, "Limit")?;

        let conn = self.lock_conn()?;
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM workouts", [], |row| row.get(0))?;
        let workouts = Self::query_details(
            &conn,
            "ORDER BY w.date DESC, w.id DESC LIMIT ? OFFSET ?",
            [sql_limit, sql_offset],
        )?;
        debug!(offset, limit, total, "listed page");

        Ok(WorkoutPage {
            workouts,
            total_count: usize::try_from(total).unwrap_or(0),
            offset,
            limit,
        })
    }

    fn get_comment(&self, date: NaiveDate) -> Result<Option<String>> {
        let conn = self.lock_conn()?;
        Ok(conn
            .query_row(
                "SELECT comment FROM comments WHERE date = ?",
                [format_date(date)],
                |row| row.get(0),
            )
            .optional()?)
    }

    fn upsert_comment(&mut self, date: NaiveDate, text: &str) -> Result<CommentChange> {
        let text = normalize_comment(Some(text))?;
        let date_str = format_date(date);

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM comments WHERE date = ?",
                [&date_str],
                |row| row.get(0),
            )
            .optional()?;

        let change = match (existing, text) {
            (None, None) => return Ok(CommentChange::Unchanged),
            (None, Some(text)) => {
                tx.execute(
                    "INSERT INTO comments (date, comment) VALUES (?, ?)",
                    (&date_str, &text),
                )?;
                CommentChange::Created
            }
            (Some(id), Some(text)) => {
                tx.execute("UPDATE comments SET comment = ? WHERE id = ?", (&text, id))?;
                CommentChange::Updated
            }
            (Some(id), None) => {
                tx.execute("DELETE FROM comments WHERE id = ?", [id])?;
                CommentChange::Deleted
            }
        };
        Self::touch(&tx)?;
        tx.commit()?;

        info!(date = %date_str, ?change, "saved day comment");
        Ok(change)
    }

    fn list_comments(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Comment>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            "SELECT date, comment FROM comments WHERE date >= ? AND date <= ? ORDER BY date",
        )?;
        let rows = stmt.query_map([format_date(start), format_date(end)], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut comments = Vec::new();
        for row in rows {
            let (date, comment) = row?;
            comments.push(Comment {
                date: parse_date(&date)?,
                comment,
            });
        }
        Ok(comments)
    }

    fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        let status: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if status != "ok" {
            return Err(FitlogError::Storage(format!(
                "SQLite integrity check failed: {}",
                status
            )));
        }

        for table in REQUIRED_TABLES {
            let found: Option<String> = conn
                .query_row(
                    "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
                    [table],
                    |row| row.get(0),
                )
                .optional()?;
            if found.is_none() {
                return Err(FitlogError::Storage(format!("Missing table: {}", table)));
            }
        }

        let mut stmt = conn.prepare("PRAGMA foreign_key_check")?;
        let mut rows = stmt.query([])?;
        if rows.next()?.is_some() {
            return Err(FitlogError::Storage(
                "Foreign key integrity check failed".to_string(),
            ));
        }

        let mismatched: i64 = conn.query_row(
            "SELECT COUNT(*) FROM workouts w JOIN exercises e ON e.id = w.exercise_id WHERE w.category_id != e.category_id",
            [],
            |row| row.get(0),
        )?;
        if mismatched > 0 {
            return Err(FitlogError::Storage(format!(
                "{} workouts have a category that differs from their exercise",
                mismatched
            )));
        }

        let mut stmt = conn.prepare("SELECT name FROM measurement_types")?;
        let names = stmt.query_map([], |row| row.get::<_, String>(0))?;
        for name in names {
            name?.parse::<MeasurementType>()?;
        }

        let bad_dates: i64 = conn.query_row(
            "SELECT COUNT(*) FROM workouts WHERE date(date) IS NULL OR date(date) != date",
            [],
            |row| row.get(0),
        )?;
        if bad_dates > 0 {
            return Err(FitlogError::Storage(format!(
                "{} workouts have a malformed date",
                bad_dates
            )));
        }

        let metadata_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM meta WHERE key IN ('format_version', 'created_at', 'last_modified')",
            [],
            |row| row.get(0),
        )?;
        if metadata_count < 3 {
            return Err(FitlogError::Storage(
                "Metadata table missing required keys".to_string(),
            ));
        }

        Ok(())
    }
}
