//! Workout row type for joined queries.

use chrono::NaiveDate;

use crate::error::{FitlogError, Result};
use crate::storage::types::{MeasurementType, Workout, WorkoutDetail};

/// Column list matching [`WorkoutRow::from_row`]. Append `WHERE`/`ORDER BY`.
pub const DETAIL_SELECT: &str = r#"
    SELECT
        w.id, w.date, w.exercise_id, w.category_id,
        w.weight, w.weight_unit_id, w.reps,
        w.distance, w.distance_unit_id, w.time, w.comment,
        e.name, c.name, m.name, wu.name, du.name
    FROM workouts w
    JOIN exercises e ON e.id = w.exercise_id
    JOIN categories c ON c.id = w.category_id
    JOIN measurement_types m ON m.id = e.measurement_type_id
    LEFT JOIN weight_units wu ON wu.id = w.weight_unit_id
    LEFT JOIN distance_units du ON du.id = w.distance_unit_id
"#;

/// Raw row data from the joined workouts query, before parsing into domain types.
#[derive(Debug)]
pub struct WorkoutRow {
    pub id: i64,
    pub date: String,
    pub exercise_id: i64,
    pub category_id: i64,
    pub weight: Option<f64>,
    pub weight_unit_id: Option<i64>,
    pub reps: Option<i64>,
    pub distance: Option<f64>,
    pub distance_unit_id: Option<i64>,
    pub time: Option<String>,
    pub comment: Option<String>,
    pub exercise_name: String,
    pub category_name: String,
    pub measurement_type: String,
    pub weight_unit_name: Option<String>,
    pub distance_unit_name: Option<String>,
}

impl WorkoutRow {
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            exercise_id: row.get(2)?,
            category_id: row.get(3)?,
            weight: row.get(4)?,
            weight_unit_id: row.get(5)?,
            reps: row.get(6)?,
            distance: row.get(7)?,
            distance_unit_id: row.get(8)?,
            time: row.get(9)?,
            comment: row.get(10)?,
            exercise_name: row.get(11)?,
            category_name: row.get(12)?,
            measurement_type: row.get(13)?,
            weight_unit_name: row.get(14)?,
            distance_unit_name: row.get(15)?,
        })
    }
}

/// Parse a stored `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| FitlogError::Storage(format!("Invalid date '{}': {}", value, e)))
}

/// Format a date the way it is stored.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl TryFrom<WorkoutRow> for WorkoutDetail {
    type Error = FitlogError;

    fn try_from(row: WorkoutRow) -> Result<Self> {
        let date = parse_date(&row.date)?;
        let measurement_type: MeasurementType = row.measurement_type.parse()?;

        Ok(WorkoutDetail {
            workout: Workout {
                id: row.id,
                date,
                exercise_id: row.exercise_id,
                category_id: row.category_id,
                weight: row.weight,
                weight_unit_id: row.weight_unit_id,
                reps: row.reps,
                distance: row.distance,
                distance_unit_id: row.distance_unit_id,
                time: row.time,
                comment: row.comment,
            },
            exercise_name: row.exercise_name,
            category_name: row.category_name,
            measurement_type,
            weight_unit_name: row.weight_unit_name,
            distance_unit_name: row.distance_unit_name,
        })
    }
}
