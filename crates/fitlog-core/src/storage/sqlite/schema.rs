//! Database schema and reference data seeded at creation.

use rusqlite::Connection;

use crate::error::Result;
use crate::storage::types::MeasurementType;

/// Current on-disk format version.
pub const FORMAT_VERSION: &str = "0.1";

const SCHEMA: &str = r#"
CREATE TABLE meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE TABLE categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE measurement_types (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE exercises (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE COLLATE NOCASE,
    category_id INTEGER NOT NULL,
    measurement_type_id INTEGER NOT NULL,

    FOREIGN KEY (category_id) REFERENCES categories(id),
    FOREIGN KEY (measurement_type_id) REFERENCES measurement_types(id)
);

CREATE TABLE weight_units (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE distance_units (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

-- One logged set; category_id is copied from the exercise on write
CREATE TABLE workouts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    exercise_id INTEGER NOT NULL,
    category_id INTEGER NOT NULL,
    weight REAL,
    weight_unit_id INTEGER,
    reps INTEGER,
    distance REAL,
    distance_unit_id INTEGER,
    time TEXT,
    comment TEXT,

    FOREIGN KEY (exercise_id) REFERENCES exercises(id),
    FOREIGN KEY (category_id) REFERENCES categories(id),
    FOREIGN KEY (weight_unit_id) REFERENCES weight_units(id),
    FOREIGN KEY (distance_unit_id) REFERENCES distance_units(id)
);

CREATE INDEX workouts_date ON workouts (date);
CREATE INDEX workouts_exercise_date ON workouts (exercise_id, date);

-- At most one note per calendar date
CREATE TABLE comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL UNIQUE,
    comment TEXT NOT NULL
);
"#;

const CATEGORIES: &[&str] = &[
    "Abs",
    "Back",
    "Biceps",
    "Cardio",
    "Chest",
    "Legs",
    "Shoulders",
    "Triceps",
];

const EXERCISES: &[(&str, &str, MeasurementType)] = &[
    ("Crunch", "Abs", MeasurementType::Reps),
    ("Hanging Leg Raise", "Abs", MeasurementType::Reps),
    ("Plank", "Abs", MeasurementType::Time),
    ("Deadlift", "Back", MeasurementType::Reps),
    ("Pull Up", "Back", MeasurementType::Reps),
    ("Barbell Row", "Back", MeasurementType::Reps),
    ("Barbell Curl", "Biceps", MeasurementType::Reps),
    ("Hammer Curl", "Biceps", MeasurementType::Reps),
    ("Running", "Cardio", MeasurementType::Distance),
    ("Cycling", "Cardio", MeasurementType::Distance),
    ("Rowing Machine", "Cardio", MeasurementType::Distance),
    ("Jump Rope", "Cardio", MeasurementType::Time),
    ("Flat Barbell Bench Press", "Chest", MeasurementType::Reps),
    ("Incline Dumbbell Press", "Chest", MeasurementType::Reps),
    ("Push Up", "Chest", MeasurementType::Reps),
    ("Barbell Squat", "Legs", MeasurementType::Reps),
    ("Leg Press", "Legs", MeasurementType::Reps),
    ("Walking Lunge", "Legs", MeasurementType::Distance),
    ("Overhead Press", "Shoulders", MeasurementType::Reps),
    ("Lateral Raise", "Shoulders", MeasurementType::Reps),
    ("Rope Push Down", "Triceps", MeasurementType::Reps),
    ("Dips", "Triceps", MeasurementType::Reps),
];

const WEIGHT_UNITS: &[&str] = &["kg", "lb"];
const DISTANCE_UNITS: &[&str] = &["km", "m", "mi"];

/// Create every table on an empty connection.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Insert the fixed taxonomy: measurement types, categories, exercises, units.
pub fn seed_reference_data(conn: &Connection) -> Result<()> {
    for kind in MeasurementType::ALL {
        conn.execute(
            "INSERT INTO measurement_types (name) VALUES (?)",
            [kind.as_str()],
        )?;
    }

    for name in CATEGORIES {
        conn.execute("INSERT INTO categories (name) VALUES (?)", [name])?;
    }

    for (name, category, kind) in EXERCISES {
        conn.execute(
            r#"
            INSERT INTO exercises (name, category_id, measurement_type_id)
            SELECT ?, c.id, m.id
            FROM categories c, measurement_types m
            WHERE c.name = ? AND m.name = ?
            "#,
            (name, category, kind.as_str()),
        )?;
    }

    for name in WEIGHT_UNITS {
        conn.execute("INSERT INTO weight_units (name) VALUES (?)", [name])?;
    }
    for name in DISTANCE_UNITS {
        conn.execute("INSERT INTO distance_units (name) VALUES (?)", [name])?;
    }

    Ok(())
}

/// Tables a fitlog database must contain.
pub const REQUIRED_TABLES: &[&str] = &[
    "meta",
    "categories",
    "measurement_types",
    "exercises",
    "weight_units",
    "distance_units",
    "workouts",
    "comments",
];
