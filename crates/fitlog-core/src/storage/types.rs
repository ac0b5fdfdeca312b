//! Core data types for the storage layer.
//!
//! Reference data (categories, exercises, units) is read-only. Workouts and
//! comments are the only mutable records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FitlogError;

/// Metadata for a fitlog database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// Format version (e.g., "0.1")
    pub format_version: String,

    /// When this database was created
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp (informational)
    pub last_modified: DateTime<Utc>,
}

/// Discriminator deciding which fields of a set are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementType {
    /// Reps, optionally with a weight
    Reps,
    /// Distance with a unit, optionally with a time
    Distance,
    /// A duration only
    Time,
}

impl MeasurementType {
    pub const ALL: [MeasurementType; 3] = [
        MeasurementType::Reps,
        MeasurementType::Distance,
        MeasurementType::Time,
    ];

    /// Name as stored in the `measurement_types` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementType::Reps => "reps",
            MeasurementType::Distance => "distance",
            MeasurementType::Time => "time",
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementType {
    type Err = FitlogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "reps" => Ok(MeasurementType::Reps),
            "distance" => Ok(MeasurementType::Distance),
            "time" => Ok(MeasurementType::Time),
            other => Err(FitlogError::Storage(format!(
                "Unknown measurement type: {}",
                other
            ))),
        }
    }
}

/// An exercise category (e.g., "Chest", "Cardio").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// An exercise joined with its category and measurement type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub category_name: String,
    pub measurement_type: MeasurementType,
}

/// Which unit table a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Weight,
    Distance,
}

impl UnitKind {
    pub(crate) fn table(&self) -> &'static str {
        match self {
            UnitKind::Weight => "weight_units",
            UnitKind::Distance => "distance_units",
        }
    }
}

/// A weight or distance unit (e.g., "kg", "km").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    pub name: String,
}

/// A single logged set, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub date: NaiveDate,
    pub exercise_id: i64,
    /// Copied from the exercise at write time
    pub category_id: i64,
    pub weight: Option<f64>,
    pub weight_unit_id: Option<i64>,
    pub reps: Option<i64>,
    pub distance: Option<f64>,
    pub distance_unit_id: Option<i64>,
    /// `H+:MM:SS`
    pub time: Option<String>,
    pub comment: Option<String>,
}

/// A set joined with exercise, category and unit names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDetail {
    #[serde(flatten)]
    pub workout: Workout,
    pub exercise_name: String,
    pub category_name: String,
    pub measurement_type: MeasurementType,
    pub weight_unit_name: Option<String>,
    pub distance_unit_name: Option<String>,
}

impl WorkoutDetail {
    pub fn id(&self) -> i64 {
        self.workout.id
    }

    pub fn date(&self) -> NaiveDate {
        self.workout.date
    }

    pub fn exercise_id(&self) -> i64 {
        self.workout.exercise_id
    }
}

/// Draft for inserting a new set.
///
/// `category_id` is not part of the draft; the store copies it from the
/// exercise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewWorkout {
    pub date: Option<NaiveDate>,
    pub exercise_id: i64,
    pub weight: Option<f64>,
    pub weight_unit_id: Option<i64>,
    pub reps: Option<i64>,
    pub distance: Option<f64>,
    pub distance_unit_id: Option<i64>,
    pub time: Option<String>,
    pub comment: Option<String>,
}

impl NewWorkout {
    pub fn new(date: NaiveDate, exercise_id: i64) -> Self {
        Self {
            date: Some(date),
            exercise_id,
            ..Self::default()
        }
    }

    pub fn with_reps(mut self, reps: i64) -> Self {
        self.reps = Some(reps);
        self
    }

    pub fn with_weight(mut self, weight: f64, unit_id: i64) -> Self {
        self.weight = Some(weight);
        self.weight_unit_id = Some(unit_id);
        self
    }

    pub fn with_distance(mut self, distance: f64, unit_id: i64) -> Self {
        self.distance = Some(distance);
        self.distance_unit_id = Some(unit_id);
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Partial update for an existing set.
///
/// `None` keeps the stored value. For clearable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutPatch {
    pub date: Option<NaiveDate>,
    pub exercise_id: Option<i64>,
    pub weight: Option<Option<f64>>,
    pub weight_unit_id: Option<Option<i64>>,
    pub reps: Option<Option<i64>>,
    pub distance: Option<Option<f64>>,
    pub distance_unit_id: Option<Option<i64>>,
    pub time: Option<Option<String>>,
    pub comment: Option<Option<String>>,
}

impl WorkoutPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn exercise(mut self, exercise_id: i64) -> Self {
        self.exercise_id = Some(exercise_id);
        self
    }

    pub fn weight(mut self, weight: Option<f64>, unit_id: Option<i64>) -> Self {
        self.weight = Some(weight);
        self.weight_unit_id = Some(unit_id);
        self
    }

    pub fn reps(mut self, reps: Option<i64>) -> Self {
        self.reps = Some(reps);
        self
    }

    pub fn distance(mut self, distance: Option<f64>, unit_id: Option<i64>) -> Self {
        self.distance = Some(distance);
        self.distance_unit_id = Some(unit_id);
        self
    }

    pub fn time(mut self, time: Option<String>) -> Self {
        self.time = Some(time);
        self
    }

    pub fn comment(mut self, comment: Option<String>) -> Self {
        self.comment = Some(comment);
        self
    }

    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// One page of the all-workouts table.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutPage {
    pub workouts: Vec<WorkoutDetail>,
    pub total_count: usize,
    pub offset: usize,
    pub limit: usize,
}

impl WorkoutPage {
    /// Whether rows exist past this page.
    pub fn has_more(&self) -> bool {
        self.offset + self.workouts.len() < self.total_count
    }
}

/// A free-text note attached to a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub date: NaiveDate,
    pub comment: String,
}

/// What a comment upsert did to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentChange {
    Created,
    Updated,
    Deleted,
    Unchanged,
}
