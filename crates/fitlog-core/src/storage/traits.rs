//! Storage engine trait definition.
//!
//! The `WorkoutStore` trait is the only way the rest of Fitlog reaches
//! persisted data. Reference lookups, the workout record store and the daily
//! comment store all live behind it.

use std::path::Path;

use chrono::NaiveDate;

use super::types::{
    Category, Comment, CommentChange, Exercise, NewWorkout, StoreMetadata, Unit, UnitKind,
    WorkoutDetail, WorkoutPage, WorkoutPatch,
};
use crate::error::Result;

/// Storage engine interface for the workout log.
///
/// All implementations must ensure:
/// - Every write is visible to the next read (no eventual consistency)
/// - At most one comment row exists per date
/// - A workout's `category_id` matches its exercise at write time
pub trait WorkoutStore: Send + Sync {
    /// Create a new database at the specified path, seeded with reference data.
    ///
    /// # Errors
    ///
    /// Returns `FitlogError::Storage` if:
    /// - File already exists
    /// - Cannot write to path
    fn create(path: &Path) -> Result<()>
    where
        Self: Sized;

    /// Open an existing database.
    ///
    /// # Errors
    ///
    /// Returns `FitlogError::DatabaseNotFound` if the file does not exist and
    /// `FitlogError::Storage` if it is not a fitlog database.
    fn open(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Get database metadata.
    fn metadata(&self) -> Result<StoreMetadata>;

    // --- Reference data ---

    /// List categories ordered by name.
    fn list_categories(&self) -> Result<Vec<Category>>;

    /// List exercises ordered by name, optionally restricted to one category.
    fn list_exercises(&self, category_id: Option<i64>) -> Result<Vec<Exercise>>;

    /// Get an exercise by ID.
    fn get_exercise(&self, id: i64) -> Result<Option<Exercise>>;

    /// Find an exercise by name (case-insensitive, exact).
    fn find_exercise(&self, name: &str) -> Result<Option<Exercise>>;

    /// List weight or distance units ordered by name.
    fn list_units(&self, kind: UnitKind) -> Result<Vec<Unit>>;

    // --- Workout operations ---

    /// Insert a new set.
    ///
    /// # Errors
    ///
    /// Returns `FitlogError::Validation` if:
    /// - Date is missing
    /// - Exercise or unit does not exist
    /// - Required measurement fields are missing, or fields of another
    ///   measurement type are present
    /// - The time string is not `H+:MM:SS`
    fn create_workout(&mut self, draft: &NewWorkout) -> Result<WorkoutDetail>;

    /// Get a set by ID.
    ///
    /// Returns `Ok(Some(workout))` if found, `Ok(None)` if not found.
    fn get_workout(&self, id: i64) -> Result<Option<WorkoutDetail>>;

    /// Apply a partial update. Fields the patch leaves unset keep their values.
    ///
    /// # Errors
    ///
    /// Returns `FitlogError::NotFound` if the set does not exist, and
    /// `FitlogError::Validation` if the merged set is invalid.
    fn update_workout(&mut self, id: i64, patch: &WorkoutPatch) -> Result<WorkoutDetail>;

    /// Delete a set.
    ///
    /// # Errors
    ///
    /// Returns `FitlogError::NotFound` if the set does not exist (including a
    /// second delete of the same ID).
    fn delete_workout(&mut self, id: i64) -> Result<()>;

    /// Sets logged on one date, in creation order.
    fn list_by_date(&self, date: NaiveDate) -> Result<Vec<WorkoutDetail>>;

    /// Sets for one exercise, newest date first, creation order within a date.
    fn list_by_exercise(&self, exercise_id: i64) -> Result<Vec<WorkoutDetail>>;

    /// Sets between two dates (inclusive), ordered by date then creation order.
    fn list_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<WorkoutDetail>>;

    /// One page of all sets, newest date first, then highest ID first.
    fn list_page(&self, offset: usize, limit: usize) -> Result<WorkoutPage>;

    // --- Daily comments ---

    /// Get the comment for a date.
    fn get_comment(&self, date: NaiveDate) -> Result<Option<String>>;

    /// Create, update or delete the comment for a date.
    ///
    /// Blank text deletes an existing comment instead of storing it.
    fn upsert_comment(&mut self, date: NaiveDate, text: &str) -> Result<CommentChange>;

    /// Comments between two dates (inclusive), ordered by date.
    fn list_comments(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Comment>>;

    // --- Maintenance operations ---

    /// Check database integrity.
    ///
    /// Verifies:
    /// - SQLite page integrity
    /// - Foreign key relationships
    /// - Denormalized workout categories
    /// - Measurement type names
    fn check_integrity(&self) -> Result<()>;
}
