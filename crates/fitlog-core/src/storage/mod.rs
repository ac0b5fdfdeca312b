//! Storage layer for the workout log.
//!
//! The [`WorkoutStore`] trait is the seam; [`SqliteStorage`] is the only
//! implementation.

mod sqlite;
mod traits;
mod types;

pub use sqlite::{validation, SqliteStorage};
pub use traits::WorkoutStore;
pub use types::{
    Category, Comment, CommentChange, Exercise, MeasurementType, NewWorkout, StoreMetadata, Unit,
    UnitKind, Workout, WorkoutDetail, WorkoutPage, WorkoutPatch,
};
