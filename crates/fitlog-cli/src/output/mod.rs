//! Output formatting helpers for the CLI.
//!
//! JSON shapes for scripts and text rendering for sets in plain or pretty
//! mode.

mod json;
mod text;

pub use json::{print_json, workout_json, workouts_json};
pub use text::{print_workout_receipt, set_line, workout_rows, WORKOUT_COLUMNS};
