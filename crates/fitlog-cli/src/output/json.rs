//! JSON output formatting for sets.

use serde::Serialize;

use fitlog_core::aggregate::format_set_summary;
use fitlog_core::storage::WorkoutDetail;

/// Pretty-print any serializable value to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Convert a set to JSON, adding its one-line summary.
pub fn workout_json(detail: &WorkoutDetail) -> serde_json::Value {
    let mut value = serde_json::to_value(detail).unwrap_or(serde_json::Value::Null);
    if let Some(map) = value.as_object_mut() {
        map.insert(
            "summary".to_string(),
            serde_json::Value::String(format_set_summary(detail)),
        );
    }
    value
}

/// Convert multiple sets to a JSON array.
pub fn workouts_json(details: &[WorkoutDetail]) -> Vec<serde_json::Value> {
    details.iter().map(workout_json).collect()
}
