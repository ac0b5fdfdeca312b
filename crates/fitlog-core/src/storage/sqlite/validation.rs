//! Set and comment validation.

use crate::error::{FitlogError, Result};
use crate::storage::types::{MeasurementType, Workout};

/// Maximum bytes for a set or day comment.
pub const MAX_COMMENT_BYTES: usize = 4 * 1024;

/// Upper bound on reps for a single set.
pub const MAX_REPS: i64 = 100_000;

/// Check a duration string against `H+:MM:SS`.
///
/// Hours take one or more digits; minutes and seconds are `00`-`59`.
pub fn is_valid_time(value: &str) -> bool {
    let mut parts = value.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    let sexagesimal = |part: &str| {
        let bytes = part.as_bytes();
        bytes.len() == 2 && (b'0'..=b'5').contains(&bytes[0]) && bytes[1].is_ascii_digit()
    };

    !hours.is_empty()
        && hours.bytes().all(|b| b.is_ascii_digit())
        && sexagesimal(minutes)
        && sexagesimal(seconds)
}

/// Validate a time string, returning it unchanged.
pub fn validate_time(value: &str) -> Result<&str> {
    if is_valid_time(value) {
        Ok(value)
    } else {
        Err(FitlogError::Validation(format!(
            "Invalid time '{}' (expected H:MM:SS, e.g. 00:30:00)",
            value
        )))
    }
}

/// Trim a comment; blank comments become `None`.
pub fn normalize_comment(comment: Option<&str>) -> Result<Option<String>> {
    let Some(trimmed) = comment.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    if trimmed.len() > MAX_COMMENT_BYTES {
        return Err(FitlogError::Validation(format!(
            "Comment too long (max {} bytes)",
            MAX_COMMENT_BYTES
        )));
    }
    Ok(Some(trimmed.to_string()))
}

/// Enforce measurement-specific field rules on a fully merged set.
///
/// - `reps`: reps required; weight and weight unit travel together
/// - `distance`: distance and distance unit required; time optional
/// - `time`: time required
///
/// Fields that belong to another measurement type are rejected.
pub fn validate_measurement(workout: &Workout, kind: MeasurementType) -> Result<()> {
    let reject = |field: &str| {
        Err(FitlogError::Validation(format!(
            "'{}' is not recorded for {} exercises",
            field, kind
        )))
    };

    match kind {
        MeasurementType::Reps => {
            let Some(reps) = workout.reps else {
                return Err(FitlogError::Validation(
                    "Reps are required for this exercise".to_string(),
                ));
            };
            if reps <= 0 {
                return Err(FitlogError::Validation(
                    "Reps must be greater than zero".to_string(),
                ));
            }
            if reps > MAX_REPS {
                return Err(FitlogError::Validation(format!(
                    "Reps cannot exceed {}",
                    MAX_REPS
                )));
            }
            match (workout.weight, workout.weight_unit_id) {
                (Some(weight), Some(_)) => check_non_negative("Weight", weight)?,
                (None, None) => {}
                (Some(_), None) => {
                    return Err(FitlogError::Validation(
                        "Weight requires a weight unit".to_string(),
                    ))
                }
                (None, Some(_)) => {
                    return Err(FitlogError::Validation(
                        "Weight unit given without a weight".to_string(),
                    ))
                }
            }
            if workout.distance.is_some() || workout.distance_unit_id.is_some() {
                return reject("distance");
            }
            if workout.time.is_some() {
                return reject("time");
            }
        }
        MeasurementType::Distance => {
            let (Some(distance), Some(_)) = (workout.distance, workout.distance_unit_id) else {
                return Err(FitlogError::Validation(
                    "Distance and distance unit are required for this exercise".to_string(),
                ));
            };
            check_non_negative("Distance", distance)?;
            if let Some(time) = workout.time.as_deref() {
                validate_time(time)?;
            }
            if workout.reps.is_some() {
                return reject("reps");
            }
            if workout.weight.is_some() || workout.weight_unit_id.is_some() {
                return reject("weight");
            }
        }
        MeasurementType::Time => {
            let Some(time) = workout.time.as_deref() else {
                return Err(FitlogError::Validation(
                    "Time is required for this exercise".to_string(),
                ));
            };
            validate_time(time)?;
            if workout.reps.is_some() {
                return reject("reps");
            }
            if workout.weight.is_some() || workout.weight_unit_id.is_some() {
                return reject("weight");
            }
            if workout.distance.is_some() || workout.distance_unit_id.is_some() {
                return reject("distance");
            }
        }
    }

    Ok(())
}

/// Clear fields that do not belong to `kind`.
///
/// Used when an update moves a set to an exercise with a different
/// measurement type.
pub fn strip_foreign_fields(workout: &mut Workout, kind: MeasurementType) {
    match kind {
        MeasurementType::Reps => {
            workout.distance = None;
            workout.distance_unit_id = None;
            workout.time = None;
        }
        MeasurementType::Distance => {
            workout.reps = None;
            workout.weight = None;
            workout.weight_unit_id = None;
        }
        MeasurementType::Time => {
            workout.reps = None;
            workout.weight = None;
            workout.weight_unit_id = None;
            workout.distance = None;
            workout.distance_unit_id = None;
        }
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FitlogError::Validation(format!(
            "{} must be a non-negative number",
            field
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn blank() -> Workout {
        Workout {
            id: 0,
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            exercise_id: 1,
            category_id: 1,
            weight: None,
            weight_unit_id: None,
            reps: None,
            distance: None,
            distance_unit_id: None,
            time: None,
            comment: None,
        }
    }

    #[test]
    fn test_time_pattern() {
        for ok in ["0:00:00", "00:30:00", "1:05:59", "123:00:01"] {
            assert!(is_valid_time(ok), "{ok} should be valid");
        }
        for bad in ["", "30:00", "00:60:00", "00:00:60", "a:00:00", "00:0:00", "1:00:00:00", ":00:00"] {
            assert!(!is_valid_time(bad), "{bad} should be invalid");
        }
    }

    #[test]
    fn test_reps_rules() {
        let mut set = blank();
        assert!(validate_measurement(&set, MeasurementType::Reps).is_err());

        set.reps = Some(MAX_REPS + 1);
        let err = validate_measurement(&set, MeasurementType::Reps).unwrap_err();
        assert!(err.to_string().contains("cannot exceed"));

        set.reps = Some(MAX_REPS);
        assert!(validate_measurement(&set, MeasurementType::Reps).is_ok());

        set.reps = Some(10);
        assert!(validate_measurement(&set, MeasurementType::Reps).is_ok());

        set.weight = Some(20.0);
        let err = validate_measurement(&set, MeasurementType::Reps).unwrap_err();
        assert!(err.to_string().contains("weight unit"));

        set.weight_unit_id = Some(1);
        assert!(validate_measurement(&set, MeasurementType::Reps).is_ok());

        set.time = Some("00:01:00".to_string());
        assert!(validate_measurement(&set, MeasurementType::Reps).is_err());
    }

    #[test]
    fn test_distance_rules() {
        let mut set = blank();
        set.distance = Some(5.0);
        assert!(validate_measurement(&set, MeasurementType::Distance).is_err());

        set.distance_unit_id = Some(1);
        assert!(validate_measurement(&set, MeasurementType::Distance).is_ok());

        set.time = Some("30:00".to_string());
        assert!(validate_measurement(&set, MeasurementType::Distance).is_err());

        set.time = Some("00:30:00".to_string());
        assert!(validate_measurement(&set, MeasurementType::Distance).is_ok());

        set.distance = Some(-1.0);
        assert!(validate_measurement(&set, MeasurementType::Distance).is_err());
    }

    #[test]
    fn test_time_rules() {
        let mut set = blank();
        assert!(validate_measurement(&set, MeasurementType::Time).is_err());

        set.time = Some("0:01:30".to_string());
        assert!(validate_measurement(&set, MeasurementType::Time).is_ok());

        set.reps = Some(3);
        assert!(validate_measurement(&set, MeasurementType::Time).is_err());
    }

    #[test]
    fn test_strip_foreign_fields() {
        let mut set = blank();
        set.reps = Some(10);
        set.weight = Some(20.0);
        set.weight_unit_id = Some(1);
        set.time = Some("00:10:00".to_string());

        strip_foreign_fields(&mut set, MeasurementType::Time);

        assert_eq!(set.reps, None);
        assert_eq!(set.weight, None);
        assert_eq!(set.time.as_deref(), Some("00:10:00"));
    }

    #[test]
    fn test_normalize_comment() {
        assert_eq!(normalize_comment(None).unwrap(), None);
        assert_eq!(normalize_comment(Some("   ")).unwrap(), None);
        assert_eq!(
            normalize_comment(Some("  heavy day ")).unwrap().as_deref(),
            Some("heavy day")
        );
        let long = "x".repeat(MAX_COMMENT_BYTES + 1);
        assert!(normalize_comment(Some(&long)).is_err());
    }
}
