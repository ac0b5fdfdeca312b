//! Grouping and aggregation over flat workout lists.
//!
//! Everything here is pure: inputs are query results, outputs are new values,
//! and malformed data degrades to zero instead of failing.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::warn;

use crate::storage::{MeasurementType, WorkoutDetail};

/// Sets of one exercise, in the order they were passed in.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseGroup {
    pub exercise_id: i64,
    pub exercise_name: String,
    pub category_name: String,
    pub measurement_type: MeasurementType,
    pub sets: Vec<WorkoutDetail>,
}

/// Sets logged on one date.
#[derive(Debug, Clone, Serialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub sets: Vec<WorkoutDetail>,
}

/// Counters shown above a day's workout list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyStats {
    pub exercise_count: usize,
    pub set_count: usize,
}

/// One point of a progress chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub label: &'static str,
}

/// Lifetime records for one exercise.
///
/// Maxima are only filled in for the measurement types they apply to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseStats {
    pub total_sets: usize,
    pub workout_days: usize,
    pub max_weight: Option<f64>,
    pub max_reps: Option<i64>,
    pub max_distance: Option<f64>,
}

pub const LABEL_VOLUME: &str = "Volume (weight×reps)";
pub const LABEL_TOTAL_REPS: &str = "Total Reps";
pub const LABEL_SPEED: &str = "Speed (km/min)";
pub const LABEL_TOTAL_DISTANCE: &str = "Total Distance";
pub const LABEL_SETS: &str = "Sets Completed";

/// Date filter applied before computing a progress series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateWindow {
    #[default]
    Last30,
    Last90,
    All,
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl DateWindow {
    /// Inclusive bounds relative to `today`; `None` keeps every set.
    pub fn bounds(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            DateWindow::Last30 => Some((today - Duration::days(30), today)),
            DateWindow::Last90 => Some((today - Duration::days(90), today)),
            DateWindow::All => None,
            DateWindow::Custom { start: None, .. } => None,
            DateWindow::Custom {
                start: Some(start),
                end,
            } => Some((start, end.unwrap_or(today))),
        }
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self.bounds(today) {
            Some((start, end)) => date >= start && date <= end,
            None => true,
        }
    }
}

/// Group sets by exercise, keeping first-seen exercise order.
pub fn group_by_exercise(sets: &[WorkoutDetail]) -> Vec<ExerciseGroup> {
    let mut groups: Vec<ExerciseGroup> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for set in sets {
        let slot = *index.entry(set.exercise_id()).or_insert_with(|| {
            groups.push(ExerciseGroup {
                exercise_id: set.exercise_id(),
                exercise_name: set.exercise_name.clone(),
                category_name: set.category_name.clone(),
                measurement_type: set.measurement_type,
                sets: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].sets.push(set.clone());
    }

    groups
}

/// Group sets by date, newest date first.
pub fn group_by_date(sets: &[WorkoutDetail]) -> Vec<DateGroup> {
    let mut by_date: BTreeMap<NaiveDate, Vec<WorkoutDetail>> = BTreeMap::new();
    for set in sets {
        by_date.entry(set.date()).or_default().push(set.clone());
    }

    by_date
        .into_iter()
        .rev()
        .map(|(date, sets)| DateGroup { date, sets })
        .collect()
}

pub fn daily_stats(groups: &[ExerciseGroup]) -> DailyStats {
    DailyStats {
        exercise_count: groups.len(),
        set_count: groups.iter().map(|g| g.sets.len()).sum(),
    }
}

/// Render a number the way a browser prints it: `5.0` is `5`, `22.5` stays.
///
/// Magnitudes of `1e21` and up, or below `1e-6`, switch to exponent form
/// (`1e+21`, `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude.is_finite() && (magnitude >= 1e21 || magnitude < 1e-6) {
        let exp = format!("{:e}", value);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        };
    }
    value.to_string()
}

/// One-line summary of a set, e.g. `20 kg × 10 reps` or `5 km in 00:30:00`.
pub fn format_set_summary(set: &WorkoutDetail) -> String {
    let workout = &set.workout;
    match set.measurement_type {
        MeasurementType::Reps => {
            let reps = workout.reps.unwrap_or(0);
            match workout.weight.filter(|w| *w != 0.0) {
                Some(weight) => format!(
                    "{} {} × {} reps",
                    format_number(weight),
                    set.weight_unit_name.as_deref().unwrap_or(""),
                    reps
                ),
                None => format!("{} reps", reps),
            }
        }
        MeasurementType::Distance => {
            let mut summary = format!(
                "{} {}",
                format_number(workout.distance.unwrap_or(0.0)),
                set.distance_unit_name.as_deref().unwrap_or("")
            );
            if let Some(time) = workout.time.as_deref().filter(|t| !t.is_empty()) {
                summary.push_str(" in ");
                summary.push_str(time);
            }
            summary
        }
        MeasurementType::Time => workout.time.clone().unwrap_or_default(),
    }
}

/// Convert a duration string to minutes.
///
/// `H:MM:SS` and `MM:SS` are accepted; anything else counts as zero.
pub fn time_to_minutes(value: &str) -> f64 {
    let parts: Option<Vec<f64>> = value
        .trim()
        .split(':')
        .map(|p| p.trim().parse::<f64>().ok().filter(|n| n.is_finite()))
        .collect();

    match parts.as_deref() {
        Some([hours, minutes, seconds]) => hours * 60.0 + minutes + seconds / 60.0,
        Some([minutes, seconds]) => minutes + seconds / 60.0,
        Some([minutes]) => *minutes,
        _ => {
            warn!(time = value, "unparsable duration counted as zero");
            0.0
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn day_point(date: NaiveDate, sets: &[&WorkoutDetail], kind: MeasurementType) -> ProgressPoint {
    let (value, label) = match kind {
        MeasurementType::Reps => {
            let has_weight = sets.iter().any(|s| s.workout.weight.unwrap_or(0.0) > 0.0);
            if has_weight {
                let volume = sets
                    .iter()
                    .map(|s| s.workout.weight.unwrap_or(0.0) * s.workout.reps.unwrap_or(0) as f64)
                    .sum();
                (volume, LABEL_VOLUME)
            } else {
                let reps = sets
                    .iter()
                    .map(|s| s.workout.reps.unwrap_or(0))
                    .fold(0i64, i64::saturating_add);
                (reps as f64, LABEL_TOTAL_REPS)
            }
        }
        MeasurementType::Distance => {
            let total_distance: f64 = sets.iter().map(|s| s.workout.distance.unwrap_or(0.0)).sum();
            let timed: Vec<&str> = sets
                .iter()
                .filter_map(|s| s.workout.time.as_deref())
                .filter(|t| !t.is_empty())
                .collect();
            if timed.is_empty() {
                (total_distance, LABEL_TOTAL_DISTANCE)
            } else {
                let minutes: f64 = timed.iter().map(|t| time_to_minutes(t)).sum();
                let speed = if minutes > 0.0 {
                    total_distance / minutes
                } else {
                    total_distance
                };
                (speed, LABEL_SPEED)
            }
        }
        MeasurementType::Time => (sets.len() as f64, LABEL_SETS),
    };

    ProgressPoint {
        date,
        value: round2(value),
        label,
    }
}

/// Per-day progress values for one exercise, oldest date first.
pub fn progress_series(
    sets: &[WorkoutDetail],
    kind: MeasurementType,
    window: DateWindow,
    today: NaiveDate,
) -> Vec<ProgressPoint> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&WorkoutDetail>> = BTreeMap::new();
    for set in sets.iter().filter(|s| window.contains(s.date(), today)) {
        by_date.entry(set.date()).or_default().push(set);
    }

    by_date
        .into_iter()
        .map(|(date, day)| day_point(date, &day, kind))
        .collect()
}

/// Lifetime records for an exercise over every set passed in.
pub fn exercise_stats(sets: &[WorkoutDetail], kind: MeasurementType) -> ExerciseStats {
    let workout_days = sets.iter().map(|s| s.date()).collect::<HashSet<_>>().len();
    let max_f64 = |values: Vec<f64>| values.into_iter().reduce(f64::max);

    let (max_weight, max_reps, max_distance) = match kind {
        MeasurementType::Reps => (
            max_f64(sets.iter().map(|s| s.workout.weight.unwrap_or(0.0)).collect()),
            sets.iter().map(|s| s.workout.reps.unwrap_or(0)).max(),
            None,
        ),
        MeasurementType::Distance => (
            None,
            None,
            max_f64(sets.iter().map(|s| s.workout.distance.unwrap_or(0.0)).collect()),
        ),
        MeasurementType::Time => (None, None, None),
    };

    ExerciseStats {
        total_sets: sets.len(),
        workout_days,
        max_weight,
        max_reps,
        max_distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Workout;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn set(id: i64, day: &str, exercise_id: i64, kind: MeasurementType) -> WorkoutDetail {
        WorkoutDetail {
            workout: Workout {
                id,
                date: date(day),
                exercise_id,
                category_id: 1,
                weight: None,
                weight_unit_id: None,
                reps: None,
                distance: None,
                distance_unit_id: None,
                time: None,
                comment: None,
            },
            exercise_name: format!("Exercise {}", exercise_id),
            category_name: "Chest".to_string(),
            measurement_type: kind,
            weight_unit_name: None,
            distance_unit_name: None,
        }
    }

    fn lift(id: i64, day: &str, weight: Option<f64>, reps: i64) -> WorkoutDetail {
        let mut s = set(id, day, 1, MeasurementType::Reps);
        s.workout.weight = weight;
        s.workout.weight_unit_id = weight.map(|_| 1);
        s.weight_unit_name = weight.map(|_| "kg".to_string());
        s.workout.reps = Some(reps);
        s
    }

    fn run(id: i64, day: &str, distance: f64, time: Option<&str>) -> WorkoutDetail {
        let mut s = set(id, day, 9, MeasurementType::Distance);
        s.workout.distance = Some(distance);
        s.workout.distance_unit_id = Some(1);
        s.distance_unit_name = Some("km".to_string());
        s.workout.time = time.map(str::to_string);
        s
    }

    #[test]
    fn test_group_by_exercise_keeps_every_set_in_first_seen_order() {
        let sets = vec![
            set(1, "2024-03-05", 7, MeasurementType::Reps),
            set(2, "2024-03-05", 3, MeasurementType::Reps),
            set(3, "2024-03-05", 7, MeasurementType::Reps),
            set(4, "2024-03-05", 5, MeasurementType::Time),
        ];

        let groups = group_by_exercise(&sets);

        let order: Vec<i64> = groups.iter().map(|g| g.exercise_id).collect();
        assert_eq!(order, vec![7, 3, 5]);
        assert_eq!(groups.iter().map(|g| g.sets.len()).sum::<usize>(), sets.len());
        for group in &groups {
            assert!(group.sets.iter().all(|s| s.exercise_id() == group.exercise_id));
        }
        let ids: Vec<i64> = groups[0].sets.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_group_by_exercise_empty() {
        assert!(group_by_exercise(&[]).is_empty());
        assert_eq!(
            daily_stats(&[]),
            DailyStats {
                exercise_count: 0,
                set_count: 0
            }
        );
    }

    #[test]
    fn test_group_by_date_newest_first() {
        let sets = vec![
            set(1, "2024-03-01", 1, MeasurementType::Reps),
            set(2, "2024-03-12", 1, MeasurementType::Reps),
            set(3, "2024-03-01", 1, MeasurementType::Reps),
        ];

        let groups = group_by_date(&sets);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, date("2024-03-12"));
        let ids: Vec<i64> = groups[1].sets.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_daily_stats_counts() {
        let sets = vec![
            set(1, "2024-03-05", 1, MeasurementType::Reps),
            set(2, "2024-03-05", 2, MeasurementType::Reps),
            set(3, "2024-03-05", 1, MeasurementType::Reps),
        ];
        let stats = daily_stats(&group_by_exercise(&sets));
        assert_eq!(stats.exercise_count, 2);
        assert_eq!(stats.set_count, 3);
    }

    #[test]
    fn test_set_summary_formats() {
        assert_eq!(format_set_summary(&lift(1, "2024-03-05", Some(20.0), 10)), "20 kg × 10 reps");
        assert_eq!(format_set_summary(&lift(1, "2024-03-05", Some(22.5), 8)), "22.5 kg × 8 reps");
        assert_eq!(format_set_summary(&lift(1, "2024-03-05", None, 12)), "12 reps");
        assert_eq!(format_set_summary(&lift(1, "2024-03-05", Some(0.0), 12)), "12 reps");

        assert_eq!(
            format_set_summary(&run(1, "2024-03-05", 5.0, Some("00:30:00"))),
            "5 km in 00:30:00"
        );
        assert_eq!(format_set_summary(&run(1, "2024-03-05", 3.2, None)), "3.2 km");

        let mut plank = set(1, "2024-03-05", 4, MeasurementType::Time);
        plank.workout.time = Some("0:01:30".to_string());
        assert_eq!(format_set_summary(&plank), "0:01:30");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(22.5), "22.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(100.25), "100.25");
    }

    #[test]
    fn test_format_number_exponent_ranges() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(2.5e22), "2.5e+22");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-1.5e-7), "-1.5e-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn test_progress_volume() {
        let today = date("2024-03-10");
        let sets = vec![
            lift(1, "2024-03-05", Some(20.0), 10),
            lift(2, "2024-03-05", Some(25.0), 8),
        ];

        let series = progress_series(&sets, MeasurementType::Reps, DateWindow::Last30, today);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, 400.0);
        assert_eq!(series[0].label, "Volume (weight×reps)");
    }

    #[test]
    fn test_progress_total_reps() {
        let today = date("2024-03-10");
        let sets = vec![lift(1, "2024-03-05", None, 10), lift(2, "2024-03-05", None, 12)];

        let series = progress_series(&sets, MeasurementType::Reps, DateWindow::All, today);

        assert_eq!(series[0].value, 22.0);
        assert_eq!(series[0].label, "Total Reps");
    }

    #[test]
    fn test_progress_total_reps_saturates() {
        let today = date("2024-03-10");
        let sets = vec![
            lift(1, "2024-03-05", None, i64::MAX),
            lift(2, "2024-03-05", None, i64::MAX),
        ];

        let series = progress_series(&sets, MeasurementType::Reps, DateWindow::All, today);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, i64::MAX as f64);
        assert_eq!(series[0].label, "Total Reps");
    }

    #[test]
    fn test_progress_speed_and_distance() {
        let today = date("2024-03-10");
        let sets = vec![
            run(1, "2024-03-02", 5.0, Some("00:30:00")),
            run(2, "2024-03-02", 5.0, Some("00:30:00")),
            run(3, "2024-03-01", 4.0, None),
            run(4, "2024-03-03", 1.0, Some("1:00:00")),
        ];

        let series = progress_series(&sets, MeasurementType::Distance, DateWindow::All, today);

        let dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![date("2024-03-01"), date("2024-03-02"), date("2024-03-03")]);
        assert_eq!(series[0].label, "Total Distance");
        assert_eq!(series[0].value, 4.0);
        assert_eq!(series[1].label, "Speed (km/min)");
        assert_eq!(series[1].value, 0.17);
        assert_eq!(series[2].value, 0.02);
    }

    #[test]
    fn test_progress_speed_with_zero_minutes_falls_back_to_distance() {
        let today = date("2024-03-10");
        let sets = vec![run(1, "2024-03-02", 5.0, Some("garbage"))];

        let series = progress_series(&sets, MeasurementType::Distance, DateWindow::All, today);

        assert_eq!(series[0].label, "Speed (km/min)");
        assert_eq!(series[0].value, 5.0);
    }

    #[test]
    fn test_progress_time_counts_sets() {
        let today = date("2024-03-10");
        let mut a = set(1, "2024-03-04", 4, MeasurementType::Time);
        a.workout.time = Some("0:01:00".to_string());
        let b = a.clone();

        let series = progress_series(&[a, b], MeasurementType::Time, DateWindow::All, today);

        assert_eq!(series[0].value, 2.0);
        assert_eq!(series[0].label, "Sets Completed");
    }

    #[test]
    fn test_date_windows() {
        let today = date("2024-06-30");
        let sets = vec![
            lift(1, "2024-01-01", None, 1),
            lift(2, "2024-04-15", None, 1),
            lift(3, "2024-06-20", None, 1),
        ];

        let count = |window| {
            progress_series(&sets, MeasurementType::Reps, window, today).len()
        };

        assert_eq!(count(DateWindow::Last30), 1);
        assert_eq!(count(DateWindow::Last90), 2);
        assert_eq!(count(DateWindow::All), 3);
        assert_eq!(count(DateWindow::Custom { start: None, end: None }), 3);
        assert_eq!(
            count(DateWindow::Custom {
                start: Some(date("2024-04-01")),
                end: Some(date("2024-04-30"))
            }),
            1
        );
        assert_eq!(
            count(DateWindow::Custom {
                start: Some(date("2024-04-01")),
                end: None
            }),
            2
        );
    }

    #[test]
    fn test_last_window_is_inclusive() {
        let today = date("2024-03-31");
        assert!(DateWindow::Last30.contains(date("2024-03-01"), today));
        assert!(DateWindow::Last30.contains(today, today));
        assert!(!DateWindow::Last30.contains(date("2024-02-29"), today));
        assert!(!DateWindow::Last30.contains(date("2024-04-01"), today));
    }

    #[test]
    fn test_time_to_minutes() {
        assert_eq!(time_to_minutes("00:30:00"), 30.0);
        assert_eq!(time_to_minutes("1:30:30"), 90.5);
        assert_eq!(time_to_minutes("12:30"), 12.5);
        assert_eq!(time_to_minutes("abc"), 0.0);
        assert_eq!(time_to_minutes("1:2:3:4"), 0.0);
    }

    #[test]
    fn test_exercise_stats() {
        let sets = vec![
            lift(1, "2024-03-01", Some(60.0), 5),
            lift(2, "2024-03-01", Some(70.0), 3),
            lift(3, "2024-03-04", None, 12),
        ];

        let stats = exercise_stats(&sets, MeasurementType::Reps);

        assert_eq!(stats.total_sets, 3);
        assert_eq!(stats.workout_days, 2);
        assert_eq!(stats.max_weight, Some(70.0));
        assert_eq!(stats.max_reps, Some(12));
        assert_eq!(stats.max_distance, None);

        let empty = exercise_stats(&[], MeasurementType::Distance);
        assert_eq!(empty.total_sets, 0);
        assert_eq!(empty.max_distance, None);
    }
}
