//! Parsing helpers for dates, months, ranges and catalog lookups.

use chrono::{Duration, NaiveDate};

use fitlog_core::aggregate::DateWindow;
use fitlog_core::calendar::YearMonth;
use fitlog_core::storage::{Category, Exercise, Unit, UnitKind};
use fitlog_core::WorkoutStore;

use crate::cli::RangeArg;
use crate::errors::CliError;

/// Parse a date argument: `YYYY-MM-DD`, `today` or `yesterday`.
pub fn parse_date(value: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let trimmed = value.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "today" => return Ok(today),
        "yesterday" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        CliError::invalid_input(format!(
            "Invalid date (expected YYYY-MM-DD, today or yesterday): {}",
            value
        ))
        .into()
    })
}

/// Parse a `YYYY-MM` month argument.
pub fn parse_month(value: &str) -> anyhow::Result<YearMonth> {
    value
        .trim()
        .parse::<YearMonth>()
        .map_err(|_| CliError::invalid_input(format!("Invalid month (expected YYYY-MM): {}", value)).into())
}

/// Look up an exercise by numeric ID or case-insensitive name.
pub fn resolve_exercise<S: WorkoutStore>(store: &S, value: &str) -> anyhow::Result<Exercise> {
    let value = value.trim();
    if let Ok(id) = value.parse::<i64>() {
        if let Some(exercise) = store.get_exercise(id)? {
            return Ok(exercise);
        }
    }

    store.find_exercise(value)?.ok_or_else(|| {
        CliError::not_found(
            format!("Exercise not found: {}", value),
            "Hint: Run `fitlog exercises` to see available exercises.",
        )
        .into()
    })
}

/// Look up a category by name (case-insensitive).
pub fn resolve_category<S: WorkoutStore>(store: &S, value: &str) -> anyhow::Result<Category> {
    let wanted = value.trim();
    store
        .list_categories()?
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(wanted) || c.id.to_string() == wanted)
        .ok_or_else(|| {
            CliError::not_found(
                format!("Category not found: {}", wanted),
                "Hint: Run `fitlog categories` to see available categories.",
            )
            .into()
        })
}

/// Look up a weight or distance unit by name (case-insensitive).
pub fn resolve_unit<S: WorkoutStore>(store: &S, kind: UnitKind, name: &str) -> anyhow::Result<Unit> {
    let wanted = name.trim();
    store
        .list_units(kind)?
        .into_iter()
        .find(|u| u.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            let label = match kind {
                UnitKind::Weight => "weight",
                UnitKind::Distance => "distance",
            };
            CliError::not_found(
                format!("Unknown {} unit: {}", label, wanted),
                "Hint: Run `fitlog units` to see available units.",
            )
            .into()
        })
}

/// Build the progress date window from `--range`, `--since` and `--until`.
///
/// `--since`/`--until` without `--range` imply a custom range.
pub fn window_from_args(
    range: Option<RangeArg>,
    since: Option<&str>,
    until: Option<&str>,
    today: NaiveDate,
) -> anyhow::Result<DateWindow> {
    let custom = since.is_some() || until.is_some();
    match range {
        Some(RangeArg::Last30) | None if !custom => Ok(DateWindow::Last30),
        Some(RangeArg::Last90) => Ok(DateWindow::Last90),
        Some(RangeArg::All) => Ok(DateWindow::All),
        Some(RangeArg::Last30) => Err(CliError::invalid_input(
            "--since/--until need --range custom",
        )
        .into()),
        Some(RangeArg::Custom) | None => {
            let start = since.map(|s| parse_date(s, today)).transpose()?;
            let end = until.map(|s| parse_date(s, today)).transpose()?;
            if let (Some(start), Some(end)) = (start, end) {
                if start > end {
                    return Err(CliError::invalid_input(format!(
                        "Range start {} is after end {}",
                        start, end
                    ))
                    .into());
                }
            }
            Ok(DateWindow::Custom { start, end })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlog_core::storage::SqliteStorage;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_date_keywords() {
        let today = d("2024-03-01");
        assert_eq!(parse_date("today", today).unwrap(), today);
        assert_eq!(parse_date("Yesterday", today).unwrap(), d("2024-02-29"));
        assert_eq!(parse_date(" 2024-03-05 ", today).unwrap(), d("2024-03-05"));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("05/03/2024", d("2024-03-01")).unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_parse_month() {
        let month = parse_month("2024-02").unwrap();
        assert_eq!((month.year, month.month), (2024, 2));
        assert!(parse_month("2024-13").is_err());
    }

    #[test]
    fn test_resolve_exercise_by_name_and_id() {
        let store = SqliteStorage::open_in_memory().unwrap();
        let by_name = resolve_exercise(&store, "deadlift").unwrap();
        assert_eq!(by_name.name, "Deadlift");

        let by_id = resolve_exercise(&store, &by_name.id.to_string()).unwrap();
        assert_eq!(by_id, by_name);

        let err = resolve_exercise(&store, "Underwater Basket Weaving").unwrap_err();
        assert!(err.to_string().contains("fitlog exercises"));
    }

    #[test]
    fn test_resolve_unit_case_insensitive() {
        let store = SqliteStorage::open_in_memory().unwrap();
        assert_eq!(resolve_unit(&store, UnitKind::Weight, "KG").unwrap().name, "kg");
        assert!(resolve_unit(&store, UnitKind::Weight, "km").is_err());
    }

    #[test]
    fn test_resolve_category() {
        let store = SqliteStorage::open_in_memory().unwrap();
        assert_eq!(resolve_category(&store, "back").unwrap().name, "Back");
        assert!(resolve_category(&store, "Nope").is_err());
    }

    #[test]
    fn test_window_from_args() {
        let today = d("2024-03-31");
        assert_eq!(window_from_args(None, None, None, today).unwrap(), DateWindow::Last30);
        assert_eq!(
            window_from_args(Some(RangeArg::All), None, None, today).unwrap(),
            DateWindow::All
        );
        assert_eq!(
            window_from_args(None, Some("2024-03-01"), None, today).unwrap(),
            DateWindow::Custom {
                start: Some(d("2024-03-01")),
                end: None
            }
        );
        assert_eq!(
            window_from_args(Some(RangeArg::Custom), None, None, today).unwrap(),
            DateWindow::Custom {
                start: None,
                end: None
            }
        );
        assert!(window_from_args(None, Some("2024-03-10"), Some("2024-03-01"), today).is_err());
        assert!(window_from_args(Some(RangeArg::Last30), Some("2024-03-01"), None, today).is_err());
    }
}
