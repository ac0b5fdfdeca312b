//! Month layout and per-day workout counts.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::FitlogError;
use crate::storage::WorkoutDetail;

/// A calendar month, e.g. `2024-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, FitlogError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(FitlogError::InvalidInput(format!(
                "Invalid month: {}-{:02}",
                year, month
            )));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Build a date in this month; callers keep `day` within range.
    fn date(&self, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or(NaiveDate::MIN)
    }

    pub fn first_day(&self) -> NaiveDate {
        self.date(1)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.date(self.days_in_month())
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next().date(1);
        next.pred_opt()
            .map(|last| last.day())
            .unwrap_or(31)
    }

    /// Weekday of the first day, 0 = Sunday.
    pub fn first_weekday(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Step forward (positive) or back (negative) by whole months.
    pub fn offset(&self, months: i32) -> Self {
        let mut current = *self;
        for _ in 0..months.unsigned_abs() {
            current = if months < 0 {
                current.prev()
            } else {
                current.next()
            };
        }
        current
    }

    /// Month name and year, e.g. `March 2024`.
    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = FitlogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || FitlogError::InvalidInput(format!("Invalid month '{}' (use YYYY-MM)", value));
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        YearMonth::new(year, month)
    }
}

/// Fold sets into `YYYY-MM-DD -> number of sets`.
pub fn workout_counts(sets: &[WorkoutDetail]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for set in sets {
        *counts
            .entry(set.date().format("%Y-%m-%d").to_string())
            .or_insert(0) += 1;
    }
    counts
}

/// One day in a rendered month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    /// 0 = Sunday
    pub weekday: u32,
    pub count: usize,
    pub has_workout: bool,
    pub is_today: bool,
}

/// A month grid with workout counts attached to each day.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarMonth {
    pub month: YearMonth,
    pub title: String,
    /// Blank cells before day 1 in a Sunday-first week
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
    pub total_sets: usize,
    pub active_days: usize,
}

impl CalendarMonth {
    pub fn build(month: YearMonth, counts: &BTreeMap<String, usize>, today: NaiveDate) -> Self {
        let days: Vec<DayCell> = (1..=month.days_in_month())
            .map(|day| {
                let date = month.date(day);
                let count = counts
                    .get(&date.format("%Y-%m-%d").to_string())
                    .copied()
                    .unwrap_or(0);
                DayCell {
                    day,
                    date,
                    weekday: date.weekday().num_days_from_sunday(),
                    count,
                    has_workout: count > 0,
                    is_today: date == today,
                }
            })
            .collect();

        let total_sets = days.iter().map(|d| d.count).sum();
        let active_days = days.iter().filter(|d| d.has_workout).count();

        Self {
            month,
            title: month.title(),
            leading_blanks: month.first_weekday(),
            days,
            total_sets,
            active_days,
        }
    }

    /// Days split into Sunday-first weeks; `None` pads before day 1 and after
    /// the last day.
    pub fn weeks(&self) -> Vec<Vec<Option<&DayCell>>> {
        let mut cells: Vec<Option<&DayCell>> = vec![None; self.leading_blanks as usize];
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(|week| week.to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MeasurementType, Workout};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn set_on(day: &str) -> WorkoutDetail {
        WorkoutDetail {
            workout: Workout {
                id: 1,
                date: date(day),
                exercise_id: 1,
                category_id: 1,
                weight: None,
                weight_unit_id: None,
                reps: Some(1),
                distance: None,
                distance_unit_id: None,
                time: None,
                comment: None,
            },
            exercise_name: "Pull Up".to_string(),
            category_name: "Back".to_string(),
            measurement_type: MeasurementType::Reps,
            weight_unit_name: None,
            distance_unit_name: None,
        }
    }

    #[test]
    fn test_workout_counts() {
        let sets = vec![set_on("2024-03-05"), set_on("2024-03-05"), set_on("2024-03-12")];

        let counts = workout_counts(&sets);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts["2024-03-05"], 2);
        assert_eq!(counts["2024-03-12"], 1);
    }

    #[test]
    fn test_month_bounds() {
        let march: YearMonth = "2024-03".parse().unwrap();
        assert_eq!(march.first_day(), date("2024-03-01"));
        assert_eq!(march.last_day(), date("2024-03-31"));
        assert_eq!(march.first_weekday(), 5);

        let feb = YearMonth::new(2024, 2).unwrap();
        assert_eq!(feb.days_in_month(), 29);
        assert_eq!(YearMonth::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(2024, 12).unwrap().last_day(), date("2024-12-31"));
    }

    #[test]
    fn test_navigation_wraps_years() {
        let jan = YearMonth::new(2024, 1).unwrap();
        assert_eq!(jan.prev().to_string(), "2023-12");
        assert_eq!(jan.prev().next(), jan);
        assert_eq!(jan.offset(-13).to_string(), "2022-12");
        assert_eq!(jan.offset(11).to_string(), "2024-12");
        assert_eq!(jan.offset(0), jan);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["2024-13", "2024-3", "24-03", "march", "2024-00", ""] {
            assert!(bad.parse::<YearMonth>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_build_marks_counts_and_today() {
        let month = YearMonth::new(2024, 3).unwrap();
        let counts = workout_counts(&[set_on("2024-03-05"), set_on("2024-03-05"), set_on("2024-03-12")]);

        let cal = CalendarMonth::build(month, &counts, date("2024-03-12"));

        assert_eq!(cal.title, "March 2024");
        assert_eq!(cal.days.len(), 31);
        assert_eq!(cal.leading_blanks, 5);
        assert_eq!(cal.total_sets, 3);
        assert_eq!(cal.active_days, 2);

        let fifth = &cal.days[4];
        assert_eq!(fifth.count, 2);
        assert!(fifth.has_workout);
        assert!(!fifth.is_today);
        assert_eq!(fifth.weekday, 2);

        let twelfth = &cal.days[11];
        assert!(twelfth.is_today);
        assert_eq!(twelfth.count, 1);

        assert!(!cal.days[0].has_workout);
    }

    #[test]
    fn test_weeks_are_padded() {
        let month = YearMonth::new(2024, 3).unwrap();
        let cal = CalendarMonth::build(month, &BTreeMap::new(), date("2024-01-01"));
        let weeks = cal.weeks();

        assert_eq!(weeks.len(), 6);
        assert!(weeks.iter().all(|w| w.len() == 7));
        assert!(weeks[0][4].is_none());
        assert_eq!(weeks[0][5].map(|d| d.day), Some(1));
    }
}
