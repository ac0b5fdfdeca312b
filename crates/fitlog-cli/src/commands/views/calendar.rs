use fitlog_core::calendar::{workout_counts, CalendarMonth, YearMonth};
use fitlog_core::WorkoutStore;

use crate::app::AppContext;
use crate::cli::CalendarArgs;
use crate::errors::CliError;
use crate::helpers::parse_month;
use crate::output::print_json;
use crate::ui::theme::{styled, styles, MARK};
use crate::ui::{blank_line, header, hint, kv, print, UiContext};

const MAX_MONTH_STEPS: u32 = 1200;
const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub fn handle_calendar(ctx: &AppContext, args: &CalendarArgs) -> anyhow::Result<()> {
    let today = ctx.today();
    let base = match args.month.as_deref() {
        Some(value) => parse_month(value)?,
        None => YearMonth::of(today),
    };
    let steps = args.prev.or(args.next).unwrap_or(0);
    if steps > MAX_MONTH_STEPS {
        return Err(CliError::invalid_input(format!(
            "Can move at most {} months at a time",
            MAX_MONTH_STEPS
        ))
        .into());
    }
    let shift = if args.prev.is_some() {
        -(steps as i32)
    } else {
        steps as i32
    };
    let month = base.offset(shift);

    let storage = ctx.open_storage()?;
    let sets = storage.list_by_date_range(month.first_day(), month.last_day())?;
    let counts = workout_counts(&sets);
    let calendar = CalendarMonth::build(month, &counts, today);
    let comments = storage.list_comments(month.first_day(), month.last_day())?;

    let ui = ctx.ui_context(args.output.json, args.output.format.as_deref());
    if ui.mode.is_json() {
        return print_json(&serde_json::json!({
            "month": month.to_string(),
            "title": calendar.title,
            "counts": counts,
            "total_sets": calendar.total_sets,
            "active_days": calendar.active_days,
            "days": calendar.days,
            "comments": comments,
        }));
    }

    if !ctx.quiet() {
        print(&ui, &header(&ui, "calendar", Some(&calendar.title)));
    }

    if ui.mode.is_pretty() {
        blank_line(&ui);
        for line in grid_lines(&ui, &calendar) {
            print(&ui, &line);
        }
        blank_line(&ui);
    } else {
        for day in calendar.days.iter().filter(|d| d.has_workout) {
            print(&ui, &format!("{} {}", day.date, day.count));
        }
    }

    if !ctx.quiet() {
        print(&ui, &kv(&ui, "Active Days", &calendar.active_days.to_string()));
        print(&ui, &kv(&ui, "Total Sets", &calendar.total_sets.to_string()));
        if ui.mode.is_pretty() {
            let prev = month.prev().to_string();
            let next = month.next().to_string();
            print(
                &ui,
                &hint(&ui, &format!("fitlog calendar {} / fitlog calendar {}", prev, next)),
            );
        }
    }
    Ok(())
}

/// Sunday-first month grid; days with sets carry a marker.
fn grid_lines(ui: &UiContext, calendar: &CalendarMonth) -> Vec<String> {
    let mut lines = vec![styled(&WEEKDAYS.join("  "), styles::dim(), ui.color)];
    for week in calendar.weeks() {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                None => "  ".to_string(),
                Some(day) => {
                    let number = format!("{:>2}", day.day);
                    if day.is_today {
                        styled(&number, styles::accent(), ui.color)
                    } else if day.has_workout {
                        styled(&number, styles::bold(), ui.color)
                    } else {
                        number
                    }
                }
            })
            .collect();
        let marks: Vec<&str> = week
            .iter()
            .map(|cell| match cell {
                Some(day) if day.has_workout => MARK.get(ui.unicode),
                _ => " ",
            })
            .collect();
        let row: Vec<String> = cells
            .iter()
            .zip(&marks)
            .map(|(cell, mark)| format!("{}{}", cell, styled(mark, styles::success(), ui.color)))
            .collect();
        lines.push(row.join(" ").trim_end().to_string());
    }
    lines
}
