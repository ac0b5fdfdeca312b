use fitlog_core::aggregate::{exercise_stats, format_number, progress_series};
use fitlog_core::storage::MeasurementType;
use fitlog_core::WorkoutStore;

use crate::app::AppContext;
use crate::cli::ProgressArgs;
use crate::helpers::{resolve_exercise, window_from_args};
use crate::output::print_json;
use crate::ui::{bar, blank_line, header, hint, kv, print, simple_table, Column};

const BAR_WIDTH: usize = 30;

pub fn handle_progress(ctx: &AppContext, args: &ProgressArgs) -> anyhow::Result<()> {
    let today = ctx.today();
    let window = window_from_args(
        args.range,
        args.since.as_deref(),
        args.until.as_deref(),
        today,
    )?;

    let storage = ctx.open_storage()?;
    let exercise = resolve_exercise(&storage, &args.exercise)?;
    let kind = exercise.measurement_type;

    // Records cover every set; only the series is windowed.
    let sets = storage.list_by_exercise(exercise.id)?;
    let stats = exercise_stats(&sets, kind);
    let points = progress_series(&sets, kind, window, today);
    let bounds = window.bounds(today);

    let ui = ctx.ui_context(args.output.json, args.output.format.as_deref());
    if ui.mode.is_json() {
        return print_json(&serde_json::json!({
            "exercise": exercise,
            "range": bounds.map(|(start, end)| serde_json::json!({ "start": start, "end": end })),
            "stats": stats,
            "label": points.first().map(|p| p.label),
            "points": points,
        }));
    }

    if !ctx.quiet() {
        let range = match bounds {
            Some((start, end)) => format!("{} to {}", start, end),
            None => "all time".to_string(),
        };
        print(&ui, &header(&ui, "progress", Some(&format!("{}, {}", exercise.name, range))));
    }

    print(&ui, &kv(&ui, "Total Sets", &stats.total_sets.to_string()));
    print(&ui, &kv(&ui, "Workout Days", &stats.workout_days.to_string()));
    match kind {
        MeasurementType::Reps => {
            if let Some(max) = stats.max_weight {
                print(&ui, &kv(&ui, "Max Weight", &format_number(max)));
            }
            if let Some(max) = stats.max_reps {
                print(&ui, &kv(&ui, "Max Reps", &max.to_string()));
            }
        }
        MeasurementType::Distance => {
            if let Some(max) = stats.max_distance {
                print(&ui, &kv(&ui, "Max Distance", &format_number(max)));
            }
        }
        MeasurementType::Time => {}
    }

    if points.is_empty() {
        if !ctx.quiet() {
            print(&ui, &hint(&ui, "No sets in this range. Try `--range all`."));
        }
        return Ok(());
    }

    blank_line(&ui);
    let label = points[0].label;
    let max = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|p| {
            let mut row = vec![p.date.to_string(), format_number(p.value)];
            if ui.mode.is_pretty() {
                row.push(bar(&ui, p.value, max, BAR_WIDTH));
            }
            row
        })
        .collect();
    let columns = if ui.mode.is_pretty() {
        vec![Column::new("Date"), Column::new(label), Column::new("")]
    } else {
        print(&ui, &kv(&ui, "Metric", label));
        vec![Column::new("Date"), Column::new(label)]
    };
    print(&ui, &simple_table(&ui, &columns, &rows));
    Ok(())
}
