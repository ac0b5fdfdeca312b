use fitlog_core::aggregate::{daily_stats, group_by_exercise};
use fitlog_core::WorkoutStore;

use crate::app::AppContext;
use crate::cli::DayArgs;
use crate::helpers::parse_date;
use crate::output::{print_json, set_line, workouts_json};
use crate::ui::format::{day_label, format_date, plural};
use crate::ui::{blank_line, header, hint, kv, print, section};

pub fn handle_day(ctx: &AppContext, args: &DayArgs) -> anyhow::Result<()> {
    let today = ctx.today();
    let date = match args.date.as_deref() {
        Some(value) => parse_date(value, today)?,
        None => today,
    };

    let storage = ctx.open_storage()?;
    let sets = storage.list_by_date(date)?;
    let groups = group_by_exercise(&sets);
    let stats = daily_stats(&groups);
    let comment = storage.get_comment(date)?;

    let ui = ctx.ui_context(args.output.json, args.output.format.as_deref());
    if ui.mode.is_json() {
        let exercises: Vec<serde_json::Value> = groups
            .iter()
            .map(|g| {
                serde_json::json!({
                    "exercise_id": g.exercise_id,
                    "exercise_name": g.exercise_name,
                    "category_name": g.category_name,
                    "measurement_type": g.measurement_type,
                    "sets": workouts_json(&g.sets),
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "date": date,
            "stats": stats,
            "comment": comment,
            "exercises": exercises,
        }));
    }

    if !ctx.quiet() {
        let label = format!(
            "{}, {}",
            format_date(date, ui.mode.is_pretty()),
            day_label(date, today)
        );
        print(&ui, &header(&ui, "day", Some(&label)));
        print(&ui, &kv(&ui, "Exercises", &stats.exercise_count.to_string()));
        print(&ui, &kv(&ui, "Sets", &stats.set_count.to_string()));
        if let Some(ref text) = comment {
            print(&ui, &kv(&ui, "Comment", text));
        }
    }

    if groups.is_empty() {
        if !ctx.quiet() {
            print(&ui, &hint(&ui, "No sets logged. Add one with `fitlog add <EXERCISE>`."));
        }
        return Ok(());
    }

    for group in &groups {
        blank_line(&ui);
        let detail = format!(
            "{} \u{00B7} {}",
            group.category_name,
            plural(group.sets.len(), "set", "sets")
        );
        print(&ui, &section(&ui, &group.exercise_name, Some(&detail)));
        for set in &group.sets {
            print(&ui, &set_line(&ui, set));
        }
    }
    Ok(())
}
