use fitlog_core::aggregate::group_by_date;
use fitlog_core::WorkoutStore;

use crate::app::AppContext;
use crate::cli::HistoryArgs;
use crate::helpers::resolve_exercise;
use crate::output::{print_json, set_line, workouts_json};
use crate::ui::format::{format_date, plural};
use crate::ui::{blank_line, header, hint, print, section};

pub fn handle_history(ctx: &AppContext, args: &HistoryArgs) -> anyhow::Result<()> {
    let storage = ctx.open_storage()?;
    let exercise = resolve_exercise(&storage, &args.exercise)?;
    let sets = storage.list_by_exercise(exercise.id)?;
    let dates = group_by_date(&sets);

    let ui = ctx.ui_context(args.output.json, args.output.format.as_deref());
    if ui.mode.is_json() {
        let dates: Vec<serde_json::Value> = dates
            .iter()
            .map(|g| serde_json::json!({ "date": g.date, "sets": workouts_json(&g.sets) }))
            .collect();
        return print_json(&serde_json::json!({
            "exercise": exercise,
            "dates": dates,
        }));
    }

    if !ctx.quiet() {
        print(&ui, &header(&ui, "history", Some(&exercise.name)));
    }
    if dates.is_empty() {
        if !ctx.quiet() {
            print(
                &ui,
                &hint(&ui, &format!("No sets yet. Log one with `fitlog add \"{}\"`.", exercise.name)),
            );
        }
        return Ok(());
    }

    for group in &dates {
        blank_line(&ui);
        let title = format_date(group.date, ui.mode.is_pretty());
        let count = plural(group.sets.len(), "set", "sets");
        print(&ui, &section(&ui, &title, Some(&count)));
        for set in &group.sets {
            print(&ui, &set_line(&ui, set));
        }
    }
    Ok(())
}
