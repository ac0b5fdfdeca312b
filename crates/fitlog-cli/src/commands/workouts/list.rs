use fitlog_core::WorkoutStore;

use crate::app::AppContext;
use crate::cli::WorkoutsArgs;
use crate::errors::CliError;
use crate::output::{print_json, workout_rows, workouts_json, WORKOUT_COLUMNS};
use crate::ui::{header, hint, kv, print, table};

pub fn handle_list(ctx: &AppContext, args: &WorkoutsArgs) -> anyhow::Result<()> {
    if args.page == 0 {
        return Err(CliError::invalid_input("--page starts at 1").into());
    }
    let per_page = args.per_page.unwrap_or_else(|| ctx.page_size());
    if per_page == 0 {
        return Err(CliError::invalid_input("--per-page must be at least 1").into());
    }

    let storage = ctx.open_storage()?;
    let offset = (args.page - 1).saturating_mul(per_page);
    let page = storage.list_page(offset, per_page)?;
    let page_count = page.total_count.div_ceil(per_page).max(1);

    let ui = ctx.ui_context(args.output.json, args.output.format.as_deref());
    if ui.mode.is_json() {
        return print_json(&serde_json::json!({
            "workouts": workouts_json(&page.workouts),
            "page": args.page,
            "per_page": per_page,
            "total_count": page.total_count,
            "has_more": page.has_more(),
        }));
    }

    if !ctx.quiet() {
        let context = format!("page {} of {}", args.page, page_count);
        print(&ui, &header(&ui, "workouts", Some(&context)));
    }
    if page.workouts.is_empty() {
        if !ctx.quiet() {
            print(&ui, &hint(&ui, "No sets on this page. Log one with `fitlog add`."));
        }
        return Ok(());
    }
    print(&ui, &table(&ui, &WORKOUT_COLUMNS, &workout_rows(&page.workouts)));

    if !ctx.quiet() {
        if !ui.mode.is_pretty() {
            print(&ui, &kv(&ui, "total", &page.total_count.to_string()));
        }
        if page.has_more() {
            print(
                &ui,
                &hint(&ui, &format!("fitlog workouts --page {}", args.page + 1)),
            );
        }
    }
    Ok(())
}
