use dialoguer::Confirm;

use fitlog_core::aggregate::format_set_summary;
use fitlog_core::WorkoutStore;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::errors::CliError;
use crate::ui::{print, receipt};

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut storage = ctx.open_storage()?;
    let detail = storage.get_workout(args.id)?.ok_or_else(|| {
        CliError::not_found(
            format!("Set {} not found", args.id),
            "Hint: Run `fitlog workouts` to find set IDs.",
        )
    })?;
    let summary = format!(
        "{} on {}: {}",
        detail.exercise_name,
        detail.date().format("%Y-%m-%d"),
        format_set_summary(&detail)
    );

    let ui = ctx.ui_context(false, None);
    if !args.yes && ui.is_interactive() {
        let proceed = Confirm::new()
            .with_prompt(format!("Delete {}?", summary))
            .default(false)
            .interact()?;
        if !proceed {
            return Err(anyhow::anyhow!("Delete cancelled"));
        }
    }

    storage.delete_workout(args.id)?;

    if !ctx.quiet() {
        let id = args.id.to_string();
        print(
            &ui,
            &receipt(&ui, "Deleted set", &[("ID", id.as_str()), ("Set", summary.as_str())]),
        );
    }
    Ok(())
}
