use fitlog_core::WorkoutStore;

use crate::app::AppContext;
use crate::errors::CliError;
use crate::ui::{badge, print, Badge};

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let storage = ctx.open_storage()?;
    let ui = ctx.ui_context(false, None);

    match storage.check_integrity() {
        Ok(()) => {
            if !ctx.quiet() {
                if ui.mode.is_pretty() {
                    print(&ui, &badge(&ui, Badge::Ok, "Integrity check passed"));
                    for item in ["pages", "foreign keys", "workout categories", "measurement types", "metadata keys"] {
                        print(&ui, &format!("  {}", badge(&ui, Badge::Ok, item)));
                    }
                } else {
                    print(&ui, "integrity=ok");
                }
            }
            Ok(())
        }
        Err(err) => Err(CliError::IntegrityFailed(format!(
            "{}\nHint: Restore from a backup made with `fitlog backup`.",
            err
        ))
        .into()),
    }
}
