use std::path::Path;

use dialoguer::Confirm;

use fitlog_core::fs::copy_atomic;

use crate::app::{missing_database_message, AppContext};
use crate::cli::BackupArgs;
use crate::errors::CliError;
use crate::ui::{print, receipt};

pub fn handle_backup(ctx: &AppContext, args: &BackupArgs) -> anyhow::Result<()> {
    let source = ctx.db_path()?;
    if !source.exists() {
        return Err(CliError::not_found(
            missing_database_message(&source),
            "Hint: Run `fitlog init` to create it.",
        )
        .into());
    }

    let destination = Path::new(&args.destination);
    if destination == source {
        return Err(CliError::invalid_input("Backup destination is the database itself").into());
    }

    let ui = ctx.ui_context(false, None);
    if ui.is_interactive() && !ctx.quiet() {
        let proceed = Confirm::new()
            .with_prompt(format!("Back up database to {}?", args.destination))
            .default(true)
            .interact()?;
        if !proceed {
            return Err(anyhow::anyhow!("Backup cancelled"));
        }
    }

    let bytes = copy_atomic(&source, destination).map_err(|e| {
        anyhow::anyhow!(
            "Backup to destination {} failed: {}",
            destination.display(),
            e
        )
    })?;
    if bytes == 0 {
        return Err(anyhow::anyhow!("Backup failed: zero bytes written"));
    }

    if !ctx.quiet() {
        let bytes = bytes.to_string();
        print(
            &ui,
            &receipt(
                &ui,
                "Backed up database",
                &[("Destination", args.destination.as_str()), ("Bytes", bytes.as_str())],
            ),
        );
    }
    Ok(())
}
