use std::path::PathBuf;

use dialoguer::Confirm;
use tracing::info;

use fitlog_core::storage::{SqliteStorage, UnitKind};
use fitlog_core::WorkoutStore;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_database_path, write_config, FitlogConfig, UnitsSection};
use crate::errors::CliError;
use crate::helpers::resolve_unit;
use crate::ui::{hint, print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);

    let db_path = match args.path.as_deref().or(ctx.cli().db.as_deref()) {
        Some(path) => PathBuf::from(path),
        None => default_database_path()?,
    };
    if db_path.exists() {
        return Err(CliError::invalid_input(format!(
            "Database already exists at {}\nHint: Pass a different path or use `--db` to point at it.",
            db_path.display()
        ))
        .into());
    }

    // Check unit names against the catalog before touching the filesystem.
    let catalog = SqliteStorage::open_in_memory()?;
    let weight = resolve_unit(
        &catalog,
        UnitKind::Weight,
        args.weight_unit.as_deref().unwrap_or(&ctx.weight_unit()),
    )?;
    let distance = resolve_unit(
        &catalog,
        UnitKind::Distance,
        args.distance_unit.as_deref().unwrap_or(&ctx.distance_unit()),
    )?;

    if !args.no_input && ui.is_interactive() {
        let proceed = Confirm::new()
            .with_prompt(format!("Create fitlog database at {}?", db_path.display()))
            .default(true)
            .interact()?;
        if !proceed {
            return Err(anyhow::anyhow!("Init cancelled"));
        }
    }

    SqliteStorage::create(&db_path)?;

    let config_path = resolve_config_path()?;
    let config = FitlogConfig::new(
        db_path.clone(),
        UnitsSection {
            weight: weight.name,
            distance: distance.name,
        },
    );
    write_config(&config_path, &config)?;
    info!(config = %config_path.display(), "wrote config");

    if !ctx.quiet() {
        let db = db_path.display().to_string();
        let cfg = config_path.display().to_string();
        print(
            &ui,
            &receipt(
                &ui,
                "Created fitlog database",
                &[
                    ("Database", db.as_str()),
                    ("Config", cfg.as_str()),
                    ("Weight unit", config.units.weight.as_str()),
                    ("Distance unit", config.units.distance.as_str()),
                ],
            ),
        );
        if ui.mode.is_pretty() {
            print(&ui, &hint(&ui, "fitlog add \"Barbell Squat\" --weight 60 --reps 5"));
        }
    }
    Ok(())
}
