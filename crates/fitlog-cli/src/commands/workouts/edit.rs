use fitlog_core::storage::{UnitKind, WorkoutPatch};
use fitlog_core::WorkoutStore;

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::helpers::{parse_date, resolve_exercise};
use crate::output::{print_json, print_workout_receipt, workout_json};

use super::fields::unit_for;

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let mut storage = ctx.open_storage()?;
    let current = storage.get_workout(args.id)?.ok_or_else(|| {
        CliError::not_found(
            format!("Set {} not found", args.id),
            "Hint: Run `fitlog workouts` to find set IDs.",
        )
    })?;
    let fields = &args.fields;

    let mut patch = WorkoutPatch::new();
    if let Some(ref value) = args.exercise {
        patch = patch.exercise(resolve_exercise(&storage, value)?.id);
    }
    if let Some(ref value) = fields.date {
        patch = patch.date(parse_date(value, ctx.today())?);
    }

    if args.clear_weight {
        patch = patch.weight(None, None);
    } else if let Some(weight) = fields.weight {
        let unit = unit_for(
            ctx,
            &storage,
            UnitKind::Weight,
            fields.weight_unit.as_deref(),
            current.workout.weight_unit_id,
        )?;
        patch = patch.weight(Some(weight), Some(unit));
    } else if let Some(name) = fields.weight_unit.as_deref() {
        patch.weight_unit_id = Some(Some(unit_for(ctx, &storage, UnitKind::Weight, Some(name), None)?));
    }

    if let Some(reps) = fields.reps {
        patch = patch.reps(Some(reps));
    }

    if let Some(distance) = fields.distance {
        let unit = unit_for(
            ctx,
            &storage,
            UnitKind::Distance,
            fields.distance_unit.as_deref(),
            current.workout.distance_unit_id,
        )?;
        patch = patch.distance(Some(distance), Some(unit));
    } else if let Some(name) = fields.distance_unit.as_deref() {
        patch.distance_unit_id = Some(Some(unit_for(ctx, &storage, UnitKind::Distance, Some(name), None)?));
    }

    if args.clear_time {
        patch = patch.time(None);
    } else if let Some(ref time) = fields.time {
        patch = patch.time(Some(time.clone()));
    }

    if args.clear_comment {
        patch = patch.comment(None);
    } else if let Some(ref comment) = fields.comment {
        patch = patch.comment(Some(comment.clone()));
    }

    if patch.is_empty() {
        return Err(CliError::invalid_input(
            "Nothing to change\nHint: Pass at least one field, e.g. `--reps 8`.",
        )
        .into());
    }

    let detail = storage.update_workout(args.id, &patch)?;

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        return print_json(&workout_json(&detail));
    }
    if !ctx.quiet() {
        print_workout_receipt(&ui, "Updated set", &detail);
    }
    Ok(())
}
