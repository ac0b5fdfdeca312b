use fitlog_core::storage::{NewWorkout, UnitKind};
use fitlog_core::WorkoutStore;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::helpers::{parse_date, resolve_exercise};
use crate::output::{print_json, print_workout_receipt, workout_json};

use super::fields::unit_for;

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let mut storage = ctx.open_storage()?;
    let exercise = resolve_exercise(&storage, &args.exercise)?;
    let fields = &args.fields;

    let date = match fields.date.as_deref() {
        Some(value) => parse_date(value, ctx.today())?,
        None => ctx.today(),
    };

    let mut draft = NewWorkout::new(date, exercise.id);
    draft.reps = fields.reps;
    draft.time = fields.time.clone();
    draft.comment = fields.comment.clone();
    if let Some(weight) = fields.weight {
        let unit = unit_for(ctx, &storage, UnitKind::Weight, fields.weight_unit.as_deref(), None)?;
        draft = draft.with_weight(weight, unit);
    } else if let Some(name) = fields.weight_unit.as_deref() {
        draft.weight_unit_id = Some(unit_for(ctx, &storage, UnitKind::Weight, Some(name), None)?);
    }
    if let Some(distance) = fields.distance {
        let unit = unit_for(
            ctx,
            &storage,
            UnitKind::Distance,
            fields.distance_unit.as_deref(),
            None,
        )?;
        draft = draft.with_distance(distance, unit);
    } else if let Some(name) = fields.distance_unit.as_deref() {
        draft.distance_unit_id = Some(unit_for(ctx, &storage, UnitKind::Distance, Some(name), None)?);
    }

    let detail = storage.create_workout(&draft)?;

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        return print_json(&workout_json(&detail));
    }
    if !ctx.quiet() {
        print_workout_receipt(&ui, "Logged set", &detail);
    }
    Ok(())
}
