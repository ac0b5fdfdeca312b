//! Read-only catalog listings: categories, exercises, units.

use fitlog_core::storage::UnitKind;
use fitlog_core::WorkoutStore;

use crate::app::AppContext;
use crate::cli::{ExercisesArgs, OutputArgs};
use crate::helpers::resolve_category;
use crate::output::print_json;
use crate::ui::{header, print, simple_table, table, Column};

pub fn handle_categories(ctx: &AppContext, args: &OutputArgs) -> anyhow::Result<()> {
    let storage = ctx.open_storage()?;
    let categories = storage.list_categories()?;

    let ui = ctx.ui_context(args.json, args.format.as_deref());
    if ui.mode.is_json() {
        return print_json(&categories);
    }

    let rows: Vec<Vec<String>> = categories
        .iter()
        .map(|c| vec![c.id.to_string(), c.name.clone()])
        .collect();
    if !ctx.quiet() {
        print(&ui, &header(&ui, "categories", None));
    }
    print(
        &ui,
        &simple_table(&ui, &[Column::new("ID"), Column::new("Category")], &rows),
    );
    Ok(())
}

pub fn handle_exercises(ctx: &AppContext, args: &ExercisesArgs) -> anyhow::Result<()> {
    let storage = ctx.open_storage()?;
    let category = args
        .category
        .as_deref()
        .map(|name| resolve_category(&storage, name))
        .transpose()?;
    let exercises = storage.list_exercises(category.as_ref().map(|c| c.id))?;

    let ui = ctx.ui_context(args.output.json, args.output.format.as_deref());
    if ui.mode.is_json() {
        return print_json(&exercises);
    }

    let rows: Vec<Vec<String>> = exercises
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.name.clone(),
                e.category_name.clone(),
                e.measurement_type.to_string(),
            ]
        })
        .collect();
    if !ctx.quiet() {
        print(
            &ui,
            &header(&ui, "exercises", category.as_ref().map(|c| c.name.as_str())),
        );
    }
    print(
        &ui,
        &table(
            &ui,
            &[
                Column::new("ID"),
                Column::new("Exercise"),
                Column::new("Category"),
                Column::new("Measured by"),
            ],
            &rows,
        ),
    );
    Ok(())
}

pub fn handle_units(ctx: &AppContext, args: &OutputArgs) -> anyhow::Result<()> {
    let storage = ctx.open_storage()?;
    let weight = storage.list_units(UnitKind::Weight)?;
    let distance = storage.list_units(UnitKind::Distance)?;

    let ui = ctx.ui_context(args.json, args.format.as_deref());
    if ui.mode.is_json() {
        return print_json(&serde_json::json!({
            "weight": weight,
            "distance": distance,
        }));
    }

    let rows: Vec<Vec<String>> = weight
        .iter()
        .map(|u| vec!["weight".to_string(), u.id.to_string(), u.name.clone()])
        .chain(
            distance
                .iter()
                .map(|u| vec!["distance".to_string(), u.id.to_string(), u.name.clone()]),
        )
        .collect();
    if !ctx.quiet() {
        print(&ui, &header(&ui, "units", None));
    }
    print(
        &ui,
        &simple_table(
            &ui,
            &[Column::new("Kind"), Column::new("ID"), Column::new("Unit")],
            &rows,
        ),
    );
    Ok(())
}
