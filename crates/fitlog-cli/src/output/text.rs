//! Text rendering for sets in plain and pretty modes.

use fitlog_core::aggregate::format_set_summary;
use fitlog_core::storage::WorkoutDetail;

use crate::ui::format::{single_line, truncate};
use crate::ui::theme::{styled, styles, BULLET};
use crate::ui::{receipt, Column, UiContext};

pub const WORKOUT_COLUMNS: [Column; 6] = [
    Column::new("ID"),
    Column::new("Date"),
    Column::new("Exercise"),
    Column::new("Category"),
    Column::new("Set"),
    Column::new("Comment"),
];

/// One set as a list line.
///
/// Pretty: `• 20 kg × 10 reps  felt easy  #12`
/// Plain: id, summary and comment separated by tabs
pub fn set_line(ctx: &UiContext, detail: &WorkoutDetail) -> String {
    let summary = format_set_summary(detail);
    let comment = detail
        .workout
        .comment
        .as_deref()
        .map(single_line)
        .unwrap_or_default();

    if ctx.mode.is_pretty() {
        let mut line = format!("  {} {}", BULLET.get(ctx.unicode), summary);
        if !comment.is_empty() {
            line.push_str("  ");
            line.push_str(&styled(&comment, styles::dim(), ctx.color));
        }
        line.push_str("  ");
        line.push_str(&styled(&format!("#{}", detail.id()), styles::dim(), ctx.color));
        line
    } else if comment.is_empty() {
        format!("{}\t{}", detail.id(), summary)
    } else {
        format!("{}\t{}\t{}", detail.id(), summary, comment)
    }
}

/// Table rows matching `WORKOUT_COLUMNS`.
pub fn workout_rows(details: &[WorkoutDetail]) -> Vec<Vec<String>> {
    details
        .iter()
        .map(|detail| {
            vec![
                detail.id().to_string(),
                detail.date().format("%Y-%m-%d").to_string(),
                detail.exercise_name.clone(),
                detail.category_name.clone(),
                format_set_summary(detail),
                detail
                    .workout
                    .comment
                    .as_deref()
                    .map(|c| truncate(&single_line(c), 40))
                    .unwrap_or_default(),
            ]
        })
        .collect()
}

/// Print the receipt shown after a set is added or edited.
pub fn print_workout_receipt(ctx: &UiContext, title: &str, detail: &WorkoutDetail) {
    let id = detail.id().to_string();
    let date = detail.date().format("%Y-%m-%d").to_string();
    let summary = format_set_summary(detail);
    let mut items = vec![
        ("ID", id.as_str()),
        ("Date", date.as_str()),
        ("Exercise", detail.exercise_name.as_str()),
        ("Set", summary.as_str()),
    ];
    if let Some(comment) = detail.workout.comment.as_deref() {
        items.push(("Comment", comment));
    }
    println!("{}", receipt(ctx, title, &items));
}
