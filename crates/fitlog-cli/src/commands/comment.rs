use fitlog_core::storage::CommentChange;
use fitlog_core::WorkoutStore;

use crate::app::AppContext;
use crate::cli::CommentArgs;
use crate::helpers::parse_date;
use crate::output::print_json;
use crate::ui::{hint, kv, print, receipt};

pub fn handle_comment(ctx: &AppContext, args: &CommentArgs) -> anyhow::Result<()> {
    let date = parse_date(&args.date, ctx.today())?;
    let ui = ctx.ui_context(args.json, None);

    let mut storage = ctx.open_storage()?;
    let text = match (args.clear, args.text.as_deref()) {
        (true, _) => Some(""),
        (false, text) => text,
    };

    let Some(text) = text else {
        let comment = storage.get_comment(date)?;
        if ui.mode.is_json() {
            return print_json(&serde_json::json!({ "date": date, "comment": comment }));
        }
        match comment {
            Some(comment) => print(&ui, &kv(&ui, &date.to_string(), &comment)),
            None if !ctx.quiet() => print(
                &ui,
                &hint(&ui, &format!("No comment for {}. Set one with `fitlog comment {} \"...\"`.", date, date)),
            ),
            None => {}
        }
        return Ok(());
    };

    let change = storage.upsert_comment(date, text)?;
    let comment = storage.get_comment(date)?;

    if ui.mode.is_json() {
        return print_json(&serde_json::json!({
            "date": date,
            "change": change,
            "comment": comment,
        }));
    }
    if !ctx.quiet() {
        let title = match change {
            CommentChange::Created => "Saved comment",
            CommentChange::Updated => "Updated comment",
            CommentChange::Deleted => "Deleted comment",
            CommentChange::Unchanged => "No comment to change",
        };
        let date_str = date.to_string();
        let mut items = vec![("Date", date_str.as_str())];
        if let Some(ref comment) = comment {
            items.push(("Comment", comment.as_str()));
        }
        print(&ui, &receipt(&ui, title, &items));
    }
    Ok(())
}
