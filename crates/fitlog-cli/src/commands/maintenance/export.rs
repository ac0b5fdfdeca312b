use std::io::Write;

use fitlog_core::WorkoutStore;

use crate::app::AppContext;
use crate::cli::{ExportArgs, ExportFormat};
use crate::constants::EXPORT_BATCH_SIZE;
use crate::output::workout_json;

/// Stream every set to stdout, newest first, in batches.
pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let storage = ctx.open_storage()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let mut offset = 0;
    let mut first = true;
    if args.format == ExportFormat::Json {
        write!(out, "[")?;
    }
    loop {
        let page = storage.list_page(offset, EXPORT_BATCH_SIZE)?;
        for detail in &page.workouts {
            let value = workout_json(detail);
            match args.format {
                ExportFormat::Jsonl => writeln!(out, "{}", serde_json::to_string(&value)?)?,
                ExportFormat::Json => {
                    if !first {
                        write!(out, ",")?;
                    }
                    write!(out, "\n  {}", serde_json::to_string(&value)?)?;
                }
            }
            first = false;
        }
        offset += page.workouts.len();
        if !page.has_more() || page.workouts.is_empty() {
            break;
        }
    }
    if args.format == ExportFormat::Json {
        if first {
            writeln!(out, "]")?;
        } else {
            writeln!(out, "\n]")?;
        }
    }
    out.flush()?;
    Ok(())
}
