//! Fitlog CLI - a personal workout log for the terminal.
//!
//! Thin command layer over `fitlog-core`: argument parsing, config,
//! output formatting and exit codes.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;
mod ui;

use clap::Parser;
use fitlog_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{comment, init, maintenance, misc, reference, views, workouts};
use crate::errors::exit_code_for;
use crate::ui::render::print_error;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, cli.no_color);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false, None);

        let error_msg = format!("{}", e);
        let hint = extract_error_hint(&error_msg);
        let message = match error_msg.find("\nHint:") {
            Some(idx) => &error_msg[..idx],
            None => error_msg.as_str(),
        };

        print_error(&ui_ctx, message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Pull the hint out of an error message, or suggest one for common errors.
fn extract_error_hint(error: &str) -> Option<String> {
    if let Some(idx) = error.find("\nHint:") {
        return Some(error[idx + "\nHint:".len()..].trim().to_string());
    }

    let error_lower = error.to_lowercase();

    if error_lower.contains("workout") && error_lower.contains("not found") {
        return Some("Run `fitlog workouts` to find set IDs.".to_string());
    }

    if error_lower.starts_with("validation error") {
        return Some(
            "Run `fitlog exercises` to see whether an exercise is measured by reps, distance or time."
                .to_string(),
        );
    }

    if error_lower.contains("database not found") {
        return Some("Run `fitlog init` to create a database.".to_string());
    }

    if error_lower.contains("backup") && error_lower.contains("destination") {
        return Some(
            "Ensure the destination path is writable and its parent directory can be created."
                .to_string(),
        );
    }

    None
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Categories(args)) => {
            reference::handle_categories(ctx, args)?;
        }
        Some(Commands::Exercises(args)) => {
            reference::handle_exercises(ctx, args)?;
        }
        Some(Commands::Units(args)) => {
            reference::handle_units(ctx, args)?;
        }
        Some(Commands::Add(args)) => {
            workouts::handle_add(ctx, args)?;
        }
        Some(Commands::Edit(args)) => {
            workouts::handle_edit(ctx, args)?;
        }
        Some(Commands::Delete(args)) => {
            workouts::handle_delete(ctx, args)?;
        }
        Some(Commands::Workouts(args)) => {
            workouts::handle_list(ctx, args)?;
        }
        Some(Commands::Day(args)) => {
            views::handle_day(ctx, args)?;
        }
        Some(Commands::History(args)) => {
            views::handle_history(ctx, args)?;
        }
        Some(Commands::Progress(args)) => {
            views::handle_progress(ctx, args)?;
        }
        Some(Commands::Calendar(args)) => {
            views::handle_calendar(ctx, args)?;
        }
        Some(Commands::Comment(args)) => {
            comment::handle_comment(ctx, args)?;
        }
        Some(Commands::Export(args)) => {
            maintenance::handle_export(ctx, args)?;
        }
        Some(Commands::Check) => {
            maintenance::handle_check(ctx)?;
        }
        Some(Commands::Backup(args)) => {
            maintenance::handle_backup(ctx, args)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            println!("Fitlog v{}", VERSION);
            println!("\nQuickstart:");
            println!("  fitlog init");
            println!("  fitlog add \"Barbell Squat\" --weight 60 --reps 5");
            println!("  fitlog day");
            println!("  fitlog progress \"Barbell Squat\" --range 90");
            println!("  fitlog calendar");
            println!("\nRun `fitlog --help` for full usage.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_hint_is_extracted() {
        let hint = extract_error_hint("Set 4 not found\nHint: Run `fitlog workouts`.");
        assert_eq!(hint.as_deref(), Some("Run `fitlog workouts`."));
    }

    #[test]
    fn test_contextual_hints() {
        assert!(extract_error_hint("Validation error: Reps are required")
            .unwrap()
            .contains("fitlog exercises"));
        assert!(extract_error_hint("Not found: Workout 9 not found")
            .unwrap()
            .contains("fitlog workouts"));
        assert_eq!(extract_error_hint("something else"), None);
    }
}
