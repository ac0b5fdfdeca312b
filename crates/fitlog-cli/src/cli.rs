use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use fitlog_core::VERSION;

/// Fitlog - a personal workout log for the terminal
#[derive(Parser)]
#[command(name = "fitlog")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the database file
    #[arg(long, global = true, env = "FITLOG_PATH")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols instead of unicode
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Output selection shared by read commands
#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the database will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,

    /// Default weight unit written to the config
    #[arg(long, value_name = "UNIT")]
    pub weight_unit: Option<String>,

    /// Default distance unit written to the config
    #[arg(long, value_name = "UNIT")]
    pub distance_unit: Option<String>,
}

/// Arguments for the `exercises` command
#[derive(Args)]
pub struct ExercisesArgs {
    /// Only show exercises in this category
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Measurement fields shared by `add` and `edit`
#[derive(Args, Debug, Default)]
pub struct SetFieldArgs {
    /// Workout date (YYYY-MM-DD, "today" or "yesterday")
    #[arg(long)]
    pub date: Option<String>,

    /// Weight lifted
    #[arg(short, long)]
    pub weight: Option<f64>,

    /// Weight unit name (e.g. kg, lb)
    #[arg(long, value_name = "UNIT")]
    pub weight_unit: Option<String>,

    /// Repetitions
    #[arg(short, long)]
    pub reps: Option<i64>,

    /// Distance covered
    #[arg(short, long)]
    pub distance: Option<f64>,

    /// Distance unit name (e.g. km, mi, m)
    #[arg(long, value_name = "UNIT")]
    pub distance_unit: Option<String>,

    /// Duration as H:MM:SS
    #[arg(short, long)]
    pub time: Option<String>,

    /// Note attached to this set
    #[arg(short, long)]
    pub comment: Option<String>,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Exercise name or ID
    #[arg(value_name = "EXERCISE")]
    pub exercise: String,

    #[command(flatten)]
    pub fields: SetFieldArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Set ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Move the set to another exercise (name or ID)
    #[arg(long, value_name = "EXERCISE")]
    pub exercise: Option<String>,

    #[command(flatten)]
    pub fields: SetFieldArgs,

    /// Remove the weight and its unit
    #[arg(long, conflicts_with_all = ["weight", "weight_unit"])]
    pub clear_weight: bool,

    /// Remove the time
    #[arg(long, conflicts_with = "time")]
    pub clear_time: bool,

    /// Remove the set comment
    #[arg(long, conflicts_with = "comment")]
    pub clear_comment: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Set ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `day` command
#[derive(Args)]
pub struct DayArgs {
    /// Date to show (defaults to today)
    #[arg(value_name = "DATE")]
    pub date: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `history` command
#[derive(Args)]
pub struct HistoryArgs {
    /// Exercise name or ID
    #[arg(value_name = "EXERCISE")]
    pub exercise: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Date range presets for `progress`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RangeArg {
    /// Last 30 days
    #[value(name = "30")]
    Last30,
    /// Last 90 days
    #[value(name = "90")]
    Last90,
    /// Every logged set
    All,
    /// Use --since/--until
    Custom,
}

/// Arguments for the `progress` command
#[derive(Args)]
pub struct ProgressArgs {
    /// Exercise name or ID
    #[arg(value_name = "EXERCISE")]
    pub exercise: String,

    /// Date range for the progress series
    #[arg(long, value_enum)]
    pub range: Option<RangeArg>,

    /// Custom range start (YYYY-MM-DD)
    #[arg(long)]
    pub since: Option<String>,

    /// Custom range end (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub until: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `calendar` command
#[derive(Args)]
pub struct CalendarArgs {
    /// Month to show (YYYY-MM, defaults to the current month)
    #[arg(value_name = "MONTH")]
    pub month: Option<String>,

    /// Go back N months
    #[arg(long, value_name = "N", conflicts_with = "next")]
    pub prev: Option<u32>,

    /// Go forward N months
    #[arg(long, value_name = "N")]
    pub next: Option<u32>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `workouts` command
#[derive(Args)]
pub struct WorkoutsArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (defaults to the configured page size)
    #[arg(long)]
    pub per_page: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `comment` command
#[derive(Args)]
pub struct CommentArgs {
    /// Date of the comment (YYYY-MM-DD, "today" or "yesterday")
    #[arg(value_name = "DATE")]
    pub date: String,

    /// New comment text; omit to show the current comment
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Delete the comment for this date
    #[arg(long, conflicts_with = "text")]
    pub clear: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Export formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Jsonl,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,
}

/// Arguments for the `backup` command
#[derive(Args)]
pub struct BackupArgs {
    /// Destination file
    #[arg(value_name = "DEST")]
    pub destination: String,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new database with the exercise catalog
    Init(InitArgs),

    /// List exercise categories
    Categories(OutputArgs),

    /// List exercises
    Exercises(ExercisesArgs),

    /// List weight and distance units
    Units(OutputArgs),

    /// Log a set
    Add(AddArgs),

    /// Change fields of a logged set
    Edit(EditArgs),

    /// Delete a logged set
    Delete(DeleteArgs),

    /// Show a day's sets grouped by exercise
    Day(DayArgs),

    /// Show every set of one exercise, newest first
    History(HistoryArgs),

    /// Show records and a progress series for one exercise
    Progress(ProgressArgs),

    /// Show a month with per-day set counts
    Calendar(CalendarArgs),

    /// Page through all logged sets
    Workouts(WorkoutsArgs),

    /// Show or set the comment for a date
    Comment(CommentArgs),

    /// Export all sets
    Export(ExportArgs),

    /// Check database integrity
    Check,

    /// Copy the database file to a backup location
    Backup(BackupArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_progress_range_values() {
        let cli = Cli::try_parse_from(["fitlog", "progress", "Deadlift", "--range", "90"]).unwrap();
        match cli.command {
            Some(Commands::Progress(args)) => assert_eq!(args.range, Some(RangeArg::Last90)),
            _ => panic!("expected progress command"),
        }
    }

    #[test]
    fn test_edit_clear_conflicts_with_value() {
        let result =
            Cli::try_parse_from(["fitlog", "edit", "3", "--time", "0:10:00", "--clear-time"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["fitlog", "-vv", "check"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
