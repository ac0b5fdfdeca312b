//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, database, set, exercise).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or a set that fails validation.
    pub const INVALID_INPUT: i32 = 4;

    /// Integrity check failed.
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Rows per page in `fitlog workouts`.
pub const DEFAULT_PAGE_SIZE: usize = 100;

pub const DEFAULT_WEIGHT_UNIT: &str = "kg";
pub const DEFAULT_DISTANCE_UNIT: &str = "km";

/// Batch size used when streaming every set out of the database.
pub const EXPORT_BATCH_SIZE: usize = 500;
