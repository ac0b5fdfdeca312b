//! # Fitlog Core
//!
//! Core library for Fitlog - a personal, single-user workout log.
//!
//! This crate provides the domain model, storage abstraction and the pure
//! aggregation logic, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **storage**: `WorkoutStore` trait and the SQLite implementation
//! - **aggregate**: grouping, set summaries, daily stats, progress series
//! - **calendar**: month layout and per-day workout counts
//! - **fs**: atomic file helpers used for backups

pub mod aggregate;
pub mod calendar;
pub mod error;
pub mod fs;
pub mod storage;

pub use error::{FitlogError, Result};
pub use storage::WorkoutStore;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
