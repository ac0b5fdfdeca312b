//! Application context for the fitlog CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config file so handlers
//! don't re-read it or thread extra parameters around.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use once_cell::unsync::OnceCell;
use tracing::debug;

use fitlog_core::storage::SqliteStorage;
use fitlog_core::WorkoutStore;

use crate::cli::Cli;
use crate::config::{read_config, FitlogConfig};
use crate::constants::{DEFAULT_DISTANCE_UNIT, DEFAULT_PAGE_SIZE, DEFAULT_WEIGHT_UNIT};
use crate::errors::CliError;
use crate::ui::UiContext;

use super::resolver::{missing_database_message, resolve_config_path, resolve_db_path};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<FitlogConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, loaded on first use. `None` when it doesn't exist.
    pub fn config(&self) -> anyhow::Result<Option<&FitlogConfig>> {
        let config = self.config.get_or_try_init(|| -> anyhow::Result<_> {
            let path = resolve_config_path()?;
            if !path.exists() {
                debug!(path = %path.display(), "no config file");
                return Ok(None);
            }
            debug!(path = %path.display(), "loading config");
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    pub fn db_path(&self) -> anyhow::Result<PathBuf> {
        resolve_db_path(self.cli, self.config()?)
    }

    /// Open the database, failing with a not-found error if it is missing.
    pub fn open_storage(&self) -> anyhow::Result<SqliteStorage> {
        let path = self.db_path()?;
        if !path.exists() {
            return Err(CliError::not_found(
                missing_database_message(&path),
                "Hint: Run `fitlog init` to create it.",
            )
            .into());
        }
        Ok(SqliteStorage::open(&path)?)
    }

    /// Build the UI context for a command's output flags.
    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color, self.cli.ascii)
    }

    /// Default weight unit name for sets that don't name one.
    pub fn weight_unit(&self) -> String {
        match self.config() {
            Ok(Some(config)) => config.units.weight.clone(),
            _ => DEFAULT_WEIGHT_UNIT.to_string(),
        }
    }

    /// Default distance unit name for sets that don't name one.
    pub fn distance_unit(&self) -> String {
        match self.config() {
            Ok(Some(config)) => config.units.distance.clone(),
            _ => DEFAULT_DISTANCE_UNIT.to_string(),
        }
    }

    pub fn page_size(&self) -> usize {
        match self.config() {
            Ok(Some(config)) if config.ui.page_size > 0 => config.ui.page_size,
            _ => DEFAULT_PAGE_SIZE,
        }
    }

    /// The local calendar date; workouts are dated in local time.
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
