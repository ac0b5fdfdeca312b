//! Path resolution for config and database files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, FitlogConfig};
use crate::errors::CliError;

/// Resolve the config file path, checking FITLOG_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("FITLOG_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the database path from `--db` / `FITLOG_PATH`, then the config.
pub fn resolve_db_path(cli: &Cli, config: Option<&FitlogConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.db.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }

    match config {
        Some(config) => Ok(PathBuf::from(&config.database.path)),
        None => {
            let config_path = resolve_config_path()?;
            Err(CliError::not_found(
                missing_config_message(&config_path),
                "Hint: Run `fitlog init` to create a database and config.",
            )
            .into())
        }
    }
}

/// Error message when the database file is missing.
pub fn missing_database_message(path: &Path) -> String {
    format!("No database found at {}", path.display())
}

/// Error message when the config file is missing.
pub fn missing_config_message(config_path: &Path) -> String {
    format!(
        "No config found at {} and no --db given",
        config_path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnitsSection;
    use clap::Parser;

    #[test]
    fn test_db_flag_wins_over_config() {
        let cli = Cli::try_parse_from(["fitlog", "--db", "/tmp/flag.db", "check"]).unwrap();
        let config = FitlogConfig::new(PathBuf::from("/tmp/config.db"), UnitsSection::default());
        let path = resolve_db_path(&cli, Some(&config)).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/flag.db"));
    }

    #[test]
    fn test_config_path_used_without_flag() {
        let cli = Cli::try_parse_from(["fitlog", "check"]).unwrap();
        if cli.db.is_some() {
            // FITLOG_PATH is set in the environment running the tests
            return;
        }
        let config = FitlogConfig::new(PathBuf::from("/tmp/config.db"), UnitsSection::default());
        let path = resolve_db_path(&cli, Some(&config)).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/config.db"));
    }

    #[test]
    fn test_missing_database_message_names_path() {
        let msg = missing_database_message(Path::new("/tmp/none.db"));
        assert!(msg.contains("/tmp/none.db"));
    }
}
