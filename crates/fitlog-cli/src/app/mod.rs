//! Application-level utilities for the fitlog CLI.
//!
//! - Application context for unified CLI + config handling
//! - Path resolution for config and database files

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::{missing_database_message, resolve_config_path};
