//! UI primitives for the fitlog CLI.
//!
//! - **Context**: environment detection (TTY, width, color, unicode)
//! - **Mode**: output mode resolution (json, plain, pretty)
//! - **Theme**: badges, styles, symbols
//! - **Render**: tables, headers, receipts, hints, bars
//! - **Format**: string and date helpers

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use theme::Badge;

pub use render::{
    badge, bar, blank_line, header, hint, kv, print, receipt, section, simple_table,
    table, Column,
};
