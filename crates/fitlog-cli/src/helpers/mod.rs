//! Helper functions shared by command handlers.

mod parsing;

pub use parsing::{
    parse_date, parse_month, resolve_category, resolve_exercise, resolve_unit, window_from_args,
};
