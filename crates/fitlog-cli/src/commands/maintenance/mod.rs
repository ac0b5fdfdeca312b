pub mod backup;
pub mod check;
pub mod export;

pub use backup::handle_backup;
pub use check::handle_check;
pub use export::handle_export;
