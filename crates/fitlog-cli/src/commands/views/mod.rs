pub mod calendar;
pub mod day;
pub mod history;
pub mod progress;

pub use calendar::handle_calendar;
pub use day::handle_day;
pub use history::handle_history;
pub use progress::handle_progress;
