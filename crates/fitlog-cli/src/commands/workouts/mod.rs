pub mod add;
pub mod delete;
pub mod edit;
mod fields;
pub mod list;

pub use add::handle_add;
pub use delete::handle_delete;
pub use edit::handle_edit;
pub use list::handle_list;
