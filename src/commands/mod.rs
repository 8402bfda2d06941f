//! CLI command handlers.

mod add;
mod list;
mod remove;
mod serve;

pub use add::run_add_command;
pub use list::run_list_command;
pub use remove::run_remove_command;
pub use serve::run_serve_command;
