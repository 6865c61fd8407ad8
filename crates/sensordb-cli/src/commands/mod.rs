//! Command implementations for the CLI.

mod add;
mod delete;
mod info;
mod lookup;
mod query;

pub use add::cmd_add;
pub use delete::cmd_delete;
pub use info::cmd_info;
pub use lookup::cmd_first_after;
pub use query::{QueryArgs, cmd_query};
