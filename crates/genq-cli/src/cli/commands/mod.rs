//! CLI command handlers. Each command is in its own file.

mod docs;
mod job;
mod models;
mod submit;

pub use docs::{run_completions, run_man};
pub use job::run_job;
pub use models::run_models;
pub use submit::run_submit;
