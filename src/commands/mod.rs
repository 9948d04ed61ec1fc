use crate::context::AppContext;
use async_trait::async_trait;
use std::error::Error;

pub mod create;
pub mod history;
pub mod list;
pub mod status;

pub use create::CreateCommand;
pub use history::HistoryCommand;
pub use list::ListCommand;
pub use status::StatusCommand;

/// A one-shot command run from the command line.
///
/// Output goes to stdout. An `Err` means the command's outcome was an error
/// (validation, transport or a rejected request) and the process exits 1.
#[async_trait]
pub trait Command: Send + Sync {
    async fn execute(&self, ctx: &AppContext) -> Result<(), Box<dyn Error>>;
}
