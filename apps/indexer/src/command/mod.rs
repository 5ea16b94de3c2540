pub mod delete;
pub mod index;

use crate::error::Result;

pub use delete::DeleteIndexCommand;
pub use index::IndexCommand;

pub const RULE: &str = "============================================================";

#[async_trait::async_trait]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}
