use crate::models::PropertyRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for anything that can feed records into a session
/// This allows easy addition of new sources (fixture files, imports from
/// other listing tools) in the future
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Produce candidate records; each still goes through the store's add path
    async fn load(&self) -> Result<Vec<PropertyRecord>>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}
