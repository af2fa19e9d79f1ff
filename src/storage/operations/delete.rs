// Delete operation trait and implementation
use crate::error::Result;
use opendal::Operator;

/// Trait for deleting a single blob from storage.
pub trait Deleter {
    /// Delete the named blob. Existence is checked by the caller.
    async fn delete(&self, blob_name: &str) -> Result<()>;
}

/// Implementation of Deleter for OpenDAL Operator.
pub struct OpenDalDeleter {
    operator: Operator,
}

impl OpenDalDeleter {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Deleter for OpenDalDeleter {
    async fn delete(&self, blob_name: &str) -> Result<()> {
        self.operator.delete(blob_name).await?;
        Ok(())
    }
}
