use crate::error::Result;
use opendal::Operator;
use std::path::Path;
use tokio::fs;

/// Trait for downloading a blob from storage to the local filesystem.
pub trait Downloader {
    /// Download a single blob to the given local destination.
    ///
    /// Parent directories of the destination are created as needed; an
    /// existing file at the destination is overwritten.
    async fn download(&self, blob_name: &str, dest_path: &Path) -> Result<()>;
}

/// Implementation of Downloader for OpenDAL Operator.
pub struct OpenDalDownloader {
    operator: Operator,
}

impl OpenDalDownloader {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Downloader for OpenDalDownloader {
    async fn download(&self, blob_name: &str, dest_path: &Path) -> Result<()> {
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let data = self.operator.read(blob_name).await?;
        fs::write(dest_path, data.to_vec()).await?;
        Ok(())
    }
}
