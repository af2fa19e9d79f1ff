use crate::error::Result;
use crate::storage::constants::DEFAULT_BUFFER_SIZE;
use opendal::Operator;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncReadExt, BufReader};

/// Trait for uploading a local file to storage.
pub trait Uploader {
    /// Upload a single file from the local filesystem to the given blob name.
    ///
    /// # Arguments
    /// * `local_path` - Source file on the local filesystem
    /// * `blob_name` - Destination blob name in the container
    ///
    /// # Returns
    /// * `Result<u64>` - Number of bytes written, or detailed error information
    async fn upload(&self, local_path: &Path, blob_name: &str) -> Result<u64>;
}

/// Implementation of Uploader for OpenDAL Operator.
pub struct OpenDalUploader {
    operator: Operator,
}

impl OpenDalUploader {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Uploader for OpenDalUploader {
    async fn upload(&self, local_path: &Path, blob_name: &str) -> Result<u64> {
        let file = fs::File::open(local_path).await?;
        let mut reader = BufReader::new(file);
        let mut buffer = vec![0u8; DEFAULT_BUFFER_SIZE];
        let mut total_bytes = 0u64;
        // An existing blob with the same name is overwritten.
        let mut writer = self.operator.writer(blob_name).await?;

        loop {
            let bytes_read = reader.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            writer.write(buffer[..bytes_read].to_vec()).await?;
            total_bytes += bytes_read as u64;
        }
        writer.close().await?;

        Ok(total_bytes)
    }
}
