//! Command handlers behind the interactive menu.
//!
//! Each handler validates its locally-checkable preconditions before any
//! store call and returns an explicit [`CommandOutcome`] instead of raising,
//! so every exit path is visible to the loop that renders it.

use crate::error::{Error, Result};
use crate::storage::utils::path::blob_name_for;
use crate::storage::{ListPage, PageLister, StorageClient, drain_pages};
use std::path::Path;

/// Store operations the menu needs; [`StorageClient`] is the production
/// implementation, tests substitute a recording fake.
pub trait BlobStore {
    async fn upload_file(&self, local_path: &Path, blob_name: &str) -> Result<u64>;
    async fn download_blob(&self, blob_name: &str, dest_path: &Path) -> Result<()>;
    async fn blob_exists(&self, blob_name: &str) -> Result<bool>;
    async fn list_page(&self, cursor: Option<String>) -> Result<ListPage>;
    async fn delete_blob(&self, blob_name: &str) -> Result<()>;
}

impl BlobStore for StorageClient {
    async fn upload_file(&self, local_path: &Path, blob_name: &str) -> Result<u64> {
        StorageClient::upload_file(self, local_path, blob_name).await
    }

    async fn download_blob(&self, blob_name: &str, dest_path: &Path) -> Result<()> {
        StorageClient::download_blob(self, blob_name, dest_path).await
    }

    async fn blob_exists(&self, blob_name: &str) -> Result<bool> {
        StorageClient::blob_exists(self, blob_name).await
    }

    async fn list_page(&self, cursor: Option<String>) -> Result<ListPage> {
        StorageClient::list_page(self, cursor).await
    }

    async fn delete_blob(&self, blob_name: &str) -> Result<()> {
        StorageClient::delete_blob(self, blob_name).await
    }
}

/// Result of one menu command. Rendered by the loop; never fatal.
#[derive(Debug)]
pub enum CommandOutcome {
    Success(String),
    NotFound(String),
    Invalid(String),
    Failed(Error),
}

/// Upload a local file, deriving the blob name from its final filename
/// component. An existing blob of the same name is overwritten.
pub async fn upload<S: BlobStore>(store: &S, raw_path: &str) -> CommandOutcome {
    let raw = raw_path.trim();
    let path = Path::new(raw);
    if raw.is_empty() || !path.is_file() {
        return CommandOutcome::Invalid(
            "File not found. Please check the path and try again.".to_string(),
        );
    }

    let blob_name = blob_name_for(path);
    println!("Uploading file...");
    match store.upload_file(path, &blob_name).await {
        Ok(bytes) => CommandOutcome::Success(format!(
            "Upload complete! Stored as '{blob_name}' ({bytes} bytes)"
        )),
        Err(e) => CommandOutcome::Failed(e),
    }
}

/// Download a blob into the configured download directory.
pub async fn download<S: BlobStore>(
    store: &S,
    raw_name: &str,
    download_dir: &Path,
) -> CommandOutcome {
    let blob_name = raw_name.trim();
    if blob_name.is_empty() {
        return CommandOutcome::Invalid("Invalid blob name. Please try again.".to_string());
    }

    match store.blob_exists(blob_name).await {
        Ok(true) => {}
        Ok(false) => {
            return CommandOutcome::NotFound(
                "Blob not found. Please check the name and try again.".to_string(),
            );
        }
        Err(e) => return CommandOutcome::Failed(e),
    }

    let dest_path = download_dir.join(blob_name);
    println!("Downloading file...");
    match store.download_blob(blob_name, &dest_path).await {
        Ok(()) => CommandOutcome::Success(format!(
            "Download complete! File saved to: {}",
            dest_path.display()
        )),
        Err(e) => CommandOutcome::Failed(e),
    }
}

// drain_pages wants a PageLister; borrow one out of any BlobStore.
struct StorePager<'a, S: BlobStore>(&'a S);

impl<S: BlobStore> PageLister for StorePager<'_, S> {
    async fn list_page(&self, cursor: Option<String>) -> Result<ListPage> {
        self.0.list_page(cursor).await
    }
}

/// List every blob in the container, feeding each name to `sink` in order.
pub async fn list<S: BlobStore>(store: &S, sink: impl FnMut(&str)) -> CommandOutcome {
    match drain_pages(&StorePager(store), sink).await {
        Ok(total) => CommandOutcome::Success(format!("{total} blob(s) listed.")),
        Err(e) => CommandOutcome::Failed(e),
    }
}

/// Delete a blob after confirming it exists.
pub async fn delete<S: BlobStore>(store: &S, raw_name: &str) -> CommandOutcome {
    let blob_name = raw_name.trim();
    if blob_name.is_empty() {
        return CommandOutcome::Invalid("Invalid blob name. Please try again.".to_string());
    }

    match store.blob_exists(blob_name).await {
        Ok(true) => {}
        Ok(false) => {
            return CommandOutcome::NotFound(
                "Blob not found. Please check the name and try again.".to_string(),
            );
        }
        Err(e) => return CommandOutcome::Failed(e),
    }

    println!("Deleting blob...");
    match store.delete_blob(blob_name).await {
        Ok(()) => CommandOutcome::Success("Blob deleted successfully!".to_string()),
        Err(e) => CommandOutcome::Failed(e),
    }
}
