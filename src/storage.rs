use crate::error::{Error, Result};
use crate::wrap_err;
use opendal::Operator;
use std::path::Path;
use std::str::FromStr;

pub mod constants;
mod operations;
pub mod utils;

use self::operations::delete::OpenDalDeleter;
use self::operations::download::OpenDalDownloader;
use self::operations::list::OpenDalPageLister;
use self::operations::upload::OpenDalUploader;
use self::operations::{Deleter, Downloader, Uploader};

pub use self::operations::{ListPage, PageLister, drain_pages};

/// Storage provider types
#[derive(Debug, Clone, Copy)]
pub enum StorageProvider {
    Azblob,
    S3,
    Fs,
}

impl FromStr for StorageProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "azblob" | "azure" => Ok(Self::Azblob),
            "s3" | "minio" => Ok(Self::S3),
            "fs" => Ok(Self::Fs),
            _ => Err(Error::UnsupportedProvider {
                provider: s.to_string(),
            }),
        }
    }
}

/// Unified storage configuration for different providers
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    pub container: String,
    pub connection_string: Option<String>,
    pub access_key_id: Option<String>,
    pub access_key_secret: Option<String>,
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub root_path: Option<String>,
}

impl StorageConfig {
    pub fn azblob(connection_string: String, container: String) -> Self {
        Self {
            provider: StorageProvider::Azblob,
            container,
            connection_string: Some(connection_string),
            access_key_id: None,
            access_key_secret: None,
            endpoint: None,
            region: None,
            root_path: None,
        }
    }

    pub fn s3(
        container: String,
        access_key_id: String,
        secret_access_key: String,
        region: Option<String>,
    ) -> Self {
        Self {
            provider: StorageProvider::S3,
            container,
            connection_string: None,
            access_key_id: Some(access_key_id),
            access_key_secret: Some(secret_access_key),
            endpoint: None,
            region,
            root_path: None,
        }
    }

    pub fn fs(root_path: String) -> Self {
        Self {
            provider: StorageProvider::Fs,
            container: "local".to_string(),
            connection_string: None,
            access_key_id: None,
            access_key_secret: None,
            endpoint: None,
            region: None,
            root_path: Some(root_path),
        }
    }
}

/// Unified storage client using OpenDAL.
///
/// Constructed once at startup, then passed by reference into command
/// handlers; holds no mutable state beyond the operator handle.
#[derive(Clone)]
pub struct StorageClient {
    operator: Operator,
    provider: StorageProvider,
}

impl StorageClient {
    pub async fn new(config: StorageConfig) -> Result<Self> {
        let operator = Self::build_operator(&config)?;
        Ok(Self {
            operator,
            provider: config.provider,
        })
    }

    pub fn provider(&self) -> StorageProvider {
        self.provider
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    fn build_operator(config: &StorageConfig) -> Result<Operator> {
        match &config.provider {
            StorageProvider::Azblob => {
                #[cfg(feature = "azblob")]
                {
                    let conn = config.connection_string.as_deref().unwrap_or_default();
                    let builder = opendal::services::Azblob::from_connection_string(conn)?
                        .container(&config.container);
                    Ok(Operator::new(builder)?.finish())
                }

                #[cfg(not(feature = "azblob"))]
                {
                    Err(Error::UnsupportedProvider {
                        provider: "azblob (feature disabled)".to_string(),
                    })
                }
            }
            StorageProvider::S3 => {
                #[cfg(feature = "s3")]
                {
                    let mut builder = opendal::services::S3::default().bucket(&config.container);
                    if let Some(access_key_id) = &config.access_key_id {
                        builder = builder.access_key_id(access_key_id);
                    }
                    if let Some(secret_access_key) = &config.access_key_secret {
                        builder = builder.secret_access_key(secret_access_key);
                    }
                    if let Some(region) = &config.region {
                        builder = builder.region(region);
                    }
                    if let Some(endpoint) = &config.endpoint {
                        builder = builder.endpoint(endpoint);
                    }
                    Ok(Operator::new(builder)?.finish())
                }

                #[cfg(not(feature = "s3"))]
                {
                    Err(Error::UnsupportedProvider {
                        provider: "s3 (feature disabled)".to_string(),
                    })
                }
            }
            StorageProvider::Fs => {
                #[cfg(feature = "fs")]
                {
                    let root = config
                        .root_path
                        .as_deref()
                        .unwrap_or(constants::DEFAULT_FS_ROOT);
                    let builder = opendal::services::Fs::default().root(root);
                    Ok(Operator::new(builder)?.finish())
                }

                #[cfg(not(feature = "fs"))]
                {
                    Err(Error::UnsupportedProvider {
                        provider: "fs (feature disabled)".to_string(),
                    })
                }
            }
        }
    }

    /// Make sure the target container exists and is reachable.
    ///
    /// Services that support it get the container root created if absent;
    /// the rest are probed with a read-only check. Failure here is the
    /// fatal initialization tier.
    pub async fn ensure_container(&self) -> Result<()> {
        log::debug!("ensure_container provider={:?}", self.provider);
        let outcome = match self.operator.create_dir("/").await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == opendal::ErrorKind::Unsupported => self.operator.check().await,
            Err(e) => Err(e),
        };
        wrap_err!(outcome, InitFailed)
    }

    pub async fn upload_file(&self, local_path: &Path, blob_name: &str) -> Result<u64> {
        log::debug!(
            "upload_file provider={:?} local_path={} blob_name={}",
            self.provider,
            local_path.display(),
            blob_name
        );
        let uploader = OpenDalUploader::new(self.operator.clone());
        wrap_err!(
            uploader.upload(local_path, blob_name).await,
            UploadFailed {
                local_path: local_path.display().to_string()
            }
        )
    }

    pub async fn download_blob(&self, blob_name: &str, dest_path: &Path) -> Result<()> {
        log::debug!(
            "download_blob provider={:?} blob_name={} dest_path={}",
            self.provider,
            blob_name,
            dest_path.display()
        );
        let downloader = OpenDalDownloader::new(self.operator.clone());
        wrap_err!(
            downloader.download(blob_name, dest_path).await,
            DownloadFailed {
                blob_name: blob_name.to_string()
            }
        )
    }

    /// Check whether a blob exists. NotFound maps to `false`; any other
    /// service error propagates.
    pub async fn blob_exists(&self, blob_name: &str) -> Result<bool> {
        log::debug!(
            "blob_exists provider={:?} blob_name={}",
            self.provider,
            blob_name
        );
        match self.operator.stat(blob_name).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == opendal::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list_page(&self, cursor: Option<String>) -> Result<ListPage> {
        log::debug!(
            "list_page provider={:?} cursor={:?}",
            self.provider,
            cursor
        );
        let lister = OpenDalPageLister::new(self.operator.clone());
        wrap_err!(lister.list_page(cursor).await, ListFailed)
    }

    pub async fn delete_blob(&self, blob_name: &str) -> Result<()> {
        log::debug!(
            "delete_blob provider={:?} blob_name={}",
            self.provider,
            blob_name
        );
        let deleter = OpenDalDeleter::new(self.operator.clone());
        wrap_err!(
            deleter.delete(blob_name).await,
            DeleteFailed {
                blob_name: blob_name.to_string()
            }
        )
    }
}
