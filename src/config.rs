use serde::Deserialize;
use snafu::ResultExt;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ConfigFileParseSnafu, ConfigFileReadSnafu, Error, Result};
use crate::storage::{StorageConfig, StorageProvider};

/// Optional JSON config file; every key can also be supplied through the
/// environment, and environment values win.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub storage_provider: Option<String>,
    pub connection_string: Option<String>,
    pub container_name: Option<String>,
    pub access_key_id: Option<String>,
    pub access_key_secret: Option<String>,
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub storage_root: Option<String>,
    pub download_dir: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).context(ConfigFileReadSnafu {
            path: path.to_path_buf(),
        })?;
        serde_json::from_str(&raw).context(ConfigFileParseSnafu {
            path: path.to_path_buf(),
        })
    }
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub download_dir: PathBuf,
}

// Environment first, config file second.
fn resolve(key: &str, file_value: &Option<String>) -> Option<String> {
    env::var(key).ok().or_else(|| file_value.clone())
}

fn require(key: &str, file_value: &Option<String>) -> Result<String> {
    resolve(key, file_value).ok_or_else(|| Error::MissingEnvVar {
        key: key.to_string(),
    })
}

/// Load application configuration from the environment and an optional
/// config file.
pub fn load_config(config_path: Option<&Path>) -> Result<AppConfig> {
    let file = match config_path {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let provider_str =
        resolve("STORAGE_PROVIDER", &file.storage_provider).unwrap_or_else(|| "azblob".to_string());
    let provider = StorageProvider::from_str(&provider_str)?;

    let storage = match provider {
        StorageProvider::Azblob => load_azblob_config(&file)?,
        StorageProvider::S3 => load_s3_config(&file)?,
        StorageProvider::Fs => load_fs_config(&file),
    };

    Ok(AppConfig {
        storage,
        download_dir: resolve_download_dir(&file),
    })
}

/// Load Azure Blob Storage configuration
fn load_azblob_config(file: &FileConfig) -> Result<StorageConfig> {
    let connection_string = require("CONNECTION_STRING", &file.connection_string)?;
    let container = require("CONTAINER_NAME", &file.container_name)?;
    Ok(StorageConfig::azblob(connection_string, container))
}

/// Load S3-compatible configuration
fn load_s3_config(file: &FileConfig) -> Result<StorageConfig> {
    let container = require("CONTAINER_NAME", &file.container_name)?;
    let access_key_id = require("STORAGE_ACCESS_KEY_ID", &file.access_key_id)?;
    let access_key_secret = require("STORAGE_ACCESS_KEY_SECRET", &file.access_key_secret)?;
    let region = resolve("STORAGE_REGION", &file.region);

    let mut config = StorageConfig::s3(container, access_key_id, access_key_secret, region);
    config.endpoint = resolve("STORAGE_ENDPOINT", &file.endpoint);
    Ok(config)
}

/// Load filesystem configuration (used by the behavior tests)
fn load_fs_config(file: &FileConfig) -> StorageConfig {
    let root = resolve("STORAGE_ROOT", &file.storage_root)
        .unwrap_or_else(|| crate::storage::constants::DEFAULT_FS_ROOT.to_string());
    StorageConfig::fs(root)
}

// Downloads land in DOWNLOAD_DIR when set, otherwise the platform download
// folder, otherwise the current directory.
fn resolve_download_dir(file: &FileConfig) -> PathBuf {
    resolve("DOWNLOAD_DIR", &file.download_dir)
        .map(PathBuf::from)
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
