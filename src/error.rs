use snafu::Snafu;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Environment variable '{key}' is required but not found"))]
    MissingEnvVar { key: String },

    #[snafu(display("Unsupported storage provider: {provider}"))]
    UnsupportedProvider { provider: String },

    #[snafu(display("Failed to read config file '{}': {source}", path.display()))]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Failed to parse config file '{}': {source}", path.display()))]
    ConfigFileParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[snafu(display("Error initializing storage: {source}"))]
    InitFailed { source: Box<Error> },

    #[snafu(display("An error occurred during upload of '{local_path}': {source}"))]
    UploadFailed {
        local_path: String,
        source: Box<Error>,
    },

    #[snafu(display("An error occurred during download of '{blob_name}': {source}"))]
    DownloadFailed {
        blob_name: String,
        source: Box<Error>,
    },

    #[snafu(display("An error occurred while listing blobs: {source}"))]
    ListFailed { source: Box<Error> },

    #[snafu(display("An error occurred during deletion of '{blob_name}': {source}"))]
    DeleteFailed {
        blob_name: String,
        source: Box<Error>,
    },

    #[snafu(display("OpenDAL error: {source}"))]
    OpenDal { source: opendal::Error },

    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },
}

impl From<opendal::Error> for Error {
    fn from(error: opendal::Error) -> Self {
        Error::OpenDal { source: error }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io { source: error }
    }
}
