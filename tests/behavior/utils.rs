use assert_cmd::Command;
use blobshell::error::Result;
use blobshell::storage::{StorageClient, StorageConfig};
use libtest_mimic::{Failed, Trial};
use opendal::Operator;
use rand::Rng;
use rand::prelude::*;
use std::path::PathBuf;
use std::sync::LazyLock;
use uuid::Uuid;

pub static TEST_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
});

// One container root and one download directory per test run, both inside a
// temp dir that lives for the whole process.
static TEST_ROOT: LazyLock<tempfile::TempDir> =
    LazyLock::new(|| tempfile::tempdir().expect("test temp dir"));

pub fn container_root() -> PathBuf {
    TEST_ROOT.path().join("container")
}

pub fn download_root() -> PathBuf {
    TEST_ROOT.path().join("downloads")
}

pub fn scratch_root() -> PathBuf {
    TEST_ROOT.path().join("scratch")
}

pub async fn init_test_service() -> Result<StorageClient> {
    for dir in [container_root(), download_root(), scratch_root()] {
        std::fs::create_dir_all(dir)?;
    }

    let config = StorageConfig::fs(container_root().display().to_string());
    let client = StorageClient::new(config).await?;
    client.ensure_container().await?;

    Ok(client)
}

/// A blobshell Command wired to the fs-backed test container, with a
/// clean environment so host configuration cannot leak in.
pub fn blobshell_cmd() -> Command {
    let mut cmd = Command::cargo_bin("blobshell").unwrap();
    cmd.env_clear()
        .env("RUST_LOG", "info")
        .env("STORAGE_PROVIDER", "fs")
        .env("STORAGE_ROOT", container_root())
        .env("DOWNLOAD_DIR", download_root());
    cmd
}

/// Feed a scripted stdin session to the menu binary.
pub fn menu_session(script: &str) -> assert_cmd::assert::Assert {
    blobshell_cmd().write_stdin(script.to_string()).assert()
}

/// Write a local scratch file with random content, returning its path and
/// payload. The file name doubles as the derived blob name.
pub fn new_local_file(prefix: &str) -> (PathBuf, Vec<u8>) {
    let name = format!("{prefix}-{}.bin", Uuid::new_v4());
    let path = scratch_root().join(&name);

    let mut rng = rand::rng();
    let size = rng.random_range(1..64 * 1024);
    let mut content = vec![0u8; size];
    rng.fill_bytes(&mut content);

    std::fs::write(&path, &content).expect("write scratch file");
    (path, content)
}

pub struct Fixture {
    pub paths: std::sync::Mutex<Vec<String>>,
}

impl Fixture {
    pub const fn new() -> Self {
        Self {
            paths: std::sync::Mutex::new(vec![]),
        }
    }

    pub fn new_blob(&self, name: impl Into<String>) -> (String, Vec<u8>) {
        let name = name.into();
        self.paths.lock().unwrap().push(name.clone());

        let mut rng = rand::rng();
        let size = rng.random_range(1..32 * 1024);
        let mut content = vec![0u8; size];
        rng.fill_bytes(&mut content);

        (name, content)
    }

    pub async fn cleanup(&self, op: &Operator) {
        let paths: Vec<_> = std::mem::take(self.paths.lock().unwrap().as_mut());
        if !paths.is_empty() {
            let _ = op.delete_iter(paths).await;
        }
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_async_trial<F, Fut>(name: &str, client: &StorageClient, f: F) -> Trial
where
    F: FnOnce(StorageClient) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = Result<()>> + Send,
{
    let handle = TEST_RUNTIME.handle().clone();
    let client = client.clone();

    Trial::test(format!("behavior::{name}"), move || {
        handle
            .block_on(f(client))
            .map_err(|err| Failed::from(err.to_string()))
    })
}

#[macro_export]
macro_rules! async_trials {
    ($client:ident, $($test:ident),*) => {
        vec![$(build_async_trial(stringify!($test), $client, $test),)*]
    };
}

pub static TEST_FIXTURE: Fixture = Fixture::new();
