use clap::Parser;

use blobshell::cli::{self, Args};
use blobshell::config::load_config;
use blobshell::error::Result;
use blobshell::storage::StorageClient;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run_app(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_app(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let client = StorageClient::new(config.storage).await?;
    client.ensure_container().await?;

    let download_dir = args.download_dir.unwrap_or(config.download_dir);
    cli::run(&client, &download_dir).await
}
