//! Interactive menu loop.

use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::commands::{self, BlobStore, CommandOutcome};
use crate::error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "blobshell",
    about = "Interactive console for managing blobs in a cloud object-storage container"
)]
pub struct Args {
    /// Path to a JSON config file; environment variables take precedence
    #[arg(short, long, env = "BLOBSHELL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory where downloaded blobs are written
    #[arg(long)]
    pub download_dir: Option<PathBuf>,
}

/// One parsed menu selection. Anything outside `1..=5` is `Invalid` and
/// re-prompts without leaving the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Upload,
    Download,
    List,
    Delete,
    Exit,
    Invalid,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => Self::Upload,
            "2" => Self::Download,
            "3" => Self::List,
            "4" => Self::Delete,
            "5" => Self::Exit,
            _ => Self::Invalid,
        }
    }
}

fn print_menu() {
    println!();
    println!("Blob Storage Operations:");
    println!("1. Upload a file to blob storage");
    println!("2. Download a file from blob storage");
    println!("3. List all blobs in the container");
    println!("4. Delete a blob");
    println!("5. Exit");
    print!("Enter your choice: ");
    let _ = std::io::stdout().flush();
}

type InputLines = Lines<BufReader<Stdin>>;

/// Read one line; `None` means stdin hit EOF, which the loop treats as exit.
async fn read_line(lines: &mut InputLines) -> Result<Option<String>> {
    Ok(lines.next_line().await?)
}

async fn prompt(lines: &mut InputLines, message: &str) -> Result<Option<String>> {
    print!("{message}");
    let _ = std::io::stdout().flush();
    read_line(lines).await
}

fn print_outcome(outcome: CommandOutcome) {
    match outcome {
        CommandOutcome::Success(msg)
        | CommandOutcome::NotFound(msg)
        | CommandOutcome::Invalid(msg) => println!("{msg}"),
        CommandOutcome::Failed(e) => println!("{e}"),
    }
}

/// Run the menu loop until the operator picks exit (or stdin closes).
///
/// No command failure terminates the loop; every outcome is rendered and the
/// menu is shown again.
pub async fn run<S: BlobStore>(store: &S, download_dir: &Path) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print_menu();
        let Some(choice) = read_line(&mut lines).await? else {
            break;
        };

        match MenuChoice::parse(&choice) {
            MenuChoice::Upload => {
                let Some(path) = prompt(&mut lines, "Enter the local file path to upload: ").await?
                else {
                    break;
                };
                print_outcome(commands::upload(store, &path).await);
            }
            MenuChoice::Download => {
                let Some(name) = prompt(&mut lines, "Enter the blob name to download: ").await?
                else {
                    break;
                };
                print_outcome(commands::download(store, &name, download_dir).await);
            }
            MenuChoice::List => {
                println!("Listing blobs in the container:");
                print_outcome(commands::list(store, |name| println!("{name}")).await);
            }
            MenuChoice::Delete => {
                let Some(name) = prompt(&mut lines, "Enter the blob name to delete: ").await?
                else {
                    break;
                };
                print_outcome(commands::delete(store, &name).await);
            }
            MenuChoice::Exit => break,
            MenuChoice::Invalid => println!("Invalid choice. Please try again."),
        }
    }

    Ok(())
}
