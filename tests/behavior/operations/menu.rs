use crate::*;
use blobshell::error::Result;
use blobshell::storage::StorageClient;
use libtest_mimic::Trial;
use predicates::prelude::*;

pub fn tests(client: &StorageClient, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        client,
        test_menu_exits_on_option_five,
        test_menu_exits_on_eof,
        test_menu_rejects_invalid_choices,
        test_init_fails_on_unknown_provider,
        test_init_fails_without_connection_string
    ));
}

pub async fn test_menu_exits_on_option_five(_client: StorageClient) -> Result<()> {
    menu_session("5\n")
        .success()
        .stdout(
            predicate::str::contains("Blob Storage Operations:")
                .and(predicate::str::contains("Enter your choice:")),
        );

    Ok(())
}

pub async fn test_menu_exits_on_eof(_client: StorageClient) -> Result<()> {
    // Closed stdin behaves like the exit option.
    menu_session("").success();

    Ok(())
}

pub async fn test_menu_rejects_invalid_choices(_client: StorageClient) -> Result<()> {
    menu_session("9\nbanana\n\n5\n")
        .success()
        .stdout(predicate::str::contains("Invalid choice. Please try again."));

    Ok(())
}

pub async fn test_init_fails_on_unknown_provider(_client: StorageClient) -> Result<()> {
    blobshell_cmd()
        .env("STORAGE_PROVIDER", "carrier-pigeon")
        .write_stdin("5\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unsupported storage provider"));

    Ok(())
}

pub async fn test_init_fails_without_connection_string(_client: StorageClient) -> Result<()> {
    // azblob is the default provider and requires a credential before the
    // menu is ever shown.
    let mut cmd = assert_cmd::Command::cargo_bin("blobshell").unwrap();
    cmd.env_clear()
        .env("STORAGE_PROVIDER", "azblob")
        .write_stdin("5\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("CONNECTION_STRING"));

    Ok(())
}
