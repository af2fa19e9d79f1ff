use crate::*;
use blobshell::error::Result;
use blobshell::storage::StorageClient;
use libtest_mimic::Trial;
use predicates::prelude::*;
use uuid::Uuid;

pub fn tests(client: &StorageClient, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        client,
        test_list_prints_seeded_blobs,
        test_list_crosses_page_boundaries
    ));
}

pub async fn test_list_prints_seeded_blobs(client: StorageClient) -> Result<()> {
    let mut seeded = Vec::new();
    for _ in 0..3 {
        let (name, content) = TEST_FIXTURE.new_blob(format!("ls-{}", Uuid::new_v4()));
        client.operator().write(&name, content).await?;
        seeded.push(name);
    }

    let mut expected = predicate::str::contains("Listing blobs in the container:").boxed();
    for name in &seeded {
        expected = expected.and(predicate::str::contains(name.clone())).boxed();
    }

    menu_session("3\n5\n").success().stdout(expected);

    Ok(())
}

pub async fn test_list_crosses_page_boundaries(client: StorageClient) -> Result<()> {
    // More blobs than one 100-entry page; every one must be printed,
    // including those past the first continuation cursor.
    let prefix = format!("page-{}", Uuid::new_v4());
    let mut seeded = Vec::new();
    for i in 0..120 {
        let (name, content) = TEST_FIXTURE.new_blob(format!("{prefix}-{i:03}"));
        client.operator().write(&name, content).await?;
        seeded.push(name);
    }

    let output = menu_session("3\n5\n").success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    for name in &seeded {
        assert!(stdout.contains(name), "missing {name} in listing");
    }

    Ok(())
}
