use crate::common::command::{init_repository_dir, run_sprig_command, sprig_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn readding_committed_content_unstages_the_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));
    run_sprig_command(dir, &["add", "1.txt"]).assert().success();
    assert!(dir.join(".sprig").join("stage").is_file());

    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    run_sprig_command(dir, &["add", "1.txt"]).assert().success();

    assert!(!dir.join(".sprig").join("stage").exists());
    sprig_commit(dir, "nothing changed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No changes added to the commit."));
}
