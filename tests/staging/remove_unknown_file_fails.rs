use crate::common::command::{init_repository_dir, run_sprig_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn remove_unknown_file_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("loose.txt"), "loose".to_string()));

    run_sprig_command(dir, &["rm", "loose.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No reason to remove the file."));

    assert!(dir.join("loose.txt").is_file());
}
