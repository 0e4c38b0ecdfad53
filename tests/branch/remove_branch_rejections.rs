use crate::common::command::{init_repository_dir, run_sprig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn remove_current_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_sprig_command(dir, &["rm-branch", "master"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cannot remove the current branch."));

    assert!(dir.join(".sprig").join("branches").join("master").is_file());
}

#[rstest]
fn remove_unknown_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_sprig_command(dir, &["rm-branch", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("A branch with that name does not exist."));
}
