use crate::common::command::{
    commit_file, get_head_commit_sha, init_repository_dir, run_sprig_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_file_from_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = get_head_commit_sha(dir);
    commit_file(dir, "1.txt", "uno", "translate");

    run_sprig_command(dir, &["checkout", &first[..8], "--", "1.txt"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.join("1.txt")), "one");
    // HEAD does not move
    assert_ne!(get_head_commit_sha(dir), first);

    run_sprig_command(dir, &["checkout", "ffffffff", "--", "1.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No commit with that id exists."));

    run_sprig_command(dir, &["checkout", &first, "--", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist in that commit."));
}
