use crate::common::command::{
    get_branch_commit_sha, get_head_commit_sha, get_parent_commit_ids, init_repository_dir,
    run_sprig_command, sprig_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn commit_advances_branch_and_head(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let previous_head = get_head_commit_sha(dir);

    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    run_sprig_command(dir, &["add", "1.txt"]).assert().success();

    sprig_commit(dir, "Translate one")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[master [0-9a-f]{7}\] Translate one\n$").unwrap());

    let head = get_head_commit_sha(dir);
    assert_ne!(head, previous_head);
    assert_eq!(get_branch_commit_sha(dir, "master"), head);
    assert_eq!(get_parent_commit_ids(dir, &head), vec![previous_head]);
    assert!(!dir.join(".sprig").join("stage").exists());
}
