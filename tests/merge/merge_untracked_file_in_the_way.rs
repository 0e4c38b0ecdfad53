use crate::common::command::{
    commit_file, get_head_commit_sha, init_repository_dir, sprig_branch, sprig_checkout,
    sprig_merge,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_untracked_file_in_the_way(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    sprig_branch(dir, "topic").assert().success();
    sprig_checkout(dir, "topic").assert().success();
    commit_file(dir, "incoming.txt", "from topic", "topic adds a file");
    commit_file(dir, "1.txt", "topic one", "topic edits one");
    sprig_checkout(dir, "master").assert().success();
    commit_file(dir, "master.txt", "m", "master work");
    let head = get_head_commit_sha(dir);

    write_file(FileSpec::new(dir.join("incoming.txt"), "mine".to_string()));

    sprig_merge(dir, "topic")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("There is an untracked file in the way"));

    assert_eq!(get_head_commit_sha(dir), head);
    assert_eq!(read_file(&dir.join("incoming.txt")), "mine");
    assert_eq!(read_file(&dir.join("1.txt")), "one");
}
