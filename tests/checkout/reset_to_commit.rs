use crate::common::command::{
    commit_file, get_branch_commit_sha, get_head_commit_sha, init_repository_dir,
    run_sprig_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reset_to_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = get_head_commit_sha(dir);
    commit_file(dir, "later.txt", "later", "later");
    commit_file(dir, "1.txt", "uno", "edit");

    write_file(FileSpec::new(dir.join("a").join("2.txt"), "dirty".to_string()));
    write_file(FileSpec::new(dir.join("staged.txt"), "s".to_string()));
    run_sprig_command(dir, &["add", "staged.txt"]).assert().success();

    run_sprig_command(dir, &["reset", &first[..6]])
        .assert()
        .success();

    assert_eq!(get_head_commit_sha(dir), first);
    assert_eq!(get_branch_commit_sha(dir, "master"), first);
    assert!(!dir.join("later.txt").exists());
    assert_eq!(read_file(&dir.join("1.txt")), "one");
    assert_eq!(read_file(&dir.join("a").join("2.txt")), "two");
    assert!(!dir.join(".sprig").join("stage").exists());
    // a staged file that no commit tracks is left alone
    assert!(dir.join("staged.txt").is_file());
}

#[rstest]
fn reset_to_unknown_commit_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir);

    run_sprig_command(dir, &["reset", "0000000000"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No commit with that id exists."));

    assert_eq!(get_head_commit_sha(dir), head);
}
