use crate::common::command::{
    commit_file, get_current_branch, get_head_commit_sha, init_repository_dir, run_sprig_command,
    sprig_branch, sprig_checkout, stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

const IN_THE_WAY: &str = "There is an untracked file in the way";

/// A staged file is still untracked by the checked-out commit
#[rstest]
fn checkout_refuses_to_clobber_staged_only_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    sprig_branch(dir, "topic").assert().success();
    sprig_checkout(dir, "topic").assert().success();
    commit_file(dir, "g.txt", "topic", "add g");
    sprig_checkout(dir, "master").assert().success();

    write_file(FileSpec::new(dir.join("g.txt"), "precious".to_string()));
    run_sprig_command(dir, &["add", "g.txt"]).assert().success();
    let head = get_head_commit_sha(dir);

    sprig_checkout(dir, "topic")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(IN_THE_WAY));

    assert_eq!(read_file(&dir.join("g.txt")), "precious");
    assert_eq!(get_current_branch(dir), "master");
    assert_eq!(get_head_commit_sha(dir), head);
    assert!(dir.join(".sprig").join("stage").exists());

    let status = stdout_of(&mut run_sprig_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\ng.txt\n"));
}

#[rstest]
fn reset_refuses_to_clobber_staged_only_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_file(dir, "g.txt", "old", "add g");
    let with_g = get_head_commit_sha(dir);
    run_sprig_command(dir, &["rm", "g.txt"]).assert().success();
    run_sprig_command(dir, &["commit", "drop g"]).assert().success();
    let head = get_head_commit_sha(dir);

    write_file(FileSpec::new(dir.join("g.txt"), "precious".to_string()));
    run_sprig_command(dir, &["add", "g.txt"]).assert().success();

    run_sprig_command(dir, &["reset", &with_g])
        .assert()
        .failure()
        .stderr(predicate::str::contains(IN_THE_WAY));

    assert_eq!(read_file(&dir.join("g.txt")), "precious");
    assert_eq!(get_head_commit_sha(dir), head);
    assert!(dir.join(".sprig").join("stage").exists());
}
