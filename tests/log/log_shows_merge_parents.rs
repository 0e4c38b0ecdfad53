use crate::common::command::{
    commit_file, get_branch_commit_sha, get_head_commit_sha, repository_dir, run_sprig_command,
    sprig_branch, sprig_checkout, sprig_merge, stdout_of,
};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn log_shows_merge_parents(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_sprig_command(dir, &["init"]).assert().success();
    commit_file(dir, "base.txt", "base", "base");

    sprig_branch(dir, "topic").assert().success();
    commit_file(dir, "left.txt", "left", "left");
    let master_tip = get_head_commit_sha(dir);

    sprig_checkout(dir, "topic").assert().success();
    commit_file(dir, "right.txt", "right", "right");
    let topic_tip = get_branch_commit_sha(dir, "topic");

    sprig_checkout(dir, "master").assert().success();
    sprig_merge(dir, "topic").assert().success();

    let log = stdout_of(&mut run_sprig_command(dir, &["log"]));
    let merge_entry = log.split("===\n").nth(1).expect("merge commit is logged first");

    assert!(merge_entry.contains(&format!(
        "Merge: {} {}\n",
        &master_tip[..7],
        &topic_tip[..7]
    )));
    assert!(merge_entry.contains("Merged topic into master.\n"));
    // first parents only: the topic commit is not part of the log
    assert!(!log.contains(&topic_tip));
    assert!(log.contains(&master_tip));
}
