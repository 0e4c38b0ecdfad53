use crate::common::command::{init_repository_dir, run_sprig_command, sprig_commit, stdout_of};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn remove_tracked_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_sprig_command(dir, &["rm", "a/b/3.txt"]).assert().success();

    assert!(!dir.join("a").join("b").exists());
    assert!(dir.join("a").join("2.txt").is_file());

    let status = stdout_of(&mut run_sprig_command(dir, &["status"]));
    assert!(status.contains("=== Removed Files ===\na/b/3.txt\n\n"));
    assert!(status.contains("=== Modifications Not Staged For Commit ===\n\n"));

    sprig_commit(dir, "drop 3.txt").assert().success();

    let status = stdout_of(&mut run_sprig_command(dir, &["status"]));
    assert!(status.contains("=== Removed Files ===\n\n"));

    // the file is no longer tracked, so removing it again has no reason
    run_sprig_command(dir, &["rm", "a/b/3.txt"]).assert().failure();
}
