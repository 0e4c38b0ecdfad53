use crate::common::command::{
    commit_file, get_head_commit_sha, repository_dir, run_sprig_command, sprig_commit_at,
    stdout_of,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn global_log_lists_every_commit(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_sprig_command(dir, &["init"]).assert().success();

    write_file(FileSpec::new(dir.join("f.txt"), "old".to_string()));
    run_sprig_command(dir, &["add", "f.txt"]).assert().success();
    sprig_commit_at(dir, "older", "2020-05-05 08:00:00 +0000")
        .assert()
        .success();
    let older = get_head_commit_sha(dir);

    commit_file(dir, "f.txt", "new", "newer");
    let newer = get_head_commit_sha(dir);

    // reset away from `newer`: it is no longer reachable but still stored
    run_sprig_command(dir, &["reset", &older]).assert().success();

    let global_log = stdout_of(&mut run_sprig_command(dir, &["global-log"]));
    let newer_at = global_log.find(&newer).expect("newer commit listed");
    let older_at = global_log.find(&older).expect("older commit listed");
    let root_at = global_log.find("initial commit").expect("root commit listed");

    assert!(newer_at < older_at);
    assert!(older_at < root_at);
    assert_eq!(global_log.matches("===\n").count(), 3);

    let log = stdout_of(&mut run_sprig_command(dir, &["log"]));
    assert!(!log.contains(&newer));
}
