use crate::common::command::{get_head_commit_sha, repository_dir, run_sprig_command, sprig_commit_at};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::Path;

fn commit_wug(dir: &Path, date: &str) -> String {
    run_sprig_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("wug.txt"), "wug\n".to_string()));
    run_sprig_command(dir, &["add", "wug.txt"]).assert().success();
    sprig_commit_at(dir, "add wug", date).assert().success();

    get_head_commit_sha(dir)
}

#[rstest]
fn identical_history_has_identical_digests(repository_dir: TempDir) {
    let other_dir = TempDir::new().expect("Failed to create temp dir");
    let later_dir = TempDir::new().expect("Failed to create temp dir");

    let first = commit_wug(repository_dir.path(), "2024-03-01 10:00:00 +0000");
    let second = commit_wug(other_dir.path(), "2024-03-01 10:00:00 +0000");
    let later = commit_wug(later_dir.path(), "2024-03-01 10:00:01 +0000");

    assert_eq!(first, second);
    assert_ne!(first, later);
}
