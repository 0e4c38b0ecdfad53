use crate::common::COMMIT_DATE;
use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository with `1.txt`, `a/2.txt` and `a/b/3.txt` committed on `master`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_sprig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    for file in ["1.txt", "a/2.txt", "a/b/3.txt"] {
        run_sprig_command(repository_dir.path(), &["add", file])
            .assert()
            .success();
    }

    sprig_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_sprig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("sprig").expect("Failed to find sprig binary");
    cmd.envs(vec![
        ("NO_PAGER", "1"),
        ("NO_COLOR", "1"),
        ("SPRIG_COMMIT_DATE", COMMIT_DATE),
    ]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn sprig_commit(dir: &Path, message: &str) -> Command {
    run_sprig_command(dir, &["commit", message])
}

pub fn sprig_commit_at(dir: &Path, message: &str, date: &str) -> Command {
    let mut cmd = sprig_commit(dir, message);
    cmd.env("SPRIG_COMMIT_DATE", date);
    cmd
}

/// Write a file, stage it and commit it in one go
pub fn commit_file(dir: &Path, file: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(file), content.to_string()));
    run_sprig_command(dir, &["add", file]).assert().success();
    sprig_commit(dir, message).assert().success();
}

pub fn sprig_branch(dir: &Path, name: &str) -> Command {
    run_sprig_command(dir, &["branch", name])
}

pub fn sprig_checkout(dir: &Path, branch: &str) -> Command {
    run_sprig_command(dir, &["checkout", branch])
}

pub fn sprig_merge(dir: &Path, branch: &str) -> Command {
    run_sprig_command(dir, &["merge", branch])
}

/// Get the commit HEAD points at
pub fn get_head_commit_sha(dir: &Path) -> String {
    let head_path = dir.join(".sprig").join("HEAD");
    std::fs::read_to_string(head_path)
        .expect("Failed to read HEAD")
        .trim()
        .to_string()
}

pub fn get_branch_commit_sha(dir: &Path, branch: &str) -> String {
    let branch_path = dir.join(".sprig").join("branches").join(branch);
    std::fs::read_to_string(branch_path)
        .expect("Failed to read branch")
        .trim()
        .to_string()
}

pub fn get_current_branch(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".sprig").join("current-branch"))
        .expect("Failed to read current branch")
        .trim()
        .to_string()
}

/// Parent digests recorded in a stored commit, first parent first
pub fn get_parent_commit_ids(dir: &Path, commit_id: &str) -> Vec<String> {
    let commit_path = dir.join(".sprig").join("commits").join(commit_id);
    let content = std::fs::read(commit_path).expect("Failed to read commit");
    let content = String::from_utf8_lossy(&content);

    content
        .lines()
        .filter_map(|line| line.strip_prefix("parent "))
        .map(str::to_string)
        .collect()
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to run sprig");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is not UTF-8")
}
