use crate::common::command::{
    get_branch_commit_sha, get_head_commit_sha, get_parent_commit_ids, repository_dir,
    run_sprig_command, sprig_branch, sprig_checkout, sprig_commit, sprig_merge, stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// History:
///       A (base)
///      / \
///     B   C
///     |   |
///   master  feature
///
/// Expected: merge commit combining B and C with A as split point
#[rstest]
fn merge_simple_divergence(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_sprig_command(dir, &["init"]).assert().success();

    // Commit A
    write_file(FileSpec::new(dir.join("base.txt"), "base content\n".to_string()));
    write_file(FileSpec::new(dir.join("left.txt"), "initial\n".to_string()));
    write_file(FileSpec::new(dir.join("right.txt"), "initial\n".to_string()));
    write_file(FileSpec::new(dir.join("doomed.txt"), "doomed\n".to_string()));
    for file in ["base.txt", "left.txt", "right.txt", "doomed.txt"] {
        run_sprig_command(dir, &["add", file]).assert().success();
    }
    sprig_commit(dir, "Commit A - base").assert().success();

    sprig_branch(dir, "feature").assert().success();

    // Commit B on master
    write_file(FileSpec::new(dir.join("left.txt"), "initial\nmaster change\n".to_string()));
    run_sprig_command(dir, &["add", "left.txt"]).assert().success();
    sprig_commit(dir, "Commit B - master changes").assert().success();
    let master_tip = get_head_commit_sha(dir);

    // Commit C on feature
    sprig_checkout(dir, "feature").assert().success();
    write_file(FileSpec::new(dir.join("right.txt"), "initial\nfeature change\n".to_string()));
    write_file(FileSpec::new(dir.join("added.txt"), "added on feature\n".to_string()));
    run_sprig_command(dir, &["add", "right.txt"]).assert().success();
    run_sprig_command(dir, &["add", "added.txt"]).assert().success();
    run_sprig_command(dir, &["rm", "doomed.txt"]).assert().success();
    sprig_commit(dir, "Commit C - feature changes").assert().success();
    let feature_tip = get_head_commit_sha(dir);

    sprig_checkout(dir, "master").assert().success();
    let output = stdout_of(&mut sprig_merge(dir, "feature"));
    assert!(!output.contains("Encountered a merge conflict."));

    assert_eq!(read_file(&dir.join("base.txt")), "base content\n");
    assert_eq!(read_file(&dir.join("left.txt")), "initial\nmaster change\n");
    assert_eq!(read_file(&dir.join("right.txt")), "initial\nfeature change\n");
    assert_eq!(read_file(&dir.join("added.txt")), "added on feature\n");
    assert!(!dir.join("doomed.txt").exists());

    let merge_commit = get_head_commit_sha(dir);
    assert_eq!(get_branch_commit_sha(dir, "master"), merge_commit);
    assert_eq!(
        get_parent_commit_ids(dir, &merge_commit),
        vec![master_tip, feature_tip]
    );

    // the merge commit tracks exactly the working tree
    let status = stdout_of(&mut run_sprig_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\n\n=== Removed Files ===\n\n"));
    assert!(status.contains("=== Modifications Not Staged For Commit ===\n\n"));
    assert!(status.ends_with("=== Untracked Files ===\n\n"));
}
