use crate::common::command::{
    commit_file, get_head_commit_sha, get_parent_commit_ids, repository_dir, run_sprig_command,
    sprig_branch, sprig_checkout, sprig_merge, stdout_of,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// History:
///       S (f = 1, g = keep)
///      / \
///     Y   X
///  f = 3  f = 2
///  g = mine   g deleted
///
/// Expected: merging X into Y records a two-parent commit with conflict-marked files
#[rstest]
fn merge_conflict(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_sprig_command(dir, &["init"]).assert().success();
    commit_file(dir, "g.txt", "keep\n", "add g");
    commit_file(dir, "f.txt", "1\n", "S");

    sprig_branch(dir, "x").assert().success();
    commit_file(dir, "f.txt", "3\n", "Y edits f");
    commit_file(dir, "g.txt", "mine\n", "Y edits g");
    let y_tip = get_head_commit_sha(dir);

    sprig_checkout(dir, "x").assert().success();
    commit_file(dir, "f.txt", "2\n", "X edits f");
    run_sprig_command(dir, &["rm", "g.txt"]).assert().success();
    run_sprig_command(dir, &["commit", "X drops g"]).assert().success();
    let x_tip = get_head_commit_sha(dir);

    sprig_checkout(dir, "master").assert().success();
    let output = stdout_of(&mut sprig_merge(dir, "x"));

    assert!(output.contains("Encountered a merge conflict."));
    assert_eq!(
        read_file(&dir.join("f.txt")),
        "<<<<<<< HEAD\n3\n=======\n2\n>>>>>>>"
    );
    assert_eq!(
        read_file(&dir.join("g.txt")),
        "<<<<<<< HEAD\nmine\n=======\n>>>>>>>"
    );

    let merge_commit = get_head_commit_sha(dir);
    assert_eq!(get_parent_commit_ids(dir, &merge_commit), vec![y_tip, x_tip]);

    let log = stdout_of(&mut run_sprig_command(dir, &["log"]));
    assert!(log.contains("Merged x into master."));
}
