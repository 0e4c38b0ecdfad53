use crate::common::command::{repository_dir, run_sprig_command, stdout_of};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn stage_a_new_file(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_sprig_command(dir, &["init"]).assert().success();

    write_file(FileSpec::new(dir.join("wug.txt"), "wug\n".to_string()));
    write_file(FileSpec::new(
        dir.join("nested").join("deep.txt"),
        "deep\n".to_string(),
    ));

    run_sprig_command(dir, &["add", "wug.txt"]).assert().success();
    // staging the same content again is a no-op
    run_sprig_command(dir, &["add", "wug.txt"]).assert().success();

    assert!(dir.join(".sprig").join("stage").is_file());

    let status = stdout_of(&mut run_sprig_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\nwug.txt\n\n"));
    assert!(status.contains("=== Untracked Files ===\nnested/deep.txt\n\n"));
}
