use crate::common::command::{init_repository_dir, run_sprig_command, sprig_branch, stdout_of};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn report_every_section(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    sprig_branch(dir, "other").assert().success();

    // staged, then edited again
    write_file(FileSpec::new(dir.join("staged.txt"), "v1".to_string()));
    run_sprig_command(dir, &["add", "staged.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("staged.txt"), "v2".to_string()));

    // removed
    run_sprig_command(dir, &["rm", "a/b/3.txt"]).assert().success();

    // modified and deleted without staging
    write_file(FileSpec::new(dir.join("1.txt"), "edited".to_string()));
    std::fs::remove_file(dir.join("a").join("2.txt")).unwrap();

    // untracked
    let untracked_dir = dir.join("scratch");
    let mut untracked = write_generated_files(&untracked_dir, 3)
        .into_iter()
        .map(|spec| {
            spec.path
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .to_string()
        })
        .collect::<Vec<_>>();
    untracked.sort();

    let status = stdout_of(&mut run_sprig_command(dir, &["status"]));

    let expected = format!(
        "=== Branches ===\n*master\nother\n\n\
         === Staged Files ===\nstaged.txt\n\n\
         === Removed Files ===\na/b/3.txt\n\n\
         === Modifications Not Staged For Commit ===\n\
         1.txt (modified)\na/2.txt (deleted)\nstaged.txt (modified)\n\n\
         === Untracked Files ===\n{}\n\n",
        untracked.join("\n")
    );
    assert_eq!(status, expected);
}
