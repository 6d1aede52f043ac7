use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// An initialized repository with `main` created and selected
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_wizardry_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_wizardry_command(repository_dir.path(), &["create-branch", "main"])
        .assert()
        .success();

    run_wizardry_command(repository_dir.path(), &["switch-branch", "main"])
        .assert()
        .success();

    repository_dir
}

pub fn run_wizardry_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("wizardry").expect("Failed to find wizardry binary");
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("WIZARDRY_LOG");
    cmd.env_remove("WIZARDRY_AUTHOR");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Write `content` to `file` and commit it, returning the new commit id
pub fn commit_content(dir: &Path, file: &str, content: &str, message: &str) -> String {
    std::fs::write(dir.join(file), content).expect("Failed to write file");

    let output = run_wizardry_command(dir, &["commit", "-m", message, file])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).expect("Invalid UTF-8 output");

    parse_commit_id(&stdout)
}

/// Extract the id from a `[branch id] message` commit summary
pub fn parse_commit_id(stdout: &str) -> String {
    stdout
        .trim()
        .trim_start_matches('[')
        .split(']')
        .next()
        .and_then(|header| header.split_whitespace().nth(1))
        .expect("Failed to parse commit summary")
        .to_string()
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("Invalid UTF-8 output")
}
