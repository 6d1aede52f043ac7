use assert_fs::TempDir;
use common::command::{
    commit_content, init_repository_dir, parse_commit_id, repository_dir, run_wizardry_command,
    stdout_of,
};
use fake::Fake;
use fake::faker::lorem::en::Words;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn commit_records_content_on_current_branch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = Words(5..10).fake::<Vec<String>>().join(" ");
    let commit_id = commit_content(init_repository_dir.path(), "notes.txt", &content, "init");

    assert!(commit_id.starts_with("main_"));

    let root = init_repository_dir.path().join("wizardry");
    let head = std::fs::read_to_string(root.join("branches/main/HEAD"))?;
    assert_eq!(head.trim(), commit_id);

    let record = std::fs::read_to_string(root.join("commits").join(&commit_id))?;
    assert!(record.contains("Branch: main"));
    assert!(record.contains("Message: init"));

    run_wizardry_command(init_repository_dir.path(), &["show", &commit_id])
        .assert()
        .success()
        .stdout(predicate::str::contains(content));

    Ok(())
}

#[rstest]
fn commit_without_selected_branch_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_wizardry_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    std::fs::write(repository_dir.path().join("notes.txt"), "x\n")?;

    run_wizardry_command(
        repository_dir.path(),
        &["commit", "-m", "init", "notes.txt"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("no branch selected"));

    let commits = std::fs::read_dir(repository_dir.path().join("wizardry/commits"))?.count();
    assert_eq!(commits, 0);

    Ok(())
}

#[rstest]
fn commit_with_empty_message_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(init_repository_dir.path().join("notes.txt"), "x\n")?;

    run_wizardry_command(
        init_repository_dir.path(),
        &["commit", "-m", "   ", "notes.txt"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid commit message"));

    assert!(
        !init_repository_dir
            .path()
            .join("wizardry/branches/main/HEAD")
            .exists()
    );

    Ok(())
}

#[rstest]
fn commit_of_missing_file_fails(init_repository_dir: TempDir) {
    run_wizardry_command(
        init_repository_dir.path(),
        &["commit", "-m", "init", "missing.txt"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("Unable to read missing.txt"));
}

#[rstest]
fn rapid_commits_get_distinct_ids(init_repository_dir: TempDir) {
    let ids = (0..5)
        .map(|i| {
            commit_content(
                init_repository_dir.path(),
                "notes.txt",
                &format!("{i}\n"),
                &format!("change {i}"),
            )
        })
        .collect::<std::collections::HashSet<_>>();

    assert_eq!(ids.len(), 5);
}

#[rstest]
fn list_commits_filters_by_branch(init_repository_dir: TempDir) {
    let first = commit_content(init_repository_dir.path(), "notes.txt", "x\n", "init");

    run_wizardry_command(init_repository_dir.path(), &["create-branch", "feature"])
        .assert()
        .success();
    run_wizardry_command(init_repository_dir.path(), &["switch-branch", "feature"])
        .assert()
        .success();
    let second = commit_content(init_repository_dir.path(), "notes.txt", "y\n", "change");

    let main_log = stdout_of(&mut run_wizardry_command(
        init_repository_dir.path(),
        &["list-commits", "main", "--oneline"],
    ));
    assert_eq!(main_log, format!("{first} (head -> main) init\n"));

    let feature_log = stdout_of(&mut run_wizardry_command(
        init_repository_dir.path(),
        &["list-commits", "--oneline"],
    ));
    assert_eq!(feature_log, format!("{second} (head -> feature) change\n"));
}

#[rstest]
fn list_commits_in_full_format(init_repository_dir: TempDir) {
    let first = commit_content(init_repository_dir.path(), "notes.txt", "x\n", "init");
    let second = commit_content(init_repository_dir.path(), "notes.txt", "y\n", "change");

    let stdout = stdout_of(&mut run_wizardry_command(
        init_repository_dir.path(),
        &["list-commits"],
    ));

    let first_at = stdout
        .find(&format!("commit {first}\n"))
        .expect("first commit listed");
    let second_at = stdout
        .find(&format!("commit {second} (head -> main)"))
        .expect("second commit listed");
    assert!(first_at < second_at);
    assert!(stdout.contains(&format!("Parent: {first}")));
    assert!(stdout.contains("    change"));
}

#[rstest]
fn list_commits_follows_lineage(init_repository_dir: TempDir) {
    let first = commit_content(init_repository_dir.path(), "notes.txt", "x\n", "init");
    let second = commit_content(init_repository_dir.path(), "notes.txt", "y\n", "change");

    let stdout = stdout_of(&mut run_wizardry_command(
        init_repository_dir.path(),
        &["list-commits", "--lineage", "--oneline"],
    ));

    assert_eq!(
        stdout,
        format!("{second} (head -> main) change\n{first} init\n")
    );
}

#[rstest]
fn list_commits_of_unknown_branch_is_empty(init_repository_dir: TempDir) {
    run_wizardry_command(
        init_repository_dir.path(),
        &["list-commits", "ghost", "--oneline"],
    )
    .assert()
    .success()
    .stdout("");
}

#[rstest]
fn commit_summary_shows_branch_and_id(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(init_repository_dir.path().join("notes.txt"), "x\n")?;

    let stdout = stdout_of(&mut run_wizardry_command(
        init_repository_dir.path(),
        &["commit", "-m", "init", "notes.txt"],
    ));

    let commit_id = parse_commit_id(&stdout);
    assert_eq!(stdout, format!("[main {commit_id}] init\n"));

    Ok(())
}
