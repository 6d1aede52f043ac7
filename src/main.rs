use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wizardry::areas::repository::Repository;
use wizardry::commands::porcelain::log::LogOptions;

/// Environment variable overriding the tracing filter
const LOG_ENV: &str = "WIZARDRY_LOG";

#[derive(Parser)]
#[command(
    name = "wizardry",
    version = "0.1.0",
    about = "A minimal version control engine",
    long_about = "Tracks successive states of text content under named branches, \
    records commits with messages, merges branches with line-level conflict detection, \
    and supports tags and per-file history.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(short, long, global = true, help = "Print diagnostic logs to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the wizardry directory in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(name = "create-branch", about = "Create a new branch")]
    CreateBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(
        name = "switch-branch",
        about = "Select the current branch",
        long_about = "This command sets the current branch. The choice is persisted in wizardry/config."
    )]
    SwitchBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(
        name = "delete-branch",
        about = "Delete a branch",
        long_about = "This command deletes a branch location. A branch with a head commit is only \
        deleted with --force; its commits are kept in the commit log either way."
    )]
    DeleteBranch {
        #[arg(index = 1)]
        name: String,
        #[arg(short, long, help = "Delete the branch even if it has a head commit")]
        force: bool,
    },
    #[command(name = "current-branch", about = "Print the current branch")]
    CurrentBranch,
    #[command(name = "list-branches", about = "List branches in lexicographic order")]
    ListBranches,
    #[command(
        name = "commit",
        about = "Record the content of a file on the current branch",
        long_about = "This command stores a snapshot of the file and records a commit with the specified message on the current branch."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(index = 1, help = "The file whose content is committed")]
        file: PathBuf,
    },
    #[command(name = "list-commits", about = "List the commits of a branch")]
    ListCommits {
        #[arg(index = 1, help = "The branch to list, defaults to the current branch")]
        branch: Option<String>,
        #[arg(long, help = "Show one commit per line")]
        oneline: bool,
        #[arg(long, help = "Follow parent links from the branch head")]
        lineage: bool,
    },
    #[command(name = "show", about = "Show a commit and its content")]
    Show {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "diff", about = "Compare the content of two commits line by line")]
    Diff {
        #[arg(index = 1)]
        left: String,
        #[arg(index = 2)]
        right: String,
    },
    #[command(name = "restore", about = "Write the content of a commit to a file")]
    Restore {
        #[arg(index = 1)]
        commit: String,
        #[arg(index = 2)]
        file: PathBuf,
    },
    #[command(
        name = "merge",
        about = "Merge the content of two commits into a file",
        long_about = "This command merges two commits line by line. Lines that differ at the same \
        position are written as a conflict block. The result is not committed."
    )]
    Merge {
        #[arg(index = 1, help = "The commit to merge from")]
        from: String,
        #[arg(index = 2, help = "The commit to merge into")]
        to: String,
        #[arg(index = 3, help = "The file receiving the merged content")]
        output: PathBuf,
    },
    #[command(
        name = "merge-branches",
        about = "Merge every commit of a branch against another branch",
        long_about = "This command merges each commit of the source branch against the head of the \
        destination branch and reports conflicts. The destination head is not moved."
    )]
    MergeBranches {
        #[arg(index = 1)]
        from: String,
        #[arg(index = 2)]
        to: String,
    },
    #[command(name = "track-file", about = "Record a commit in a file's history")]
    TrackFile {
        #[arg(index = 1)]
        file: PathBuf,
        #[arg(short, long, help = "The commit to record, defaults to the current head")]
        commit: Option<String>,
    },
    #[command(name = "show-history", about = "Show the commits recorded for a file")]
    ShowHistory {
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "create-tag", about = "Tag a commit")]
    CreateTag {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2, help = "The commit to tag, defaults to the current head")]
        commit: Option<String>,
    },
    #[command(name = "list-tags", about = "List tags in storage order")]
    ListTags,
    #[command(name = "delete-tag", about = "Delete every tag with the given name")]
    DeleteTag {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "cat-file", about = "Print a stored content snapshot")]
    CatFile {
        #[arg(index = 1)]
        content_id: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "wizardry=debug" } else { "wizardry=warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let pwd = std::env::current_dir()?;
    let repository_path = match &cli.command {
        Commands::Init { path: Some(path) } => pwd.join(path),
        _ => pwd,
    };
    let repository = Repository::new(&repository_path, Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Init { .. } => repository.init()?,
        Commands::CreateBranch { name } => repository.create_branch(name)?,
        Commands::SwitchBranch { name } => repository.switch_branch(name)?,
        Commands::DeleteBranch { name, force } => repository.delete_branch(name, *force)?,
        Commands::CurrentBranch => repository.show_current_branch()?,
        Commands::ListBranches => repository.list_branches()?,
        Commands::Commit { message, file } => repository.commit(message, file)?,
        Commands::ListCommits {
            branch,
            oneline,
            lineage,
        } => repository.list_commits(
            branch.as_deref(),
            &LogOptions {
                oneline: *oneline,
                lineage: *lineage,
            },
        )?,
        Commands::Show { commit } => repository.show(commit)?,
        Commands::Diff { left, right } => repository.diff(left, right)?,
        Commands::Restore { commit, file } => repository.restore(commit, file)?,
        Commands::Merge { from, to, output } => repository.merge(from, to, output)?,
        Commands::MergeBranches { from, to } => repository.merge_branches(from, to)?,
        Commands::TrackFile { file, commit } => repository.track_file(file, commit.as_deref())?,
        Commands::ShowHistory { file } => repository.show_history(file)?,
        Commands::CreateTag { name, commit } => repository.create_tag(name, commit.as_deref())?,
        Commands::ListTags => repository.list_tags()?,
        Commands::DeleteTag { name } => repository.delete_tag(name)?,
        Commands::CatFile { content_id } => repository.cat_file(content_id)?,
    }

    repository.writer().flush()?;

    Ok(())
}
