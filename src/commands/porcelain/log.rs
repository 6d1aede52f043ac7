use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::commit_id::CommitId;
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub oneline: bool,
    /// Follow parent links from the branch head instead of filtering by branch
    pub lineage: bool,
}

impl Repository {
    pub fn list_commits(&self, branch: Option<&str>, opts: &LogOptions) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch = match branch {
            Some(branch) => BranchName::try_parse(branch)?,
            None => self.require_current_branch()?,
        };
        let head = if self.branches().exists(&branch) {
            self.branches().head(&branch)?
        } else {
            None
        };

        let commits = if opts.lineage {
            match &head {
                Some(head) => self.commit_log().lineage(head)?,
                None => Vec::new(),
            }
        } else {
            self.commit_log().list(&branch)?
        };

        for commit in &commits {
            self.display_commit(commit, head.as_ref(), opts)?;
        }

        Ok(())
    }

    pub fn show(&self, commit_id: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let commit_id = CommitId::try_parse(commit_id)?;
        let commit = self.commit_log().load(&commit_id)?;
        let content = self.content_store().get(commit.content_id())?;

        self.display_commit(&commit, None, &LogOptions::default())?;
        let mut writer = self.writer();
        writer.write_all(&content)?;
        if !content.is_empty() && !content.ends_with(b"\n") {
            writeln!(writer)?;
        }

        Ok(())
    }

    fn display_commit(
        &self,
        commit: &Commit,
        head: Option<&CommitId>,
        opts: &LogOptions,
    ) -> anyhow::Result<()> {
        let id: &str = commit.id().as_ref();
        let decoration = if head == Some(commit.id()) {
            format!(" ({})", format!("head -> {}", commit.branch()).cyan())
        } else {
            String::new()
        };

        if opts.oneline {
            writeln!(
                self.writer(),
                "{}{} {}",
                id.yellow(),
                decoration,
                commit.short_message()
            )?;
            return Ok(());
        }

        let mut writer = self.writer();
        writeln!(writer, "{} {}{}", "commit".yellow(), id.yellow(), decoration)?;
        writeln!(writer, "Branch: {}", commit.branch())?;
        if let Some(parent) = commit.parent() {
            writeln!(writer, "Parent: {parent}")?;
        }
        if let Some(author) = commit.author() {
            writeln!(writer, "Author: {author}")?;
        }
        writeln!(writer, "Date:   {}", commit.readable_timestamp())?;
        writeln!(writer)?;
        for message_line in commit.message().lines() {
            writeln!(writer, "    {message_line}")?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
