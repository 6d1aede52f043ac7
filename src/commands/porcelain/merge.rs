use crate::areas::repository::Repository;
use crate::areas::write_atomically;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::merge::line_merge::{MergeLabels, MergeOutcome, merge};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::commit_id::CommitId;
use crate::artifacts::objects::content_id::ContentId;
use crate::errors::Result;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Merged content of two commits, persisted as a new snapshot
#[derive(Debug, Clone)]
pub struct MergedContent {
    pub outcome: MergeOutcome,
    pub content_id: ContentId,
}

/// Per-commit result of a branch merge
#[derive(Debug)]
pub struct MergeReport {
    pub commit_id: CommitId,
    pub result: Result<MergedContent>,
}

impl MergeReport {
    pub fn had_conflict(&self) -> bool {
        self.result
            .as_ref()
            .is_ok_and(|merged| merged.outcome.had_conflict())
    }
}

impl Repository {
    /// Merge the content of `from` into the content of `to`
    ///
    /// The merged snapshot is stored but not committed: the caller decides
    /// whether it becomes a new commit.
    pub fn merge_commits(&self, from: &CommitId, to: &CommitId) -> Result<MergedContent> {
        let _lock = self.lock()?;

        let from = self.commit_log().load(from)?;
        let to = self.commit_log().load(to)?;
        let to_content = self.content_store().get(to.content_id())?;

        self.merge_into(&from, &to_content, to.id().as_ref())
    }

    /// Merge every commit made on `from` into the current content of `to`
    ///
    /// Each commit is attempted independently: a conflict or a failure for one
    /// commit does not stop the others. The head of `to` is never moved.
    pub fn merge_branch_commits(
        &self,
        from: &BranchName,
        to: &BranchName,
    ) -> Result<Vec<MergeReport>> {
        let _lock = self.lock()?;

        self.branches().ensure_exists(from)?;
        self.branches().ensure_exists(to)?;

        let (to_content, to_label) = match self.branches().head(to)? {
            Some(head) => {
                let head = self.commit_log().load(&head)?;
                (
                    self.content_store().get(head.content_id())?,
                    head.id().to_string(),
                )
            }
            None => (Default::default(), to.to_string()),
        };

        let reports = self
            .commit_log()
            .list(from)?
            .into_iter()
            .map(|commit| {
                let result = self.merge_into(&commit, &to_content, &to_label);
                if let Err(e) = &result {
                    tracing::warn!(commit = %commit.id(), error = %e, "merge failed");
                }

                MergeReport {
                    commit_id: commit.id().clone(),
                    result,
                }
            })
            .collect();

        Ok(reports)
    }

    fn merge_into(&self, from: &Commit, to_content: &[u8], to_label: &str) -> Result<MergedContent> {
        let from_content = self.content_store().get(from.content_id())?;

        let outcome = merge(
            &from_content,
            to_content,
            MergeLabels::new(from.id().as_ref(), to_label),
        );
        let content_id = self.content_store().put(outcome.content())?;
        tracing::debug!(
            from = %from.id(),
            to = to_label,
            conflicts = outcome.conflicts().len(),
            "merged content"
        );

        Ok(MergedContent {
            outcome,
            content_id,
        })
    }

    pub fn merge(&self, from: &str, to: &str, output: &Path) -> anyhow::Result<()> {
        let from = CommitId::try_parse(from)?;
        let to = CommitId::try_parse(to)?;

        let merged = self.merge_commits(&from, &to)?;
        write_atomically(&self.path().join(output), merged.outcome.content())?;

        self.operation_log()
            .append(&format!("Merged {from} into {to}."))?;

        writeln!(
            self.writer(),
            "Merged {from} into {to} -> {} ({})",
            output.display(),
            merged.content_id.to_short_id()
        )?;
        self.print_conflicts(&merged.outcome)?;

        Ok(())
    }

    pub fn merge_branches(&self, from: &str, to: &str) -> anyhow::Result<()> {
        let from = BranchName::try_parse(from)?;
        let to = BranchName::try_parse(to)?;

        let reports = self.merge_branch_commits(&from, &to)?;
        self.operation_log()
            .append(&format!("Merged branch {from} into {to}."))?;

        for report in &reports {
            match &report.result {
                Ok(merged) if merged.outcome.had_conflict() => {
                    writeln!(
                        self.writer(),
                        "{}: {} -> {}",
                        report.commit_id,
                        "conflict".red(),
                        merged.content_id
                    )?;
                    self.print_conflicts(&merged.outcome)?;
                }
                Ok(merged) => writeln!(
                    self.writer(),
                    "{}: {} -> {}",
                    report.commit_id,
                    "merged".green(),
                    merged.content_id
                )?,
                Err(e) => writeln!(
                    self.writer(),
                    "{}: {} ({e})",
                    report.commit_id,
                    "failed".red()
                )?,
            }
        }

        let conflicts = reports.iter().filter(|report| report.had_conflict()).count();
        writeln!(
            self.writer(),
            "{} commit(s) from {from} merged against {to}, {conflicts} with conflicts",
            reports.len()
        )?;

        Ok(())
    }

    fn print_conflicts(&self, outcome: &MergeOutcome) -> anyhow::Result<()> {
        if outcome.had_conflict() {
            let lines = outcome
                .conflicts()
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(self.writer(), "CONFLICT at line(s) {lines}")?;
        }

        Ok(())
    }
}
