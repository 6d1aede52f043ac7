use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::{Error, Result};
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Record `content` as a new commit on `branch`
    ///
    /// The record is written first, then the head is advanced and the commit
    /// is appended to the insertion order last. A failure at any step undoes
    /// the earlier ones, so the branch and its listing stay as they were.
    pub fn record_commit(
        &self,
        branch: Option<&BranchName>,
        message: &str,
        content: &[u8],
    ) -> Result<Commit> {
        let branch = branch.ok_or(Error::NoBranchSelected)?;
        let _lock = self.lock()?;

        self.branches().ensure_exists(branch)?;
        let message = Commit::validate_message(message)?;
        let parent = self.branches().head(branch)?;

        let content_id = self.content_store().put(content)?;

        let timestamp = chrono::Utc::now();
        let commit_id = self
            .commit_log()
            .next_free_id(CommitId::generate(branch, timestamp));
        let commit = Commit::new(
            commit_id,
            branch.clone(),
            parent,
            content_id,
            Commit::author_from_env(),
            timestamp,
            message,
        );

        self.commit_log().write_record(&commit)?;
        if let Err(e) = self.branches().set_head(branch, commit.id()) {
            self.commit_log().discard_record(commit.id());
            return Err(e);
        }
        if let Err(e) = self.commit_log().append_index(commit.id()) {
            self.restore_head(branch, commit.parent());
            self.commit_log().discard_record(commit.id());
            return Err(e);
        }
        tracing::info!(commit = %commit.id(), branch = %branch, "committed");

        Ok(commit)
    }

    fn restore_head(&self, branch: &BranchName, head: Option<&CommitId>) {
        let restored = match head {
            Some(head) => self.branches().set_head(branch, head),
            None => self.branches().clear_head(branch),
        };

        if let Err(e) = restored {
            tracing::warn!(branch = %branch, error = %e, "unable to restore branch head");
        }
    }

    pub fn commit(&self, message: &str, file: &Path) -> anyhow::Result<()> {
        let file_path = self.path().join(file);
        let content = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read {}", file.display()))?;

        let branch = self.current_branch().clone();
        let commit = self.record_commit(branch.as_ref(), message, &content)?;

        self.operation_log().append(&format!(
            "Committed {} on branch {}.",
            commit.id(),
            commit.branch()
        ))?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            commit.branch(),
            commit.id(),
            commit.short_message()
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::areas::repository::Repository;
    use crate::artifacts::branch::branch_name::BranchName;
    use crate::errors::Error;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn repository_on(dir: &TempDir, branch: &str) -> (Repository, BranchName) {
        let repository = Repository::new(dir.path(), Box::new(std::io::sink())).unwrap();
        repository.init().unwrap();

        let branch = BranchName::try_parse(branch).unwrap();
        repository.add_branch(&branch).unwrap();
        repository.select_branch(&branch).unwrap();

        (repository, branch)
    }

    #[test]
    fn commit_belongs_to_its_branch_and_advances_the_head() {
        let dir = TempDir::new().unwrap();
        let (repository, main) = repository_on(&dir, "main");

        let commit = repository
            .record_commit(Some(&main), "init", b"x\n")
            .unwrap();

        assert_eq!(commit.branch(), &main);
        assert!(commit.id().as_ref().starts_with("main_"));
        assert_eq!(repository.branches().head(&main).unwrap().as_ref(), Some(commit.id()));
        assert_eq!(repository.commit_log().list(&main).unwrap(), vec![commit.clone()]);
        assert_eq!(
            repository
                .content_store()
                .get(commit.content_id())
                .unwrap()
                .as_ref(),
            b"x\n"
        );
    }

    #[test]
    fn second_commit_records_the_previous_head_as_parent() {
        let dir = TempDir::new().unwrap();
        let (repository, main) = repository_on(&dir, "main");

        let first = repository.record_commit(Some(&main), "one", b"1").unwrap();
        let second = repository.record_commit(Some(&main), "two", b"2").unwrap();

        assert_eq!(second.parent(), Some(first.id()));
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn commit_without_a_branch_is_rejected() {
        let dir = TempDir::new().unwrap();
        let (repository, _) = repository_on(&dir, "main");

        assert!(matches!(
            repository.record_commit(None, "init", b"x"),
            Err(Error::NoBranchSelected)
        ));
        assert!(repository.commit_log().ids().unwrap().is_empty());
    }

    #[test]
    fn failed_commit_leaves_the_head_unchanged() {
        let dir = TempDir::new().unwrap();
        let (repository, main) = repository_on(&dir, "main");
        let first = repository.record_commit(Some(&main), "one", b"1").unwrap();

        assert!(matches!(
            repository.record_commit(Some(&main), "   ", b"2"),
            Err(Error::InvalidMessage(_))
        ));
        assert_eq!(repository.branches().head(&main).unwrap().as_ref(), Some(first.id()));
    }

    #[test]
    fn commit_on_an_unreadable_head_is_not_listed() {
        let dir = TempDir::new().unwrap();
        let (repository, main) = repository_on(&dir, "main");
        let first = repository.record_commit(Some(&main), "one", b"1").unwrap();

        // A directory in place of the pointer can be neither read nor replaced
        let head_path = dir.path().join("wizardry/branches/main/HEAD");
        std::fs::remove_file(&head_path).unwrap();
        std::fs::create_dir_all(head_path.join("blocked")).unwrap();

        assert!(matches!(
            repository.record_commit(Some(&main), "two", b"2"),
            Err(Error::Io { .. })
        ));
        assert_eq!(repository.commit_log().list(&main).unwrap(), vec![first.clone()]);
        assert_eq!(repository.commit_log().ids().unwrap(), vec![first.id().clone()]);
        assert_eq!(
            std::fs::read_dir(dir.path().join("wizardry/commits")).unwrap().count(),
            1
        );
    }

    #[test]
    fn commit_that_cannot_be_indexed_restores_the_head() {
        let dir = TempDir::new().unwrap();
        let (repository, main) = repository_on(&dir, "main");
        let first = repository.record_commit(Some(&main), "one", b"1").unwrap();

        // A directory in place of the index makes the append fail
        let index_path = dir.path().join("wizardry/commits.idx");
        std::fs::remove_file(&index_path).unwrap();
        std::fs::create_dir_all(&index_path).unwrap();

        assert!(repository.record_commit(Some(&main), "two", b"2").is_err());
        assert_eq!(repository.branches().head(&main).unwrap().as_ref(), Some(first.id()));
        assert_eq!(
            std::fs::read_dir(dir.path().join("wizardry/commits")).unwrap().count(),
            1
        );
    }

    #[test]
    fn first_commit_that_cannot_be_indexed_leaves_the_branch_empty() {
        let dir = TempDir::new().unwrap();
        let (repository, main) = repository_on(&dir, "main");
        std::fs::create_dir_all(dir.path().join("wizardry/commits.idx")).unwrap();

        assert!(repository.record_commit(Some(&main), "one", b"1").is_err());
        assert_eq!(repository.branches().head(&main).unwrap(), None);
        assert!(repository.branches().delete(&main, false).is_ok());
    }

    #[test]
    fn branch_names_that_would_break_commit_ids_are_rejected() {
        let dir = TempDir::new().unwrap();
        let (repository, main) = repository_on(&dir, "main");
        repository.record_commit(Some(&main), "init", b"x").unwrap();

        assert!(matches!(
            BranchName::try_parse("a\u{a0}b"),
            Err(Error::InvalidName { .. })
        ));
        assert_eq!(repository.commit_log().list(&main).unwrap().len(), 1);
    }

    #[test]
    fn committing_to_a_deleted_branch_is_not_found() {
        let dir = TempDir::new().unwrap();
        let (repository, _) = repository_on(&dir, "main");
        let ghost = BranchName::try_parse("ghost").unwrap();

        assert!(
            repository
                .record_commit(Some(&ghost), "init", b"x")
                .unwrap_err()
                .is_not_found()
        );
    }
}
