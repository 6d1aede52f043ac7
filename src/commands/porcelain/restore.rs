use crate::areas::repository::Repository;
use crate::areas::write_atomically;
use crate::artifacts::objects::commit_id::CommitId;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Write the content of a commit to `file`
    ///
    /// The file is replaced in one step, so a failure leaves it untouched.
    pub fn restore(&self, commit_id: &str, file: &Path) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let commit_id = CommitId::try_parse(commit_id)?;
        let commit = self.commit_log().load(&commit_id)?;
        let content = self.content_store().get(commit.content_id())?;

        write_atomically(&self.path().join(file), &content)?;
        self.operation_log()
            .append(&format!("Restored {commit_id} to {}.", file.display()))?;

        writeln!(
            self.writer(),
            "Restored {commit_id} to {}",
            file.display()
        )?;

        Ok(())
    }
}
