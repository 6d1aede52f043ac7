use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.branches().branches_path())
            .context("Failed to create wizardry/branches directory")?;

        fs::create_dir_all(self.commit_log().commits_path())
            .context("Failed to create wizardry/commits directory")?;

        fs::create_dir_all(self.content_store().objects_path())
            .context("Failed to create wizardry/objects directory")?;

        fs::create_dir_all(self.history().history_path())
            .context("Failed to create wizardry/history directory")?;

        let _lock = self.lock()?;
        self.operation_log()
            .append("Initialized version control system.")
            .context("Failed to write the operation log")?;

        writeln!(
            self.writer(),
            "Initialized empty wizardry repository in {}",
            self.root().display()
        )?;

        Ok(())
    }
}
