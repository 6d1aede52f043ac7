use crate::areas::repository::Repository;
use crate::artifacts::history::tracked_path::TrackedPath;
use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::Result;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn track(&self, file: &TrackedPath, commit_id: &CommitId) -> Result<()> {
        let _lock = self.lock()?;
        self.history().track(file, commit_id)
    }

    pub fn track_file(&self, file: &Path, commit_id: Option<&str>) -> anyhow::Result<()> {
        let file = TrackedPath::try_parse(file)?;
        let commit_id = match commit_id {
            Some(commit_id) => CommitId::try_parse(commit_id)?,
            None => self.current_head()?.1,
        };

        self.track(&file, &commit_id)?;
        self.operation_log()
            .append(&format!("Tracked {file} at {commit_id}."))?;

        writeln!(self.writer(), "Tracking {file} at {commit_id}")?;

        Ok(())
    }

    pub fn show_history(&self, file: &Path) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let file = TrackedPath::try_parse(file)?;
        for commit_id in self.history().history(&file)? {
            match self.commit_log().load(&commit_id) {
                Ok(commit) => {
                    writeln!(self.writer(), "Commit: {commit_id} {}", commit.short_message())?
                }
                Err(e) if e.is_not_found() => {
                    writeln!(self.writer(), "Commit: {commit_id} (missing)")?
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(())
    }
}
