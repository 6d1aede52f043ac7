use crate::areas::repository::Repository;
use crate::artifacts::diff::comparison::Comparison;
use crate::artifacts::objects::commit_id::CommitId;
use std::io::Write;

impl Repository {
    pub fn diff(&self, left: &str, right: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let left = CommitId::try_parse(left)?;
        let right = CommitId::try_parse(right)?;

        let left_commit = self.commit_log().load(&left)?;
        let right_commit = self.commit_log().load(&right)?;
        let left_content = self.content_store().get(left_commit.content_id())?;
        let right_content = self.content_store().get(right_commit.content_id())?;

        let comparison = Comparison::compare(&left_content, &right_content);

        writeln!(self.writer(), "Comparing {left} and {right}:")?;
        write!(self.writer(), "{comparison}")?;

        Ok(())
    }
}
