use crate::areas::repository::Repository;
use crate::artifacts::objects::commit_id::CommitId;
use crate::artifacts::tags::tag::{Tag, TagName};
use crate::errors::Result;
use std::io::Write;

impl Repository {
    /// Append a tag entry; existing entries with the same name are kept
    pub fn add_tag(&self, name: &TagName, commit_id: &CommitId) -> Result<Tag> {
        let _lock = self.lock()?;

        if !self.commit_log().contains(commit_id) {
            tracing::warn!(tag = %name, commit = %commit_id, "tagging an unknown commit");
        }

        self.tags().create(name, commit_id)
    }

    /// Remove every tag entry named `name`
    pub fn remove_tags(&self, name: &TagName) -> Result<Vec<Tag>> {
        let _lock = self.lock()?;
        self.tags().delete(name)
    }

    pub fn create_tag(&self, name: &str, commit_id: Option<&str>) -> anyhow::Result<()> {
        let name = TagName::try_parse(name)?;
        let commit_id = match commit_id {
            Some(commit_id) => CommitId::try_parse(commit_id)?,
            None => self.current_head()?.1,
        };

        let tag = self.add_tag(&name, &commit_id)?;
        self.operation_log()
            .append(&format!("Created tag {} for {}.", tag.name, tag.commit_id))?;

        writeln!(self.writer(), "Tagged {} as {}", tag.commit_id, tag.name)?;

        Ok(())
    }

    pub fn list_tags(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for tag in self.tags().list()? {
            writeln!(self.writer(), "{} {}", tag.name, tag.commit_id)?;
        }

        Ok(())
    }

    pub fn delete_tag(&self, name: &str) -> anyhow::Result<()> {
        let name = TagName::try_parse(name)?;

        let removed = self.remove_tags(&name)?;
        self.operation_log()
            .append(&format!("Deleted tag {name}."))?;

        for tag in &removed {
            writeln!(self.writer(), "Deleted tag {} (was {})", tag.name, tag.commit_id)?;
        }

        Ok(())
    }
}
