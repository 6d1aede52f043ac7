use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::Result;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn add_branch(&self, name: &BranchName) -> Result<()> {
        let _lock = self.lock()?;
        self.branches().create(name)
    }

    /// Select `name` as the current branch and persist the choice
    pub fn select_branch(&self, name: &BranchName) -> Result<()> {
        let _lock = self.lock()?;

        self.branches().ensure_exists(name)?;
        self.config().set_current_branch(name)?;
        self.set_current_branch(Some(name.clone()));

        Ok(())
    }

    /// Delete a branch location; commits created on it are kept
    pub fn remove_branch(&self, name: &BranchName, force: bool) -> Result<Option<CommitId>> {
        let _lock = self.lock()?;

        let head = self.branches().delete(name, force)?;

        let was_current = self.current_branch().as_ref() == Some(name);
        if was_current {
            self.config().clear_current_branch()?;
            self.set_current_branch(None);
        }

        Ok(head)
    }

    pub fn create_branch(&self, name: &str) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name)?;

        self.add_branch(&name)?;
        self.operation_log()
            .append(&format!("Created branch {name}."))?;

        writeln!(self.writer(), "Created branch {name}")?;

        Ok(())
    }

    pub fn switch_branch(&self, name: &str) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name)?;

        self.select_branch(&name)?;
        self.operation_log()
            .append(&format!("Switched to branch {name}."))?;

        writeln!(self.writer(), "Switched to branch '{name}'")?;

        Ok(())
    }

    pub fn delete_branch(&self, name: &str, force: bool) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name)?;

        let head = self.remove_branch(&name, force)?;
        self.operation_log()
            .append(&format!("Deleted branch {name}."))?;

        match head {
            Some(head) => writeln!(self.writer(), "Deleted branch {name} (was {head})")?,
            None => writeln!(self.writer(), "Deleted branch {name}")?,
        }

        Ok(())
    }

    pub fn list_branches(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let current = self.current_branch().clone();
        for branch in self.branches().list() {
            if current.as_ref() == Some(&branch) {
                writeln!(self.writer(), "* {}", branch.to_string().green())?;
            } else {
                writeln!(self.writer(), "  {branch}")?;
            }
        }

        Ok(())
    }

    pub fn show_current_branch(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch = self.require_current_branch()?;
        writeln!(self.writer(), "{branch}")?;

        Ok(())
    }
}
