//! Branch table
//!
//! Every branch owns one directory under `wizardry/branches`. Its head
//! pointer, once the branch has a commit, is the file `HEAD` inside that
//! directory holding the id of the branch's most recent commit.
//!
//! ## Layout
//!
//! ```text
//! wizardry/branches/
//! ├── main/
//! │   └── HEAD        main_20230101120000000000
//! └── feature/        (no commits yet)
//! ```
//!
//! Head updates replace the pointer file in one rename and are
//! last-writer-wins. Callers serialise writers through the repository lock.

use crate::areas::write_atomically;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::{Error, Kind, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const HEAD_FILE: &str = "HEAD";

#[derive(Debug)]
pub struct Branches {
    path: Box<Path>,
}

impl Branches {
    pub fn new(path: Box<Path>) -> Self {
        Branches { path }
    }

    pub fn branches_path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).is_dir()
    }

    /// Fail with `NotFound` unless `name` has a storage location
    pub fn ensure_exists(&self, name: &BranchName) -> Result<()> {
        if self.exists(name) {
            Ok(())
        } else {
            Err(Error::not_found(Kind::Branch, name.to_string()))
        }
    }

    pub fn create(&self, name: &BranchName) -> Result<()> {
        let branch_path = self.branch_path(name);

        if branch_path.exists() {
            return Err(Error::AlreadyExists(name.to_string()));
        }

        std::fs::create_dir_all(&branch_path).map_err(|e| Error::io(&branch_path, e))?;
        tracing::debug!(branch = %name, "created branch");

        Ok(())
    }

    /// Remove a branch's storage location
    ///
    /// A location with entries (a head pointer included) is only removed when
    /// `force` is set, and then only the head pointer goes with it: commits
    /// created on the branch stay in the commit log. Returns the head the
    /// branch pointed at, if any.
    pub fn delete(&self, name: &BranchName, force: bool) -> Result<Option<CommitId>> {
        self.ensure_exists(name)?;

        let branch_path = self.branch_path(name);
        let entries = std::fs::read_dir(&branch_path)
            .map_err(|e| Error::io(&branch_path, e))?
            .map(|entry| entry.map(|entry| entry.file_name()))
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| Error::io(&branch_path, e))?;

        let has_foreign_entries = entries.iter().any(|entry| entry != HEAD_FILE);
        let head = self.head(name)?;
        if has_foreign_entries || (!entries.is_empty() && !force) {
            return Err(Error::NotEmpty(name.to_string()));
        }

        if !entries.is_empty() {
            let head_path = self.head_path(name);
            std::fs::remove_file(&head_path).map_err(|e| Error::io(&head_path, e))?;
        }

        match std::fs::remove_dir(&branch_path) {
            Ok(()) => {
                tracing::debug!(branch = %name, "deleted branch");
                Ok(head)
            }
            Err(e) if e.kind() == std::io::ErrorKind::DirectoryNotEmpty => {
                Err(Error::NotEmpty(name.to_string()))
            }
            Err(e) => Err(Error::io(&branch_path, e)),
        }
    }

    /// Lazily enumerate branch names in lexicographic order
    ///
    /// The sequence is finite and every call starts a fresh walk. Entries
    /// that are not valid branch directories are skipped.
    pub fn list(&self) -> impl Iterator<Item = BranchName> + '_ {
        WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_dir())
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?;
                BranchName::try_parse(name).ok()
            })
    }

    pub fn head(&self, name: &BranchName) -> Result<Option<CommitId>> {
        let head_path = self.head_path(name);

        let content = match std::fs::read_to_string(&head_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(&head_path, e)),
        };
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        CommitId::try_parse(content)
            .map(Some)
            .map_err(|e| Error::corrupt(&head_path, e.to_string()))
    }

    /// Point `name` at `commit_id`
    ///
    /// The pointer is replaced in one rename, so readers see either the old or
    /// the new head and never an empty one.
    pub fn set_head(&self, name: &BranchName, commit_id: &CommitId) -> Result<()> {
        self.ensure_exists(name)?;
        write_atomically(&self.head_path(name), commit_id.as_ref().as_bytes())
    }

    /// Drop the head pointer, leaving the branch without commits
    pub fn clear_head(&self, name: &BranchName) -> Result<()> {
        let head_path = self.head_path(name);

        match std::fs::remove_file(&head_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(&head_path, e)),
        }
    }

    fn branch_path(&self, name: &BranchName) -> PathBuf {
        self.path.join(name.as_ref())
    }

    fn head_path(&self, name: &BranchName) -> PathBuf {
        self.branch_path(name).join(HEAD_FILE)
    }
}
