//! Append-only commit log
//!
//! Each commit is a record file `wizardry/commits/<id>`. Because directory
//! enumeration order is unspecified, insertion order is kept separately in
//! `wizardry/commits.idx`, one id per line.
//!
//! Listing by branch is a flat filter over the log by the record's `Branch: `
//! field. It does not follow parent links; [`CommitLog::lineage`] does.

use crate::areas::{append_line, read_optional};
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::{BRANCH_FIELD, Commit};
use crate::artifacts::objects::commit_id::CommitId;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::{Error, Kind, Result};
use std::collections::HashSet;
use std::io::{BufRead, Cursor, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct CommitLog {
    path: Box<Path>,
    index_path: Box<Path>,
}

impl CommitLog {
    pub fn new(path: Box<Path>, index_path: Box<Path>) -> Self {
        CommitLog { path, index_path }
    }

    pub fn commits_path(&self) -> &Path {
        &self.path
    }

    /// Pick the first free id derived from `base`
    pub fn next_free_id(&self, base: CommitId) -> CommitId {
        let mut candidate = base.clone();
        let mut counter = 0;

        while self.record_path(&candidate).exists() {
            counter += 1;
            candidate = base.with_counter(counter);
        }

        candidate
    }

    /// Persist a commit record without listing it yet
    ///
    /// A record is only part of the log once [`CommitLog::append_index`] has
    /// run for it; until then [`CommitLog::discard_record`] undoes it.
    pub fn write_record(&self, commit: &Commit) -> Result<()> {
        let record_path = self.record_path(commit.id());

        std::fs::create_dir_all(&self.path).map_err(|e| Error::io(&self.path, e))?;
        let mut record = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&record_path)
            .map_err(|e| Error::io(&record_path, e))?;
        record
            .write_all(&commit.serialize())
            .map_err(|e| Error::io(&record_path, e))
    }

    /// Append a written record to the insertion order
    pub fn append_index(&self, commit_id: &CommitId) -> Result<()> {
        append_line(&self.index_path, commit_id.as_ref())?;
        tracing::debug!(commit = %commit_id, "appended commit");

        Ok(())
    }

    /// Remove a record that never made it into the insertion order
    pub fn discard_record(&self, commit_id: &CommitId) {
        let record_path = self.record_path(commit_id);

        if let Err(e) = std::fs::remove_file(&record_path) {
            tracing::warn!(path = %record_path.display(), error = %e, "unable to discard commit record");
        }
    }

    pub fn contains(&self, commit_id: &CommitId) -> bool {
        self.record_path(commit_id).is_file()
    }

    pub fn load(&self, commit_id: &CommitId) -> Result<Commit> {
        let record_path = self.record_path(commit_id);

        let record = match std::fs::read(&record_path) {
            Ok(record) => record,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::not_found(Kind::Commit, commit_id.to_string()));
            }
            Err(e) => return Err(Error::io(&record_path, e)),
        };

        Commit::deserialize(Cursor::new(record))
            .map_err(|e| Error::corrupt(&record_path, format!("{e:#}")))
    }

    /// Commit ids in insertion order
    pub fn ids(&self) -> Result<Vec<CommitId>> {
        let Some(index) = read_optional(&self.index_path)? else {
            return Ok(Vec::new());
        };

        index
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                CommitId::try_parse(line).map_err(|e| Error::corrupt(&self.index_path, e.to_string()))
            })
            .collect()
    }

    pub fn list_all(&self) -> Result<Vec<Commit>> {
        self.ids()?.iter().map(|id| self.load(id)).collect()
    }

    /// Every commit created on `branch`, in insertion order
    pub fn list(&self, branch: &BranchName) -> Result<Vec<Commit>> {
        let mut commits = Vec::new();

        for commit_id in self.ids()? {
            if self.record_branch(&commit_id)?.as_deref() == Some(branch.as_ref()) {
                commits.push(self.load(&commit_id)?);
            }
        }

        Ok(commits)
    }

    /// Follow parent links from `commit_id`, newest first
    pub fn lineage(&self, commit_id: &CommitId) -> Result<Vec<Commit>> {
        let mut lineage = Vec::new();
        let mut seen = HashSet::new();
        let mut next = Some(commit_id.clone());

        while let Some(commit_id) = next {
            if !seen.insert(commit_id.clone()) {
                break;
            }

            let commit = self.load(&commit_id)?;
            next = commit.parent().cloned();
            lineage.push(commit);
        }

        Ok(lineage)
    }

    // Scans for the `Branch: ` line without parsing the whole record.
    fn record_branch(&self, commit_id: &CommitId) -> Result<Option<String>> {
        let record_path = self.record_path(commit_id);
        let record = std::fs::File::open(&record_path).map_err(|e| Error::io(&record_path, e))?;

        for line in std::io::BufReader::new(record).lines() {
            let line = line.map_err(|e| Error::io(&record_path, e))?;
            if let Some(branch) = line.strip_prefix(BRANCH_FIELD) {
                return Ok(Some(branch.to_string()));
            }
        }

        Ok(None)
    }

    fn record_path(&self, commit_id: &CommitId) -> PathBuf {
        self.path.join(commit_id.as_ref())
    }
}
