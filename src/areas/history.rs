//! Per-file commit history
//!
//! `wizardry/history/<record name>` holds one `Commit: <commit_id>` line per
//! tracking event for a tracked path. Record names are flat (see
//! [`TrackedPath::to_record_name`]). Histories only grow.

use crate::areas::append_line;
use crate::artifacts::history::tracked_path::TrackedPath;
use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::{Error, Kind, Result};
use std::path::{Path, PathBuf};

const ENTRY_PREFIX: &str = "Commit: ";

#[derive(Debug)]
pub struct HistoryTracker {
    path: Box<Path>,
}

impl HistoryTracker {
    pub fn new(path: Box<Path>) -> Self {
        HistoryTracker { path }
    }

    pub fn history_path(&self) -> &Path {
        &self.path
    }

    pub fn track(&self, file: &TrackedPath, commit_id: &CommitId) -> Result<()> {
        append_line(&self.record_path(file), &format!("{ENTRY_PREFIX}{commit_id}"))?;
        tracing::debug!(file = %file, commit = %commit_id, "tracked file");

        Ok(())
    }

    /// Commit ids recorded for `file`, in append order
    pub fn history(&self, file: &TrackedPath) -> Result<Vec<CommitId>> {
        let record_path = self.record_path(file);

        let content = match std::fs::read_to_string(&record_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::not_found(Kind::File, file.to_string()));
            }
            Err(e) => return Err(Error::io(&record_path, e)),
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.strip_prefix(ENTRY_PREFIX)
                    .ok_or_else(|| Error::corrupt(&record_path, format!("malformed entry {line:?}")))
                    .and_then(|commit_id| {
                        CommitId::try_parse(commit_id.trim())
                            .map_err(|e| Error::corrupt(&record_path, e.to_string()))
                    })
            })
            .collect()
    }

    fn record_path(&self, file: &TrackedPath) -> PathBuf {
        self.path.join(file.to_record_name())
    }
}
