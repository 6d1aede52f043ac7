//! Persistent stores
//!
//! Each store owns one part of the `wizardry/` directory:
//!
//! - `content_store`: Immutable content snapshots
//! - `commit_log`: Append-only commit records and their insertion order
//! - `branches`: Branch locations and head pointers
//! - `tags`: Tag index
//! - `history`: Per-file commit history
//! - `config`: Key-value configuration, including the current branch
//! - `operation_log`: Append-only diagnostic log
//! - `lock`: Repository-wide exclusive lock for mutating operations
//! - `repository`: Ties the stores together
//!
//! None of the stores coordinate with other processes on their own; mutating
//! commands hold the repository lock for their whole duration.

pub mod branches;
pub mod commit_log;
pub mod config;
pub mod content_store;
pub mod history;
pub(crate) mod lock;
pub mod operation_log;
pub mod repository;
pub mod tags;

use crate::errors::{Error, Result};
use fake::rand;
use std::io::Write;
use std::path::Path;

/// Write `content` to `path` through a temp file in the same directory
///
/// The rename makes the write all-or-nothing: a failure leaves either the
/// previous file or no file at all.
pub(crate) fn write_atomically(path: &Path, content: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| Error::corrupt(path, "path has no parent directory"))?;
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let temp_path = dir.join(format!("tmp-{}", rand::random::<u32>()));
    let write_result = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .and_then(|mut file| file.write_all(content));

    if let Err(e) = write_result {
        let _ = std::fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    std::fs::rename(&temp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        Error::io(path, e)
    })
}

/// Append a single line-oriented entry to `path`, creating it if needed
pub(crate) fn append_line(path: &Path, line: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    writeln!(file, "{line}").map_err(|e| Error::io(path, e))
}

/// Read a file that may legitimately not exist yet
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}
