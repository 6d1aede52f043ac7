//! Error taxonomy for repository operations
//!
//! Every store surfaces its failures to the immediate caller. Nothing retries:
//! the tool is single-shot and single-user, so the caller reports the failure
//! and the operation is a no-op.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// What kind of thing a `NotFound` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Branch,
    Commit,
    Content,
    Tag,
    File,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Kind::Branch => "branch",
            Kind::Commit => "commit",
            Kind::Content => "content",
            Kind::Tag => "tag",
            Kind::File => "file",
        };
        write!(f, "{kind}")
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind} {name} not found")]
    NotFound { kind: Kind, name: String },

    #[error("branch {0} already exists")]
    AlreadyExists(String),

    #[error("branch {0} is not empty")]
    NotEmpty(String),

    #[error("not a wizardry repository: {0} (run init first)")]
    NotInitialized(PathBuf),

    #[error("no branch selected, run switch-branch first")]
    NoBranchSelected,

    #[error("invalid {kind} name: {name:?}")]
    InvalidName { kind: Kind, name: String },

    #[error("invalid commit message: {0}")]
    InvalidMessage(String),

    #[error("corrupt record at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("I/O failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn not_found(kind: Kind, name: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn corrupt(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Error::Corrupt {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
