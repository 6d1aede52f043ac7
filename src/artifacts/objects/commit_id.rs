//! Commit identifier
//!
//! A commit id is `<branch>_<timestamp>` where the timestamp is the UTC
//! creation time at microsecond resolution (`YYYYMMDDHHMMSSffffff`). Two
//! commits on the same branch within the same microsecond would collide, so
//! the commit log probes for an existing record and appends a monotonic
//! `-<n>` suffix until the id is free (see [`CommitId::with_counter`]).

use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{Error, Kind, Result};

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S%6f";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    pub fn generate(branch: &BranchName, timestamp: chrono::DateTime<chrono::Utc>) -> Self {
        Self(format!("{}_{}", branch, timestamp.format(TIMESTAMP_FORMAT)))
    }

    /// Derive the `n`-th collision-free variant of this id
    pub fn with_counter(&self, n: usize) -> Self {
        Self(format!("{}-{}", self.0, n))
    }

    /// Parse a user- or disk-supplied id
    ///
    /// Ids are used as file names, so anything that could escape the commits
    /// directory or break the line-oriented formats is rejected.
    pub fn try_parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();

        let is_valid = !id.is_empty()
            && !id.starts_with('.')
            && !id.contains("..")
            && !id
                .chars()
                .any(|c| c.is_whitespace() || c.is_control() || c == '/' || c == '\\');

        if is_valid {
            Ok(Self(id))
        } else {
            Err(Error::InvalidName {
                kind: Kind::Commit,
                name: id,
            })
        }
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::CommitId;
    use crate::artifacts::branch::branch_name::BranchName;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn id_is_branch_underscore_timestamp() {
        let branch = BranchName::try_parse("main").unwrap();
        let timestamp = chrono::Utc
            .with_ymd_and_hms(2023, 1, 1, 12, 0, 0)
            .unwrap();

        let id = CommitId::generate(&branch, timestamp);

        assert_eq!(id.as_ref(), "main_20230101120000000000");
        assert_eq!(id.with_counter(2).as_ref(), "main_20230101120000000000-2");
    }

    #[test]
    fn rejects_ids_escaping_the_commits_directory() {
        assert!(CommitId::try_parse("../config").is_err());
        assert!(CommitId::try_parse("main/x").is_err());
        assert!(CommitId::try_parse("has space").is_err());
        assert!(CommitId::try_parse("").is_err());
        assert!(CommitId::try_parse("main_20230101120000000000").is_ok());
    }
}
