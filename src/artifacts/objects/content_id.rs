//! Content snapshot identifier
//!
//! A content id is a 40-character hexadecimal SHA-1. Unlike a git object id it
//! is not a pure function of the content: every allocation mixes in a random
//! nonce and the allocation time, so storing identical content twice yields two
//! distinct snapshots.
//!
//! ## Storage
//!
//! Snapshots are stored in `wizardry/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::CONTENT_ID_LENGTH;
use crate::errors::{Error, Kind, Result};
use fake::rand;
use sha1::{Digest, Sha1};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(String);

impl ContentId {
    /// Parse and validate a content id
    pub fn try_parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();

        if id.len() != CONTENT_ID_LENGTH || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidName {
                kind: Kind::Content,
                name: id,
            });
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Allocate a fresh id for `content`
    pub fn allocate(content: &[u8]) -> Self {
        let nonce = rand::random::<u64>();
        let now = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default();

        let mut hasher = Sha1::new();
        hasher.update(nonce.to_be_bytes());
        hasher.update(now.to_be_bytes());
        hasher.update(content);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Convert to a path relative to the objects directory
    ///
    /// For example, `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    pub fn to_short_id(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ContentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ContentId;
    use pretty_assertions::{assert_eq, assert_ne};
    use std::path::PathBuf;

    #[test]
    fn identical_content_gets_distinct_ids() {
        let first = ContentId::allocate(b"same");
        let second = ContentId::allocate(b"same");

        assert_ne!(first, second);
    }

    #[test]
    fn path_splits_after_two_characters() {
        let id = ContentId::try_parse("abcdef0123456789abcdef0123456789abcdef01").unwrap();

        assert_eq!(
            id.to_path(),
            PathBuf::from("ab").join("cdef0123456789abcdef0123456789abcdef01")
        );
        assert_eq!(id.to_short_id(), "abcdef0");
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(ContentId::try_parse("abc").is_err());
        assert!(ContentId::try_parse("z".repeat(40)).is_err());
    }
}
