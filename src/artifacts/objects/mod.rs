//! Commit records and content identifiers
//!
//! Two kinds of things are persisted:
//!
//! - **Content snapshots**: verbatim bytes addressed by a [`ContentId`]
//! - **Commits**: line-oriented records pairing a snapshot with a branch and
//!   a message, addressed by a [`CommitId`]
//!
//! [`ContentId`]: content_id::ContentId
//! [`CommitId`]: commit_id::CommitId

pub mod commit;
pub mod commit_id;
pub mod content_id;
pub mod object;

/// Length of a SHA-1 hash in hexadecimal format
pub const CONTENT_ID_LENGTH: usize = 40;

/// Upper bound on the length of a commit message, in characters
pub const MAX_MESSAGE_LENGTH: usize = 255;
