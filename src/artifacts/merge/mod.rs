//! Two-way positional line merge
//!
//! There is no common-ancestor computation: the two snapshots are walked line
//! by line in lock-step and compared by position only. See [`line_merge`].

pub mod line_merge;

pub const CONFLICT_START_MARKER: &str = "<<<<<<<";
pub const CONFLICT_SEPARATOR: &str = "=======";
pub const CONFLICT_END_MARKER: &str = ">>>>>>>";
