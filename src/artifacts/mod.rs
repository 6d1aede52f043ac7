//! Data structures and algorithms
//!
//! This module contains the pure types the stores persist and the algorithms
//! that operate on them:
//!
//! - `branch`: Branch and tag name validation
//! - `diff`: Positional line comparison between two snapshots
//! - `history`: Tracked file paths
//! - `merge`: Two-way positional line merge
//! - `objects`: Commit records and content identifiers
//! - `tags`: Tag entries

pub mod branch;
pub mod diff;
pub mod history;
pub mod merge;
pub mod objects;
pub mod tags;
