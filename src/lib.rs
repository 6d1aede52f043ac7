//! A minimal version-control engine for text content.
//!
//! The crate is organised the same way a small git-like tool is:
//!
//! - `areas`: persistent stores under the `wizardry/` directory (content,
//!   commits, branches, tags, file history, configuration, operation log)
//! - `artifacts`: pure data types and algorithms (commit records, names,
//!   the two-way line merge, positional comparison)
//! - `commands`: user-facing operations composed over a [`Repository`]
//! - `errors`: the error taxonomy shared by every store
//!
//! [`Repository`]: areas::repository::Repository

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

/// Name of the directory holding all repository state.
pub const REPOSITORY_DIR: &str = "wizardry";
