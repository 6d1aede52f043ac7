//! Command implementations
//!
//! Commands are `impl Repository` blocks, organised in two categories:
//!
//! - `plumbing`: Direct access to stored snapshots (cat-file)
//! - `porcelain`: The version-control workflow (branches, commits, merges,
//!   tags, file history)
//!
//! Most commands come in two layers. The core operation returns a typed
//! [`Result`](crate::errors::Result) and holds the repository lock; the
//! command wrapper named after the CLI subcommand resolves defaults, prints to
//! the repository writer and appends to the operation log.

pub mod plumbing;
pub mod porcelain;
