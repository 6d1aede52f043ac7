//! Plumbing commands
//!
//! - `cat-file`: Print a stored content snapshot by id

pub mod cat_file;
