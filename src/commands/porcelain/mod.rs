//! Porcelain commands
//!
//! - `init`: Create the repository directory layout
//! - `branch`: Create, switch, delete and list branches
//! - `commit`: Record a content snapshot on the current branch
//! - `log`: List and show commits
//! - `merge`: Two-way line merge of commits and branches
//! - `tag`: Create, list and delete tags
//! - `history`: Track files and show their history
//! - `diff`: Positional comparison of two commits
//! - `restore`: Write a commit's content back to a file

pub mod branch;
pub mod commit;
pub mod diff;
pub mod history;
pub mod init;
pub mod log;
pub mod merge;
pub mod restore;
pub mod tag;
