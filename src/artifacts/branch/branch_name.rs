use crate::artifacts::branch::is_valid_name;
use crate::errors::{Error, Kind, Result};

/// Validated name of a branch
///
/// Branch names double as directory names under `wizardry/branches` and as
/// the prefix of every commit id created on the branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if is_valid_name(&name) {
            Ok(Self(name))
        } else {
            Err(Error::InvalidName {
                kind: Kind::Branch,
                name,
            })
        }
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
