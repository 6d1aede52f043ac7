use crate::artifacts::branch::is_valid_name;
use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::{Error, Kind, Result};
use derive_new::new;

/// Validated tag name
///
/// Tag names follow the branch naming rules, which in particular forbid the
/// whitespace that delimits entries in the tag index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagName(String);

impl TagName {
    pub fn try_parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if is_valid_name(&name) {
            Ok(Self(name))
        } else {
            Err(Error::InvalidName {
                kind: Kind::Tag,
                name,
            })
        }
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One line of the tag index: `<tag_name> <commit_id>`
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Tag {
    pub name: TagName,
    pub commit_id: CommitId,
}

impl Tag {
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let mut fields = line.split_whitespace();

        match (fields.next(), fields.next(), fields.next()) {
            (None, _, _) => Ok(None),
            (Some(name), Some(commit_id), None) => Ok(Some(Tag::new(
                TagName::try_parse(name)?,
                CommitId::try_parse(commit_id)?,
            ))),
            _ => Err(Error::InvalidName {
                kind: Kind::Tag,
                name: line.to_string(),
            }),
        }
    }

    pub fn to_line(&self) -> String {
        format!("{} {}\n", self.name, self.commit_id)
    }
}
