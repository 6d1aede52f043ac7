//! Tag index
//!
//! One line per tag in `wizardry/tags`: `<tag_name> <commit_id>`. Creating a
//! tag never checks for an existing tag of the same name, so duplicates
//! persist side by side; deleting a name removes every entry carrying it.
//! Commit ids are not validated against the commit log.

use crate::areas::{append_line, read_optional, write_atomically};
use crate::artifacts::objects::commit_id::CommitId;
use crate::artifacts::tags::tag::{Tag, TagName};
use crate::errors::{Error, Kind, Result};
use std::path::Path;

#[derive(Debug)]
pub struct TagIndex {
    path: Box<Path>,
}

impl TagIndex {
    pub fn new(path: Box<Path>) -> Self {
        TagIndex { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn create(&self, name: &TagName, commit_id: &CommitId) -> Result<Tag> {
        let tag = Tag::new(name.clone(), commit_id.clone());
        append_line(&self.path, tag.to_line().trim_end())?;

        Ok(tag)
    }

    /// All entries in storage order
    pub fn list(&self) -> Result<Vec<Tag>> {
        let Some(content) = read_optional(&self.path)? else {
            return Ok(Vec::new());
        };

        content
            .lines()
            .filter_map(|line| Tag::parse_line(line).transpose())
            .map(|tag| tag.map_err(|e| Error::corrupt(&self.path, e.to_string())))
            .collect()
    }

    /// Remove every entry named `name`, returning the removed entries
    pub fn delete(&self, name: &TagName) -> Result<Vec<Tag>> {
        let (removed, kept): (Vec<Tag>, Vec<Tag>) =
            self.list()?.into_iter().partition(|tag| &tag.name == name);

        if removed.is_empty() {
            return Err(Error::not_found(Kind::Tag, name.to_string()));
        }

        let content = kept.iter().map(Tag::to_line).collect::<String>();
        write_atomically(&self.path, content.as_bytes())?;

        Ok(removed)
    }
}
