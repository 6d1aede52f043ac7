//! Commit record
//!
//! A commit pairs a content snapshot with the branch it was created on and a
//! message. Commits are written once and never mutated or deleted.
//!
//! ## Format
//!
//! On disk, in `wizardry/commits/<id>`:
//! ```text
//! Id: main_20230101120000000000
//! Branch: main
//! Parent: main_20221231090000000000
//! Content: <content-id>
//! Author: Merlin
//! Date: 2023-01-01T12:00:00.000000+00:00
//! Message: <first line of message>
//! <remaining message lines>
//! ```
//!
//! `Parent` and `Author` are optional. `Message` is always last so it may span
//! several lines.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::MAX_MESSAGE_LENGTH;
use crate::artifacts::objects::commit_id::CommitId;
use crate::artifacts::objects::content_id::ContentId;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::{Error, Result};
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

pub const BRANCH_FIELD: &str = "Branch: ";
const ID_FIELD: &str = "Id: ";
const PARENT_FIELD: &str = "Parent: ";
const CONTENT_FIELD: &str = "Content: ";
const AUTHOR_FIELD: &str = "Author: ";
const DATE_FIELD: &str = "Date: ";
const MESSAGE_FIELD: &str = "Message: ";

/// Environment variable holding the descriptive author label
pub const AUTHOR_ENV: &str = "WIZARDRY_AUTHOR";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Commit {
    id: CommitId,
    branch: BranchName,
    /// Head of the branch when this commit was created
    parent: Option<CommitId>,
    content_id: ContentId,
    author: Option<String>,
    timestamp: chrono::DateTime<chrono::Utc>,
    message: String,
}

impl Commit {
    /// Trim and bound a commit message
    pub fn validate_message(message: &str) -> Result<String> {
        let message = message.trim();

        if message.is_empty() {
            return Err(Error::InvalidMessage("message cannot be empty".to_string()));
        }

        let length = message.chars().count();
        if length > MAX_MESSAGE_LENGTH {
            return Err(Error::InvalidMessage(format!(
                "message is {length} characters long, the limit is {MAX_MESSAGE_LENGTH}"
            )));
        }

        Ok(message.to_string())
    }

    /// Read the author label from the environment, if any
    pub fn author_from_env() -> Option<String> {
        std::env::var(AUTHOR_ENV)
            .ok()
            .map(|author| author.trim().to_string())
            .filter(|author| !author.is_empty() && !author.contains('\n'))
    }

    pub fn id(&self) -> &CommitId {
        &self.id
    }

    pub fn branch(&self) -> &BranchName {
        &self.branch
    }

    pub fn parent(&self) -> Option<&CommitId> {
        self.parent.as_ref()
    }

    pub fn content_id(&self) -> &ContentId {
        &self.content_id
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message, for one-line listings
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %-d %H:%M:%S %Y %z").to_string()
    }

    pub fn display(&self) -> String {
        String::from_utf8_lossy(&self.serialize()).into_owned()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Bytes {
        let mut lines = vec![
            format!("{ID_FIELD}{}", self.id),
            format!("{BRANCH_FIELD}{}", self.branch),
        ];
        if let Some(parent) = &self.parent {
            lines.push(format!("{PARENT_FIELD}{parent}"));
        }
        lines.push(format!("{CONTENT_FIELD}{}", self.content_id));
        if let Some(author) = &self.author {
            lines.push(format!("{AUTHOR_FIELD}{author}"));
        }
        lines.push(format!(
            "{DATE_FIELD}{}",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Micros, false)
        ));
        lines.push(format!("{MESSAGE_FIELD}{}", self.message));

        let mut record = lines.join("\n");
        record.push('\n');

        Bytes::from(record)
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut lines = reader.lines();
        let mut next_line = || -> anyhow::Result<String> {
            lines
                .next()
                .context("unexpected end of commit record")?
                .context("unable to read commit record")
        };

        let id = next_line()?;
        let id = id
            .strip_prefix(ID_FIELD)
            .context("invalid commit record: missing id line")?;
        let id = CommitId::try_parse(id)?;

        let branch = next_line()?;
        let branch = branch
            .strip_prefix(BRANCH_FIELD)
            .context("invalid commit record: missing branch line")?;
        let branch = BranchName::try_parse(branch)?;

        let mut line = next_line()?;
        let parent = match line.strip_prefix(PARENT_FIELD) {
            Some(parent) => {
                let parent = CommitId::try_parse(parent)?;
                line = next_line()?;
                Some(parent)
            }
            None => None,
        };

        let content_id = line
            .strip_prefix(CONTENT_FIELD)
            .context("invalid commit record: missing content line")?;
        let content_id = ContentId::try_parse(content_id)?;

        line = next_line()?;
        let author = match line.strip_prefix(AUTHOR_FIELD) {
            Some(author) => {
                let author = author.to_string();
                line = next_line()?;
                Some(author)
            }
            None => None,
        };

        let timestamp = line
            .strip_prefix(DATE_FIELD)
            .context("invalid commit record: missing date line")?;
        let timestamp = chrono::DateTime::parse_from_rfc3339(timestamp)
            .context("invalid commit record: malformed date")?
            .with_timezone(&chrono::Utc);

        let first_message_line = next_line()?;
        let first_message_line = first_message_line
            .strip_prefix(MESSAGE_FIELD)
            .context("invalid commit record: missing message line")?;

        let mut message = vec![first_message_line.to_string()];
        for line in lines {
            message.push(line.context("unable to read commit record")?);
        }

        Ok(Self::new(
            id,
            branch,
            parent,
            content_id,
            author,
            timestamp,
            message.join("\n"),
        ))
    }
}
