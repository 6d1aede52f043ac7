//! Repository configuration
//!
//! The configuration is a list of `key=value` lines in `wizardry/config`.
//! Blank lines and lines starting with `#` are ignored. Rewrites keep every
//! key they do not touch.
//!
//! The only key the core reads is `current_branch`, the durable "current
//! branch" pointer that survives process restarts.

use crate::areas::{read_optional, write_atomically};
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{Error, Result};
use std::path::Path;

const ENTRY_REGEX: &str = r"^\s*([A-Za-z_][A-Za-z0-9_.-]*)\s*=\s*(.*?)\s*$";

pub const CURRENT_BRANCH_KEY: &str = "current_branch";

#[derive(Debug)]
pub struct Config {
    path: Box<Path>,
}

impl Config {
    pub fn new(path: Box<Path>) -> Self {
        Config { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries()?
            .into_iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, value)| value))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries()?;

        match entries.iter_mut().find(|(entry_key, _)| entry_key == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => entries.push((key.to_string(), value.to_string())),
        }

        self.write_entries(&entries)
    }

    pub fn unset(&self, key: &str) -> Result<()> {
        let mut entries = self.entries()?;
        entries.retain(|(entry_key, _)| entry_key != key);

        self.write_entries(&entries)
    }

    pub fn current_branch(&self) -> Result<Option<BranchName>> {
        match self.get(CURRENT_BRANCH_KEY)? {
            Some(name) if !name.is_empty() => BranchName::try_parse(name)
                .map(Some)
                .map_err(|e| Error::corrupt(&self.path, e.to_string())),
            _ => Ok(None),
        }
    }

    pub fn set_current_branch(&self, branch: &BranchName) -> Result<()> {
        self.set(CURRENT_BRANCH_KEY, branch.as_ref())
    }

    pub fn clear_current_branch(&self) -> Result<()> {
        self.unset(CURRENT_BRANCH_KEY)
    }

    fn entries(&self) -> Result<Vec<(String, String)>> {
        let Some(content) = read_optional(&self.path)? else {
            return Ok(Vec::new());
        };

        let re = regex::Regex::new(ENTRY_REGEX)
            .map_err(|e| Error::corrupt(&self.path, e.to_string()))?;

        content
            .lines()
            .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
            .map(|line| {
                re.captures(line)
                    .map(|captures| (captures[1].to_string(), captures[2].to_string()))
                    .ok_or_else(|| {
                        Error::corrupt(&self.path, format!("malformed entry {line:?}"))
                    })
            })
            .collect()
    }

    fn write_entries(&self, entries: &[(String, String)]) -> Result<()> {
        let content = entries
            .iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect::<String>();

        write_atomically(&self.path, content.as_bytes())
    }
}
