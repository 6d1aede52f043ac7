//! Content snapshot store
//!
//! Snapshots are stored verbatim, byte for byte, with no compression and no
//! deduplication: every `put` allocates a new snapshot even if the same bytes
//! are already stored.

use crate::areas::write_atomically;
use crate::artifacts::objects::content_id::ContentId;
use crate::errors::{Error, Kind, Result};
use bytes::Bytes;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct ContentStore {
    path: Box<Path>,
}

impl ContentStore {
    pub fn new(path: Box<Path>) -> Self {
        ContentStore { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn put(&self, content: &[u8]) -> Result<ContentId> {
        let mut content_id = ContentId::allocate(content);
        while self.exists(&content_id) {
            content_id = ContentId::allocate(content);
        }

        write_atomically(&self.object_path(&content_id), content)?;
        tracing::debug!(content_id = %content_id, bytes = content.len(), "stored content");

        Ok(content_id)
    }

    pub fn get(&self, content_id: &ContentId) -> Result<Bytes> {
        let object_path = self.object_path(content_id);

        match std::fs::read(&object_path) {
            Ok(content) => Ok(content.into()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::not_found(Kind::Content, content_id.to_string()))
            }
            Err(e) => Err(Error::io(&object_path, e)),
        }
    }

    pub fn exists(&self, content_id: &ContentId) -> bool {
        self.object_path(content_id).exists()
    }

    fn object_path(&self, content_id: &ContentId) -> PathBuf {
        self.path.join(content_id.to_path())
    }
}
