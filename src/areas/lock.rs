use crate::errors::{Error, Result};
use file_guard::{FileGuard, Lock};
use std::fs::File;
use std::path::Path;

/// Exclusive repository-wide lock
///
/// Held for the whole of a mutating operation and released when dropped, so
/// every exit path (including `?` returns) unlocks.
pub(crate) struct RepositoryLock {
    _guard: FileGuard<Box<File>>,
}

impl RepositoryLock {
    pub fn acquire(path: &Path) -> Result<Self> {
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| Error::io(path, e))?;

        let guard =
            file_guard::lock(Box::new(file), Lock::Exclusive, 0, 1).map_err(|e| Error::io(path, e))?;
        tracing::trace!(path = %path.display(), "acquired repository lock");

        Ok(RepositoryLock { _guard: guard })
    }
}
