use crate::areas::append_line;
use crate::errors::Result;
use std::path::Path;

/// Append-only diagnostic log of completed operations
///
/// Each entry is `[<rfc3339 timestamp>] <text>`. The log is never read back.
#[derive(Debug)]
pub struct OperationLog {
    path: Box<Path>,
}

impl OperationLog {
    pub fn new(path: Box<Path>) -> Self {
        OperationLog { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, operation: &str) -> Result<()> {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let operation = operation.replace('\n', " ");

        append_line(&self.path, &format!("[{timestamp}] {operation}"))
    }
}
