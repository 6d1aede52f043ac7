use crate::REPOSITORY_DIR;
use crate::areas::branches::Branches;
use crate::areas::commit_log::CommitLog;
use crate::areas::config::Config;
use crate::areas::content_store::ContentStore;
use crate::areas::history::HistoryTracker;
use crate::areas::lock::RepositoryLock;
use crate::areas::operation_log::OperationLog;
use crate::areas::tags::TagIndex;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::{Error, Kind, Result};
use std::cell::{Ref, RefCell, RefMut};
use std::path::Path;

pub struct Repository {
    path: Box<Path>,
    root: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    content_store: ContentStore,
    commit_log: CommitLog,
    branches: Branches,
    tags: TagIndex,
    history: HistoryTracker,
    config: Config,
    operation_log: OperationLog,
    current_branch: RefCell<Option<BranchName>>,
}

impl Repository {
    /// Open the repository rooted at `path`
    ///
    /// The current branch is read once from the configuration here and then
    /// passed explicitly into the operations that need it.
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
        }
        let path = path.canonicalize().map_err(|e| Error::io(path, e))?;
        let root = path.join(REPOSITORY_DIR);

        let config = Config::new(root.join("config").into_boxed_path());
        let current_branch = config.current_branch()?;

        Ok(Repository {
            content_store: ContentStore::new(root.join("objects").into_boxed_path()),
            commit_log: CommitLog::new(
                root.join("commits").into_boxed_path(),
                root.join("commits.idx").into_boxed_path(),
            ),
            branches: Branches::new(root.join("branches").into_boxed_path()),
            tags: TagIndex::new(root.join("tags").into_boxed_path()),
            history: HistoryTracker::new(root.join("history").into_boxed_path()),
            operation_log: OperationLog::new(root.join("log.txt").into_boxed_path()),
            config,
            path: path.into_boxed_path(),
            root: root.into_boxed_path(),
            writer: RefCell::new(writer),
            current_branch: RefCell::new(current_branch),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_initialized(&self) -> bool {
        self.root.is_dir()
    }

    pub fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(Error::NotInitialized(self.path.to_path_buf()))
        }
    }

    /// Take the repository-wide lock for a mutating operation
    pub(crate) fn lock(&self) -> Result<RepositoryLock> {
        self.ensure_initialized()?;
        RepositoryLock::acquire(&self.root.join("lock"))
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn content_store(&self) -> &ContentStore {
        &self.content_store
    }

    pub fn commit_log(&self) -> &CommitLog {
        &self.commit_log
    }

    pub fn branches(&self) -> &Branches {
        &self.branches
    }

    pub fn tags(&self) -> &TagIndex {
        &self.tags
    }

    pub fn history(&self) -> &HistoryTracker {
        &self.history
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn operation_log(&self) -> &OperationLog {
        &self.operation_log
    }

    pub fn current_branch(&self) -> Ref<'_, Option<BranchName>> {
        self.current_branch.borrow()
    }

    pub fn set_current_branch(&self, branch: Option<BranchName>) {
        *self.current_branch.borrow_mut() = branch;
    }

    /// The selected branch, or `NoBranchSelected`
    pub fn require_current_branch(&self) -> Result<BranchName> {
        self.current_branch().clone().ok_or(Error::NoBranchSelected)
    }

    /// The selected branch together with its head commit
    pub fn current_head(&self) -> Result<(BranchName, CommitId)> {
        let branch = self.require_current_branch()?;
        let head = self
            .branches
            .head(&branch)?
            .ok_or_else(|| Error::not_found(Kind::Commit, format!("head of branch {branch}")))?;

        Ok((branch, head))
    }
}
