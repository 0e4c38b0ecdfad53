use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::stage::StagingArea;
use crate::areas::workspace::{STATE_DIR_NAME, Workspace};
use crate::artifacts::core::repo_path;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::Status;
use crate::errors::SprigError;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the staging-area file inside the state directory
pub const STAGE_FILE_NAME: &str = "stage";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    stage: Arc<Mutex<StagingArea>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);

        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;
        let state_path = path.join(STATE_DIR_NAME);

        let stage = StagingArea::new(state_path.join(STAGE_FILE_NAME).into_boxed_path());
        let database = Database::new(state_path.clone().into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(state_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            stage: Arc::new(Mutex::new(stage)),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn stage(&self) -> Arc<Mutex<StagingArea>> {
        self.stage.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn status_report(&'_ self) -> Status<'_> {
        Status::new(self)
    }

    pub fn state_path(&self) -> PathBuf {
        self.workspace.state_path()
    }

    pub fn is_initialized(&self) -> bool {
        self.state_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(SprigError::RepositoryNotInitialized.into())
        }
    }

    /// The commit HEAD points at, with its digest
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head_oid = self.refs.read_head()?;
        let commit = self.database.parse_commit(&head_oid)?;

        Ok((head_oid, commit))
    }

    /// Resolve a working-tree path given by the user to a repository-relative path
    pub fn resolve_path(&self, file: &str) -> anyhow::Result<PathBuf> {
        repo_path::normalize(&self.path, Path::new(file))
    }
}
