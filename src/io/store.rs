use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::model::{Config, Records};

use super::config_io::expand_home;
use super::sync::{GitSync, SyncError};

/// File name of the record set inside the data directory
pub const RECORDS_FILE: &str = "records.toml";

/// Error type for loading and saving records and configuration
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not parse {path}: {source}")]
    DocumentError {
        path: PathBuf,
        source: toml_edit::TomlError,
    },
    #[error("{path}: {kind} index {index} is used more than once")]
    DuplicateIndex {
        path: PathBuf,
        kind: &'static str,
        index: usize,
    },
    #[error("could not serialize records: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("sync failed: {0}")]
    Sync(#[from] SyncError),
}

/// The load/save contract the front ends consume.
pub trait RecordStore {
    fn load(&mut self) -> Result<Records, StoreError>;
    fn save(&mut self, records: &Records) -> Result<(), StoreError>;
}

/// Write a file atomically: write to a temp file in the same directory,
/// then rename over the target.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Records kept in a plain TOML file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: &Path) -> Self {
        FileStore {
            path: data_dir.join(RECORDS_FILE),
        }
    }
}

impl RecordStore for FileStore {
    /// A missing file is an empty record set (first run).
    fn load(&mut self) -> Result<Records, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no records yet");
            return Ok(Records::default());
        }
        let text = fs::read_to_string(&self.path).map_err(|e| StoreError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        let mut records: Records = toml::from_str(&text).map_err(|e| StoreError::ParseError {
            path: self.path.clone(),
            source: e,
        })?;
        if let Some((kind, index)) = records.duplicate_index() {
            return Err(StoreError::DuplicateIndex {
                path: self.path.clone(),
                kind,
                index,
            });
        }
        if records.settle_counters() {
            warn!(
                next_goal = records.next_goal_index,
                next_task = records.next_task_index,
                "index counters were behind the stored entries"
            );
        }
        debug!(
            goals = records.goals.len(),
            tasks = records.tasks.len(),
            "records loaded"
        );
        Ok(records)
    }

    fn save(&mut self, records: &Records) -> Result<(), StoreError> {
        let text = toml::to_string_pretty(records)?;
        atomic_write(&self.path, text.as_bytes()).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;
        debug!(path = %self.path.display(), "records saved");
        Ok(())
    }
}

/// Records in a git checkout: pulled before load, committed and pushed
/// after save.
pub struct GitStore {
    files: FileStore,
    sync: GitSync,
}

impl GitStore {
    pub fn open(data_dir: &Path, config: &Config) -> Result<Self, StoreError> {
        Ok(GitStore {
            files: FileStore::new(data_dir),
            sync: GitSync::open(data_dir, config.git.clone())?,
        })
    }
}

impl RecordStore for GitStore {
    fn load(&mut self) -> Result<Records, StoreError> {
        self.sync.pull()?;
        self.files.load()
    }

    fn save(&mut self, records: &Records) -> Result<(), StoreError> {
        self.files.save(records)?;
        if self.sync.commit(Path::new(RECORDS_FILE))? {
            info!("committed record changes");
        }
        self.sync.push()?;
        Ok(())
    }
}

/// Resolve the data directory from config.
pub fn data_dir(config: &Config) -> PathBuf {
    expand_home(&config.data_path)
}

/// Pick the store for this run: git-backed when credentials are configured
/// and `sync` is allowed, plain file otherwise.
pub fn open_store(config: &Config, sync: bool) -> Result<Box<dyn RecordStore>, StoreError> {
    let dir = data_dir(config);
    if sync && config.git.is_configured() {
        debug!(dir = %dir.display(), "using git-backed record store");
        Ok(Box::new(GitStore::open(&dir, config)?))
    } else {
        Ok(Box::new(FileStore::new(&dir)))
    }
}
