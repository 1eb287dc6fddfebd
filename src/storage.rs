// File: ./src/storage.rs
use crate::store::Snapshot;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use fs2::FileExt;
use log::info;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

pub const DATA_FILE_NAME: &str = "items.json";

/// Where snapshots go. `load` runs once at startup, `save` after every change.
pub trait Persistence: Send {
    fn load(&self) -> Result<Snapshot>;
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Keeps nothing: logs what would have been written and always starts empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingStorage;

impl Persistence for LoggingStorage {
    fn load(&self) -> Result<Snapshot> {
        info!("event=items_loaded backend=memory tasks=0 events=0");
        Ok(Snapshot::default())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        info!(
            "event=items_saved backend=memory tasks={} events={}",
            snapshot.tasks.len(),
            snapshot.events.len()
        );
        Ok(())
    }
}

/// JSON file on disk, written atomically under an advisory lock.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/items.json`, using the platform data dir unless overridden.
    pub fn in_dir(data_dir: Option<&Path>) -> Option<Self> {
        default_data_dir(data_dir).map(|dir| Self::new(dir.join(DATA_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Runs `f` while holding an exclusive lock on `<path>.lock`.
    pub fn with_lock<T, F>(path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let lock_path = path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("opening lock {}", lock_path.display()))?;
        lock_file.lock_exclusive()?;
        let result = f();
        let _ = lock_file.unlock();
        result
    }
}

impl Persistence for LocalStorage {
    fn load(&self) -> Result<Snapshot> {
        if !self.path.exists() {
            info!("event=items_loaded backend=json status=no_file");
            return Ok(Snapshot::default());
        }
        let snapshot = Self::with_lock(&self.path, || {
            let json = fs::read_to_string(&self.path)
                .with_context(|| format!("reading {}", self.path.display()))?;
            let snapshot: Snapshot = serde_json::from_str(&json)
                .with_context(|| format!("parsing {}", self.path.display()))?;
            Ok(snapshot)
        })?;
        info!(
            "event=items_loaded backend=json tasks={} events={}",
            snapshot.tasks.len(),
            snapshot.events.len()
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        Self::with_lock(&self.path, || {
            let json = serde_json::to_string_pretty(snapshot)?;
            Self::atomic_write(&self.path, json)
        })?;
        info!(
            "event=items_saved backend=json tasks={} events={}",
            snapshot.tasks.len(),
            snapshot.events.len()
        );
        Ok(())
    }
}

/// Data directory, created on demand. `override_dir` wins over the platform default.
pub fn default_data_dir(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => ProjectDirs::from("com", "dayplan", "dayplan")?
            .data_dir()
            .to_path_buf(),
    };
    if !dir.exists() {
        let _ = fs::create_dir_all(&dir);
    }
    Some(dir)
}
