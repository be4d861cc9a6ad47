//! Credential storage in a single JSON file.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use fs2::FileExt;
use tokio::sync::Mutex;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

use dashboard_core::error::{Error, StorageError};
use dashboard_core::{Result, TokenStore};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

fn map_io(err: std::io::Error) -> Error {
    Error::Storage(StorageError::Io {
        message: err.to_string(),
    })
}

type Entries = BTreeMap<String, String>;

/// A [`TokenStore`] persisted as a JSON object on disk.
///
/// Writes are read-modify-write cycles under an exclusive lock on a sibling
/// `.lock` file, and land atomically through a rename. On Unix the file is
/// readable by its owner only.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
    write_guard: Arc<Mutex<()>>,
}

impl FileTokenStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file and its parent directory are created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Get the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn read_entries(&self) -> Result<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let content = fs::read_to_string(&self.path).map_err(map_io)?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                message: format!("{}: {}", self.path.display(), e),
            })
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        let content = serde_json::to_string_pretty(entries).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                message: e.to_string(),
            })
        })?;

        let temp_path = self
            .path
            .with_extension(format!("{}.tmp", Uuid::new_v4().simple()));

        let mut file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&temp_path)
            .map_err(map_io)?;
        file.write_all(content.as_bytes()).map_err(map_io)?;
        file.sync_all().map_err(map_io)?;
        drop(file);

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&temp_path).map_err(map_io)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&temp_path, perms).map_err(map_io)?;
        }

        if let Err(err) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(map_io(err));
        }
        Ok(())
    }

    /// Apply `update` to the stored entries under the file lock.
    async fn modify<F>(&self, update: F) -> Result<()>
    where
        F: FnOnce(&mut Entries) -> bool,
    {
        let _guard = self.write_guard.lock().await;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(map_io)?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())
            .map_err(map_io)?;
        lock_file.lock_exclusive().map_err(map_io)?;

        let result = (|| -> Result<()> {
            let mut entries = self.read_entries()?;
            if update(&mut entries) {
                self.write_entries(&entries)?;
            }
            Ok(())
        })();

        lock_file.unlock().map_err(map_io)?;
        result
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.read_entries()?;
        trace!(found = entries.contains_key(key), "Read credential");
        Ok(entries.get(key).cloned())
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
        .await?;
        debug!("Stored credential");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn remove(&self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.modify(|entries| entries.remove(key).is_some()).await?;
        debug!("Removed credential");
        Ok(())
    }
}
