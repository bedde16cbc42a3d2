//! JSON file storage.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, instrument, warn};

use folio_core::error::{Error, StoreError};
use folio_core::{KeyValueStore, Result};

type Entries = BTreeMap<String, String>;

fn map_io(err: std::io::Error) -> Error {
    StoreError::Io {
        message: err.to_string(),
    }
    .into()
}

/// A [`KeyValueStore`] backed by one JSON object on disk.
///
/// Writes go to a temporary file that is renamed over the original while an
/// exclusive lock is held on a sibling `.lock` file, so concurrent processes
/// never observe a half-written map. On Unix the file is readable only by its
/// owner. The file is deleted once the last key is removed.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    fn open_lock(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(map_io)?;
        }

        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_io)
    }

    fn read_entries(&self) -> Result<Entries> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(map_io(e)),
        };

        serde_json::from_str(&content).map_err(|e| {
            StoreError::Corrupt {
                key: self.path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(map_io(e)),
                _ => Ok(()),
            };
        }

        let content = serde_json::to_string_pretty(entries).map_err(|e| StoreError::Io {
            message: e.to_string(),
        })?;

        let temp_path = self.temp_path();
        let mut file = File::create(&temp_path).map_err(map_io)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = file.metadata().map_err(map_io)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&temp_path, perms).map_err(map_io)?;
        }

        file.write_all(content.as_bytes()).map_err(map_io)?;
        file.sync_data().map_err(map_io)?;
        fs::rename(&temp_path, &self.path).map_err(map_io)?;

        Ok(())
    }

    /// Apply `change` to the stored map under the exclusive lock.
    fn update(&self, change: impl FnOnce(&mut Entries)) -> Result<()> {
        let lock = self.open_lock()?;
        lock.lock_exclusive().map_err(map_io)?;

        let result = (|| {
            let mut entries = match self.read_entries() {
                Ok(entries) => entries,
                Err(e @ Error::Store(StoreError::Corrupt { .. })) => {
                    warn!(error = %e, path = %self.path.display(), "Replacing corrupt store file");
                    Entries::new()
                }
                Err(e) => return Err(e),
            };
            change(&mut entries);
            self.write_entries(&entries)
        })();

        lock.unlock().map_err(map_io)?;
        result
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let lock = self.open_lock()?;
        lock.lock_shared().map_err(map_io)?;
        let entries = self.read_entries();
        lock.unlock().map_err(map_io)?;

        Ok(entries?.remove(key))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key, value)])
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&self, key: &str) -> Result<()> {
        self.remove_many(&[key])
    }

    #[instrument(skip_all, fields(path = %self.path.display(), count = entries.len()))]
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        self.update(|map| {
            for (key, value) in entries {
                map.insert(key.to_string(), value.to_string());
            }
        })?;
        debug!("Stored entries");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        self.update(|map| {
            for key in keys {
                map.remove(*key);
            }
        })?;
        debug!("Removed entries");
        Ok(())
    }
}
