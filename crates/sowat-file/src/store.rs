//! JSON-file key-value store.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, instrument, trace};

use sowat_core::error::StorageError;
use sowat_core::{KeyValueStore, Result};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

type Slots = BTreeMap<String, String>;

/// A [`KeyValueStore`] persisted as one JSON object file.
///
/// Writers hold an exclusive advisory lock on a sibling `.lock` file, write
/// a temporary file and rename it over the store, so readers never see a
/// partial file. Readers hold a shared lock. The file is readable by its
/// owner only.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by the file at `path`. Nothing is created until the
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by `session.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(crate::SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, err: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }

    fn open_lock(&self) -> Result<File> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(|e| self.io_error(e))?;
        Ok(file)
    }

    /// Current slots. Caller holds the lock.
    fn read_slots(&self) -> Result<Slots> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Slots::new()),
            Err(err) => return Err(self.io_error(err).into()),
        };

        if raw.trim().is_empty() {
            return Ok(Slots::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            StorageError::Corrupt {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Replace the file with `slots`. Caller holds the exclusive lock.
    fn write_slots(&self, slots: &Slots) -> Result<()> {
        let json = serde_json::to_string_pretty(slots)?;
        let temp_path = self.temp_path();

        let mut file = File::create(&temp_path).map_err(|e| self.io_error(e))?;

        #[cfg(unix)]
        {
            let mut perms = file.metadata().map_err(|e| self.io_error(e))?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&temp_path, perms).map_err(|e| self.io_error(e))?;
        }

        file.write_all(json.as_bytes())
            .map_err(|e| self.io_error(e))?;
        file.sync_data().map_err(|e| self.io_error(e))?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;
        trace!(path = %self.path.display(), slots = slots.len(), "store written");
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut Slots)) -> Result<()> {
        let lock = self.open_lock()?;
        lock.lock_exclusive().map_err(|e| self.io_error(e))?;

        let result = self.read_slots().and_then(|mut slots| {
            f(&mut slots);
            self.write_slots(&slots)
        });

        lock.unlock().map_err(|e| self.io_error(e))?;
        result
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let lock = self.open_lock()?;
        lock.lock_shared().map_err(|e| self.io_error(e))?;

        let result = self.read_slots().map(|mut slots| slots.remove(key));

        lock.unlock().map_err(|e| self.io_error(e))?;
        result
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|slots| {
            slots.insert(key.to_string(), value.to_string());
        })
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&self, key: &str) -> Result<()> {
        self.update(|slots| {
            slots.remove(key);
        })
    }

    /// All changes land in a single rename.
    #[instrument(skip(self, set), fields(path = %self.path.display(), set = set.len()))]
    fn apply(&self, set: &[(&str, &str)], remove: &[&str]) -> Result<()> {
        self.update(|slots| {
            for (key, value) in set {
                slots.insert(key.to_string(), value.to_string());
            }
            for key in remove {
                slots.remove(*key);
            }
        })?;
        debug!("store updated");
        Ok(())
    }
}
