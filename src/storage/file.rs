//! File-backed storage: one `<key>.json` file per key inside a data directory.

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Storage, StorageError};

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str, err: &std::io::Error) -> StorageError {
    StorageError::Io { key: key.to_owned(), message: err.to_string() }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, &e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| io_error(key, &e))?;

        // Write-then-rename so a crash never leaves a truncated document.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| io_error(key, &e))?;
        fs::rename(&tmp, &path).map_err(|e| io_error(key, &e))?;
        debug!(key, bytes = value.len(), path = %path.display(), "stored value");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, &e)),
        }
    }
}
