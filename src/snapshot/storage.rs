//! Durable key-value slots for snapshots
//!
//! A [`SnapshotStorage`] is the local equivalent of browser storage: a flat
//! namespace of string keys, each holding one opaque byte blob.

use std::{
    cell::RefCell,
    fs, io,
    path::{Path, PathBuf},
    rc::Rc,
};

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised by snapshot storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The key is empty or contains characters that cannot name a slot.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// A durable key-value slot store.
pub trait SnapshotStorage {
    /// Reads the bytes stored under `key`, or `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the key is invalid or the backend fails.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replaces the bytes stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the key is invalid or the backend fails.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Empties the slot. Removing an empty slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the key is invalid or the backend fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Checks that a key can name a slot in every backend.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] for empty keys, keys starting with a
/// dot, and keys containing path separators or control characters.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = key.is_empty()
        || key.starts_with('.')
        || key
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control());

    if invalid {
        Err(StorageError::InvalidKey(key.to_string()))
    } else {
        Ok(())
    }
}

/// Storage backed by one JSON file per key in a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Uses `dir` as the storage root. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage root.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the slot for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if the key cannot name a file.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SnapshotStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;

        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir)?;
        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, &path)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// In-process storage. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<FxHashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;

        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        validate_key(key)?;

        self.slots
            .borrow_mut()
            .insert(key.to_string(), bytes.to_vec());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;

        self.slots.borrow_mut().remove(key);

        Ok(())
    }
}
