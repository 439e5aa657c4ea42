//! Keyed persistence stores
//!
//! String values under string keys (track lists, derived collections) and
//! raw audio blobs under track ids.

use crate::error::{LocalError, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// String key-value persistence
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value (missing keys are not an error)
    fn remove(&self, key: &str) -> Result<()>;
}

/// Binary blob persistence keyed by track id
pub trait BlobStore: Send + Sync {
    /// Store the bytes for `id`
    fn save_blob(&self, id: &str, bytes: &[u8]) -> Result<()>;

    /// Load the bytes for `id`
    fn load_blob(&self, id: &str) -> Result<Option<Vec<u8>>>;

    /// Delete the bytes for `id` (missing ids are not an error)
    fn delete_blob(&self, id: &str) -> Result<()>;
}

/// Keys must be plain file names: no separators, no dot-prefixed names
fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(LocalError::InvalidKey(key.to_string()))
    }
}

/// File-backed store
///
/// Each key is a `<key>.json` file under the root directory; blobs live in
/// `<root>/blobs/<id>`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let blobs = root.join("blobs");
        fs::create_dir_all(&blobs).map_err(|e| LocalError::io(&blobs, e))?;
        Ok(Self { root })
    }

    /// Store directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn value_path(&self, key: &str) -> Result<PathBuf> {
        check_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn blob_path(&self, id: &str) -> Result<PathBuf> {
        check_key(id)?;
        Ok(self.root.join("blobs").join(id))
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LocalError::io(path, e)),
    }
}

fn remove_optional(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(LocalError::io(path, e)),
    }
}

/// Write through a temp file so a crash never leaves a truncated value
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).map_err(|e| LocalError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| LocalError::io(path, e))
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        read_optional(&path)?
            .map(|bytes| {
                String::from_utf8(bytes).map_err(|e| {
                    LocalError::io(&path, std::io::Error::new(ErrorKind::InvalidData, e))
                })
            })
            .transpose()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        write_atomic(&self.value_path(key)?, value.as_bytes())
    }

    fn remove(&self, key: &str) -> Result<()> {
        remove_optional(&self.value_path(key)?)
    }
}

impl BlobStore for JsonFileStore {
    fn save_blob(&self, id: &str, bytes: &[u8]) -> Result<()> {
        write_atomic(&self.blob_path(id)?, bytes)
    }

    fn load_blob(&self, id: &str) -> Result<Option<Vec<u8>>> {
        read_optional(&self.blob_path(id)?)
    }

    fn delete_blob(&self, id: &str) -> Result<()> {
        remove_optional(&self.blob_path(id)?)
    }
}

/// In-memory store for tests and ephemeral sessions
///
/// Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

impl BlobStore for MemoryStore {
    fn save_blob(&self, id: &str, bytes: &[u8]) -> Result<()> {
        let mut blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        blobs.insert(id.to_string(), bytes.to_vec());
        Ok(())
    }

    fn load_blob(&self, id: &str) -> Result<Option<Vec<u8>>> {
        let blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(blobs.get(id).cloned())
    }

    fn delete_blob(&self, id: &str) -> Result<()> {
        let mut blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        blobs.remove(id);
        Ok(())
    }
}
