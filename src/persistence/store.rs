// Key-value store boundary - opaque string-keyed JSON blob storage

use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("stored payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Slot storage the codec writes through.
///
/// Keys are opaque strings; namespacing between pattern and song slots is
/// the codec's responsibility, not the store's. Durability is the store's
/// concern alone.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(&mut self, key: &str, value: &Value) -> Result<(), StoreError>;
    /// Returns whether the key existed.
    fn delete(&mut self, key: &str) -> Result<bool, StoreError>;
}

/// Ephemeral in-memory store (tests, previews, throwaway sessions).
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.clone());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// One JSON file per slot under a root directory.
///
/// The desktop analog of the browser toy's localStorage. Key characters
/// outside `[A-Za-z0-9._-]` are percent-encoded in the file name so any
/// slot key maps to exactly one file.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' | b'-' => {
                    name.push(byte as char)
                }
                _ => name.push_str(&format!("%{byte:02X}")),
            }
        }
        name.push_str(".json");
        self.root.join(name)
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(key);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(value)?;
        fs::write(self.path_for(key), data)?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
