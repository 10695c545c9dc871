// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Durable key/value storage for persisted indexes.
//!
//! The engine stores exactly one value, under its cache key. A store that
//! loses the value (or never had it) only costs a rebuild.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::error::StoreError;

/// Byte-oriented key/value store.
///
/// Called from the engine's build thread (`get`) and its background
/// persistence thread (`set`), so implementations must be `Send + Sync`.
pub trait IndexStore: Send + Sync {
    /// The stored bytes, or `None` if nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace whatever is stored under `key`.
    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

impl<T: IndexStore + ?Sized> IndexStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).set(key, bytes)
    }
}

impl<T: IndexStore + ?Sized> IndexStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).set(key, bytes)
    }
}

// ============================================================================
// MEMORY
// ============================================================================

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn remove(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.write().remove(key)
    }
}

impl IndexStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.entries.write().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

// ============================================================================
// FILE
// ============================================================================

/// File extension for stored values.
const EXTENSION: &str = "bin";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// One file per key in a directory.
///
/// Writes go to a temporary file in the same directory, then get renamed
/// over the target, so a reader sees either the old value or the new one,
/// never a torn write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// A store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// Keys are restricted to `[A-Za-z0-9_.-]` and may not start with a dot,
    /// so a key can never name a path outside the directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", key, EXTENSION)))
    }

    fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl IndexStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(&path)(e)),
        }
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(Self::io_error(&self.dir))?;

        let temp = self.dir.join(format!(
            ".{}.{}.{}.tmp",
            key,
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        let write = || -> io::Result<()> {
            let mut file = fs::File::create(&temp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&temp, &path)
        };

        write().map_err(|e| {
            let _ = fs::remove_file(&temp);
            Self::io_error(&path)(e)
        })
    }
}
