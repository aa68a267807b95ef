use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Trait for the byte-level storage that holds the serialized document.
/// The store always reads and writes the document as a whole.
pub trait StorageBackend: Send + Sync {
    /// Read the stored bytes. `None` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError>;
    /// Replace the stored bytes.
    fn save(&self, bytes: &[u8]) -> Result<(), StoreError>;
    /// Human-readable location, used in logs.
    fn location(&self) -> String;
}

/// How a file backend replaces the document on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate and rewrite the file in place. A crash mid-write can leave a
    /// truncated file behind.
    #[default]
    Overwrite,
    /// Write a sibling temp file, sync it, then rename it over the target.
    Atomic,
}

/// Configuration for selecting and building a backend.
///
/// # Example
/// ```
/// use store::{BackendConfig, WriteMode};
///
/// // In-memory (for testing)
/// let config = BackendConfig::in_memory();
///
/// // JSON file next to the binary, rewritten atomically
/// let config = BackendConfig::file("db.json").with_write_mode(WriteMode::Atomic);
/// ```
#[derive(Clone, Debug, Default)]
pub enum BackendConfig {
    /// A JSON file at `path`.
    File { path: PathBuf, mode: WriteMode },
    /// Keep the serialized document in memory only.
    #[default]
    InMemory,
}

impl BackendConfig {
    pub fn in_memory() -> Self {
        BackendConfig::InMemory
    }

    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        BackendConfig::File {
            path: path.into(),
            mode: WriteMode::default(),
        }
    }

    /// Change the write mode of a file backend. No effect on `InMemory`.
    pub fn with_write_mode(self, write_mode: WriteMode) -> Self {
        match self {
            BackendConfig::File { path, .. } => BackendConfig::File {
                path,
                mode: write_mode,
            },
            other => other,
        }
    }

    pub fn build(&self) -> Result<Box<dyn StorageBackend>, StoreError> {
        match self {
            BackendConfig::InMemory => Ok(Box::new(InMemoryBackend::new())),
            BackendConfig::File { path, mode } => Ok(Box::new(FileBackend::new(path, *mode))),
        }
    }
}

/// A backend that stores the document in a single JSON file.
pub struct FileBackend {
    path: PathBuf,
    mode: WriteMode,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(path: P, mode: WriteMode) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            mode,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn save_atomic(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let tmp = self.temp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, bytes: &[u8]) -> Result<(), StoreError> {
        match self.mode {
            WriteMode::Overwrite => Ok(fs::write(&self.path, bytes)?),
            WriteMode::Atomic => self.save_atomic(bytes),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// An in-memory backend using a `RwLock` around the last saved bytes.
pub struct InMemoryBackend {
    bytes: RwLock<Option<Vec<u8>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            bytes: RwLock::new(None),
        }
    }

    /// Start from previously serialized content.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: RwLock::new(Some(bytes.into())),
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for InMemoryBackend {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let guard = self
            .bytes
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.clone())
    }

    fn save(&self, bytes: &[u8]) -> Result<(), StoreError> {
        *self
            .bytes
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))? = Some(bytes.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
