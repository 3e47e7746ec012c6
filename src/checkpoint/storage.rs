//! Durable blob stores for draft snapshots.

use super::error::SnapshotError;
use super::SnapshotFormat;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A single named blob that survives reloads.
///
/// Implementations only move bytes; encoding and version checks live in
/// [`Persistence`](super::Persistence).
pub trait DraftStorage {
    /// Read the stored blob, `None` when nothing was saved.
    fn load(&self) -> Result<Option<Vec<u8>>, SnapshotError>;

    /// Replace the stored blob.
    fn save(&mut self, bytes: &[u8]) -> Result<(), SnapshotError>;

    /// Erase the stored blob. Erasing an empty store succeeds.
    fn clear(&mut self) -> Result<(), SnapshotError>;
}

/// In-process storage. Clones share the same slot, so a test can keep a
/// handle while the wizard owns another.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a blob is currently stored.
    pub fn is_empty(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_none()).unwrap_or(true)
    }
}

impl DraftStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, SnapshotError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| SnapshotError::Unavailable(e.to_string()))?;
        Ok(slot.clone())
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| SnapshotError::Unavailable(e.to_string()))?;
        *slot = Some(bytes.to_vec());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SnapshotError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| SnapshotError::Unavailable(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}

/// One file on disk, written atomically (temp file, then rename).
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Store the blob named `key` inside `dir`.
    pub fn new(dir: impl AsRef<Path>, key: &str, format: SnapshotFormat) -> Self {
        Self {
            path: dir
                .as_ref()
                .join(format!("{key}.{}", format.extension())),
        }
    }

    /// Store the blob in the platform data directory, if one exists.
    pub fn in_data_dir(key: &str, format: SnapshotFormat) -> Option<Self> {
        default_data_dir().map(|dir| Self::new(dir, key, format))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl DraftStorage for FileStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, SnapshotError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(&self.path)?))
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, bytes)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SnapshotError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Platform data directory for drafts.
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("org", "membership", "membership-wizard")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips_bytes() {
        let mut storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_none());

        storage.save(b"draft").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some(&b"draft"[..]));

        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn memory_storage_clones_share_the_slot() {
        let observer = MemoryStorage::new();
        let mut writer = observer.clone();
        writer.save(b"shared").unwrap();
        assert!(!observer.is_empty());
    }

    #[test]
    fn file_storage_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path(), "application-draft", SnapshotFormat::Json);
        assert_eq!(
            storage.path(),
            dir.path().join("application-draft.json").as_path()
        );
        assert!(storage.load().unwrap().is_none());

        storage.save(b"{}").unwrap();
        assert_eq!(storage.load().unwrap(), Some(b"{}".to_vec()));
        assert!(!storage.temp_path().exists());
    }

    #[test]
    fn file_storage_overwrites_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path(), "draft", SnapshotFormat::Binary);

        storage.save(b"first").unwrap();
        storage.save(b"second").unwrap();
        assert_eq!(storage.load().unwrap(), Some(b"second".to_vec()));

        storage.clear().unwrap();
        assert!(!storage.path().exists());
        storage.clear().unwrap();
    }

    #[test]
    fn file_storage_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut storage = FileStorage::new(&nested, "draft", SnapshotFormat::Json);

        storage.save(b"{}").unwrap();
        assert!(nested.join("draft.json").exists());
    }
}
