use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Durable key-value slots holding serialized collections
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the whole slot
    fn write(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Set aside an unreadable value before it gets overwritten
    fn quarantine(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}

/// One `<key>.json` file per slot inside a data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            debug!("Storage miss: {} (file does not exist)", path.display());
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(key);

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value)?;
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
            info!("Removed storage slot {}", path.display());
        }
        Ok(())
    }

    fn quarantine(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(());
        }
        let backup_path = path.with_extension("json.bak");
        std::fs::copy(&path, &backup_path)?;
        warn!("Backed up unreadable storage slot to {}", backup_path.display());
        Ok(())
    }
}

/// In-memory slots; clones share the same map, so a second store opened on a
/// clone sees what the first one wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with a raw value
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut slots) = storage.slots.lock() {
            slots.insert(key.to_string(), value.to_string());
        }
        storage
    }

    /// Make every subsequent write fail, for exercising write-failure paths
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.lock().ok().and_then(|slots| slots.get(key).cloned())
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("storage is not writable"));
        }
        let mut slots = self.slots.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut slots = self.slots.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        slots.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("data"));

        assert_eq!(storage.read("watchedContent").unwrap(), None);
        storage.write("watchedContent", "[]").unwrap();
        assert_eq!(storage.read("watchedContent").unwrap().as_deref(), Some("[]"));
        assert!(!storage.slot_path("watchedContent").with_extension("json.tmp").exists());

        storage.remove("watchedContent").unwrap();
        assert_eq!(storage.read("watchedContent").unwrap(), None);
    }

    #[test]
    fn test_file_storage_quarantine_keeps_copy() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.write("watchedContent", "{oops").unwrap();

        storage.quarantine("watchedContent").unwrap();
        let backup = storage.slot_path("watchedContent").with_extension("json.bak");
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "{oops");
    }

    #[test]
    fn test_memory_storage_shared_between_clones() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.write("k", "v").unwrap();
        assert_eq!(other.read("k").unwrap().as_deref(), Some("v"));

        other.set_fail_writes(true);
        assert!(storage.write("k", "w").is_err());
        assert_eq!(storage.raw("k").as_deref(), Some("v"));
    }
}
