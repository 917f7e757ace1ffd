use crate::error::{StoreError, StoreResult};
use directories::ProjectDirs;
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Storage key holding the last known API key.
pub const API_KEY_STORAGE_KEY: &str = "fan-controller-api-key";

const STORAGE_FILE_NAME: &str = "storage.json";

/// String key/value persistence the panel writes the API key through.
pub trait KeyStore: Send {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

pub fn project_dirs() -> StoreResult<ProjectDirs> {
    ProjectDirs::from("com", "fan-ctl", "fan-ctl").ok_or(StoreError::NoDataDir)
}

/// Key store backed by a JSON object on disk. Values are kept in plaintext.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> StoreResult<Self> {
        let dirs = project_dirs()?;
        Ok(Self::new(dirs.data_dir().join(STORAGE_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StoreResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let bytes = fs::read(&self.path)?;
        if bytes.is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(entries)?;
        let mut file = File::create(&self.path)?;
        file.write_all(&json)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = file.metadata()?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }
        Ok(())
    }
}

impl KeyStore for FileKeyStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        // Unknown keys in the file are left alone.
        let mut entries = self.read_all().unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable key store {}: {e}", self.path.display());
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }
}

/// In-memory key store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.lock().insert(key.to_string(), value.to_string());
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeyStore for MemoryKeyStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
