//! Persisted draft state.
//!
//! Three documents are kept, each under its own key: the cart lines, the
//! chosen branch, and the operator's favourite products. Values are JSON text
//! so any key/value backend can hold them.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::cart::{CartLine, OrderDraft};
use super::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Cart,
    Favourites,
    Branch,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Cart => "cart",
            StorageKey::Favourites => "favourites",
            StorageKey::Branch => "branch",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key/value backend for draft documents.
pub trait DraftStore: Send + Sync {
    fn read(&self, key: StorageKey) -> Result<Option<String>, StoreError>;
    fn write(&self, key: StorageKey, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: StorageKey) -> Result<(), StoreError>;
}

/// Process-local backend.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryStore {
    fn read(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        Ok(self.values.lock().get(&key).cloned())
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        self.values.lock().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        self.values.lock().remove(&key);
        Ok(())
    }
}

/// Backend keeping one `<key>.json` file per document in a directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens (and creates if needed) the storage directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl DraftStore for JsonFileStore {
    fn read(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        // Readers only ever see a complete document.
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path(key))?;
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Typed access to the draft documents over any [`DraftStore`].
#[derive(Clone)]
pub struct OrderDraftStore {
    backend: Arc<dyn DraftStore>,
}

impl OrderDraftStore {
    pub fn new(backend: impl DraftStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Restores the cart lines and branch left by a previous session.
    pub fn load(&self) -> Result<OrderDraft, StoreError> {
        let lines: Vec<CartLine> = self.read_json(StorageKey::Cart)?.unwrap_or_default();
        let branch: Option<String> = self.read_json(StorageKey::Branch)?;
        debug!(lines = lines.len(), branch = ?branch, "Draft loaded");
        Ok(OrderDraft::from_parts(lines, branch))
    }

    pub fn save(&self, draft: &OrderDraft) -> Result<(), StoreError> {
        let lines: Vec<&CartLine> = draft.lines().collect();
        self.write_json(StorageKey::Cart, &lines)?;
        match &draft.branch {
            Some(branch) => self.write_json(StorageKey::Branch, branch),
            None => self.backend.remove(StorageKey::Branch),
        }
    }

    /// Drops the persisted cart and branch. Favourites are kept.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove(StorageKey::Cart)?;
        self.backend.remove(StorageKey::Branch)
    }

    pub fn load_favourites(&self) -> Result<BTreeSet<String>, StoreError> {
        Ok(self.read_json(StorageKey::Favourites)?.unwrap_or_default())
    }

    pub fn save_favourites(&self, favourites: &BTreeSet<String>) -> Result<(), StoreError> {
        self.write_json(StorageKey::Favourites, favourites)
    }

    /// Reads raw text stored under `key`.
    pub fn raw(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        self.backend.read(key)
    }

    /// An unreadable document is treated as absent.
    fn read_json<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StoreError> {
        let Some(text) = self.backend.read(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(%key, error = %e, "Discarding unreadable draft document");
                Ok(None)
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string(value)?;
        self.backend.write(key, &text)
    }
}
