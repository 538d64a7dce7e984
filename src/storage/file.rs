use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::{DurableStore, StoreError};

/// Store persisted as a single JSON object file.
///
/// The whole file is loaded on open and rewritten on every `set`
/// (temp file + rename), so a crash mid-write leaves the previous
/// contents intact.
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Returns the default store location.
    ///
    /// Uses `dirs::data_dir()/blogdash/storage.json`, falling back to the
    /// current directory if no data dir is available.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("blogdash").join("storage.json")
    }

    /// Open the store at `path`.
    ///
    /// A missing file opens empty. An unreadable or corrupt file also
    /// opens empty (the problem is logged) and is replaced by the next
    /// successful write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::load(&path) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(path = %path.display(), "Discarding unreadable store: {}", err);
                BTreeMap::new()
            }
        };
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn load(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| StoreError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let write_err = |source: std::io::Error| StoreError::WriteError {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let content = serde_json::to_string_pretty(entries).map_err(|source| {
            StoreError::SerializeError {
                key: self.path.display().to_string(),
                source,
            }
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).map_err(write_err)?;
        if let Err(source) = fs::rename(&tmp_path, &self.path) {
            if let Err(err) = fs::remove_file(&tmp_path) {
                tracing::warn!(
                    path = %tmp_path.display(),
                    "Failed to remove temp store file: {}",
                    err
                );
            }
            return Err(write_err(source));
        }
        Ok(())
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, raw: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write();
        let mut next = entries.clone();
        next.insert(key.to_string(), raw.to_string());
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}
