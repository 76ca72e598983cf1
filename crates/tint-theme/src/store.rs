//! Best-effort persistence for the seed color and the theme mode.
//!
//! A [`ThemeStore`] is a small string key/value store. Every operation
//! returns a `Result`; callers that treat persistence as optional log the
//! error and carry on rather than failing the theme pipeline.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

/// Key holding the persisted seed color.
pub const SEED_KEY: &str = "theme-seed";

/// Key holding the persisted theme mode (`light` / `dark`).
pub const MODE_KEY: &str = "theme";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("malformed state file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to encode state: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// String key/value persistence.
pub trait ThemeStore {
    /// Read `key`; `Ok(None)` when it was never stored.
    ///
    /// # Errors
    ///
    /// Fails when the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, keeping every other key.
    ///
    /// # Errors
    ///
    /// Fails when the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// A TOML file of string values, e.g.
///
/// ```toml
/// theme = "dark"
/// theme-seed = "#3FBCA5"
/// ```
///
/// A missing file reads as empty; parent directories are created on write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/tint/state.toml`, or `tint-state.toml` in the working
    /// directory when the platform has no data directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::data_dir().map_or_else(
            || PathBuf::from("tint-state.toml"),
            |dir| dir.join("tint").join("state.toml"),
        )
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<toml::Table, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(toml::Table::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        text.parse::<toml::Table>().map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl ThemeStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let table = self.read_table()?;
        Ok(table.get(key).and_then(toml::Value::as_str).map(str::to_owned))
    }

    /// A state file that no longer parses is replaced rather than left to
    /// block every later write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut table = match self.read_table() {
            Ok(table) => table,
            Err(err @ StoreError::Parse { .. }) => {
                warn!(error = %err, "discarding unreadable state file");
                toml::Table::new()
            }
            Err(err) => return Err(err),
        };
        table.insert(key.to_owned(), toml::Value::String(value.to_owned()));
        let text = toml::to_string(&table)?;
        self.write_atomic(&text)
    }
}

impl FileStore {
    /// Write a sibling temp file, then rename it over the state file.
    fn write_atomic(&self, text: &str) -> Result<(), StoreError> {
        let write_err = |source: io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, text).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            write_err(source)
        })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store for ephemeral runs. [`MemoryStore::unavailable`] models
/// storage that is disabled or blocked: every call fails.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    available: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            available: true,
        }
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            values: HashMap::new(),
            available: false,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if !self.available {
            return Err(StoreError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if !self.available {
            return Err(StoreError::Unavailable);
        }
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state.toml"));
        assert_eq!(store.get(SEED_KEY).unwrap(), None);
    }

    #[test]
    fn set_then_get_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("state.toml"));
        store.set(SEED_KEY, "#FF0000").unwrap();
        assert_eq!(store.get(SEED_KEY).unwrap().as_deref(), Some("#FF0000"));

        // A fresh handle on the same path sees the value.
        let reopened = FileStore::new(store.path());
        assert_eq!(reopened.get(SEED_KEY).unwrap().as_deref(), Some("#FF0000"));
    }

    #[test]
    fn set_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");
        fs::write(&path, "theme = \"dark\"\nsidenav-collapsed = \"true\"\n").unwrap();

        let mut store = FileStore::new(&path);
        store.set(SEED_KEY, "#6750A4").unwrap();

        assert_eq!(store.get(MODE_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(store.get("sidenav-collapsed").unwrap().as_deref(), Some("true"));
        assert_eq!(store.get(SEED_KEY).unwrap().as_deref(), Some("#6750A4"));
    }

    #[test]
    fn non_string_value_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");
        fs::write(&path, "theme-seed = 42\n").unwrap();
        assert_eq!(FileStore::new(&path).get(SEED_KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_file_fails_reads_until_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");
        fs::write(&path, "theme-seed = \n[[[").unwrap();

        let mut store = FileStore::new(&path);
        assert!(matches!(store.get(SEED_KEY), Err(StoreError::Parse { .. })));

        store.set(SEED_KEY, "#000000").unwrap();
        assert_eq!(store.get(SEED_KEY).unwrap().as_deref(), Some("#000000"));
        store.set(MODE_KEY, "dark").unwrap();
        assert_eq!(store.get(MODE_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");
        let mut store = FileStore::new(&path);
        store.set(SEED_KEY, "#1E88E5").unwrap();
        store.set(MODE_KEY, "light").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, [OsString::from("state.toml")]);
        assert_eq!(store.tmp_path(), dir.path().join("state.toml.tmp"));
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be.
        let mut store = FileStore::new(dir.path());
        let err = store.set(SEED_KEY, "#000000").unwrap_err();
        assert!(
            matches!(err, StoreError::Read { .. } | StoreError::Write { .. }),
            "unexpected: {err}"
        );
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(MODE_KEY).unwrap(), None);
        store.set(MODE_KEY, "light").unwrap();
        assert_eq!(store.get(MODE_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn unavailable_memory_store_fails() {
        let mut store = MemoryStore::unavailable();
        assert!(matches!(store.get(SEED_KEY), Err(StoreError::Unavailable)));
        assert!(matches!(store.set(SEED_KEY, "#fff000"), Err(StoreError::Unavailable)));
    }

    #[test]
    fn default_path_ends_in_state_file() {
        let path = FileStore::default_path();
        assert!(path.ends_with("state.toml") || path.ends_with("tint-state.toml"));
    }
}
