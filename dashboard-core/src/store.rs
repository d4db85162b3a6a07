//! Key-value persistence for dashboard state.
//!
//! Every slice of state lives under its own key and is serialized to JSON on
//! its own, so any key can be restored independently of the others.

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

pub const KEY_DARK_MODE: &str = "darkMode";
pub const KEY_WEATHER: &str = "weather";
pub const KEY_FORECAST: &str = "forecast";
pub const KEY_RECENT_SEARCHES: &str = "recentSearches";

pub trait KeyValueStore: Send + Sync {
    fn load_raw(&self, key: &str) -> Result<Option<String>>;

    fn save_raw(&self, key: &str, json: &str) -> Result<()>;

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        match self.load_raw(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .with_context(|| format!("Failed to parse stored value for key '{key}'")),
            None => Ok(None),
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize value for key '{key}'"))?;
        self.save_raw(key, &json)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn load_raw(&self, key: &str) -> Result<Option<String>> {
        (**self).load_raw(key)
    }

    fn save_raw(&self, key: &str, json: &str) -> Result<()> {
        (**self).save_raw(key, json)
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted in the platform data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(crate::config::data_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read stored value: {}", path.display()))?;

        Ok(Some(contents))
    }

    fn save_raw(&self, key: &str, json: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create data directory: {}", self.dir.display())
        })?;

        // Write-then-rename so a crash never leaves a truncated value behind.
        let path = self.key_path(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));

        fs::write(&tmp, json)
            .with_context(|| format!("Failed to write stored value: {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace stored value: {}", path.display()))?;

        tracing::trace!(key, path = %path.display(), "saved");
        Ok(())
    }
}

/// In-process store, forgotten when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn save_raw(&self, key: &str, json: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?;
        values.insert(key.to_string(), json.to_string());
        Ok(())
    }
}
