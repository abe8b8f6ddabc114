use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::StoreError;

const CACHE_FILE: &str = "gestures.json";

/// Durable local cache: a single keyed JSON blob holding the whole
/// `label -> vector-list` mapping, read once at startup and overwritten on
/// every mutation.
#[derive(Debug, Clone)]
pub struct TrainingCache {
    path: PathBuf,
}

impl TrainingCache {
    /// Creates a cache at the default location
    pub fn new_default() -> Self {
        Self::new(Self::get_default_cache_dir().join(CACHE_FILE))
    }

    /// Returns the default cache directory path
    pub fn get_default_cache_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("HANDSPELL_CACHE") {
            return PathBuf::from(path);
        }

        // 2. Use platform-specific cache directory
        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("handspell");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("handspell");
        }

        // 4. If all else fails, use system temp directory (platform agnostic)
        env::temp_dir().join("handspell")
    }

    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cached mapping. A missing cache file is normal on first
    /// run and yields an empty mapping.
    pub fn load(&self) -> Result<HashMap<String, Vec<Vec<f32>>>, StoreError> {
        if !self.path.exists() {
            info!("no training cache at {:?}, starting empty", self.path);
            return Ok(HashMap::new());
        }
        let bytes = fs::read(&self.path)?;
        let mapping = serde_json::from_slice(&bytes)?;
        Ok(mapping)
    }

    /// Overwrites the cache with the given mapping
    pub fn save(&self, mapping: &HashMap<String, Vec<Vec<f32>>>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec(mapping)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }

    /// Deletes the cache file if present
    pub fn clear(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Best-effort save used on the capture path; failures are logged and
    /// never block the in-memory add
    pub fn save_logged(&self, mapping: &HashMap<String, Vec<Vec<f32>>>) {
        if let Err(e) = self.save(mapping) {
            warn!("failed to write training cache at {:?}: {}", self.path, e);
        }
    }
}
