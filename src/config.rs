use std::env;
use std::path::PathBuf;

use crate::store::TrainingCache;
use crate::Descriptor;

/// Environment variable naming the remote API base URL
pub const API_BASE_VAR: &str = "HANDSPELL_API_BASE";
/// Environment variable overriding the cache directory
pub const CACHE_VAR: &str = "HANDSPELL_CACHE";

/// Runtime configuration resolved from the environment.
///
/// An unset API base means the session runs offline: local cache only,
/// no remote merge or sync.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: Option<String>,
    pub cache_file: PathBuf,
    pub descriptor: Descriptor,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Config {
    pub fn from_env() -> Self {
        let api_base = env::var(API_BASE_VAR)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        Self {
            api_base,
            cache_file: TrainingCache::get_default_cache_dir().join("gestures.json"),
            descriptor: Descriptor::Spatial,
        }
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    pub fn with_cache_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_file = path.into();
        self
    }

    pub fn with_descriptor(mut self, descriptor: Descriptor) -> Self {
        self.descriptor = descriptor;
        self
    }

    /// Offline configuration pointed at a private cache path, for tests
    /// and local-only use
    pub fn offline(cache_file: impl Into<PathBuf>) -> Self {
        Self {
            api_base: None,
            cache_file: cache_file.into(),
            descriptor: Descriptor::Spatial,
        }
    }
}
