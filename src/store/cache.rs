//! Persisted JSON snapshots of the last locally-known state. Loading is
//! synchronous and infallible so the UI can render before any network
//! round-trip: a missing or corrupt snapshot simply yields the defaults.

use std::fs;
use std::path::PathBuf;

use crate::models::{Quote, Settings};

const QUOTES_KEY: &str = "quotes.json";
const SETTINGS_KEY: &str = "settings.json";
const THEME_KEY: &str = "theme";

#[derive(Debug, Clone)]
pub struct LocalCache {
    dir: PathBuf,
}

impl LocalCache {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        LocalCache { dir: dir.into() }
    }

    /// The per-user cache directory.
    /// On macOS: ~/Library/Caches/PricingStudio
    /// On Linux: ~/.cache/pricing-studio
    /// On Windows: %LOCALAPPDATA%\PricingStudio
    pub fn default_dir() -> PathBuf {
        #[cfg(target_os = "macos")]
        {
            let home = std::env::var("HOME").expect("HOME not set");
            PathBuf::from(home)
                .join("Library")
                .join("Caches")
                .join("PricingStudio")
        }

        #[cfg(target_os = "linux")]
        {
            let home = std::env::var("HOME").expect("HOME not set");
            PathBuf::from(home).join(".cache").join("pricing-studio")
        }

        #[cfg(target_os = "windows")]
        {
            let appdata = std::env::var("LOCALAPPDATA").expect("LOCALAPPDATA not set");
            PathBuf::from(appdata).join("PricingStudio")
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn write(&self, key: &str, contents: &str) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            tracing::warn!("Failed to create cache dir {:?}: {}", self.dir, e);
            return;
        }
        if let Err(e) = fs::write(self.path(key), contents) {
            tracing::warn!("Failed to write cache key {}: {}", key, e);
        }
    }

    pub fn load_quotes(&self) -> Vec<Quote> {
        fs::read_to_string(self.path(QUOTES_KEY))
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save_quotes(&self, quotes: &[Quote]) {
        match serde_json::to_string(quotes) {
            Ok(raw) => self.write(QUOTES_KEY, &raw),
            Err(e) => tracing::warn!("Failed to serialize quotes snapshot: {}", e),
        }
    }

    pub fn load_settings(&self) -> Option<Settings> {
        fs::read_to_string(self.path(SETTINGS_KEY))
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    pub fn save_settings(&self, settings: &Settings) {
        match serde_json::to_string(settings) {
            Ok(raw) => self.write(SETTINGS_KEY, &raw),
            Err(e) => tracing::warn!("Failed to serialize settings snapshot: {}", e),
        }
    }

    pub fn load_theme(&self) -> String {
        fs::read_to_string(self.path(THEME_KEY))
            .map(|s| s.trim().to_string())
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "dark".to_string())
    }

    pub fn save_theme(&self, theme: &str) {
        self.write(THEME_KEY, theme);
    }
}
