//! Local-first store for the singleton settings record. Same contract as the
//! quotes store: synchronous hydration, optimistic mutation, write-through
//! snapshot, remote-wins reconciliation.

use crate::models::{Settings, SettingsPatch};
use crate::store::cache::LocalCache;
use crate::store::remote::RemoteApi;
use crate::store::SyncStatus;

pub struct SettingsStore {
    settings: Settings,
    cache: LocalCache,
    remote: RemoteApi,
    status: SyncStatus,
}

impl SettingsStore {
    pub fn open(cache: LocalCache, remote: RemoteApi) -> Self {
        let settings = cache.load_settings().unwrap_or_default();
        SettingsStore {
            settings,
            cache,
            remote,
            status: SyncStatus::Synced,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub async fn refresh(&mut self) {
        match self.remote.fetch_settings().await {
            Ok(settings) => {
                self.settings = settings;
                self.cache.save_settings(&self.settings);
                self.status = SyncStatus::Synced;
            }
            Err(e) => {
                tracing::warn!("Failed to sync settings: {:?}", e);
                self.status = SyncStatus::Offline;
            }
        }
    }

    pub async fn update(&mut self, patch: SettingsPatch) {
        patch.apply(&mut self.settings);
        self.cache.save_settings(&self.settings);

        match self.remote.update_settings(&patch).await {
            Ok(saved) => {
                self.settings = saved;
                self.cache.save_settings(&self.settings);
                self.status = SyncStatus::Synced;
            }
            Err(e) => {
                tracing::warn!("Failed to update settings: {:?}", e);
                self.status = SyncStatus::LocalOnly;
            }
        }
    }

    /// Theme changes also land in their own snapshot key so the UI can pick
    /// the theme before the settings snapshot is parsed.
    pub async fn set_theme(&mut self, theme: impl Into<String>) {
        let theme = theme.into();
        self.cache.save_theme(&theme);
        self.update(SettingsPatch {
            theme: Some(theme),
            ..Default::default()
        })
        .await;
    }

    /// Bulk restore from a backup file: local state and snapshot only.
    pub fn replace(&mut self, settings: Settings) {
        self.settings = settings;
        self.cache.save_settings(&self.settings);
    }
}
