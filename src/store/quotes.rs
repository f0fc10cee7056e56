//! Local-first store for the quotes collection.
//!
//! Reads are always served from memory, hydrated synchronously from the disk
//! snapshot at startup. Mutations apply to memory first (optimistic update),
//! mirror to the snapshot, then attempt the remote write; a remote failure
//! leaves the optimistic state in place and lowers the sync status instead of
//! surfacing an error. `refresh` replaces local state with the remote
//! collection wholesale — the remote wins unconditionally, by design.

use crate::models::{Quote, QuotePatch, QuoteStatus};
use crate::store::cache::LocalCache;
use crate::store::remote::{MigrateSummary, RemoteApi, RemoteError};
use crate::store::SyncStatus;

pub struct QuoteStore {
    quotes: Vec<Quote>,
    cache: LocalCache,
    remote: RemoteApi,
    status: SyncStatus,
}

impl QuoteStore {
    /// Hydrate from the local snapshot; no network I/O happens here.
    pub fn open(cache: LocalCache, remote: RemoteApi) -> Self {
        let quotes = cache.load_quotes();
        QuoteStore {
            quotes,
            cache,
            remote,
            status: SyncStatus::Synced,
        }
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn get(&self, id: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == id)
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    /// Fetch the authoritative collection and replace local state with it.
    /// On failure the snapshot stays untouched and the store goes offline.
    pub async fn refresh(&mut self) {
        match self.remote.fetch_quotes().await {
            Ok(quotes) => {
                self.quotes = quotes;
                self.cache.save_quotes(&self.quotes);
                self.status = SyncStatus::Synced;
            }
            Err(e) => {
                tracing::warn!("Failed to sync quotes: {:?}", e);
                self.status = SyncStatus::Offline;
            }
        }
    }

    /// Save a new quote: prepend locally, then push. On remote success the
    /// stored record replaces the optimistic one (the server may fill in
    /// defaults); on failure the local copy stands until the next refresh.
    pub async fn add(&mut self, quote: Quote) {
        let id = quote.id.clone();
        self.quotes.insert(0, quote.clone());
        self.cache.save_quotes(&self.quotes);

        match self.remote.create_quote(&quote).await {
            Ok(saved) => {
                self.replace(&id, saved);
                self.status = SyncStatus::Synced;
            }
            Err(e) => {
                tracing::warn!("Failed to save quote {}: {:?}", id, e);
                self.status = SyncStatus::LocalOnly;
            }
        }
    }

    pub async fn update(&mut self, id: &str, patch: QuotePatch) {
        if let Some(quote) = self.quotes.iter_mut().find(|q| q.id == id) {
            patch.apply(quote);
        }
        self.cache.save_quotes(&self.quotes);

        match self.remote.update_quote(id, &patch).await {
            Ok(saved) => {
                self.replace(id, saved);
                self.status = SyncStatus::Synced;
            }
            Err(e) => {
                tracing::warn!("Failed to update quote {}: {:?}", id, e);
                self.status = SyncStatus::LocalOnly;
            }
        }
    }

    pub async fn set_status(&mut self, id: &str, status: QuoteStatus) {
        self.update(
            id,
            QuotePatch {
                status: Some(status),
                ..Default::default()
            },
        )
        .await;
    }

    pub async fn set_notes(&mut self, id: &str, notes: impl Into<String>) {
        self.update(
            id,
            QuotePatch {
                notes: Some(notes.into()),
                ..Default::default()
            },
        )
        .await;
    }

    /// Re-save from the calculator: overwrites the pricing fields while
    /// keeping the record's identity, creation date, status and notes.
    pub async fn resave(&mut self, quote: &Quote) {
        let id = quote.id.clone();
        self.update(&id, QuotePatch::from_pricing_fields(quote)).await;
    }

    /// The optimistic removal sticks even when the remote delete fails, so
    /// the remote record can outlive the local one until the next refresh.
    pub async fn delete(&mut self, id: &str) {
        self.quotes.retain(|q| q.id != id);
        self.cache.save_quotes(&self.quotes);

        match self.remote.delete_quote(id).await {
            Ok(()) => {
                self.status = SyncStatus::Synced;
            }
            Err(e) => {
                tracing::warn!("Failed to delete quote {}: {:?}", id, e);
                self.status = SyncStatus::LocalOnly;
            }
        }
    }

    /// Bulk restore from a backup file: local state and snapshot only. The
    /// backend is untouched until `push_snapshot` or the next mutations.
    pub fn replace_all(&mut self, quotes: Vec<Quote>) {
        self.quotes = quotes;
        self.cache.save_quotes(&self.quotes);
    }

    /// Push the whole local collection through the migration endpoint.
    pub async fn push_snapshot(
        &self,
        settings: Option<&crate::models::Settings>,
    ) -> Result<MigrateSummary, RemoteError> {
        self.remote.migrate(&self.quotes, settings).await
    }

    fn replace(&mut self, id: &str, saved: Quote) {
        if let Some(slot) = self.quotes.iter_mut().find(|q| q.id == id) {
            *slot = saved;
        }
        self.cache.save_quotes(&self.quotes);
    }
}
