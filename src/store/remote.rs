//! Thin HTTP client for the authoritative backend. Callers (the stores)
//! reduce every failure here to a sync status — nothing propagates further.

use serde::{Deserialize, Serialize};

use crate::models::{Quote, QuotePatch, Settings, SettingsPatch};

#[derive(Debug)]
pub enum RemoteError {
    Request(reqwest::Error),
    Status(reqwest::StatusCode),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        RemoteError::Request(e)
    }
}

#[derive(Debug, Deserialize)]
struct QuotesEnvelope {
    quotes: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    quote: Quote,
}

#[derive(Debug, Deserialize)]
struct SettingsEnvelope {
    settings: Settings,
}

/// Result counts of a bulk migration.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MigrateSummary {
    pub imported: i64,
    pub skipped: i64,
}

#[derive(Debug, Serialize)]
struct MigratePayload<'a> {
    quotes: &'a [Quote],
    #[serde(skip_serializing_if = "Option::is_none")]
    settings: Option<&'a Settings>,
}

#[derive(Clone)]
pub struct RemoteApi {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        RemoteApi {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn check(res: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        if res.status().is_success() {
            Ok(res)
        } else {
            Err(RemoteError::Status(res.status()))
        }
    }

    pub async fn fetch_quotes(&self) -> Result<Vec<Quote>, RemoteError> {
        let res = self.client.get(self.url("/quotes")).send().await?;
        let envelope: QuotesEnvelope = Self::check(res)?.json().await?;
        Ok(envelope.quotes)
    }

    pub async fn create_quote(&self, quote: &Quote) -> Result<Quote, RemoteError> {
        let res = self
            .client
            .post(self.url("/quotes"))
            .json(quote)
            .send()
            .await?;
        let envelope: QuoteEnvelope = Self::check(res)?.json().await?;
        Ok(envelope.quote)
    }

    pub async fn update_quote(&self, id: &str, patch: &QuotePatch) -> Result<Quote, RemoteError> {
        let res = self
            .client
            .put(self.url(&format!("/quotes/{id}")))
            .json(patch)
            .send()
            .await?;
        let envelope: QuoteEnvelope = Self::check(res)?.json().await?;
        Ok(envelope.quote)
    }

    pub async fn delete_quote(&self, id: &str) -> Result<(), RemoteError> {
        let res = self
            .client
            .delete(self.url(&format!("/quotes/{id}")))
            .send()
            .await?;
        Self::check(res)?;
        Ok(())
    }

    pub async fn fetch_settings(&self) -> Result<Settings, RemoteError> {
        let res = self.client.get(self.url("/settings")).send().await?;
        let envelope: SettingsEnvelope = Self::check(res)?.json().await?;
        Ok(envelope.settings)
    }

    pub async fn update_settings(&self, patch: &SettingsPatch) -> Result<Settings, RemoteError> {
        let res = self
            .client
            .put(self.url("/settings"))
            .json(patch)
            .send()
            .await?;
        let envelope: SettingsEnvelope = Self::check(res)?.json().await?;
        Ok(envelope.settings)
    }

    /// One-shot migration of a local snapshot into the backend. Duplicate
    /// quote ids are skipped server-side.
    pub async fn migrate(
        &self,
        quotes: &[Quote],
        settings: Option<&Settings>,
    ) -> Result<MigrateSummary, RemoteError> {
        let res = self
            .client
            .post(self.url("/migrate"))
            .json(&MigratePayload { quotes, settings })
            .send()
            .await?;
        let summary: MigrateSummary = Self::check(res)?.json().await?;
        Ok(summary)
    }
}
