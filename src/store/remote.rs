use log::{info, warn};
use reqwest::Client;

use super::{StoreError, TrainingRecord};

/// Client for the gesture CRUD API.
///
/// The API is an external collaborator; this client only fetches the full
/// record list at startup and pushes single records after a capture. All
/// remote failures are transient by policy: logged, never retried, never
/// allowed to roll back local state.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    base: String,
    client: Client,
}

impl RemoteStore {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            base,
            client: Client::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Fetches the full ordered record list from the primary endpoint
    pub async fn fetch_all(&self) -> Result<Vec<TrainingRecord>, StoreError> {
        self.fetch_from(&format!("{}/api/gestures", self.base)).await
    }

    /// Fetches from the legacy alias surface; same semantics, older field
    /// names tolerated by the record deserializer
    pub async fn fetch_legacy(&self) -> Result<Vec<TrainingRecord>, StoreError> {
        self.fetch_from(&format!("{}/api/gesture/all", self.base))
            .await
    }

    async fn fetch_from(&self, url: &str) -> Result<Vec<TrainingRecord>, StoreError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let records: Vec<TrainingRecord> = response.json().await?;
        info!("fetched {} records from {}", records.len(), url);
        Ok(records)
    }

    /// Pushes one record to `/api/train`. The server rejects records whose
    /// vector is not exactly the expected length, so callers validate first.
    pub async fn push(&self, record: &TrainingRecord) -> Result<(), StoreError> {
        let url = format!("{}/api/train", self.base);
        self.client
            .post(&url)
            .json(record)
            .send()
            .await?
            .error_for_status()?;
        info!("pushed sample for '{}' to {}", record.label, url);
        Ok(())
    }

    /// Fire-and-forget variant of [`push`](Self::push) for the capture
    /// path: failures are logged and dropped
    pub async fn push_logged(&self, record: TrainingRecord) {
        if let Err(e) = self.push(&record).await {
            warn!("remote sync failed for '{}': {}", record.label, e);
        }
    }
}
