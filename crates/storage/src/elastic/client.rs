use super::requests::{
    bulk_body, outcome_from_response, stale_query, BulkResponse, DeleteByQueryResponse,
};
use crate::error::StorageError;
use crate::{BulkOutcome, SearchIndex};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orgmatch_core::error::Result;
use orgmatch_core::MergedOrganisation;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Server-side timeout for the stale-generation sweep; deletes over a large
/// index can run long
const SWEEP_TIMEOUT: &str = "30m";

/// Client-side allowance on top of the server-side sweep timeout
const SWEEP_REQUEST_TIMEOUT: Duration = Duration::from_secs(31 * 60);

const BULK_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Search index client speaking the Elasticsearch REST API
pub struct ElasticIndex {
    client: Client,
    base_url: String,
    index: String,
}

impl ElasticIndex {
    /// Create a client for one index
    pub fn new(index_url: &str, index_name: &str) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                StorageError::ConnectionFailed(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: index_url.trim_end_matches('/').to_string(),
            index: index_name.to_string(),
        })
    }
}

#[async_trait]
impl SearchIndex for ElasticIndex {
    async fn ping(&self) -> Result<()> {
        let response = self
            .client
            .get(&self.base_url)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(format!("Index unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(StorageError::ConnectionFailed(format!(
                "Index returned {}",
                response.status()
            ))
            .into());
        }
        Ok(())
    }

    async fn bulk_index(&self, documents: &[MergedOrganisation]) -> Result<BulkOutcome> {
        if documents.is_empty() {
            return Ok(BulkOutcome::default());
        }

        let body = bulk_body(&self.index, documents)?;
        let response = self
            .client
            .post(format!("{}/_bulk", self.base_url))
            .header("Content-Type", "application/x-ndjson")
            .timeout(BULK_REQUEST_TIMEOUT)
            .body(body)
            .send()
            .await
            .map_err(|e| StorageError::BulkFailed(format!("Bulk request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(
                StorageError::BulkFailed(format!("Bulk returned {status}: {error_text}")).into(),
            );
        }

        let bulk_response: BulkResponse = response.json().await.map_err(|e| {
            StorageError::MalformedResponse(format!("Failed to parse bulk response: {e}"))
        })?;

        if bulk_response.errors {
            warn!("bulk request reported per-document failures");
        }
        let outcome = outcome_from_response(bulk_response);
        debug!(
            indexed = outcome.indexed,
            errors = outcome.errors.len(),
            "bulk publish batch complete"
        );
        Ok(outcome)
    }

    async fn delete_stale(&self, stamp: DateTime<Utc>) -> Result<u64> {
        let response = self
            .client
            .post(format!(
                "{}/{}/_delete_by_query?conflicts=proceed&timeout={SWEEP_TIMEOUT}",
                self.base_url, self.index
            ))
            .timeout(SWEEP_REQUEST_TIMEOUT)
            .json(&stale_query(stamp))
            .send()
            .await
            .map_err(|e| StorageError::SweepFailed(format!("Delete-by-query failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(StorageError::SweepFailed(format!(
                "Delete-by-query returned {status}: {error_text}"
            ))
            .into());
        }

        let delete_response: DeleteByQueryResponse = response.json().await.map_err(|e| {
            StorageError::MalformedResponse(format!("Failed to parse delete response: {e}"))
        })?;

        Ok(delete_response.deleted)
    }
}
