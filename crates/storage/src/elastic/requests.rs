//! Request and response shaping for the index REST API
//!
//! Kept free of I/O so the wire formats can be tested directly.

use crate::error::StorageError;
use crate::BulkOutcome;
use chrono::{DateTime, Utc};
use orgmatch_core::error::Result;
use orgmatch_core::MergedOrganisation;
use serde::Deserialize;
use serde_json::json;

/// NDJSON body for a `_bulk` request: one index-or-replace action per
/// document, keyed by canonical `orgID`
pub(super) fn bulk_body(index: &str, documents: &[MergedOrganisation]) -> Result<String> {
    let mut body = String::new();
    for doc in documents {
        let action = json!({ "index": { "_index": index, "_id": doc.org_id } });
        let source = serde_json::to_string(doc)
            .map_err(|e| StorageError::BulkFailed(format!("Failed to serialize document: {e}")))?;
        body.push_str(&action.to_string());
        body.push('\n');
        body.push_str(&source);
        body.push('\n');
    }
    Ok(body)
}

/// Delete-by-query body selecting every document from another generation
///
/// The stamp is serialized the same way as the documents' `last_updated`
/// field, so the match is exact equality on the stored value.
pub(super) fn stale_query(stamp: DateTime<Utc>) -> serde_json::Value {
    json!({
        "query": {
            "bool": {
                "must_not": {
                    "match": { "last_updated": stamp }
                }
            }
        }
    })
}

/// Response to a `_bulk` request
#[derive(Debug, Deserialize)]
pub(super) struct BulkResponse {
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<BulkItem>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BulkItem {
    pub index: Option<BulkItemStatus>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BulkItemStatus {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub status: u16,
    pub error: Option<serde_json::Value>,
}

/// Response to a `_delete_by_query` request
#[derive(Debug, Deserialize)]
pub(super) struct DeleteByQueryResponse {
    pub deleted: u64,
}

/// Fold a bulk response into counts and per-document failure messages
pub(super) fn outcome_from_response(response: BulkResponse) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();
    for item in response.items {
        let Some(status) = item.index else {
            continue;
        };
        if status.error.is_none() && status.status < 300 {
            outcome.indexed += 1;
        } else {
            let id = status.id.unwrap_or_else(|| "<unknown>".to_string());
            let detail = status
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| format!("status {}", status.status));
            outcome.errors.push(format!("{id}: {detail}"));
        }
    }
    outcome
}
