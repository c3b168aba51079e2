//! In-memory store and index for testing

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use crate::{BulkOutcome, SearchIndex, SourceStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orgmatch_core::error::Result;
use orgmatch_core::{MergedOrganisation, RawRecord};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Source store serving a fixed set of records
pub struct MockSourceStore {
    records: Vec<RawRecord>,
}

impl MockSourceStore {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl SourceStore for MockSourceStore {
    async fn load_records(&self) -> Result<Vec<RawRecord>> {
        Ok(self.records.clone())
    }
}

#[derive(Debug, Default)]
struct MockIndexData {
    documents: HashMap<String, MergedOrganisation>,
    /// Operation log: "bulk:<n>" per batch, "sweep" for the deletion pass
    operations: Vec<String>,
}

/// Search index holding documents in memory
///
/// Documents whose `orgID` is in the rejection set fail publishing with a
/// per-document error, mirroring an index-side schema rejection.
#[derive(Default)]
pub struct MockSearchIndex {
    data: Arc<Mutex<MockIndexData>>,
    reject_ids: HashSet<String>,
}

impl MockSearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject documents with these ids at publish time
    pub fn rejecting(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            data: Arc::default(),
            reject_ids: ids.into_iter().collect(),
        }
    }

    /// Number of documents currently in the index
    pub fn document_count(&self) -> usize {
        self.data.lock().unwrap().documents.len()
    }

    /// All document ids, sorted
    pub fn org_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .data
            .lock()
            .unwrap()
            .documents
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    /// Fetch one document by id
    pub fn document(&self, org_id: &str) -> Option<MergedOrganisation> {
        self.data.lock().unwrap().documents.get(org_id).cloned()
    }

    /// Generation stamps present in the index, deduplicated
    pub fn stamps(&self) -> HashSet<DateTime<Utc>> {
        self.data
            .lock()
            .unwrap()
            .documents
            .values()
            .map(|doc| doc.last_updated)
            .collect()
    }

    /// The sequence of operations the pipeline issued
    pub fn operations(&self) -> Vec<String> {
        self.data.lock().unwrap().operations.clone()
    }
}

#[async_trait]
impl SearchIndex for MockSearchIndex {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn bulk_index(&self, documents: &[MergedOrganisation]) -> Result<BulkOutcome> {
        let mut data = self.data.lock().unwrap();
        data.operations.push(format!("bulk:{}", documents.len()));

        let mut outcome = BulkOutcome::default();
        for doc in documents {
            if self.reject_ids.contains(&doc.org_id) {
                outcome
                    .errors
                    .push(format!("{}: mapper_parsing_exception", doc.org_id));
            } else {
                data.documents.insert(doc.org_id.clone(), doc.clone());
                outcome.indexed += 1;
            }
        }
        Ok(outcome)
    }

    async fn delete_stale(&self, stamp: DateTime<Utc>) -> Result<u64> {
        let mut data = self.data.lock().unwrap();
        data.operations.push("sweep".to_string());

        let before = data.documents.len();
        data.documents.retain(|_, doc| doc.last_updated == stamp);
        Ok((before - data.documents.len()) as u64)
    }
}
