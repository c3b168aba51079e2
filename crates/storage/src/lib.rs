//! Storage boundary for the orgmatch pipeline
//!
//! Two external collaborators live behind traits here: the source store the
//! raw registry records are loaded from ([`SourceStore`], Postgres), and the
//! search index merged documents are published to ([`SearchIndex`],
//! Elasticsearch-compatible REST). In-memory implementations for tests are
//! in [`mock`].

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod error;
pub mod mock;

mod elastic;
mod postgres;

// Export factory functions
pub use elastic::create_search_index;
pub use postgres::create_source_store;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orgmatch_core::error::Result;
use orgmatch_core::{MergedOrganisation, RawRecord};

// ==== Traits ====

/// Read side: the store holding raw per-registry records
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Load every record together with its directly linked identifiers
    ///
    /// One record per organisation row, outer-joined against the link table
    /// with the linked identifiers aggregated into `linked_orgs`.
    async fn load_records(&self) -> Result<Vec<RawRecord>>;
}

/// Write side: the search index merged documents are published to
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Cheap connectivity check; the pipeline aborts before any write if
    /// this fails
    async fn ping(&self) -> Result<()>;

    /// Index-or-replace one batch of documents, keyed by canonical `orgID`
    ///
    /// Per-document failures are collected into the outcome, never returned
    /// as an error; a hard transport failure is.
    async fn bulk_index(&self, documents: &[MergedOrganisation]) -> Result<BulkOutcome>;

    /// Delete every document whose generation stamp differs from `stamp`
    ///
    /// Must only run after all bulk publishing has completed. Returns the
    /// number of documents deleted.
    async fn delete_stale(&self, stamp: DateTime<Utc>) -> Result<u64>;
}

// ==== Models ====

/// Result of one or more bulk publish operations
#[derive(Debug, Clone, Default)]
pub struct BulkOutcome {
    /// Documents successfully indexed
    pub indexed: usize,
    /// One message per rejected document
    pub errors: Vec<String>,
}

impl BulkOutcome {
    /// Fold another outcome into this one
    pub fn merge(&mut self, other: BulkOutcome) {
        self.indexed += other.indexed;
        self.errors.extend(other.errors);
    }
}
