//! The orgmatch indexing pipeline
//!
//! One run is a full refresh: load every raw registry record, resolve
//! identities into clusters, merge each cluster into a document stamped with
//! the run's generation, publish the documents in batches, then sweep every
//! document left over from previous generations.
//!
//! The sweep is the one hard ordering constraint: it must run strictly after
//! every publish batch has completed, or organisations not yet re-published
//! would vanish from the index. The sequential `run` below is that barrier.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod batcher;

pub use batcher::DocumentBatcher;

// Re-export error types from core
pub use orgmatch_core::error::{Error, Result};

use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use orgmatch_resolver::{build_document, ClusterResolver, IdentityGraph, VisitedSet};
use orgmatch_storage::{BulkOutcome, SearchIndex, SourceStore};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Outcome of one full pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Distinct identifiers seen across all records
    pub identifiers: usize,
    /// Clusters resolved (= documents attempted)
    pub clusters: usize,
    /// Documents successfully indexed
    pub published: usize,
    /// Per-document failures, publish rejections included
    pub errors: Vec<String>,
    /// Stale documents removed by the sweep
    pub deleted: u64,
    /// Reported when the sweep itself failed; a later run corrects it
    pub sweep_error: Option<String>,
    /// The run's generation stamp
    pub stamp: DateTime<Utc>,
}

/// The full-refresh pipeline: load, resolve, publish, sweep
pub struct Pipeline {
    store: Arc<dyn SourceStore>,
    index: Arc<dyn SearchIndex>,
    batch_size: usize,
}

impl Pipeline {
    pub fn new(store: Arc<dyn SourceStore>, index: Arc<dyn SearchIndex>, batch_size: usize) -> Self {
        Self {
            store,
            index,
            batch_size,
        }
    }

    /// Run the pipeline once
    ///
    /// Connectivity failures (store or index unreachable) abort before any
    /// write, leaving the index in its prior state. Per-document publish
    /// failures are collected into the summary, not raised. A sweep failure
    /// is reported in the summary rather than failing the run.
    pub async fn run(&self) -> Result<RunSummary> {
        // Fail fast on an unreachable index before touching anything
        self.index.ping().await?;

        let records = self.store.load_records().await?;
        let record_count = records.len();
        let graph = IdentityGraph::build(records);
        info!(
            records = record_count,
            identifiers = graph.len(),
            "loaded records from the store"
        );

        let resolver = ClusterResolver::new(&graph);
        let mut visited = VisitedSet::new();
        let clusters = resolver.resolve_all(&mut visited);
        info!(clusters = clusters.len(), "resolved identity clusters");

        let stamp = Utc::now();
        let progress = ProgressBar::new(clusters.len() as u64);
        let mut batcher = DocumentBatcher::new(self.batch_size);
        let mut outcome = BulkOutcome::default();

        for cluster in &clusters {
            match build_document(cluster, stamp) {
                Ok(document) => {
                    if let Some(batch) = batcher.push(document) {
                        outcome.merge(self.index.bulk_index(&batch).await?);
                    }
                }
                Err(e) => {
                    warn!("skipping unmergeable cluster: {e}");
                    outcome.errors.push(e.to_string());
                }
            }
            progress.inc(1);
        }
        let remainder = batcher.flush();
        if !remainder.is_empty() {
            outcome.merge(self.index.bulk_index(&remainder).await?);
        }
        progress.finish_and_clear();

        info!(
            published = outcome.indexed,
            errors = outcome.errors.len(),
            "publishing complete"
        );

        // Every live organisation now carries the current stamp, so anything
        // older is provably obsolete
        let (deleted, sweep_error) = match self.index.delete_stale(stamp).await {
            Ok(deleted) => (deleted, None),
            Err(e) => {
                error!("stale-generation sweep failed: {e}");
                (0, Some(e.to_string()))
            }
        };

        Ok(RunSummary {
            identifiers: graph.len(),
            clusters: clusters.len(),
            published: outcome.indexed,
            errors: outcome.errors,
            deleted,
            sweep_error,
            stamp,
        })
    }
}
