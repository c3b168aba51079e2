//! Pipeline tests against the in-memory store and index

use orgmatch_core::RawRecord;
use orgmatch_indexer::Pipeline;
use orgmatch_storage::mock::{MockSearchIndex, MockSourceStore};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn record(id: &str, linked: &[&str], name: &str) -> RawRecord {
    RawRecord {
        id: id.to_string(),
        linked_orgs: linked.iter().map(|s| s.to_string()).collect(),
        name: name.to_string(),
        source: "test".to_string(),
        ..Default::default()
    }
}

fn sample_records() -> Vec<RawRecord> {
    vec![
        record("GB-CHC-1", &["GB-COH-9"], "Acme Trust"),
        record("GB-COH-9", &[], "Acme Trust Ltd"),
        record("GB-SC-2", &[], "Lone Kirk"),
        record("GB-EDU-3", &[], "Hill School"),
    ]
}

fn pipeline(
    records: Vec<RawRecord>,
    index: &Arc<MockSearchIndex>,
    batch_size: usize,
) -> Pipeline {
    Pipeline::new(
        Arc::new(MockSourceStore::new(records)),
        index.clone(),
        batch_size,
    )
}

#[tokio::test]
async fn full_run_publishes_one_document_per_cluster() {
    let index = Arc::new(MockSearchIndex::new());
    let summary = pipeline(sample_records(), &index, 500).run().await.unwrap();

    assert_eq!(summary.clusters, 3);
    assert_eq!(summary.published, 3);
    assert!(summary.errors.is_empty());
    assert_eq!(index.org_ids(), vec!["GB-CHC-1", "GB-EDU-3", "GB-SC-2"]);

    let merged = index.document("GB-CHC-1").unwrap();
    assert_eq!(merged.org_ids, vec!["GB-CHC-1", "GB-COH-9"]);
}

#[tokio::test]
async fn every_surviving_document_carries_the_run_stamp() {
    let index = Arc::new(MockSearchIndex::new());
    let summary = pipeline(sample_records(), &index, 500).run().await.unwrap();

    let stamps = index.stamps();
    assert_eq!(stamps.len(), 1);
    assert!(stamps.contains(&summary.stamp));
}

#[tokio::test]
async fn republish_is_idempotent_in_coverage() {
    let index = Arc::new(MockSearchIndex::new());

    let first = pipeline(sample_records(), &index, 500).run().await.unwrap();
    let ids_after_first = index.org_ids();

    let second = pipeline(sample_records(), &index, 500).run().await.unwrap();
    let ids_after_second = index.org_ids();

    // Same coverage, fresh stamp, nothing swept as stale
    assert_eq!(ids_after_first, ids_after_second);
    assert_eq!(index.document_count(), 3);
    assert_eq!(second.deleted, 0);
    assert!(second.stamp >= first.stamp);
    assert_eq!(index.stamps().len(), 1);
}

#[tokio::test]
async fn sweep_runs_strictly_after_all_publish_batches() {
    let index = Arc::new(MockSearchIndex::new());
    // Batch size 1 forces one bulk call per document
    pipeline(sample_records(), &index, 1).run().await.unwrap();

    let operations = index.operations();
    assert_eq!(operations.last().map(String::as_str), Some("sweep"));
    assert_eq!(
        operations.iter().filter(|op| op.starts_with("bulk")).count(),
        3
    );
    // No bulk operation after the sweep
    let sweep_pos = operations.iter().position(|op| op == "sweep").unwrap();
    assert_eq!(sweep_pos, operations.len() - 1);
}

#[tokio::test]
async fn documents_are_published_in_configured_batches() {
    let index = Arc::new(MockSearchIndex::new());
    pipeline(sample_records(), &index, 2).run().await.unwrap();

    let bulk_ops: Vec<String> = index
        .operations()
        .into_iter()
        .filter(|op| op.starts_with("bulk"))
        .collect();
    assert_eq!(bulk_ops, vec!["bulk:2", "bulk:1"]);
}

#[tokio::test]
async fn publish_rejections_are_collected_not_fatal() {
    let index = Arc::new(MockSearchIndex::rejecting(["GB-SC-2".to_string()]));
    let summary = pipeline(sample_records(), &index, 500).run().await.unwrap();

    assert_eq!(summary.published, 2);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].starts_with("GB-SC-2"));
    // The run still swept, and the surviving documents are intact
    assert!(summary.sweep_error.is_none());
    assert_eq!(index.org_ids(), vec!["GB-CHC-1", "GB-EDU-3"]);
}

#[tokio::test]
async fn vanished_organisations_are_swept_as_stale() {
    let index = Arc::new(MockSearchIndex::new());
    pipeline(sample_records(), &index, 500).run().await.unwrap();
    assert_eq!(index.document_count(), 3);

    // The school's source records disappear before the next run
    let remaining = vec![
        record("GB-CHC-1", &["GB-COH-9"], "Acme Trust"),
        record("GB-COH-9", &[], "Acme Trust Ltd"),
        record("GB-SC-2", &[], "Lone Kirk"),
    ];
    let summary = pipeline(remaining, &index, 500).run().await.unwrap();

    assert_eq!(summary.deleted, 1);
    assert_eq!(index.org_ids(), vec!["GB-CHC-1", "GB-SC-2"]);
}

#[tokio::test]
async fn absorbed_organisations_leave_no_stale_document() {
    let index = Arc::new(MockSearchIndex::new());
    // Initially unlinked: two documents
    let unlinked = vec![
        record("GB-CHC-1", &[], "Acme Trust"),
        record("GB-COH-9", &[], "Acme Trust Ltd"),
    ];
    pipeline(unlinked, &index, 500).run().await.unwrap();
    assert_eq!(index.document_count(), 2);

    // A link appears: the company is absorbed into the charity's cluster
    let linked = vec![
        record("GB-CHC-1", &["GB-COH-9"], "Acme Trust"),
        record("GB-COH-9", &[], "Acme Trust Ltd"),
    ];
    let summary = pipeline(linked, &index, 500).run().await.unwrap();

    assert_eq!(summary.deleted, 1);
    assert_eq!(index.org_ids(), vec!["GB-CHC-1"]);
    let merged = index.document("GB-CHC-1").unwrap();
    assert!(merged.org_ids.contains(&"GB-COH-9".to_string()));
}
