//! End-to-end properties of cluster resolution and merging
//!
//! These tests exercise the resolver across module boundaries: graph
//! construction, transitive closure, canonical selection and document
//! assembly together.

use chrono::{NaiveDate, TimeZone, Utc};
use orgmatch_core::{OrderedSet, RawRecord};
use orgmatch_resolver::{build_document, ClusterResolver, IdentityGraph, VisitedSet};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

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
        // One organisation spread over three registries, linked as a chain
        record("GB-COH-100", &["GB-CHC-200"], "Acme Trust Ltd"),
        record("GB-CHC-200", &["GB-EDU-300"], "Acme Trust"),
        record("GB-EDU-300", &[], "Acme School"),
        // An isolated organisation
        record("GB-SC-400", &[], "Lone Kirk"),
        // A pair linked in one direction only
        record("GB-NIC-500", &["GB-COH-600"], "Ulster Aid"),
        record("GB-COH-600", &[], "Ulster Aid Ltd"),
    ]
}

#[test]
fn clusters_partition_the_identifier_universe() {
    let graph = IdentityGraph::build(sample_records());
    let all_ids: Vec<String> = graph.identifiers().map(String::from).collect();

    let resolver = ClusterResolver::new(&graph);
    let mut visited = VisitedSet::new();
    let clusters = resolver.resolve_all(&mut visited);

    let mut assigned = HashSet::new();
    for cluster in &clusters {
        for id in &cluster.identifiers {
            // Every identifier appears in exactly one cluster
            assert!(assigned.insert(id.clone()), "{id} assigned twice");
        }
    }
    let universe: HashSet<String> = all_ids.into_iter().collect();
    assert_eq!(assigned, universe);
}

#[test]
fn closure_is_complete() {
    let graph = IdentityGraph::build(sample_records());
    let resolver = ClusterResolver::new(&graph);
    let mut visited = VisitedSet::new();

    for cluster in resolver.resolve_all(&mut visited) {
        for record in &cluster.records {
            for id in record.referenced_ids() {
                assert!(
                    cluster.identifiers.contains(&id),
                    "record {} points outside its cluster via {id}",
                    record.id
                );
            }
        }
    }
}

#[test]
fn chain_of_links_resolves_to_one_cluster() {
    let graph = IdentityGraph::build(sample_records());
    let resolver = ClusterResolver::new(&graph);
    let mut visited = VisitedSet::new();

    let clusters = resolver.resolve_all(&mut visited);
    assert_eq!(clusters.len(), 3);

    let chain = clusters
        .iter()
        .find(|c| c.identifiers.contains("GB-EDU-300"))
        .expect("chain cluster missing");
    // GB-EDU-300 is two hops from GB-COH-100, with no direct edge
    assert!(chain.identifiers.contains("GB-COH-100"));
    assert_eq!(chain.records.len(), 3);
}

#[test]
fn canonical_selection_is_deterministic() {
    let graph = IdentityGraph::build(sample_records());
    let resolver = ClusterResolver::new(&graph);
    let mut visited = VisitedSet::new();
    let clusters = resolver.resolve_all(&mut visited);

    let stamp = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    for cluster in &clusters {
        let first = build_document(cluster, stamp).unwrap();
        let second = build_document(cluster, stamp).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn scenario_linked_pair_merges_under_charity_identifier() {
    // A charity record linking a company record
    let graph = IdentityGraph::build(vec![
        record("GB-CHC-1", &["GB-COH-9"], "Acme Trust"),
        record("GB-COH-9", &[], "Acme Trust Ltd"),
    ]);
    let resolver = ClusterResolver::new(&graph);
    let mut visited = VisitedSet::new();
    let clusters = resolver.resolve_all(&mut visited);
    assert_eq!(clusters.len(), 1);

    let doc = build_document(&clusters[0], Utc::now()).unwrap();
    assert_eq!(doc.org_id, "GB-CHC-1");
    assert_eq!(doc.org_ids, vec!["GB-CHC-1", "GB-COH-9"]);
    assert!(doc.alternate_names.contains(&"Acme Trust".to_string()));
    assert!(doc.alternate_names.contains(&"Acme Trust Ltd".to_string()));
}

#[test]
fn scenario_isolated_record_keeps_its_own_identity() {
    let graph = IdentityGraph::build(vec![record("GB-SC-7", &[], "Lone Kirk")]);
    let resolver = ClusterResolver::new(&graph);
    let mut visited = VisitedSet::new();
    let clusters = resolver.resolve_all(&mut visited);
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].identifiers.len(), 1);

    let doc = build_document(&clusters[0], Utc::now()).unwrap();
    assert_eq!(doc.org_id, "GB-SC-7");
    assert_eq!(doc.name, "Lone Kirk");
    assert_eq!(doc.org_ids, vec!["GB-SC-7"]);
}

#[test]
fn priority_ordering_holds_regardless_of_record_order() {
    for records in [
        vec![
            record("GB-CHC-1", &["GB-COH-9"], "Charity"),
            record("GB-COH-9", &["GB-CHC-1"], "Company"),
        ],
        vec![
            record("GB-COH-9", &["GB-CHC-1"], "Company"),
            record("GB-CHC-1", &["GB-COH-9"], "Charity"),
        ],
    ] {
        let graph = IdentityGraph::build(records);
        let resolver = ClusterResolver::new(&graph);
        let mut visited = VisitedSet::new();
        let clusters = resolver.resolve_all(&mut visited);
        assert_eq!(clusters.len(), 1);

        let doc = build_document(&clusters[0], Utc::now()).unwrap();
        assert_eq!(doc.org_id, "GB-CHC-1");
    }
}

#[test]
fn merged_fields_are_exact_deduplicated_unions() {
    let mut a = record("GB-CHC-1", &["GB-COH-9"], "Acme Trust");
    a.alternate_names = vec!["Acme".to_string()];
    a.organisation_types = vec!["Registered Charity".to_string()];
    a.source = "ccew".to_string();
    a.postal_code = Some("EC1A 1AA".to_string());

    let mut b = record("GB-COH-9", &[], "Acme Trust Ltd");
    b.alternate_names = vec!["Acme".to_string()];
    b.organisation_types = vec!["Company".to_string(), "Registered Charity".to_string()];
    b.source = "companies-house".to_string();
    b.postal_code = Some("SW1A 2AA".to_string());
    b.active = true;

    let graph = IdentityGraph::build(vec![a, b]);
    let resolver = ClusterResolver::new(&graph);
    let mut visited = VisitedSet::new();
    let clusters = resolver.resolve_all(&mut visited);
    let doc = build_document(&clusters[0], Utc::now()).unwrap();

    let names: OrderedSet<String> = doc.alternate_names.iter().cloned().collect();
    assert_eq!(names.len(), doc.alternate_names.len(), "duplicate names");
    assert_eq!(
        doc.alternate_names,
        vec!["Acme Trust", "Acme", "Acme Trust Ltd"]
    );
    assert_eq!(
        doc.organisation_types,
        vec!["Registered Charity", "Company"]
    );
    assert_eq!(doc.sources, vec!["ccew", "companies-house"]);
    assert_eq!(doc.postal_codes, vec!["EC1A 1AA", "SW1A 2AA"]);
    assert!(doc.active);
}

#[test]
fn records_without_registration_dates_are_normal_data() {
    let mut a = record("GB-CHC-1", &[], "Dated");
    a.active = true;
    a.date_registered = NaiveDate::from_ymd_opt(2020, 1, 1);
    let b = record("GB-CHC-2", &[], "Undated");

    let graph = IdentityGraph::build(vec![a, b]);
    let resolver = ClusterResolver::new(&graph);
    let mut visited = VisitedSet::new();
    let clusters = resolver.resolve_all(&mut visited);

    // Two separate organisations, both publishable
    assert_eq!(clusters.len(), 2);
    for cluster in &clusters {
        assert!(build_document(cluster, Utc::now()).is_ok());
    }
}
