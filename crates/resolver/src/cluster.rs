//! Cluster resolution by transitive closure
//!
//! A cluster is the full connected component of records reachable from a seed
//! identifier through cross-reference edges. Closure is computed to a fixed
//! point: a record reachable through a chain of cross-references belongs to
//! the cluster even if nothing links it to the seed directly.

use crate::identity_graph::IdentityGraph;
use crate::visited::VisitedSet;
use orgmatch_core::{OrderedSet, RawRecord};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// One resolved connected component
///
/// Invariant: every identifier appearing in any member record's own id,
/// linked identifiers or alternate identifiers is itself in `identifiers` -
/// no record is left pointing outside the cluster.
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Every identifier in the component, in discovery order
    pub identifiers: OrderedSet<String>,
    /// Every record any of those identifiers resolves to, deduplicated
    pub records: Vec<Arc<RawRecord>>,
}

/// Enumerates clusters so that every identifier lands in exactly one
pub struct ClusterResolver<'a> {
    graph: &'a IdentityGraph,
}

impl<'a> ClusterResolver<'a> {
    pub fn new(graph: &'a IdentityGraph) -> Self {
        Self { graph }
    }

    /// Resolve every identifier in the graph into clusters
    ///
    /// Identifiers are seeded in the graph's first-appearance order; the
    /// first seed of a component owns its emission and later seeds of the
    /// same component are skipped.
    pub fn resolve_all(&self, visited: &mut VisitedSet) -> Vec<Cluster> {
        let mut clusters = Vec::new();
        for id in self.graph.identifiers() {
            if visited.is_visited(id) {
                continue;
            }
            if let Some(cluster) = self.resolve_from(id, visited) {
                clusters.push(cluster);
            }
        }
        debug!(
            clusters = clusters.len(),
            identifiers = visited.len(),
            "cluster resolution complete"
        );
        clusters
    }

    /// Resolve the cluster seeded at one identifier
    ///
    /// Returns `None` when the closed frontier overlaps an already-emitted
    /// cluster. Because closure is complete, two seeds of the same true
    /// component always compute the same frontier, so any overlap means this
    /// attempt duplicates a cluster the first seed already owns.
    pub fn resolve_from(&self, seed: &str, visited: &mut VisitedSet) -> Option<Cluster> {
        let identifiers = self.close_over(seed);

        if identifiers.iter().any(|id| visited.is_visited(id)) {
            return None;
        }

        let mut collected = HashSet::new();
        let mut records = Vec::new();
        for id in &identifiers {
            if let Some(indices) = self.graph.records_for(id) {
                for &idx in indices {
                    if collected.insert(idx) {
                        records.push(Arc::clone(self.graph.record(idx)));
                    }
                }
            }
        }

        for id in &identifiers {
            visited.mark_visited(id.clone());
        }

        Some(Cluster {
            identifiers,
            records,
        })
    }

    /// Transitive closure over cross-reference edges from one seed
    ///
    /// Each step only adds identifiers and the identifier universe is
    /// finite, so the worklist always drains.
    fn close_over(&self, seed: &str) -> OrderedSet<String> {
        let mut frontier = OrderedSet::new();
        let mut pending = vec![seed.to_string()];
        frontier.insert(seed.to_string());

        while let Some(id) = pending.pop() {
            let Some(indices) = self.graph.records_for(&id) else {
                continue;
            };
            for &idx in indices {
                for referenced in self.graph.record(idx).referenced_ids() {
                    if frontier.insert(referenced.clone()) {
                        pending.push(referenced);
                    }
                }
            }
        }

        frontier
    }
}
