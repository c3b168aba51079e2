//! Identity graph index
//!
//! Maps every identifier seen anywhere in the source data (a record's own id,
//! a linked identifier, or a registry alternate) to the records that mention
//! it. This is the adjacency structure the cluster resolver walks. Built once
//! per run; read-only afterwards.

use orgmatch_core::RawRecord;
use std::collections::HashMap;
use std::sync::Arc;

/// Identifier → records adjacency index
///
/// Records are stored once and referenced by index, so a record claimed by
/// several identifiers is never duplicated. Identifier iteration order is
/// first-appearance order, which makes cluster emission deterministic.
#[derive(Debug, Default)]
pub struct IdentityGraph {
    records: Vec<Arc<RawRecord>>,
    by_id: HashMap<String, Vec<usize>>,
    ids: Vec<String>,
}

impl IdentityGraph {
    /// Build the index from loaded records
    ///
    /// Cost is linear in total (record × reference) pairs. Duplicate
    /// identifiers are valid: they mean multiple records share a claim on
    /// that identifier. A record that references no identifiers at all (a
    /// degenerate row with an empty id and no links) indexes nothing and is
    /// dropped.
    pub fn build(records: Vec<RawRecord>) -> Self {
        let mut graph = Self::default();
        for record in records {
            let referenced = record.referenced_ids();
            if referenced.is_empty() {
                continue;
            }
            let idx = graph.records.len();
            graph.records.push(Arc::new(record));
            for id in referenced {
                match graph.by_id.entry(id.clone()) {
                    std::collections::hash_map::Entry::Vacant(entry) => {
                        entry.insert(vec![idx]);
                        graph.ids.push(id);
                    }
                    std::collections::hash_map::Entry::Occupied(mut entry) => {
                        entry.get_mut().push(idx);
                    }
                }
            }
        }
        graph
    }

    /// All identifiers, in first-appearance order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Indices of the records that mention `id`
    pub fn records_for(&self, id: &str) -> Option<&[usize]> {
        self.by_id.get(id).map(Vec::as_slice)
    }

    /// Record by arena index
    pub fn record(&self, idx: usize) -> &Arc<RawRecord> {
        &self.records[idx]
    }

    /// Number of distinct identifiers
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of indexed records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}
