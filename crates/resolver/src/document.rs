//! Merged document assembly
//!
//! Shapes one resolved cluster into the index document schema. Pure function
//! of the cluster and the run's generation stamp; no transformation logic
//! beyond picking the canonical fields and attaching the stamp.

use crate::canonical::{
    aggregate_fields, autocomplete_weight, complete_name_suffixes, rank_identifiers,
};
use crate::cluster::Cluster;
use chrono::{DateTime, Utc};
use orgmatch_core::error::{Error, Result};
use orgmatch_core::{CompleteNames, MergedOrganisation};

/// Build the published document for one cluster
///
/// `stamp` is the generation stamp shared by every document in the run; its
/// date is also what identifier ages are measured against, so selection is
/// deterministic within the run.
///
/// # Errors
///
/// Returns an error for a cluster with no records or no scorable
/// identifiers; the graph never produces either, so hitting this means the
/// cluster came from somewhere else.
pub fn build_document(cluster: &Cluster, stamp: DateTime<Utc>) -> Result<MergedOrganisation> {
    if cluster.records.is_empty() {
        return Err(Error::invalid_record("cluster has no records"));
    }

    let ranked = rank_identifiers(&cluster.records, stamp.date_naive());
    let org_id = ranked
        .org_ids
        .first()
        .cloned()
        .ok_or_else(|| Error::invalid_record("cluster has no scorable identifiers"))?;
    // Name and id are deduplicated independently; a cluster of nameless rows
    // still publishes under its canonical identifier
    let name = ranked
        .names
        .first()
        .cloned()
        .unwrap_or_else(|| org_id.clone());

    let fields = aggregate_fields(&cluster.records);
    let input = complete_name_suffixes(&fields.alternate_names);
    let weight = autocomplete_weight(&cluster.records);

    Ok(MergedOrganisation {
        org_id,
        name,
        org_ids: ranked.org_ids,
        alternate_names: fields.alternate_names,
        complete_names: CompleteNames { input, weight },
        organisation_types: fields.organisation_types,
        sources: fields.sources,
        active: fields.active,
        postal_codes: fields.postal_codes,
        last_updated: stamp,
    })
}
