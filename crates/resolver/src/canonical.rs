//! Canonical identifier selection and field aggregation
//!
//! Every identifier a cluster's records expose is ranked by scheme priority
//! first and recency second, descending. The canonical `orgID` is the first
//! unique identifier in that order and the canonical `name` is the first
//! unique non-empty name, chosen independently. The remaining descriptive
//! fields are plain first-seen-ordered unions over the cluster's records.
//!
//! The recency bonus `1 / age_in_days` applies only to occurrences whose
//! originating record is active and has a registration date. It breaks ties
//! between equally-prioritized schemes in favour of freshly registered,
//! currently-active records. Priorities and bonuses are compared
//! lexicographically, so no bonus can lift an identifier past a
//! higher-priority scheme.

use orgmatch_core::{scheme_of, scheme_priority, OrderedSet, RawRecord};
use chrono::NaiveDate;
use std::sync::Arc;

/// One scored identifier occurrence
///
/// The same identifier may occur several times (once per record exposing
/// it); each occurrence inherits the originating record's registration date,
/// active flag and name.
#[derive(Debug, Clone)]
struct Occurrence {
    id: String,
    priority: u32,
    bonus: f64,
    name: String,
}

/// Identifier and name lists in canonical order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedIdentifiers {
    /// Every identifier in the cluster, canonical first, deduplicated
    pub org_ids: Vec<String>,
    /// Every non-empty member name, canonical first, deduplicated
    pub names: Vec<String>,
}

/// Field unions over a cluster's records
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedFields {
    pub alternate_names: Vec<String>,
    pub organisation_types: Vec<String>,
    pub sources: Vec<String>,
    pub postal_codes: Vec<String>,
    pub active: bool,
}

/// Score and order every identifier occurrence in the cluster
///
/// `as_of` is the date ages are measured against; passing the run stamp's
/// date keeps the selection deterministic within a run. Occurrences with an
/// empty identifier (partial rows from the outer join) are skipped rather
/// than scored.
pub fn rank_identifiers(records: &[Arc<RawRecord>], as_of: NaiveDate) -> RankedIdentifiers {
    let mut occurrences = Vec::new();
    for record in records {
        let bonus = recency_bonus(record, as_of);
        for id in record.referenced_ids() {
            let priority = scheme_priority(scheme_of(&id));
            occurrences.push(Occurrence {
                id,
                priority,
                bonus,
                name: record.name.clone(),
            });
        }
    }

    // Priority dominates; the bonus only breaks ties within a scheme.
    // Stable sort: fully equal occurrences keep first-seen order.
    occurrences.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.bonus.total_cmp(&a.bonus))
    });

    let mut org_ids = OrderedSet::new();
    let mut names = OrderedSet::new();
    for occurrence in occurrences {
        org_ids.insert(occurrence.id);
        if !occurrence.name.is_empty() {
            names.insert(occurrence.name);
        }
    }

    RankedIdentifiers {
        org_ids: org_ids.into_vec(),
        names: names.into_vec(),
    }
}

fn recency_bonus(record: &RawRecord, as_of: NaiveDate) -> f64 {
    match (record.active, record.date_registered) {
        (true, Some(registered)) => {
            // Same-day and future dates clamp to an age of one day
            let age_days = (as_of - registered).num_days().max(1);
            1.0 / age_days as f64
        }
        _ => 0.0,
    }
}

/// Union the descriptive fields across a cluster's records
///
/// All unions are first-seen-ordered and deduplicated; `active` is a logical
/// OR. `alternateName` unions each record's own name with its alternate
/// names, dropping empties.
pub fn aggregate_fields(records: &[Arc<RawRecord>]) -> AggregatedFields {
    let mut alternate_names = OrderedSet::new();
    let mut organisation_types = OrderedSet::new();
    let mut sources = OrderedSet::new();
    let mut postal_codes = OrderedSet::new();
    let mut active = false;

    for record in records {
        alternate_names.extend(
            std::iter::once(&record.name)
                .chain(record.alternate_names.iter())
                .filter(|name| !name.is_empty())
                .cloned(),
        );
        organisation_types.extend(record.organisation_types.iter().cloned());
        sources.insert(record.source.clone());
        if let Some(postcode) = &record.postal_code {
            postal_codes.insert(postcode.clone());
        }
        active = active || record.active;
    }

    AggregatedFields {
        alternate_names: alternate_names.into_vec(),
        organisation_types: organisation_types.into_vec(),
        sources: sources.into_vec(),
        postal_codes: postal_codes.into_vec(),
        active,
    }
}

/// Every whitespace-token suffix of every name, deduplicated
///
/// "The Royal Trust" yields "The Royal Trust", "Royal Trust" and "Trust", so
/// autocomplete matches on partial trailing words.
pub fn complete_name_suffixes(names: &[String]) -> Vec<String> {
    let mut suffixes = OrderedSet::new();
    for name in names {
        let words: Vec<&str> = name.split_whitespace().collect();
        for start in 0..words.len() {
            suffixes.insert(words[start..].join(" "));
        }
    }
    suffixes.into_vec()
}

/// Autocomplete ranking weight from the largest income in the cluster
///
/// `max(1, ceil(log(1 + income)))` over the maximum `latest_income` of any
/// member record, so larger organisations rank higher and the floor of 1
/// keeps every organisation searchable.
pub fn autocomplete_weight(records: &[Arc<RawRecord>]) -> u32 {
    let income = records
        .iter()
        .filter_map(|record| record.latest_income)
        .fold(0.0_f64, f64::max);
    (income.ln_1p().ceil() as u32).max(1)
}
