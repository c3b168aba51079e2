//! Raw registry records and the merged organisation document
//!
//! A [`RawRecord`] is one row from the source store: a single registry's view
//! of an organisation, plus the identifiers the source data explicitly links
//! it to. Records are immutable once loaded; resolution only reads and groups
//! them.
//!
//! A [`MergedOrganisation`] is the published, de-duplicated representation of
//! one resolved cluster, shaped exactly as the search index expects it.

use crate::ordered_set::OrderedSet;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One organisation row from a single registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Scheme-qualified identifier, e.g. `GB-CHC-1234567`
    pub id: String,
    /// Identifiers explicitly linked by the source data. SQL nulls produced
    /// by the outer-join aggregation are dropped at load time.
    pub linked_orgs: Vec<String>,
    /// Alternate identifiers the same registry considers equivalent to `id`
    pub org_ids: Vec<String>,
    pub name: String,
    pub alternate_names: Vec<String>,
    pub organisation_types: Vec<String>,
    /// Name of the registry the record came from
    pub source: String,
    pub active: bool,
    pub postal_code: Option<String>,
    pub date_registered: Option<NaiveDate>,
    pub latest_income: Option<f64>,
}

impl RawRecord {
    /// Every identifier this record lays a claim to: its own id, its linked
    /// identifiers and its alternate identifiers, empty entries discarded,
    /// insertion-ordered and deduplicated.
    pub fn referenced_ids(&self) -> OrderedSet<String> {
        std::iter::once(&self.id)
            .chain(self.linked_orgs.iter())
            .chain(self.org_ids.iter())
            .filter(|id| !id.is_empty())
            .cloned()
            .collect()
    }
}

/// Autocomplete sub-structure of the merged document
///
/// `input` holds every whitespace-token suffix of every alternate name, so a
/// lookup on a partial trailing phrase ("Royal Trust") still matches. `weight`
/// ranks larger organisations higher, with a floor of 1 so no organisation is
/// unsearchable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteNames {
    pub input: Vec<String>,
    pub weight: u32,
}

/// The published, de-duplicated representation of one organisation
///
/// Field names follow the index schema the downstream search and
/// reconciliation consumers filter on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedOrganisation {
    /// Canonical identifier; also the index document key
    #[serde(rename = "orgID")]
    pub org_id: String,
    pub name: String,
    /// Every identifier in the cluster, canonical first
    #[serde(rename = "orgIDs")]
    pub org_ids: Vec<String>,
    #[serde(rename = "alternateName")]
    pub alternate_names: Vec<String>,
    pub complete_names: CompleteNames,
    #[serde(rename = "organisationType")]
    pub organisation_types: Vec<String>,
    pub sources: Vec<String>,
    pub active: bool,
    #[serde(rename = "postalCode")]
    pub postal_codes: Vec<String>,
    /// Generation stamp shared by every document in a run, not a real
    /// modification time
    pub last_updated: DateTime<Utc>,
}
