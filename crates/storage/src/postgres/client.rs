use crate::error::StorageError;
use crate::SourceStore;
use async_trait::async_trait;
use chrono::NaiveDate;
use orgmatch_core::error::Result;
use orgmatch_core::RawRecord;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};

/// One organisation row per `id`, outer-joined against the link table so the
/// directly linked identifiers arrive aggregated into an array. The join
/// produces `[NULL]` for organisations with no links; nulls are dropped in
/// the row conversion.
const LOAD_RECORDS_SQL: &str = r#"
SELECT o.id,
       o.name,
       o."alternateName",
       o."orgIDs",
       o."organisationType",
       o.source,
       o.active,
       o."postalCode",
       o."dateRegistered",
       o."latestIncome",
       array_agg(l.organisation_id_b) AS linked_orgs
FROM organisation o
    LEFT OUTER JOIN linked_organisations l
        ON o.id = l.organisation_id_a
GROUP BY o.id
"#;

/// Source store backed by Postgres
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to the store
    ///
    /// # Errors
    ///
    /// Returns a connection error if the store is unreachable; the pipeline
    /// treats this as fatal before any writes happen.
    pub async fn connect(db_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(db_url)
            .await
            .map_err(|e| StorageError::ConnectionFailed(format!("Postgres: {e}")))?;
        info!("Connected to source store");
        Ok(Self { pool })
    }
}

#[async_trait]
impl SourceStore for PostgresStore {
    async fn load_records(&self) -> Result<Vec<RawRecord>> {
        let rows: Vec<OrganisationRow> = sqlx::query_as(LOAD_RECORDS_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::QueryFailed(format!("Failed to load records: {e}")))?;

        debug!(rows = rows.len(), "loaded organisation rows");
        Ok(rows.into_iter().map(RawRecord::from).collect())
    }
}

/// Raw organisation row as stored
///
/// Descriptive fields are nullable in the source schema; the conversion into
/// [`RawRecord`] normalises them so downstream code never sees SQL nulls.
#[derive(Debug, sqlx::FromRow)]
struct OrganisationRow {
    id: String,
    name: Option<String>,
    #[sqlx(rename = "alternateName")]
    alternate_names: Option<Vec<String>>,
    #[sqlx(rename = "orgIDs")]
    org_ids: Option<Vec<String>>,
    #[sqlx(rename = "organisationType")]
    organisation_types: Option<Vec<String>>,
    source: Option<String>,
    active: Option<bool>,
    #[sqlx(rename = "postalCode")]
    postal_code: Option<String>,
    #[sqlx(rename = "dateRegistered")]
    date_registered: Option<NaiveDate>,
    #[sqlx(rename = "latestIncome")]
    latest_income: Option<f64>,
    linked_orgs: Option<Vec<Option<String>>>,
}

impl From<OrganisationRow> for RawRecord {
    fn from(row: OrganisationRow) -> Self {
        RawRecord {
            id: row.id,
            linked_orgs: row
                .linked_orgs
                .unwrap_or_default()
                .into_iter()
                .flatten()
                .collect(),
            org_ids: row.org_ids.unwrap_or_default(),
            name: row.name.unwrap_or_default(),
            alternate_names: row.alternate_names.unwrap_or_default(),
            organisation_types: row.organisation_types.unwrap_or_default(),
            source: row.source.unwrap_or_default(),
            active: row.active.unwrap_or(false),
            postal_code: row.postal_code,
            date_registered: row.date_registered,
            latest_income: row.latest_income,
        }
    }
}
