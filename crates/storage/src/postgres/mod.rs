//! Postgres-backed source store

mod client;

use crate::SourceStore;
use orgmatch_core::error::Result;
use std::sync::Arc;

/// Connect to the source store and return it behind the trait
pub async fn create_source_store(db_url: &str) -> Result<Arc<dyn SourceStore>> {
    let store = client::PostgresStore::connect(db_url).await?;
    Ok(Arc::new(store))
}
