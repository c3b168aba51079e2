//! Elasticsearch-compatible search index client

mod client;
mod requests;

use crate::SearchIndex;
use orgmatch_core::error::Result;
use std::sync::Arc;

/// Build a search index client and return it behind the trait
pub fn create_search_index(index_url: &str, index_name: &str) -> Result<Arc<dyn SearchIndex>> {
    let index = client::ElasticIndex::new(index_url, index_name)?;
    Ok(Arc::new(index))
}
