//! Pipeline configuration
//!
//! Connection settings come from CLI flags with environment-variable
//! fallbacks:
//!
//! - `ORGMATCH_DB_URL` - source store connection string (required)
//! - `ORGMATCH_INDEX_URL` - search index base URL (required)
//! - `ORGMATCH_INDEX` (default: "organisation") - index name
//! - `ORGMATCH_BATCH_SIZE` (default: 500) - documents per bulk request

use crate::error::{Error, Result};

/// Default number of documents per bulk request
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Default search index name
pub const DEFAULT_INDEX_NAME: &str = "organisation";

/// Connection and batching settings for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Source store connection string
    pub db_url: String,
    /// Search index base URL
    pub index_url: String,
    /// Search index name
    pub index_name: String,
    /// Documents per bulk request
    pub batch_size: usize,
}

/// CLI-provided values that take precedence over the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_url: Option<String>,
    pub index_url: Option<String>,
    pub index_name: Option<String>,
    pub batch_size: Option<usize>,
}

impl PipelineConfig {
    /// Resolve configuration from overrides and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a required connection target is missing or a
    /// value fails validation.
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        let db_url = overrides
            .db_url
            .or_else(|| std::env::var("ORGMATCH_DB_URL").ok())
            .ok_or_else(|| {
                Error::config("No store connection given (--db-url or ORGMATCH_DB_URL)")
            })?;

        let index_url = overrides
            .index_url
            .or_else(|| std::env::var("ORGMATCH_INDEX_URL").ok())
            .ok_or_else(|| {
                Error::config("No index connection given (--index-url or ORGMATCH_INDEX_URL)")
            })?;

        let index_name = overrides
            .index_name
            .or_else(|| std::env::var("ORGMATCH_INDEX").ok())
            .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string());

        let batch_size = match overrides.batch_size {
            Some(size) => size,
            None => std::env::var("ORGMATCH_BATCH_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_BATCH_SIZE),
        };

        let config = Self {
            db_url,
            index_url,
            index_name,
            batch_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate resolved settings
    pub fn validate(&self) -> Result<()> {
        if self.db_url.is_empty() {
            return Err(Error::config("Store connection string cannot be empty"));
        }
        if self.index_url.is_empty() {
            return Err(Error::config("Index URL cannot be empty"));
        }
        validate_index_name(&self.index_name)?;
        if self.batch_size == 0 {
            return Err(Error::config("Batch size must be at least 1"));
        }
        Ok(())
    }
}

/// Validate a search index name
///
/// Index names end up in request paths, so only lowercase alphanumerics,
/// underscores and hyphens are allowed.
fn validate_index_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::config("Index name cannot be empty"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        return Err(Error::config(format!(
            "Invalid index name '{name}': only lowercase alphanumeric, underscore, and hyphen allowed"
        )));
    }
    Ok(())
}
