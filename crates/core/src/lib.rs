//! Core types for the orgmatch identity-resolution system
//!
//! This crate provides the foundational pieces shared by the rest of the
//! workspace:
//!
//! - **Records**: raw registry records and the merged organisation document
//!   published to the search index
//! - **Schemes**: scheme-qualified identifier parsing and the canonical
//!   priority table
//! - **Ordered sets**: insertion-ordered, first-seen-wins deduplication
//! - **Configuration**: pipeline connection settings
//! - **Error handling**: unified error types
//!

pub mod config;
pub mod error;
pub mod ordered_set;
pub mod records;
pub mod scheme;

// Re-export main types for convenience
pub use config::PipelineConfig;
pub use error::{Error, Result, ResultExt};
pub use ordered_set::OrderedSet;
pub use records::{CompleteNames, MergedOrganisation, RawRecord};
pub use scheme::{scheme_of, scheme_priority};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Result, ResultExt};
    pub use crate::ordered_set::OrderedSet;
    pub use crate::records::{MergedOrganisation, RawRecord};
}
