//! Identity resolution for organisation records
//!
//! Different registries describe the same real-world organisation under
//! different identifiers, with no single authoritative key. This crate turns
//! a flat set of raw registry records into merged organisation documents:
//!
//! 1. index every identifier any record mentions ([`IdentityGraph`]);
//! 2. walk cross-reference edges to a fixed point, partitioning the
//!    identifier space into clusters ([`ClusterResolver`]);
//! 3. pick each cluster's canonical identifier and name, and union the
//!    remaining descriptive fields ([`canonical`]);
//! 4. shape the result into the index document schema ([`build_document`]).
//!
//! Everything here is pure, synchronous logic over in-memory data; loading
//! records and publishing documents live in `orgmatch-storage`.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod canonical;
pub mod cluster;
pub mod document;
pub mod identity_graph;
pub mod visited;

pub use cluster::{Cluster, ClusterResolver};
pub use document::build_document;
pub use identity_graph::IdentityGraph;
pub use visited::VisitedSet;

// Re-export error types from core
pub use orgmatch_core::error::{Error, Result};
