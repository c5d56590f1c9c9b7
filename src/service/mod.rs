//! Query service module
//!
//! The transport seam between the pagination engine and the remote
//! datastore.
//!
//! # Overview
//!
//! - `DatastoreService` - one async `run_query` call per page
//! - `HttpDatastoreService` - Datastore v1 REST implementation over
//!   [`crate::http::HttpClient`]
//! - Wire types for the `runQuery` request and response

mod http;
mod types;

pub use http::{HttpDatastoreService, DEFAULT_ENDPOINT};
pub use types::{
    EntityResult, QueryResultBatch, ReadConsistency, ReadOptions, RunQueryRequest,
    RunQueryResponse,
};

use crate::error::Result;
use async_trait::async_trait;

/// Executes a single query batch against the remote service
///
/// Implementations perform exactly one remote call per invocation and
/// surface transport failures as-is.
#[async_trait]
pub trait DatastoreService: Send + Sync {
    /// Run one query batch
    async fn run_query(&self, request: &RunQueryRequest) -> Result<RunQueryResponse>;
}

#[cfg(test)]
mod tests;
