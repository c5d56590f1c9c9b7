//! Single-page fetches

use crate::entity::PartitionId;
use crate::error::Result;
use crate::query::Query;
use crate::service::{
    DatastoreService, EntityResult, QueryResultBatch, ReadOptions, RunQueryRequest,
};
use crate::types::{Cursor, MoreResults};
use std::fmt;
use std::sync::Arc;

/// One page of query results
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    /// Results with their per-result cursors
    pub results: Vec<EntityResult>,
    /// Cursor to resume after this page
    pub end_cursor: Option<Cursor>,
    /// Continuation indicator
    pub more_results: MoreResults,
    /// Results skipped because of the query offset
    pub skipped_results: u32,
}

impl Page {
    /// Number of results in the page
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if the page carries no results
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl From<QueryResultBatch> for Page {
    fn from(batch: QueryResultBatch) -> Self {
        Self {
            results: batch.entity_results,
            end_cursor: batch.end_cursor,
            more_results: batch.more_results,
            skipped_results: batch.skipped_results,
        }
    }
}

/// Fetches one page per call from a [`DatastoreService`]
///
/// Cheap to clone; clones share the underlying service.
#[derive(Clone)]
pub struct PageFetcher {
    service: Arc<dyn DatastoreService>,
    partition: PartitionId,
    read_options: Option<ReadOptions>,
}

impl PageFetcher {
    /// Create a fetcher for a partition
    pub fn new(service: Arc<dyn DatastoreService>, partition: PartitionId) -> Self {
        Self {
            service,
            partition,
            read_options: None,
        }
    }

    /// Set read options sent with every request
    #[must_use]
    pub fn with_read_options(mut self, read_options: Option<ReadOptions>) -> Self {
        self.read_options = read_options;
        self
    }

    /// Partition queries run in
    pub fn partition(&self) -> &PartitionId {
        &self.partition
    }

    /// Build the request for `query`, resumed at `cursor` when given
    ///
    /// Pure: the same query and cursor always produce the same request.
    pub fn request_for(&self, query: &Query, cursor: Option<&Cursor>) -> RunQueryRequest {
        let query = match cursor {
            Some(cursor) => query.continue_from(cursor),
            None => query.clone(),
        };
        RunQueryRequest::new(self.partition.clone(), query).with_read_options(self.read_options)
    }

    /// Fetch one page
    ///
    /// Performs exactly one remote call. Service errors are returned as-is.
    pub async fn fetch(&self, query: &Query, cursor: Option<&Cursor>) -> Result<Page> {
        let request = self.request_for(query, cursor);
        let response = self.service.run_query(&request).await?;
        Ok(Page::from(response.batch))
    }
}

impl fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageFetcher")
            .field("partition", &self.partition)
            .field("read_options", &self.read_options)
            .finish_non_exhaustive()
    }
}
