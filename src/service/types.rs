//! `runQuery` wire types

use crate::entity::{Entity, PartitionId};
use crate::query::Query;
use crate::types::{Cursor, MoreResults};
use serde::{Deserialize, Serialize};

/// Read consistency for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadConsistency {
    /// Strongly consistent read
    Strong,
    /// Eventually consistent read
    Eventual,
}

/// Options applied to the read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadOptions {
    /// Read consistency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_consistency: Option<ReadConsistency>,
}

/// Request body of `projects/{project_id}:runQuery`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryRequest {
    /// Partition (project and namespace) to query
    pub partition_id: PartitionId,
    /// Read options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_options: Option<ReadOptions>,
    /// The query, start cursor included
    pub query: Query,
}

impl RunQueryRequest {
    /// Create a request
    pub fn new(partition_id: PartitionId, query: Query) -> Self {
        Self {
            partition_id,
            read_options: None,
            query,
        }
    }

    /// Set read options
    #[must_use]
    pub fn with_read_options(mut self, read_options: Option<ReadOptions>) -> Self {
        self.read_options = read_options;
        self
    }

    /// Project the request targets
    pub fn project_id(&self) -> &str {
        &self.partition_id.project_id
    }
}

/// An entity paired with the cursor pointing just after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityResult {
    /// The entity
    pub entity: Entity,
    /// Cursor positioned after this entity
    pub cursor: Cursor,
}

/// One batch of query results
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResultBatch {
    /// Results in service order
    #[serde(default)]
    pub entity_results: Vec<EntityResult>,
    /// Cursor to resume after the last result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<Cursor>,
    /// Continuation indicator
    #[serde(default)]
    pub more_results: MoreResults,
    /// Results skipped because of the query offset
    #[serde(default)]
    pub skipped_results: u32,
    /// Cursor after the last skipped result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped_cursor: Option<Cursor>,
}

/// Response body of `runQuery`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryResponse {
    /// The result batch
    #[serde(default)]
    pub batch: QueryResultBatch,
}

impl From<QueryResultBatch> for RunQueryResponse {
    fn from(batch: QueryResultBatch) -> Self {
        Self { batch }
    }
}
