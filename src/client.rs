//! High-level query client

use crate::config::ClientConfig;
use crate::entity::PartitionId;
use crate::error::Result;
use crate::http::HttpClient;
use crate::pagination::{PageFetcher, ResultIterator};
use crate::query::Query;
use crate::service::{DatastoreService, HttpDatastoreService, ReadOptions};
use std::sync::Arc;
use tracing::info;

/// Entry point for running queries against one partition
///
/// Cheap to clone. Each [`run`](Self::run) returns an independent
/// [`ResultIterator`]; nothing is sent until it is consumed.
#[derive(Debug, Clone)]
pub struct Dataset {
    fetcher: PageFetcher,
    request_limit: Option<u32>,
}

impl Dataset {
    /// Create a dataset over any service implementation
    pub fn new(service: Arc<dyn DatastoreService>, partition: PartitionId) -> Self {
        Self {
            fetcher: PageFetcher::new(service, partition),
            request_limit: None,
        }
    }

    /// Create a dataset talking REST to the configured endpoint
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = HttpClient::with_auth(config.to_http_client_config(), config.auth.clone())?;
        let service = HttpDatastoreService::new(client, &config.endpoint)?;

        let mut partition = PartitionId::new(&config.project_id);
        if let Some(namespace) = &config.namespace {
            partition = partition.with_namespace(namespace);
        }

        info!(
            "Dataset for project {} at {} (auth: {})",
            config.project_id,
            service.endpoint(),
            config.auth.kind()
        );

        let mut dataset =
            Self::new(Arc::new(service), partition).with_read_options(config.read_options());
        dataset.request_limit = config.request_limit;
        Ok(dataset)
    }

    /// Set read options sent with every query
    #[must_use]
    pub fn with_read_options(mut self, read_options: Option<ReadOptions>) -> Self {
        self.fetcher = self.fetcher.with_read_options(read_options);
        self
    }

    /// Cap page fetches for every iterator this dataset hands out
    #[must_use]
    pub fn with_request_limit(mut self, limit: u32) -> Self {
        self.request_limit = Some(limit);
        self
    }

    /// Project queries run in
    pub fn project_id(&self) -> &str {
        &self.fetcher.partition().project_id
    }

    /// Namespace queries run in
    pub fn namespace(&self) -> Option<&str> {
        self.fetcher.partition().namespace_id.as_deref()
    }

    /// Start a query over a kind
    pub fn query(&self, kind: impl Into<String>) -> Query {
        Query::new().kind(kind)
    }

    /// Run a query lazily
    pub fn run(&self, query: Query) -> ResultIterator {
        let iter = ResultIterator::new(self.fetcher.clone(), query);
        match self.request_limit {
            Some(limit) => iter.with_request_limit(limit),
            None => iter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::IterState;
    use crate::service::{ReadConsistency, RunQueryRequest, RunQueryResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingService {
        requests: Mutex<Vec<RunQueryRequest>>,
    }

    #[async_trait]
    impl DatastoreService for RecordingService {
        async fn run_query(&self, request: &RunQueryRequest) -> Result<RunQueryResponse> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(RunQueryResponse::default())
        }
    }

    #[test]
    fn test_query_builder() {
        let service: Arc<dyn DatastoreService> = Arc::new(RecordingService::default());
        let dataset = Dataset::new(service, PartitionId::new("my-todo-project"));

        assert_eq!(dataset.project_id(), "my-todo-project");
        assert_eq!(dataset.namespace(), None);
        assert_eq!(dataset.query("Task"), Query::new().kind("Task"));
    }

    #[tokio::test]
    async fn test_run_is_lazy() {
        let service = Arc::new(RecordingService::default());
        let dataset = Dataset::new(service.clone(), PartitionId::new("p"));

        let iter = dataset.run(dataset.query("Task"));
        assert_eq!(iter.state(), IterState::Init);
        assert_eq!(iter.request_limit(), None);
        assert!(service.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_sends_partition_and_read_options() {
        let service = Arc::new(RecordingService::default());
        let dataset = Dataset::new(service.clone(), PartitionId::new("p").with_namespace("ns"))
            .with_read_options(Some(ReadOptions {
                read_consistency: Some(ReadConsistency::Strong),
            }));

        let delivered = dataset
            .run(dataset.query("Task"))
            .all(None, |_| {})
            .await
            .unwrap();
        assert_eq!(delivered, 0);

        let requests = service.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].partition_id.namespace_id.as_deref(), Some("ns"));
        assert_eq!(
            requests[0].read_options.and_then(|o| o.read_consistency),
            Some(ReadConsistency::Strong)
        );
    }

    #[test]
    fn test_default_request_limit_applies_to_each_run() {
        let service: Arc<dyn DatastoreService> = Arc::new(RecordingService::default());
        let dataset = Dataset::new(service, PartitionId::new("p")).with_request_limit(3);

        assert_eq!(dataset.run(dataset.query("A")).request_limit(), Some(3));
        assert_eq!(dataset.run(dataset.query("B")).request_limit(), Some(3));
    }

    #[test]
    fn test_from_config() {
        let mut config = ClientConfig::new("my-todo-project");
        config.namespace = Some("todo".to_string());
        config.endpoint = "http://localhost:8081".to_string();
        config.request_limit = Some(2);

        let dataset = Dataset::from_config(&config).unwrap();
        assert_eq!(dataset.project_id(), "my-todo-project");
        assert_eq!(dataset.namespace(), Some("todo"));
        assert_eq!(dataset.run(dataset.query("Task")).request_limit(), Some(2));
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        assert!(Dataset::from_config(&ClientConfig::default()).is_err());

        let mut config = ClientConfig::new("p");
        config.endpoint = "gopher://old.example.com".to_string();
        assert!(Dataset::from_config(&config).is_err());
    }
}
