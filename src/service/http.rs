//! Datastore v1 REST implementation of [`DatastoreService`]

use super::types::{RunQueryRequest, RunQueryResponse};
use super::DatastoreService;
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClient, RequestConfig};
use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;
use url::Url;

/// Default public endpoint
pub const DEFAULT_ENDPOINT: &str = "https://datastore.googleapis.com";

/// Runs queries through `POST {endpoint}/v1/projects/{project_id}:runQuery`
#[derive(Debug)]
pub struct HttpDatastoreService {
    client: HttpClient,
    endpoint: Url,
}

impl HttpDatastoreService {
    /// Create a service for the given endpoint
    pub fn new(client: HttpClient, endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "endpoint",
                format!("unsupported scheme '{}'", endpoint.scheme()),
            ));
        }
        Ok(Self { client, endpoint })
    }

    /// Endpoint the service talks to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn run_query_url(&self, project_id: &str) -> String {
        format!(
            "{}/v1/projects/{}:runQuery",
            self.endpoint.as_str().trim_end_matches('/'),
            project_id
        )
    }
}

#[async_trait]
impl DatastoreService for HttpDatastoreService {
    async fn run_query(&self, request: &RunQueryRequest) -> Result<RunQueryResponse> {
        let url = self.run_query_url(request.project_id());
        debug!("runQuery {}", url);

        let config = RequestConfig::new()
            .header(
                "x-goog-request-params",
                format!("project_id={}", request.project_id()),
            )
            .json(
                serde_json::to_value(request).with_context(|| {
                    format!("Failed to encode runQuery for {}", request.project_id())
                })?,
            );

        self.client.request_json(Method::POST, &url, config).await
    }
}
