pub mod transport;
pub mod url_builder;

use crate::error::ClientResult;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value as JsonValue;

pub use transport::HttpTransport;
pub use url_builder::UrlBuilder;

/// A single call against the platform API, relative to the API root
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Unencoded path segments, e.g. `["namespaces", "_", "actions", "hello"]`
    pub path: Vec<String>,
    /// Query pairs in insertion order
    pub query: Vec<(String, String)>,
    pub body: Option<JsonValue>,
}

impl ApiRequest {
    pub fn new(method: Method, path: Vec<String>) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Option<JsonValue>) -> Self {
        self.body = body;
        self
    }

    /// `/`-joined path, for logging
    pub fn path_string(&self) -> String {
        self.path.join("/")
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Executes API requests and returns the decoded response body.
///
/// Resources hold an `Arc<dyn Transport>`, so tests can swap in a fake.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: ApiRequest) -> ClientResult<JsonValue>;
}
