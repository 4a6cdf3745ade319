//! reqwest-backed transport

use super::url_builder::UrlBuilder;
use super::{ApiRequest, Transport};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("whisk-client/", env!("CARGO_PKG_VERSION"));

/// Sends API requests over HTTPS with basic auth
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    api_url: String,
    user: String,
    password: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let (user, password) = config.credentials()?;

        let timeout = config.timeout();
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(timeout.connect_ms))
            .timeout(Duration::from_millis(timeout.total_ms))
            .danger_accept_invalid_certs(config.ignore_certs)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url()?,
            user,
            password,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn process_response(response: Response) -> ClientResult<JsonValue> {
        let status = response.status();
        let body_text = response.text().await?;
        let body: JsonValue = if body_text.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_str(&body_text).unwrap_or(JsonValue::String(body_text))
        };

        if status.is_success() {
            return Ok(body);
        }

        let message = body
            .get("error")
            .and_then(JsonValue::as_str)
            .map(str::to_string)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| "request failed".to_string());

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: ApiRequest) -> ClientResult<JsonValue> {
        let url = UrlBuilder::build(&self.api_url, &request.path, &request.query)?;
        debug!(method = %request.method, %url, "sending API request");

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .basic_auth(&self.user, Some(&self.password));

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let result = Self::process_response(response).await;

        if let Err(ClientError::Api { status, message }) = &result {
            warn!(
                method = %request.method,
                path = %request.path_string(),
                status,
                "API request failed: {}",
                message
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use reqwest::Method;
    use serde_json::json;

    fn transport_for(server: &MockServer) -> HttpTransport {
        let config = ClientConfig::new(server.base_url(), "user:secret");
        HttpTransport::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_sends_basic_auth_query_and_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/api/v1/namespaces/_/actions/hello")
                .query_param("overwrite", "true")
                // base64("user:secret")
                .header("authorization", "Basic dXNlcjpzZWNyZXQ=")
                .json_body(json!({"exec": {"kind": "nodejs:default", "code": "x"}}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"name": "hello"}));
        });

        let request = ApiRequest::new(
            Method::PUT,
            vec!["namespaces".into(), "_".into(), "actions".into(), "hello".into()],
        )
        .with_query(vec![("overwrite".into(), "true".into())])
        .with_body(Some(json!({"exec": {"kind": "nodejs:default", "code": "x"}})));

        let response = transport_for(&server).request(request).await.unwrap();
        mock.assert();
        assert_eq!(response, json!({"name": "hello"}));
    }

    #[tokio::test]
    async fn test_maps_error_status_with_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/namespaces/_/actions/missing");
            then.status(404)
                .header("Content-Type", "application/json")
                .json_body(json!({"error": "The requested resource does not exist.", "code": 7}));
        });

        let request = ApiRequest::new(
            Method::GET,
            vec!["namespaces".into(), "_".into(), "actions".into(), "missing".into()],
        );
        let err = transport_for(&server).request(request).await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "The requested resource does not exist.");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_without_body_uses_reason() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE);
            then.status(502);
        });

        let request = ApiRequest::new(Method::DELETE, vec!["namespaces".into()]);
        let err = transport_for(&server).request(request).await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[tokio::test]
    async fn test_empty_and_text_bodies() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/empty");
            then.status(204);
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/text");
            then.status(200).body("plain output");
        });

        let transport = transport_for(&server);
        let empty = transport
            .request(ApiRequest::new(Method::GET, vec!["empty".into()]))
            .await
            .unwrap();
        assert_eq!(empty, JsonValue::Null);

        let text = transport
            .request(ApiRequest::new(Method::GET, vec!["text".into()]))
            .await
            .unwrap();
        assert_eq!(text, json!("plain output"));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ClientConfig::new("whisk.example.com", "no-colon");
        assert!(matches!(HttpTransport::new(&config), Err(ClientError::Config(_))));
    }
}
