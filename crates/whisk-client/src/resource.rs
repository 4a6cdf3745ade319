//! Generic resource base shared by every platform entity (actions, triggers, rules, packages)

use crate::error::{ClientError, ClientResult};
use crate::http::{ApiRequest, Transport};
use crate::names::ResourceId;
use reqwest::Method;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Query pairs in the order they are sent
pub type QueryPairs = Vec<(String, String)>;

/// Read access a resource needs into a caller's options
pub trait ResourceOptions {
    /// Explicit namespace option, if any
    fn namespace(&self) -> Option<&str>;

    /// Value of the named identifier field (`name`, `actionName`, ...)
    fn identifier(&self, field: &str) -> Option<&str>;

    /// Query-string rendering of the named option, `None` when unset
    fn query_param(&self, key: &str) -> Option<String>;

    /// Body sent on invoke
    fn payload(&self) -> Option<JsonValue> {
        None
    }
}

/// Base operations; resource-specific accessors embed one and shape requests before delegating
#[derive(Clone)]
pub struct Resource {
    transport: Arc<dyn Transport>,
    resource: &'static str,
    identifiers: Vec<&'static str>,
    qs_options: HashMap<&'static str, Vec<&'static str>>,
    default_namespace: String,
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("resource", &self.resource)
            .field("identifiers", &self.identifiers)
            .field("qs_options", &self.qs_options)
            .field("default_namespace", &self.default_namespace)
            .finish()
    }
}

impl Resource {
    pub fn new(
        transport: Arc<dyn Transport>,
        resource: &'static str,
        default_namespace: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            resource,
            identifiers: vec!["name"],
            qs_options: HashMap::new(),
            default_namespace: default_namespace.into(),
        }
    }

    /// Register an additional identifier field, checked after the existing ones
    pub fn with_identifier(mut self, field: &'static str) -> Self {
        self.identifiers.push(field);
        self
    }

    /// Allowed query keys for a base operation (currently only `invoke` reads these)
    pub fn with_qs_options(mut self, operation: &'static str, keys: Vec<&'static str>) -> Self {
        self.qs_options.insert(operation, keys);
        self
    }

    pub fn name(&self) -> &'static str {
        self.resource
    }

    pub fn identifiers(&self) -> &[&'static str] {
        &self.identifiers
    }

    pub fn qs_options(&self, operation: &str) -> &[&'static str] {
        self.qs_options
            .get(operation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Query pairs for the `allowed` keys that are set in `options`
    pub fn qs<O: ResourceOptions + ?Sized>(&self, options: &O, allowed: &[&str]) -> QueryPairs {
        allowed
            .iter()
            .filter_map(|key| options.query_param(key).map(|v| (key.to_string(), v)))
            .collect()
    }

    /// Resolve the first present identifier field into a namespaced id
    pub fn parse_options<O: ResourceOptions + ?Sized>(&self, options: &O) -> ClientResult<ResourceId> {
        let id = self
            .identifiers
            .iter()
            .find_map(|field| options.identifier(field))
            .ok_or(ClientError::MissingIdentifier)?;

        ResourceId::resolve(id, options.namespace(), &self.default_namespace)
    }

    pub async fn list<O: ResourceOptions + ?Sized>(
        &self,
        options: &O,
        qs: QueryPairs,
    ) -> ClientResult<JsonValue> {
        let namespace = options
            .namespace()
            .filter(|ns| !ns.is_empty())
            .unwrap_or(&self.default_namespace)
            .trim_matches('/')
            .to_string();
        self.operation(Method::GET, &namespace, None, qs, None).await
    }

    pub async fn get<O: ResourceOptions + ?Sized>(
        &self,
        options: &O,
        qs: QueryPairs,
    ) -> ClientResult<JsonValue> {
        self.operation_with_id(Method::GET, options, qs, None).await
    }

    pub async fn create<O: ResourceOptions + ?Sized>(
        &self,
        options: &O,
        qs: QueryPairs,
        body: JsonValue,
    ) -> ClientResult<JsonValue> {
        self.operation_with_id(Method::PUT, options, qs, Some(body)).await
    }

    pub async fn delete<O: ResourceOptions + ?Sized>(&self, options: &O) -> ClientResult<JsonValue> {
        self.operation_with_id(Method::DELETE, options, Vec::new(), None).await
    }

    pub async fn invoke<O: ResourceOptions + ?Sized>(&self, options: &O) -> ClientResult<JsonValue> {
        let qs = self.qs(options, self.qs_options("invoke"));
        self.operation_with_id(Method::POST, options, qs, options.payload())
            .await
    }

    pub async fn operation_with_id<O: ResourceOptions + ?Sized>(
        &self,
        method: Method,
        options: &O,
        qs: QueryPairs,
        body: Option<JsonValue>,
    ) -> ClientResult<JsonValue> {
        let id = self.parse_options(options)?;
        let namespace = id.namespace.clone();
        self.operation(method, &namespace, Some(&id), qs, body).await
    }

    /// Send `namespaces/{namespace}/{resource}[/{id}]`
    pub async fn operation(
        &self,
        method: Method,
        namespace: &str,
        id: Option<&ResourceId>,
        qs: QueryPairs,
        body: Option<JsonValue>,
    ) -> ClientResult<JsonValue> {
        let mut path = vec![
            "namespaces".to_string(),
            namespace.to_string(),
            self.resource.to_string(),
        ];
        if let Some(id) = id {
            path.extend(id.segments().map(str::to_string));
        }

        debug!(
            resource = self.resource,
            %method,
            namespace,
            id = id.map(|i| i.name.as_str()).unwrap_or(""),
            "{} operation",
            self.resource
        );

        let request = ApiRequest::new(method, path).with_query(qs).with_body(body);
        self.transport.request(request).await
    }
}
