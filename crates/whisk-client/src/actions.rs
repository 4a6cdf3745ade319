//! Actions resource: request shaping for list/get/invoke/create and action body construction

use crate::error::{ClientError, ClientResult, ValidationError};
use crate::http::Transport;
use crate::resource::{Resource, ResourceOptions};
use base64::{engine::general_purpose, Engine as _};
use indexmap::IndexMap;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_KIND: &str = "nodejs:default";
pub const SEQUENCE_KIND: &str = "sequence";

const LIST_QS: &[&str] = &["skip", "limit", "count"];
const GET_QS: &[&str] = &["code"];
const CREATE_QS: &[&str] = &["overwrite"];

/// What the caller passed as `action`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionSource {
    /// Source code, sent as-is
    Code(String),
    /// Binary artifact (e.g. a zip), sent base64 encoded
    Binary(Vec<u8>),
    /// Complete action document, sent verbatim
    Definition(Map<String, JsonValue>),
}

impl From<&str> for ActionSource {
    fn from(code: &str) -> Self {
        ActionSource::Code(code.to_string())
    }
}

impl From<String> for ActionSource {
    fn from(code: String) -> Self {
        ActionSource::Code(code)
    }
}

impl From<Vec<u8>> for ActionSource {
    fn from(bytes: Vec<u8>) -> Self {
        ActionSource::Binary(bytes)
    }
}

/// Resource limits attached to an action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionLimits {
    /// Milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Megabytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    /// Megabytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<u64>,
    /// Limits this client has no field for, forwarded as given
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Options accepted by every `Actions` operation; each operation reads the subset it needs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,

    // list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<bool>,

    // get
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<bool>,

    // create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,

    // invoke
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<bool>,

    // body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(
        default,
        deserialize_with = "non_null_source",
        skip_serializing_if = "Option::is_none"
    )]
    pub action: Option<ActionSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<Map<String, JsonValue>>,
    /// Kept untyped so a non-array value (`null` included) can be reported instead of
    /// failing deserialization
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub sequence: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<IndexMap<String, JsonValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<ActionLimits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<IndexMap<String, JsonValue>>,
}

/// A key that is present counts as set, even when its value is `null`
fn present_value<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}

fn non_null_source<'de, D>(deserializer: D) -> Result<Option<ActionSource>, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::Null => Err(D::Error::custom("\"action\" cannot be null")),
        value => ActionSource::deserialize(value).map(Some).map_err(D::Error::custom),
    }
}

impl ActionOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<ActionSource>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_sequence<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let components = components
            .into_iter()
            .map(|c| JsonValue::String(c.into()))
            .collect();
        self.sequence = Some(JsonValue::Array(components));
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.params
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value);
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.annotations
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value);
        self
    }

    pub fn blocking(mut self, blocking: bool) -> Self {
        self.blocking = Some(blocking);
        self
    }

    /// Ask a blocking invoke to return only the action's output
    pub fn result_only(mut self, result: bool) -> Self {
        self.result = Some(result);
        self
    }
}

impl ResourceOptions for ActionOptions {
    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn identifier(&self, field: &str) -> Option<&str> {
        match field {
            "name" => self.name.as_deref(),
            "actionName" => self.action_name.as_deref(),
            _ => None,
        }
    }

    fn query_param(&self, key: &str) -> Option<String> {
        match key {
            "skip" => self.skip.map(|v| v.to_string()),
            "limit" => self.limit.map(|v| v.to_string()),
            "count" => self.count.map(|v| v.to_string()),
            "code" => self.code.map(|v| v.to_string()),
            "overwrite" => self.overwrite.map(|v| v.to_string()),
            "blocking" => self.blocking.map(|v| v.to_string()),
            _ => None,
        }
    }

    fn payload(&self) -> Option<JsonValue> {
        let params = self
            .params
            .as_ref()
            .map(|p| p.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        Some(JsonValue::Object(params))
    }
}

/// Parameter or annotation entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: JsonValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceExec {
    pub kind: String,
    pub components: Vec<JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionExec {
    /// `kind` and `code` plus any caller-supplied exec fields
    Code(Map<String, JsonValue>),
    Sequence(SequenceExec),
}

/// Action document assembled from options
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionDefinition {
    pub exec: ActionExec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<KeyValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<ActionLimits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<KeyValue>>,
}

impl ActionDefinition {
    fn with_exec(exec: ActionExec) -> Self {
        Self {
            exec,
            parameters: None,
            version: None,
            limits: None,
            annotations: None,
        }
    }
}

/// Request body for create/update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionBody {
    Built(ActionDefinition),
    /// Caller-supplied document, not validated or enriched
    Override(Map<String, JsonValue>),
}

impl ActionBody {
    pub fn to_json(&self) -> ClientResult<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Which body shape the options ask for
enum BodyShape<'a> {
    Override(&'a Map<String, JsonValue>),
    Code,
    Sequence,
}

impl<'a> BodyShape<'a> {
    fn of(options: &'a ActionOptions) -> Result<Self, ValidationError> {
        match (&options.action, &options.sequence) {
            (None, None) => Err(ValidationError::MissingActionBody),
            (Some(_), Some(_)) => Err(ValidationError::ConflictingActionBody),
            (Some(ActionSource::Definition(doc)), None) => Ok(BodyShape::Override(doc)),
            (Some(_), None) => Ok(BodyShape::Code),
            (None, Some(_)) => Ok(BodyShape::Sequence),
        }
    }
}

fn key_values(map: &IndexMap<String, JsonValue>) -> Vec<KeyValue> {
    map.iter()
        .map(|(key, value)| KeyValue {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}

/// Accessor for `namespaces/{ns}/actions`
#[derive(Debug, Clone)]
pub struct Actions {
    resource: Resource,
}

impl Actions {
    pub fn new(transport: Arc<dyn Transport>, default_namespace: impl Into<String>) -> Self {
        let resource = Resource::new(transport, "actions", default_namespace)
            .with_identifier("actionName")
            .with_qs_options("invoke", vec!["blocking"]);
        Self { resource }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub async fn list(&self, options: &ActionOptions) -> ClientResult<JsonValue> {
        let qs = self.resource.qs(options, LIST_QS);
        self.resource.list(options, qs).await
    }

    pub async fn get(&self, options: &ActionOptions) -> ClientResult<JsonValue> {
        let qs = self.resource.qs(options, GET_QS);
        self.resource.get(options, qs).await
    }

    /// Invoke an action.
    ///
    /// Returns the activation id for non-blocking calls and the activation record for
    /// blocking ones; with both `blocking` and `result` set, only `response.result`
    /// (`null` when the activation response carries no result).
    pub async fn invoke(&self, options: &ActionOptions) -> ClientResult<JsonValue> {
        let response = self.resource.invoke(options).await?;

        if options.blocking == Some(true) && options.result == Some(true) {
            let activation = response.get("response").ok_or_else(|| {
                ClientError::UnexpectedResponse(
                    "blocking invocation response has no response field".to_string(),
                )
            })?;
            return Ok(activation.get("result").cloned().unwrap_or(JsonValue::Null));
        }

        Ok(response)
    }

    /// Create an action; with `overwrite` set this also replaces an existing one
    pub async fn create(&self, options: &ActionOptions) -> ClientResult<JsonValue> {
        let qs = self.resource.qs(options, CREATE_QS);
        let body = Self::action_body(options)?.to_json()?;
        self.resource.create(options, qs, body).await
    }

    pub async fn update(&self, options: &ActionOptions) -> ClientResult<JsonValue> {
        let options = ActionOptions {
            overwrite: Some(true),
            ..options.clone()
        };
        self.create(&options).await
    }

    pub async fn delete(&self, options: &ActionOptions) -> ClientResult<JsonValue> {
        self.resource.delete(options).await
    }

    /// Validate options and build the create/update body
    pub fn action_body(options: &ActionOptions) -> Result<ActionBody, ValidationError> {
        let mut body = match BodyShape::of(options)? {
            BodyShape::Override(doc) => {
                debug!("using caller-supplied action document");
                return Ok(ActionBody::Override(doc.clone()));
            }
            BodyShape::Code => Self::action_body_with_code(options),
            BodyShape::Sequence => Self::action_body_with_sequence(options)?,
        };

        if let Some(params) = &options.params {
            body.parameters = Some(key_values(params));
        }
        if let Some(version) = options.version.as_ref().filter(|v| !v.is_empty()) {
            body.version = Some(version.clone());
        }
        if let Some(limits) = &options.limits {
            body.limits = Some(limits.clone());
        }
        if let Some(annotations) = &options.annotations {
            body.annotations = Some(key_values(annotations));
        }

        Ok(ActionBody::Built(body))
    }

    pub fn action_body_with_code(options: &ActionOptions) -> ActionDefinition {
        let kind = options.kind.as_deref().unwrap_or(DEFAULT_KIND);

        let mut exec = Map::new();
        exec.insert("kind".into(), JsonValue::String(kind.to_string()));
        match &options.action {
            Some(ActionSource::Code(code)) => {
                exec.insert("code".into(), JsonValue::String(code.clone()));
            }
            Some(ActionSource::Binary(bytes)) => {
                exec.insert("code".into(), JsonValue::String(general_purpose::STANDARD.encode(bytes)));
            }
            Some(ActionSource::Definition(doc)) => {
                exec.insert("code".into(), JsonValue::Object(doc.clone()));
            }
            None => {}
        }

        // caller-supplied exec fields win over the derived ones
        if let Some(overrides) = &options.exec {
            for (key, value) in overrides {
                exec.insert(key.clone(), value.clone());
            }
        }

        // binary code is always sent encoded, whatever the overrides said
        if let Some(ActionSource::Binary(bytes)) = &options.action {
            exec.insert("code".into(), JsonValue::String(general_purpose::STANDARD.encode(bytes)));
        }

        ActionDefinition::with_exec(ActionExec::Code(exec))
    }

    pub fn action_body_with_sequence(
        options: &ActionOptions,
    ) -> Result<ActionDefinition, ValidationError> {
        let components = match &options.sequence {
            Some(JsonValue::Array(components)) => components,
            _ => return Err(ValidationError::InvalidSequenceType),
        };

        if components.is_empty() {
            return Err(ValidationError::InvalidSequenceLength);
        }

        Ok(ActionDefinition::with_exec(ActionExec::Sequence(SequenceExec {
            kind: SEQUENCE_KIND.to_string(),
            components: components.clone(),
        })))
    }
}
