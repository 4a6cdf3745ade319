//! Resource identifier parsing
//!
//! Identifiers come in three forms:
//! - `name`
//! - `package/name`
//! - `/namespace/name` or `/namespace/package/name`

use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully resolved location of a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceId {
    pub namespace: String,
    /// Name relative to the namespace, may include a package prefix
    pub name: String,
}

impl ResourceId {
    /// Resolve `id` against an explicit namespace option and the client default.
    ///
    /// A namespace embedded in a fully-qualified id wins over both.
    pub fn resolve(id: &str, namespace: Option<&str>, default_namespace: &str) -> ClientResult<Self> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ClientError::MissingIdentifier);
        }

        if let Some(qualified) = id.strip_prefix('/') {
            let (ns, rest) = qualified
                .split_once('/')
                .ok_or_else(|| ClientError::InvalidIdentifier(id.to_string()))?;
            if ns.is_empty() {
                return Err(ClientError::InvalidIdentifier(id.to_string()));
            }
            return Ok(Self {
                namespace: ns.to_string(),
                name: parse_relative(rest, id)?,
            });
        }

        let namespace = namespace
            .filter(|ns| !ns.is_empty())
            .unwrap_or(default_namespace);

        Ok(Self {
            namespace: namespace.trim_matches('/').to_string(),
            name: parse_relative(id, id)?,
        })
    }

    /// Path segments below `namespaces/{ns}/{resource}/`
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.name.split('/')
    }

    pub fn package(&self) -> Option<&str> {
        self.name.split_once('/').map(|(pkg, _)| pkg)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.namespace, self.name)
    }
}

/// Validate a `name` or `package/name` string
fn parse_relative(name: &str, original: &str) -> ClientResult<String> {
    let parts: Vec<&str> = name.split('/').collect();
    if parts.len() > 2 || parts.iter().any(|p| p.is_empty()) {
        return Err(ClientError::InvalidIdentifier(original.to_string()));
    }
    Ok(name.to_string())
}
