//! Client for the serverless actions REST API
//!
//! ```rust,ignore
//! use whisk_client::{ActionOptions, ClientConfig, WhiskClient};
//!
//! let client = WhiskClient::new(ClientConfig::new("whisk.example.com", "user:password"))?;
//! let actions = client.actions();
//!
//! actions
//!     .create(&ActionOptions::named("hello").with_action("function main() { return {} }"))
//!     .await?;
//!
//! let output = actions
//!     .invoke(&ActionOptions::named("hello").blocking(true).result_only(true))
//!     .await?;
//! ```

pub mod actions;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod messages;
pub mod names;
pub mod resource;

// Re-export commonly used types
pub use actions::{
    ActionBody, ActionDefinition, ActionExec, ActionLimits, ActionOptions, ActionSource, Actions,
    KeyValue, SequenceExec,
};
pub use client::WhiskClient;
pub use config::{ClientConfig, TimeoutConfig};
pub use error::{ClientError, ClientResult, ValidationError};
pub use http::{ApiRequest, HttpTransport, Transport};
pub use names::ResourceId;
pub use resource::{QueryPairs, Resource, ResourceOptions};
