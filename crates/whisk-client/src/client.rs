use crate::actions::Actions;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::{HttpTransport, Transport};
use std::sync::Arc;
use tracing::debug;

/// Entry point: holds configuration and the shared transport, hands out resource accessors
#[derive(Clone)]
pub struct WhiskClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl WhiskClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config)?;
        debug!(api = transport.api_url(), namespace = config.default_namespace(), "client ready");
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Configuration from `__OW_*` environment variables
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn actions(&self) -> Actions {
        Actions::new(self.transport.clone(), self.config.default_namespace())
    }
}

impl std::fmt::Debug for WhiskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhiskClient")
            .field("api_host", &self.config.api_host)
            .field("namespace", &self.config.namespace)
            .finish_non_exhaustive()
    }
}
