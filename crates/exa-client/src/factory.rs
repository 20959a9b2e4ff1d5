//! Per-call client construction

use exa_utils::ExaConfig;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::client::{ExaApi, ExaClient};
use crate::error::{ExaError, Result};
use crate::security::{SecuritySource, StaticApiKey};

/// Builds the client a tool call talks to
///
/// Tools ask for a fresh client on every invocation; a failure here is
/// reported separately from a failure of the remote call itself.
pub trait ClientFactory: Send + Sync {
    fn create(&self) -> Result<Arc<dyn ExaApi>>;
}

/// Builds [`ExaClient`]s from process configuration
#[derive(Clone)]
pub struct HttpClientFactory {
    base_url: String,
    timeout: Duration,
    user_agent: String,
    security: Arc<dyn SecuritySource>,
}

impl std::fmt::Debug for HttpClientFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClientFactory")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl HttpClientFactory {
    /// Factory using the configured API key
    ///
    /// A missing key becomes an empty one; the remote rejects it.
    pub fn from_config(config: &ExaConfig) -> Self {
        let key = config.api_key.clone().unwrap_or_default();
        Self::with_security_source(config, Arc::new(StaticApiKey::new(key)))
    }

    /// Factory with a custom credential source
    pub fn with_security_source(config: &ExaConfig, security: Arc<dyn SecuritySource>) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.request_timeout,
            user_agent: config.user_agent.clone(),
            security,
        }
    }

    /// Build a concrete client
    pub fn build(&self) -> Result<ExaClient> {
        let http = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(ExaError::ClientBuild)?;

        debug!(base_url = %self.base_url, "Created Exa client");

        ExaClient::with_http_client(&self.base_url, Arc::clone(&self.security), http)
    }
}

impl ClientFactory for HttpClientFactory {
    fn create(&self) -> Result<Arc<dyn ExaApi>> {
        Ok(Arc::new(self.build()?))
    }
}

/// Hands out the same client every time
///
/// Useful when the caller manages the client's lifetime itself.
#[derive(Clone)]
pub struct FixedClientFactory {
    client: Arc<dyn ExaApi>,
}

impl FixedClientFactory {
    pub fn new(client: Arc<dyn ExaApi>) -> Self {
        Self { client }
    }
}

impl ClientFactory for FixedClientFactory {
    fn create(&self) -> Result<Arc<dyn ExaApi>> {
        Ok(Arc::clone(&self.client))
    }
}
