//! Credential supply for Exa API calls

use async_trait::async_trait;
use std::fmt;

use crate::error::Result;

/// Remote operations, as named by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationName {
    Search,
    FindSimilar,
    GetContents,
    Answer,
}

impl OperationName {
    /// Operation identifier
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::FindSimilar => "findSimilar",
            Self::GetContents => "getContents",
            Self::Answer => "answer",
        }
    }

    /// Endpoint path relative to the base URL
    pub fn path(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::FindSimilar => "findSimilar",
            Self::GetContents => "contents",
            Self::Answer => "answer",
        }
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An API key, redacted in debug output
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Supplies the credential attached to each call
///
/// Injected into the client at construction so tests can substitute their
/// own source without touching process environment.
#[async_trait]
pub trait SecuritySource: Send + Sync {
    /// Credential for the given operation
    async fn api_key(&self, operation: OperationName) -> Result<ApiKey>;
}

/// A fixed key, typically read from the environment at startup
///
/// An empty key is passed through unchanged; the remote rejects it.
#[derive(Debug, Clone)]
pub struct StaticApiKey {
    key: ApiKey,
}

impl StaticApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: ApiKey::new(key),
        }
    }
}

#[async_trait]
impl SecuritySource for StaticApiKey {
    async fn api_key(&self, _operation: OperationName) -> Result<ApiKey> {
        Ok(self.key.clone())
    }
}
