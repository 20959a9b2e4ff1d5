//! HTTP client for the Exa API

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ExaError, Result};
use crate::security::{OperationName, SecuritySource};
use crate::types::{
    AnswerRequest, AnswerResponse, FindSimilarRequest, FindSimilarResponse, GetContentsRequest,
    GetContentsResponse, SearchRequest, SearchResponse,
};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// The four remote operations of the Exa API
///
/// Each call performs exactly one request; there is no retry.
#[async_trait]
pub trait ExaApi: Send + Sync {
    /// Web search
    async fn search(&self, request: SearchRequest) -> Result<SearchResponse>;

    /// Pages similar to a seed URL
    async fn find_similar(&self, request: FindSimilarRequest) -> Result<FindSimilarResponse>;

    /// Contents of specific URLs
    async fn get_contents(&self, request: GetContentsRequest) -> Result<GetContentsResponse>;

    /// Generated answer with citations
    async fn answer(&self, request: AnswerRequest) -> Result<AnswerResponse>;
}

/// reqwest-backed Exa API client
#[derive(Clone)]
pub struct ExaClient {
    http: Client,
    base_url: Url,
    security: Arc<dyn SecuritySource>,
}

impl std::fmt::Debug for ExaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExaClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ExaClient {
    /// Create a client with a default reqwest client
    pub fn new(base_url: &str, security: Arc<dyn SecuritySource>) -> Result<Self> {
        Self::with_http_client(base_url, security, Client::new())
    }

    /// Create a client around an existing reqwest client
    pub fn with_http_client(
        base_url: &str,
        security: Arc<dyn SecuritySource>,
        http: Client,
    ) -> Result<Self> {
        // Url::join drops the last path segment unless it ends with a slash.
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized)
            .map_err(|e| ExaError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            http,
            base_url,
            security,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, operation: OperationName) -> Result<Url> {
        self.base_url
            .join(operation.path())
            .map_err(|e| ExaError::InvalidUrl(format!("{}: {e}", operation.path())))
    }

    #[instrument(level = "debug", skip_all, fields(operation = %operation))]
    async fn post<B, R>(&self, operation: OperationName, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let api_key = self.security.api_key(operation).await?;
        let url = self.endpoint(operation)?;

        debug!(%url, "Sending Exa request");

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, api_key.as_str())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExaError::from_response(status.as_u16(), &body));
        }

        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), len = bytes.len(), "Received Exa response");

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ExaApi for ExaClient {
    async fn search(&self, request: SearchRequest) -> Result<SearchResponse> {
        self.post(OperationName::Search, &request).await
    }

    async fn find_similar(&self, request: FindSimilarRequest) -> Result<FindSimilarResponse> {
        self.post(OperationName::FindSimilar, &request).await
    }

    async fn get_contents(&self, request: GetContentsRequest) -> Result<GetContentsResponse> {
        self.post(OperationName::GetContents, &request).await
    }

    async fn answer(&self, request: AnswerRequest) -> Result<AnswerResponse> {
        self.post(OperationName::Answer, &request).await
    }
}
