//! Client for the Exa search API
//!
//! The request and response types mirror the remote wire shapes. Every
//! optional field is an [`OptField`], so "not set" and "set to a zero value"
//! stay distinct all the way to the HTTP body.
//!
//! # Example
//!
//! ```no_run
//! use exa_client::{ExaApi, ExaClient, SearchRequest, StaticApiKey};
//! use std::sync::Arc;
//!
//! # async fn example() -> exa_client::Result<()> {
//! let client = ExaClient::new("https://api.exa.ai", Arc::new(StaticApiKey::new("key")))?;
//!
//! let mut request = SearchRequest::new("rust async runtimes");
//! request.num_results.set_to(5);
//!
//! let response = client.search(request).await?;
//! println!("{} results", response.results.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod opt;
pub mod security;
pub mod types;

pub use client::{ExaApi, ExaClient};
pub use error::{ExaError, Result};
pub use factory::{ClientFactory, FixedClientFactory, HttpClientFactory};
pub use opt::{OptField, Presence};
pub use security::{ApiKey, OperationName, SecuritySource, StaticApiKey};
pub use types::{
    AnswerRequest, AnswerResponse, Category, Citation, ContentsRequest, FindSimilarRequest,
    FindSimilarResponse, GetContentsRequest, GetContentsResponse, Livecrawl, ResultItem,
    SearchRequest, SearchResponse, SearchType, SummaryRequest, TextOptions, TextRequest,
};
