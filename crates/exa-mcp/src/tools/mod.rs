//! Exa tools
//!
//! Each tool has the same shape: decode the arguments, build a request that
//! carries only the fields the caller actually supplied, make one remote
//! call, then flatten the response's optional fields into a plain output.

pub mod answer;
pub mod find_similar;
pub mod get_contents;
pub mod search;

pub use answer::{AnswerArgs, AnswerCitation, AnswerOutput, AnswerTool};
pub use find_similar::{FindSimilarArgs, FindSimilarOutput, FindSimilarTool};
pub use get_contents::{ContentResult, GetContentsArgs, GetContentsOutput, GetContentsTool};
pub use search::{SearchArgs, SearchOutput, SearchTool};

use exa_client::{ClientFactory, ContentsRequest, ExaError, OptField, ResultItem};
use exa_tools::schema::{number, string};
use exa_tools::{ToolError, ToolRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

/// Build the registry holding all four Exa tools
pub fn default_registry(clients: Arc<dyn ClientFactory>) -> exa_tools::Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(SearchTool::new(Arc::clone(&clients))))?;
    registry.register(Arc::new(FindSimilarTool::new(Arc::clone(&clients))))?;
    registry.register(Arc::new(GetContentsTool::new(Arc::clone(&clients))))?;
    registry.register(Arc::new(AnswerTool::new(clients)))?;
    Ok(registry)
}

/// One hit from search or find-similar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub published_date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub score: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
}

impl From<ResultItem> for SearchResult {
    fn from(item: ResultItem) -> Self {
        Self {
            title: item.title.value_or_default(),
            url: item.url.value_or_default(),
            published_date: item.published_date.value_or_default(),
            author: item.author.value_or_default(),
            score: item.score.value_or_default(),
            text: item.text.value_or_default(),
            summary: item.summary.value_or_default(),
        }
    }
}

#[allow(clippy::float_cmp)]
fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

/// `contents` sub-request: full text when asked for, omitted otherwise
pub(crate) fn contents_request(get_contents: Option<bool>) -> OptField<ContentsRequest> {
    match OptField::from_present(get_contents) {
        OptField::Set(_) => OptField::Set(ContentsRequest::full_text()),
        OptField::Unset => OptField::Unset,
    }
}

pub(crate) fn client_error(err: ExaError) -> ToolError {
    ToolError::ClientConstruction(err.to_string())
}

/// Output schema shared by search and find-similar
pub(crate) fn search_output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "results": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": string(None),
                        "url": string(None),
                        "publishedDate": string(None),
                        "author": string(None),
                        "score": number(None),
                        "text": string(None),
                        "summary": string(None),
                    },
                    "required": ["title", "url"],
                },
            },
            "context": string(Some("Combined context string, when the service returns one")),
        },
        "required": ["results"],
    })
}
