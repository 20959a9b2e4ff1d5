//! `search` tool: web search through Exa

use async_trait::async_trait;
use exa_client::{Category, ClientFactory, OptField, SearchRequest, SearchResponse, SearchType};
use exa_tools::schema::{array, boolean, enum_string, integer, minimum, object, string};
use exa_tools::{Result, Tool, ToolError, ToolOutput, parse_arguments};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

use super::{SearchResult, client_error, contents_request, search_output_schema};

/// Arguments accepted by the `search` tool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchArgs {
    pub query: String,
    #[serde(default, rename = "type")]
    pub search_type: Option<SearchType>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub num_results: Option<u32>,
    #[serde(default)]
    pub include_domains: Option<Vec<String>>,
    #[serde(default)]
    pub exclude_domains: Option<Vec<String>>,
    #[serde(default)]
    pub include_text: Option<Vec<String>>,
    #[serde(default)]
    pub exclude_text: Option<Vec<String>>,
    #[serde(default)]
    pub get_contents: Option<bool>,
}

/// Structured output of the `search` tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOutput {
    pub results: Vec<SearchResult>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub context: String,
}

impl From<SearchResponse> for SearchOutput {
    fn from(response: SearchResponse) -> Self {
        Self {
            results: response.results.into_iter().map(SearchResult::from).collect(),
            context: response.context.value_or_default(),
        }
    }
}

/// Tool performing an Exa web search
pub struct SearchTool {
    clients: Arc<dyn ClientFactory>,
}

impl SearchTool {
    pub const NAME: &'static str = "search";

    pub fn new(clients: Arc<dyn ClientFactory>) -> Self {
        Self { clients }
    }

    /// Translate arguments into the remote request
    pub fn build_request(args: SearchArgs) -> SearchRequest {
        SearchRequest {
            query: args.query,
            search_type: OptField::from_present(args.search_type),
            category: OptField::from_present(args.category),
            num_results: OptField::from_present(args.num_results),
            include_domains: OptField::from_present(args.include_domains),
            exclude_domains: OptField::from_present(args.exclude_domains),
            include_text: OptField::from_present(args.include_text),
            exclude_text: OptField::from_present(args.exclude_text),
            contents: contents_request(args.get_contents),
        }
    }

    /// Run a search with typed arguments
    pub async fn run(&self, args: SearchArgs) -> Result<SearchOutput> {
        let client = self.clients.create().map_err(client_error)?;
        let request = Self::build_request(args);

        debug!(
            num_results = ?request.num_results.get(),
            contents = request.contents.is_set(),
            "Calling Exa search"
        );

        let response = client.search(request).await.map_err(|e| {
            warn!(error = %e, "Exa search failed");
            ToolError::remote("search", e)
        })?;

        Ok(SearchOutput::from(response))
    }
}

#[async_trait]
impl Tool for SearchTool {
    async fn execute(&self, params: Value) -> Result<ToolOutput> {
        let args: SearchArgs = parse_arguments(params)?;
        let output = self.run(args).await?;
        ToolOutput::from_serialize(&output)
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn title(&self) -> Option<&str> {
        Some("Exa Search")
    }

    fn description(&self) -> &str {
        "Perform a web search using Exa's AI-powered search engine. Returns relevant results \
         with optional page contents. Supports neural (semantic), fast, auto, and deep search types."
    }

    fn input_schema(&self) -> Value {
        let types: Vec<&str> = SearchType::ALL.iter().map(|t| t.as_str()).collect();
        let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();

        object(
            json!({
                "query": string(Some("The query string for the search")),
                "type": enum_string(
                    &types,
                    Some("Search type: neural (embeddings-based), fast (streamlined), auto (default, combines methods), deep (comprehensive with query expansion)"),
                ),
                "category": enum_string(&categories, Some("A data category to focus on")),
                "numResults": minimum(integer(Some("Number of results to return (default 10)")), 1),
                "includeDomains": array(string(None), Some("List of domains to include in the search")),
                "excludeDomains": array(string(None), Some("List of domains to exclude from search results")),
                "includeText": array(string(None), Some("Strings that must be present in webpage text (max 1 string, up to 5 words)")),
                "excludeText": array(string(None), Some("Strings that must not be present in webpage text")),
                "getContents": boolean(Some("If true, return page contents along with search results")),
            }),
            &["query"],
        )
    }

    fn output_schema(&self) -> Option<Value> {
        Some(search_output_schema())
    }
}
