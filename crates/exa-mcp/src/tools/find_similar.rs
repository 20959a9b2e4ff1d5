//! `find_similar` tool: pages similar to a seed URL

use async_trait::async_trait;
use exa_client::{ClientFactory, FindSimilarRequest, OptField};
use exa_tools::schema::{array, boolean, integer, minimum, object, string};
use exa_tools::{Result, Tool, ToolError, ToolOutput, parse_arguments};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

use super::{SearchOutput, client_error, contents_request, search_output_schema};

/// Arguments accepted by the `find_similar` tool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindSimilarArgs {
    pub url: String,
    #[serde(default)]
    pub num_results: Option<u32>,
    #[serde(default)]
    pub include_domains: Option<Vec<String>>,
    #[serde(default)]
    pub exclude_domains: Option<Vec<String>>,
    #[serde(default)]
    pub get_contents: Option<bool>,
}

/// Find-similar results have the same shape as search results
pub type FindSimilarOutput = SearchOutput;

/// Tool finding pages similar to a given URL
pub struct FindSimilarTool {
    clients: Arc<dyn ClientFactory>,
}

impl FindSimilarTool {
    pub const NAME: &'static str = "find_similar";

    pub fn new(clients: Arc<dyn ClientFactory>) -> Self {
        Self { clients }
    }

    pub fn build_request(args: FindSimilarArgs) -> FindSimilarRequest {
        FindSimilarRequest {
            url: args.url,
            num_results: OptField::from_present(args.num_results),
            include_domains: OptField::from_present(args.include_domains),
            exclude_domains: OptField::from_present(args.exclude_domains),
            contents: contents_request(args.get_contents),
        }
    }

    pub async fn run(&self, args: FindSimilarArgs) -> Result<FindSimilarOutput> {
        let client = self.clients.create().map_err(client_error)?;
        let request = Self::build_request(args);

        debug!(url = %request.url, "Calling Exa findSimilar");

        let response = client.find_similar(request).await.map_err(|e| {
            warn!(error = %e, "Exa findSimilar failed");
            ToolError::remote("findSimilar", e)
        })?;

        Ok(FindSimilarOutput::from(response))
    }
}

#[async_trait]
impl Tool for FindSimilarTool {
    async fn execute(&self, params: Value) -> Result<ToolOutput> {
        let args: FindSimilarArgs = parse_arguments(params)?;
        let output = self.run(args).await?;
        ToolOutput::from_serialize(&output)
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn title(&self) -> Option<&str> {
        Some("Exa Find Similar")
    }

    fn description(&self) -> &str {
        "Find web pages similar to a given URL using Exa's embeddings. \
         Useful for discovering related content, competitors, or similar resources."
    }

    fn input_schema(&self) -> Value {
        object(
            json!({
                "url": string(Some("The URL to find similar pages for")),
                "numResults": minimum(integer(Some("Number of results to return (default 10)")), 1),
                "includeDomains": array(string(None), Some("List of domains to include in results")),
                "excludeDomains": array(string(None), Some("List of domains to exclude from results")),
                "getContents": boolean(Some("If true, return page contents along with results")),
            }),
            &["url"],
        )
    }

    fn output_schema(&self) -> Option<Value> {
        Some(search_output_schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{FailingFactory, MockExa, factory, remote_failure};
    use exa_client::{ContentsRequest, FindSimilarResponse, ResultItem};

    #[test]
    fn test_only_url_is_sent_by_default() {
        let request = FindSimilarTool::build_request(FindSimilarArgs {
            url: "https://example.com".into(),
            ..FindSimilarArgs::default()
        });

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"url": "https://example.com"})
        );
    }

    #[tokio::test]
    async fn test_arguments_reach_client() {
        let mut mock = MockExa::new();
        mock.expect_find_similar()
            .withf(|request| {
                request.url == "https://example.com"
                    && request.num_results == OptField::Set(2)
                    && request.exclude_domains == OptField::Set(vec!["spam.example".to_string()])
                    && request.include_domains.is_unset()
                    && request.contents == OptField::Set(ContentsRequest::full_text())
            })
            .times(1)
            .returning(|_| {
                Ok(FindSimilarResponse {
                    results: vec![ResultItem {
                        url: OptField::Set("https://similar.example".into()),
                        ..ResultItem::default()
                    }],
                    ..FindSimilarResponse::default()
                })
            });

        let output = FindSimilarTool::new(factory(mock))
            .execute(json!({
                "url": "https://example.com",
                "numResults": 2,
                "excludeDomains": ["spam.example"],
                "includeDomains": [],
                "getContents": true
            }))
            .await
            .unwrap();

        assert_eq!(
            output.structured,
            json!({"results": [{"title": "", "url": "https://similar.example"}]})
        );
    }

    #[tokio::test]
    async fn test_missing_url_is_invalid_arguments() {
        let mut mock = MockExa::new();
        mock.expect_find_similar().never();

        let err = FindSimilarTool::new(factory(mock))
            .execute(json!({"numResults": 3}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_negative_count_is_invalid_arguments() {
        let err = parse_arguments::<FindSimilarArgs>(json!({"url": "u", "numResults": -1}))
            .unwrap_err();
        assert!(err.is_invalid_request());
    }

    #[tokio::test]
    async fn test_failures_carry_stage_prefix() {
        let err = FindSimilarTool::new(Arc::new(FailingFactory))
            .execute(json!({"url": "https://example.com"}))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("create client: "));

        let mut mock = MockExa::new();
        mock.expect_find_similar().returning(|_| Err(remote_failure()));
        let err = FindSimilarTool::new(factory(mock))
            .execute(json!({"url": "https://example.com"}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "findSimilar: HTTP 500: upstream unavailable");
    }
}
