//! `get_contents` tool: full contents of specific URLs

use async_trait::async_trait;
use exa_client::{
    ClientFactory, GetContentsRequest, GetContentsResponse, Livecrawl, OptField, ResultItem,
    SummaryRequest, TextOptions, TextRequest,
};
use exa_tools::schema::{array, boolean, enum_string, integer, minimum, object, string};
use exa_tools::{Result, Tool, ToolError, ToolOutput, parse_arguments};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

use super::client_error;

/// Arguments accepted by the `get_contents` tool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetContentsArgs {
    pub urls: Vec<String>,
    #[serde(default)]
    pub livecrawl: Option<Livecrawl>,
    #[serde(default)]
    pub max_text_chars: Option<u32>,
    #[serde(default)]
    pub include_summary: Option<bool>,
    #[serde(default)]
    pub summary_query: Option<String>,
}

/// Contents of one URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResult {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub published_date: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl From<ResultItem> for ContentResult {
    fn from(item: ResultItem) -> Self {
        Self {
            title: item.title.value_or_default(),
            url: item.url.value_or_default(),
            text: item.text.value_or_default(),
            summary: item.summary.value_or_default(),
            author: item.author.value_or_default(),
            published_date: item.published_date.value_or_default(),
            highlights: item.highlights,
        }
    }
}

/// Structured output of the `get_contents` tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetContentsOutput {
    pub results: Vec<ContentResult>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub context: String,
}

impl From<GetContentsResponse> for GetContentsOutput {
    fn from(response: GetContentsResponse) -> Self {
        Self {
            results: response.results.into_iter().map(ContentResult::from).collect(),
            context: response.context.value_or_default(),
        }
    }
}

/// Tool fetching the contents of a list of URLs
pub struct GetContentsTool {
    clients: Arc<dyn ClientFactory>,
}

impl GetContentsTool {
    pub const NAME: &'static str = "get_contents";

    pub fn new(clients: Arc<dyn ClientFactory>) -> Self {
        Self { clients }
    }

    /// Translate arguments into the remote request
    ///
    /// Text is always requested: a character limit when one was given, the
    /// plain `true` flag otherwise.
    pub fn build_request(args: GetContentsArgs) -> GetContentsRequest {
        let text = match OptField::from_present(args.max_text_chars) {
            OptField::Set(limit) => TextRequest::Options(TextOptions {
                max_characters: OptField::Set(limit),
                ..TextOptions::default()
            }),
            OptField::Unset => TextRequest::Enabled(true),
        };

        let summary = match OptField::from_present(args.include_summary) {
            OptField::Set(_) => OptField::Set(SummaryRequest {
                query: OptField::from_present(args.summary_query),
            }),
            OptField::Unset => OptField::Unset,
        };

        GetContentsRequest {
            urls: args.urls,
            text: OptField::Set(text),
            livecrawl: OptField::from_present(args.livecrawl),
            summary,
        }
    }

    pub async fn run(&self, args: GetContentsArgs) -> Result<GetContentsOutput> {
        let client = self.clients.create().map_err(client_error)?;
        let request = Self::build_request(args);

        debug!(
            urls = request.urls.len(),
            summary = request.summary.is_set(),
            "Calling Exa getContents"
        );

        let response = client.get_contents(request).await.map_err(|e| {
            warn!(error = %e, "Exa getContents failed");
            ToolError::remote("getContents", e)
        })?;

        Ok(GetContentsOutput::from(response))
    }
}

#[async_trait]
impl Tool for GetContentsTool {
    async fn execute(&self, params: Value) -> Result<ToolOutput> {
        let args: GetContentsArgs = parse_arguments(params)?;
        let output = self.run(args).await?;
        ToolOutput::from_serialize(&output)
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn title(&self) -> Option<&str> {
        Some("Exa Get Contents")
    }

    fn description(&self) -> &str {
        "Fetch and extract content from specific URLs. Returns cleaned text, optional \
         AI-generated summaries, and highlights for each page."
    }

    fn input_schema(&self) -> Value {
        let modes: Vec<&str> = Livecrawl::ALL.iter().map(|l| l.as_str()).collect();

        object(
            json!({
                "urls": array(string(None), Some("Array of URLs to retrieve contents for")),
                "livecrawl": enum_string(
                    &modes,
                    Some("Livecrawl mode: never, fallback (default), always, or preferred"),
                ),
                "maxTextChars": minimum(integer(Some("Maximum characters of text to return per page")), 1),
                "includeSummary": boolean(Some("If true, include an AI-generated summary of each page")),
                "summaryQuery": string(Some("Custom query to steer the summary")),
            }),
            &["urls"],
        )
    }

    fn output_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "results": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": string(None),
                            "url": string(None),
                            "text": string(None),
                            "summary": string(None),
                            "author": string(None),
                            "publishedDate": string(None),
                            "highlights": array(string(None), None),
                        },
                        "required": ["title", "url", "highlights"],
                    },
                },
                "context": string(None),
            },
            "required": ["results"],
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{FailingFactory, MockExa, factory, remote_failure};

    fn urls() -> Vec<String> {
        vec!["https://example.com".to_string()]
    }

    #[test]
    fn test_text_requested_without_limit() {
        let request = GetContentsTool::build_request(GetContentsArgs {
            urls: urls(),
            ..GetContentsArgs::default()
        });

        assert_eq!(request.text, OptField::Set(TextRequest::Enabled(true)));
        assert!(request.livecrawl.is_unset());
        assert!(request.summary.is_unset());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"urls": ["https://example.com"], "text": true})
        );
    }

    #[test]
    fn test_zero_limit_still_requests_full_text() {
        let request = GetContentsTool::build_request(GetContentsArgs {
            urls: urls(),
            max_text_chars: Some(0),
            ..GetContentsArgs::default()
        });
        assert_eq!(request.text, OptField::Set(TextRequest::Enabled(true)));
    }

    #[test]
    fn test_limit_and_summary_options() {
        let request = GetContentsTool::build_request(GetContentsArgs {
            urls: urls(),
            livecrawl: Some(Livecrawl::Preferred),
            max_text_chars: Some(2000),
            include_summary: Some(true),
            summary_query: Some("pricing".into()),
        });

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "urls": ["https://example.com"],
                "text": {"maxCharacters": 2000},
                "livecrawl": "preferred",
                "summary": {"query": "pricing"}
            })
        );
    }

    #[test]
    fn test_summary_query_ignored_without_summary() {
        let request = GetContentsTool::build_request(GetContentsArgs {
            urls: urls(),
            include_summary: Some(false),
            summary_query: Some("pricing".into()),
            ..GetContentsArgs::default()
        });
        assert!(request.summary.is_unset());

        let request = GetContentsTool::build_request(GetContentsArgs {
            urls: urls(),
            include_summary: Some(true),
            summary_query: Some(String::new()),
            ..GetContentsArgs::default()
        });
        assert_eq!(request.summary, OptField::Set(SummaryRequest::default()));
    }

    #[tokio::test]
    async fn test_highlights_always_present() {
        let mut mock = MockExa::new();
        mock.expect_get_contents()
            .withf(|request| request.text == OptField::Set(TextRequest::Enabled(true)))
            .returning(|_| {
                Ok(GetContentsResponse {
                    results: vec![
                        ResultItem {
                            url: OptField::Set("https://example.com".into()),
                            text: OptField::Set("page".into()),
                            ..ResultItem::default()
                        },
                        ResultItem {
                            url: OptField::Set("https://other.example".into()),
                            highlights: vec!["first".into(), "second".into()],
                            ..ResultItem::default()
                        },
                    ],
                    ..GetContentsResponse::default()
                })
            });

        let output = GetContentsTool::new(factory(mock))
            .execute(json!({"urls": ["https://example.com", "https://other.example"]}))
            .await
            .unwrap();

        assert_eq!(
            output.structured,
            json!({
                "results": [
                    {"title": "", "url": "https://example.com", "text": "page", "highlights": []},
                    {"title": "", "url": "https://other.example", "highlights": ["first", "second"]}
                ]
            })
        );
    }

    #[test]
    fn test_unset_fields_flatten_to_zero_values() {
        let output = GetContentsOutput::from(GetContentsResponse {
            results: vec![ResultItem::default()],
            ..GetContentsResponse::default()
        });

        assert_eq!(output.results, vec![ContentResult::default()]);
        assert_eq!(output.context, "");
    }

    #[test]
    fn test_output_round_trip() {
        let populated = GetContentsOutput {
            results: vec![ContentResult {
                title: "T".into(),
                url: "https://t.example".into(),
                text: "body".into(),
                summary: "short".into(),
                author: "A".into(),
                published_date: "2024-05-01".into(),
                highlights: vec!["h".into()],
            }],
            context: "ctx".into(),
        };
        let json = serde_json::to_string(&populated).unwrap();
        assert_eq!(serde_json::from_str::<GetContentsOutput>(&json).unwrap(), populated);

        let empty = GetContentsOutput::default();
        let json = serde_json::to_string(&empty).unwrap();
        assert_eq!(serde_json::from_str::<GetContentsOutput>(&json).unwrap(), empty);
    }

    #[tokio::test]
    async fn test_invalid_livecrawl_rejected() {
        let mut mock = MockExa::new();
        mock.expect_get_contents().never();

        let err = GetContentsTool::new(factory(mock))
            .execute(json!({"urls": ["https://example.com"], "livecrawl": "sometimes"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_failures_produce_no_output() {
        let result = GetContentsTool::new(Arc::new(FailingFactory))
            .run(GetContentsArgs {
                urls: urls(),
                ..GetContentsArgs::default()
            })
            .await;
        assert!(matches!(result, Err(ToolError::ClientConstruction(_))));

        let mut mock = MockExa::new();
        mock.expect_get_contents().returning(|_| Err(remote_failure()));
        let err = GetContentsTool::new(factory(mock))
            .execute(json!({"urls": ["https://example.com"]}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "getContents: HTTP 500: upstream unavailable");
    }
}
