//! `answer` tool: generated answer with citations

use async_trait::async_trait;
use exa_client::{AnswerRequest, AnswerResponse, Citation, ClientFactory, OptField};
use exa_tools::schema::{boolean, object, string};
use exa_tools::{Result, Tool, ToolError, ToolOutput, parse_arguments};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

use super::client_error;

/// Arguments accepted by the `answer` tool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerArgs {
    pub query: String,
    #[serde(default)]
    pub include_text: Option<bool>,
}

/// A source backing the answer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerCitation {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub published_date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
}

impl AnswerCitation {
    fn from_citation(citation: Citation, include_text: bool) -> Self {
        Self {
            title: citation.title.value_or_default(),
            url: citation.url.value_or_default(),
            published_date: citation.published_date.value_or_default(),
            author: citation.author.value_or_default(),
            text: if include_text {
                citation.text.value_or_default()
            } else {
                String::new()
            },
        }
    }
}

/// Structured output of the `answer` tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutput {
    pub answer: String,
    pub citations: Vec<AnswerCitation>,
}

/// Tool asking Exa for a direct answer
pub struct AnswerTool {
    clients: Arc<dyn ClientFactory>,
}

impl AnswerTool {
    pub const NAME: &'static str = "answer";

    pub fn new(clients: Arc<dyn ClientFactory>) -> Self {
        Self { clients }
    }

    pub fn build_request(args: AnswerArgs) -> AnswerRequest {
        AnswerRequest {
            query: args.query,
            text: OptField::from_present(args.include_text),
        }
    }

    /// Flatten the response; citation text is kept only when it was requested
    pub fn flatten_response(response: AnswerResponse, include_text: bool) -> AnswerOutput {
        AnswerOutput {
            answer: response.answer.value_or_default(),
            citations: response
                .citations
                .into_iter()
                .map(|c| AnswerCitation::from_citation(c, include_text))
                .collect(),
        }
    }

    pub async fn run(&self, args: AnswerArgs) -> Result<AnswerOutput> {
        let client = self.clients.create().map_err(client_error)?;
        let include_text = args.include_text.unwrap_or(false);
        let request = Self::build_request(args);

        debug!(include_text, "Calling Exa answer");

        let response = client.answer(request).await.map_err(|e| {
            warn!(error = %e, "Exa answer failed");
            ToolError::remote("answer", e)
        })?;

        Ok(Self::flatten_response(response, include_text))
    }
}

#[async_trait]
impl Tool for AnswerTool {
    async fn execute(&self, params: Value) -> Result<ToolOutput> {
        let args: AnswerArgs = parse_arguments(params)?;
        let output = self.run(args).await?;
        ToolOutput::from_serialize(&output)
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn title(&self) -> Option<&str> {
        Some("Exa Answer")
    }

    fn description(&self) -> &str {
        "Get an AI-generated answer to a question based on web search results. \
         Returns the answer along with citations to its sources."
    }

    fn input_schema(&self) -> Value {
        object(
            json!({
                "query": string(Some("The question to answer")),
                "includeText": boolean(Some("If true, include full source text in the citations")),
            }),
            &["query"],
        )
    }

    fn output_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "answer": string(None),
                "citations": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": string(None),
                            "url": string(None),
                            "publishedDate": string(None),
                            "author": string(None),
                            "text": string(None),
                        },
                        "required": ["title", "url"],
                    },
                },
            },
            "required": ["answer", "citations"],
        }))
    }
}
