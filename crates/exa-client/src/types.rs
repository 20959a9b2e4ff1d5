//! Request and response shapes for the Exa API
//!
//! Field names follow the remote camelCase wire format. Required fields are
//! plain values; everything else is an [`OptField`].

use serde::{Deserialize, Serialize};

use crate::opt::{OptField, Presence, null_as_default};

/// Search strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// Embeddings-based search
    Neural,
    /// Streamlined, lower-latency search
    Fast,
    /// Let the service combine methods
    Auto,
    /// Comprehensive search with query expansion
    Deep,
}

impl SearchType {
    /// All variants, in wire order
    pub const ALL: [Self; 4] = [Self::Neural, Self::Fast, Self::Auto, Self::Deep];

    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neural => "neural",
            Self::Fast => "fast",
            Self::Auto => "auto",
            Self::Deep => "deep",
        }
    }
}

/// Data category hint for search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "company")]
    Company,
    #[serde(rename = "research paper")]
    ResearchPaper,
    #[serde(rename = "news")]
    News,
    #[serde(rename = "pdf")]
    Pdf,
    #[serde(rename = "github")]
    Github,
    #[serde(rename = "tweet")]
    Tweet,
    #[serde(rename = "personal site")]
    PersonalSite,
    #[serde(rename = "linkedin profile")]
    LinkedinProfile,
    #[serde(rename = "financial report")]
    FinancialReport,
}

impl Category {
    /// All variants, in wire order
    pub const ALL: [Self; 9] = [
        Self::Company,
        Self::ResearchPaper,
        Self::News,
        Self::Pdf,
        Self::Github,
        Self::Tweet,
        Self::PersonalSite,
        Self::LinkedinProfile,
        Self::FinancialReport,
    ];

    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::ResearchPaper => "research paper",
            Self::News => "news",
            Self::Pdf => "pdf",
            Self::Github => "github",
            Self::Tweet => "tweet",
            Self::PersonalSite => "personal site",
            Self::LinkedinProfile => "linkedin profile",
            Self::FinancialReport => "financial report",
        }
    }
}

/// When the service should crawl pages live instead of using its cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Livecrawl {
    Never,
    /// The service default when the field is omitted
    Fallback,
    Always,
    Preferred,
}

impl Livecrawl {
    /// All variants, in wire order
    pub const ALL: [Self; 4] = [Self::Never, Self::Fallback, Self::Always, Self::Preferred];

    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::Fallback => "fallback",
            Self::Always => "always",
            Self::Preferred => "preferred",
        }
    }
}

impl Presence for SearchType {
    fn is_present(&self) -> bool {
        true
    }
}

impl Presence for Category {
    fn is_present(&self) -> bool {
        true
    }
}

impl Presence for Livecrawl {
    fn is_present(&self) -> bool {
        true
    }
}

/// Text extraction options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOptions {
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub max_characters: OptField<u32>,
}

/// The `text` request field: a plain flag or an options object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextRequest {
    Enabled(bool),
    Options(TextOptions),
}

/// The `summary` request field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Steers what the generated summary focuses on
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub query: OptField<String>,
}

/// Contents attached to search and find-similar results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentsRequest {
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub text: OptField<TextRequest>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub summary: OptField<SummaryRequest>,
}

impl ContentsRequest {
    /// Request full page text
    pub fn full_text() -> Self {
        let mut contents = Self::default();
        contents.text.set_to(TextRequest::Enabled(true));
        contents
    }
}

/// Body of `POST /search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    #[serde(default, rename = "type", skip_serializing_if = "OptField::is_unset")]
    pub search_type: OptField<SearchType>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub category: OptField<Category>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub num_results: OptField<u32>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub include_domains: OptField<Vec<String>>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub exclude_domains: OptField<Vec<String>>,
    /// At most one phrase of up to five words; enforced remotely
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub include_text: OptField<Vec<String>>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub exclude_text: OptField<Vec<String>>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub contents: OptField<ContentsRequest>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// Body of `POST /findSimilar`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindSimilarRequest {
    pub url: String,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub num_results: OptField<u32>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub include_domains: OptField<Vec<String>>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub exclude_domains: OptField<Vec<String>>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub contents: OptField<ContentsRequest>,
}

impl FindSimilarRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Body of `POST /contents`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetContentsRequest {
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub text: OptField<TextRequest>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub livecrawl: OptField<Livecrawl>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub summary: OptField<SummaryRequest>,
}

impl GetContentsRequest {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            ..Self::default()
        }
    }
}

/// Body of `POST /answer`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub query: String,
    /// Include full source text in citations
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub text: OptField<bool>,
}

impl AnswerRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// One result from search, find-similar or contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub id: OptField<String>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub title: OptField<String>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub url: OptField<String>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub published_date: OptField<String>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub author: OptField<String>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub score: OptField<f64>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub text: OptField<String>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub summary: OptField<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub highlights: Vec<String>,
}

/// Response of `POST /search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub request_id: OptField<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<ResultItem>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub context: OptField<String>,
}

/// Response of `POST /findSimilar`; same shape as search
pub type FindSimilarResponse = SearchResponse;

/// Response of `POST /contents`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetContentsResponse {
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub request_id: OptField<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<ResultItem>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub context: OptField<String>,
}

/// A source cited by an answer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub id: OptField<String>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub title: OptField<String>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub url: OptField<String>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub published_date: OptField<String>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub author: OptField<String>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub text: OptField<String>,
}

/// Response of `POST /answer`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub request_id: OptField<String>,
    #[serde(default, skip_serializing_if = "OptField::is_unset")]
    pub answer: OptField<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub citations: Vec<Citation>,
}
