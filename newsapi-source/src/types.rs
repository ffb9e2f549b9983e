//! Wire types for the NewsAPI.org top-headlines endpoint

use serde::Deserialize;

/// NewsAPI caps `pageSize` at 100
pub const MAX_PAGE_SIZE: u32 = 100;

/// Parameters of a top-headlines request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopHeadlinesQuery {
    /// Category filter (e.g. "technology")
    pub category: String,
    /// Number of results per page, 1..=100
    pub page_size: u32,
    /// Optional 2-letter country code
    pub country: Option<String>,
    /// Optional keyword filter
    pub q: Option<String>,
}

impl TopHeadlinesQuery {
    pub fn new(category: impl Into<String>, page_size: u32) -> Self {
        Self {
            category: category.into(),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            country: None,
            q: None,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_keywords(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Query string pairs in the order NewsAPI documents them
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("category", self.category.clone()),
            ("pageSize", self.page_size.clamp(1, MAX_PAGE_SIZE).to_string()),
        ];
        if let Some(country) = &self.country {
            pairs.push(("country", country.clone()));
        }
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        pairs
    }
}

impl Default for TopHeadlinesQuery {
    fn default() -> Self {
        Self::new("technology", MAX_PAGE_SIZE)
    }
}

/// Publisher of a raw article
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// An article as NewsAPI returns it, before any validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    /// ISO 8601 timestamp, usually UTC ("2021-11-05T16:00:00Z")
    pub published_at: Option<String>,
    pub content: Option<String>,
}

impl RawArticle {
    /// Name of the publishing source, if any
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }
}

/// Successful top-headlines response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesResponse {
    /// "ok" or "error"
    pub status: String,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

/// Error body returned by NewsAPI
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub status: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
