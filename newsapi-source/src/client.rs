//! NewsAPI.org client for top headlines

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::SourceError;
use crate::types::{ApiErrorResponse, ArticlesResponse, RawArticle, TopHeadlinesQuery};
use crate::ArticleSource;

/// Public NewsAPI endpoint
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";

const TOP_HEADLINES_PATH: &str = "v2/top-headlines";

/// NewsAPI.org client
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl NewsApiClient {
    /// Create a new client against `base_url` (usually [`DEFAULT_BASE_URL`])
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, SourceError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SourceError::InvalidConfig("API key is empty".to_string()));
        }

        let endpoint = Url::parse(base_url)
            .and_then(|mut base| {
                // join() replaces the last segment unless the path ends in '/'
                if !base.path().ends_with('/') {
                    let path = format!("{}/", base.path());
                    base.set_path(&path);
                }
                base.join(TOP_HEADLINES_PATH)
            })
            .map_err(|e| SourceError::InvalidConfig(format!("base url '{}': {}", base_url, e)))?;

        Ok(Self {
            client: Client::new(),
            api_key,
            endpoint,
        })
    }

    /// Full URL of the top-headlines endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch one page of top headlines
    #[instrument(skip(self), fields(category = %query.category, page_size = query.page_size))]
    pub async fn top_headlines(
        &self,
        query: &TopHeadlinesQuery,
    ) -> Result<Vec<RawArticle>, SourceError> {
        debug!("Requesting {}", self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .header("X-Api-Key", &self.api_key)
            .query(&query.to_pairs())
            .send()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }

        let articles: ArticlesResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        if articles.status != "ok" {
            return Err(SourceError::Api {
                status: 200,
                code: articles.status,
                message: "unexpected status in response body".to_string(),
            });
        }

        info!(
            "Received {} articles from NewsAPI ({} total results)",
            articles.articles.len(),
            articles.total_results
        );

        Ok(articles.articles)
    }
}

#[async_trait]
impl ArticleSource for NewsApiClient {
    async fn fetch(&self, query: &TopHeadlinesQuery) -> Result<Vec<RawArticle>, SourceError> {
        self.top_headlines(query).await
    }
}

/// Build an API error from a non-success response body
fn api_error(status: u16, body: &str) -> SourceError {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(err) => SourceError::Api {
            status,
            code: err.code.unwrap_or(err.status),
            message: err.message.unwrap_or_default(),
        },
        Err(_) => SourceError::Api {
            status,
            code: "unknown".to_string(),
            message: body.to_string(),
        },
    }
}
