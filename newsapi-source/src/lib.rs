//! News source client for technology headlines
//!
//! This crate provides:
//! - `NewsApiClient`: fetches top headlines from NewsAPI.org
//! - `RawArticle`: the unvalidated article shape returned by the API
//! - `ArticleSource`: the seam the ingestion pipeline fetches through

pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;

pub use client::{NewsApiClient, DEFAULT_BASE_URL};
pub use error::SourceError;
pub use types::{ArticlesResponse, RawArticle, RawSource, TopHeadlinesQuery, MAX_PAGE_SIZE};

/// Anything that can return one page of raw articles
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch a page of articles matching `query`. Not retried.
    async fn fetch(&self, query: &TopHeadlinesQuery) -> Result<Vec<RawArticle>, SourceError>;
}
