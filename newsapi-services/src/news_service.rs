//! News Service
//!
//! Serves stored news and, on demand, reloads them from the configured
//! article source. A reload fetches one page, normalizes each article on its
//! own, drops identities that are already stored (or repeated within the
//! page) and saves the rest in a single batch.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};
use newsapi_core::News;
use newsapi_source::{ArticleSource, SourceError, TopHeadlinesQuery};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::news_storage::{NewsStorage, StorageError};
use crate::normalize::normalize_article;

/// Chile (UTC-3), where the service was first deployed
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -3;

/// Configuration for the reload pipeline
#[derive(Debug, Clone)]
pub struct ReloadConfig {
    /// Query sent to the article source
    pub query: TopHeadlinesQuery,
    /// Offset every publication time is converted to
    pub offset: FixedOffset,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            query: TopHeadlinesQuery::default(),
            offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600)
                .unwrap_or_else(|| Utc.fix()),
        }
    }
}

/// Outcome of one reload run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadSummary {
    /// Raw articles returned by the source
    pub fetched: usize,
    /// Articles that failed normalization
    pub rejected: usize,
    /// Articles whose identity was already stored or seen earlier in the page
    pub duplicates: usize,
    /// Rows inserted
    pub inserted: usize,
}

#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("No article source configured")]
    SourceUnavailable,

    #[error("Fetching articles failed: {0}")]
    Source(#[from] SourceError),

    #[error("Storage failed during reload: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("News {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// News service over a storage and an optional article source
pub struct NewsService {
    storage: Arc<NewsStorage>,
    source: Option<Arc<dyn ArticleSource>>,
    config: ReloadConfig,
}

impl NewsService {
    /// Create a new NewsService
    ///
    /// Without a source the read path works and reloads fail with
    /// `ReloadError::SourceUnavailable`.
    pub fn new(
        storage: Arc<NewsStorage>,
        source: Option<Arc<dyn ArticleSource>>,
        config: ReloadConfig,
    ) -> Self {
        info!(
            "Initializing NewsService (reload: {}, category: {}, offset: {})",
            if source.is_some() { "enabled" } else { "disabled" },
            config.query.category,
            config.offset
        );
        Self {
            storage,
            source,
            config,
        }
    }

    pub fn reload_enabled(&self) -> bool {
        self.source.is_some()
    }

    pub fn storage(&self) -> &NewsStorage {
        &self.storage
    }

    /// Every stored news, reloading from the source first when asked
    ///
    /// Reload failures are logged and never fail the listing; the caller
    /// gets whatever is stored.
    pub async fn list(&self, reload: bool) -> Result<Vec<News>, ServiceError> {
        if reload {
            match self.reload().await {
                Ok(summary) => debug!(?summary, "Reload finished"),
                Err(ReloadError::SourceUnavailable) => {
                    warn!("Reload requested but no NEWSAPI_KEY is configured")
                }
                Err(e) => error!("Reloading news failed: {}", e),
            }
        }

        Ok(self.storage.find_all()?)
    }

    /// One stored news by identity
    pub fn get(&self, id: i64) -> Result<News, ServiceError> {
        self.storage
            .find_by_id(id)?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Fetch, normalize, deduplicate and persist one page of articles
    #[instrument(skip(self), fields(category = %self.config.query.category))]
    pub async fn reload(&self) -> Result<ReloadSummary, ReloadError> {
        let source = self.source.as_ref().ok_or(ReloadError::SourceUnavailable)?;

        let articles = source.fetch(&self.config.query).await?;

        let mut summary = ReloadSummary {
            fetched: articles.len(),
            ..ReloadSummary::default()
        };
        let mut seen = HashSet::new();
        let mut novel = Vec::new();

        for (index, raw) in articles.iter().enumerate() {
            let news = match normalize_article(raw, self.config.offset) {
                Ok(news) => news,
                Err(e) => {
                    warn!(
                        index,
                        url = raw.url.as_deref().unwrap_or("-"),
                        "Skipping article: {}",
                        e
                    );
                    summary.rejected += 1;
                    continue;
                }
            };

            if !seen.insert(news.id()) || !self.storage.find_by_id_equals(news.id())?.is_empty() {
                debug!(id = news.id(), title = news.title(), "Skipping known article");
                summary.duplicates += 1;
                continue;
            }

            novel.push(news);
        }

        summary.inserted = self.storage.save_all(&novel)?;

        info!(
            "Reload complete: {} fetched, {} rejected, {} duplicates, {} inserted",
            summary.fetched, summary.rejected, summary.duplicates, summary.inserted
        );

        Ok(summary)
    }
}
