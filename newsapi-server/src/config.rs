//! Server configuration loaded from the environment

use std::env;
use std::path::PathBuf;

use chrono::FixedOffset;
use newsapi_services::DEFAULT_UTC_OFFSET_HOURS;
use newsapi_source::{TopHeadlinesQuery, DEFAULT_BASE_URL, MAX_PAGE_SIZE};
use url::Url;

const DEFAULT_CATEGORY: &str = "technology";
const DEFAULT_DB_PATH: &str = "data/news.db";
const DEFAULT_PORT: u16 = 8080;

/// Process-wide configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// NewsAPI key; reloads are disabled without it
    pub api_key: Option<String>,
    /// NewsAPI base URL
    pub base_url: String,
    /// Top-headlines query sent on reload
    pub query: TopHeadlinesQuery,
    /// Offset publication times are stored at
    pub utc_offset: FixedOffset,
    /// SQLite database file
    pub db_path: PathBuf,
    /// HTTP listen port
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads:
    /// - NEWSAPI_KEY: NewsAPI key (optional)
    /// - NEWSAPI_BASE_URL: defaults to https://newsapi.org
    /// - NEWS_CATEGORY: defaults to "technology"
    /// - NEWS_COUNTRY: optional country filter
    /// - NEWS_QUERY: optional keyword filter
    /// - NEWS_PAGE_SIZE: 1..=100, defaults to 100
    /// - NEWS_UTC_OFFSET_HOURS: -23..=23, defaults to -3
    /// - NEWS_DB_PATH: defaults to data/news.db
    /// - SERVER_PORT: defaults to 8080
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = var("NEWSAPI_KEY");

        let base_url = var("NEWSAPI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url).map_err(|e| ConfigError::invalid("NEWSAPI_BASE_URL", &base_url, e))?;

        let page_size = match var("NEWS_PAGE_SIZE") {
            Some(raw) => {
                let size: u32 = raw
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::invalid("NEWS_PAGE_SIZE", &raw, e))?;
                if size == 0 || size > MAX_PAGE_SIZE {
                    return Err(ConfigError::invalid(
                        "NEWS_PAGE_SIZE",
                        &raw,
                        format!("must be between 1 and {}", MAX_PAGE_SIZE),
                    ));
                }
                size
            }
            None => MAX_PAGE_SIZE,
        };

        let mut query = TopHeadlinesQuery::new(
            var("NEWS_CATEGORY").unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            page_size,
        );
        if let Some(country) = var("NEWS_COUNTRY") {
            query = query.with_country(country);
        }
        if let Some(keywords) = var("NEWS_QUERY") {
            query = query.with_keywords(keywords);
        }

        let offset_hours = match var("NEWS_UTC_OFFSET_HOURS") {
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|e| ConfigError::invalid("NEWS_UTC_OFFSET_HOURS", &raw, e))?,
            None => DEFAULT_UTC_OFFSET_HOURS,
        };
        let utc_offset = Some(offset_hours)
            .filter(|hours| (-23..=23).contains(hours))
            .and_then(|hours| FixedOffset::east_opt(hours * 3600))
            .ok_or_else(|| {
                ConfigError::invalid(
                    "NEWS_UTC_OFFSET_HOURS",
                    &offset_hours.to_string(),
                    "must be between -23 and 23",
                )
            })?;

        let db_path = var("NEWS_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let port = match var("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("SERVER_PORT", &raw, e))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            base_url,
            query,
            utc_offset,
            db_path,
            port,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
