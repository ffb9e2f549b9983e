//! Raw article normalization
//!
//! Turns a `RawArticle` into a validated `News`, substituting placeholders for
//! short or missing author/title/description so a single sloppy field does
//! not cost the whole article, and moving the publication time to the
//! configured offset.

use chrono::{DateTime, FixedOffset};
use newsapi_core::{News, NewsDraft, NewsField, ValidationError};
use newsapi_source::RawArticle;
use thiserror::Error;

pub const PLACEHOLDER_AUTHOR: &str = "No author*";
pub const PLACEHOLDER_TITLE: &str = "No Title*";
pub const PLACEHOLDER_DESCRIPTION: &str = "No Description*";

const MIN_AUTHOR_LEN: usize = 3;
const MIN_TITLE_LEN: usize = 3;
const MIN_DESCRIPTION_LEN: usize = 4;

/// Why a single raw article could not be turned into a `News`
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("invalid article: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid publishedAt '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Build a `News` from a raw article without touching the input
pub fn normalize_article(raw: &RawArticle, offset: FixedOffset) -> Result<News, NormalizeError> {
    let author = or_placeholder(raw.author.as_deref(), MIN_AUTHOR_LEN, PLACEHOLDER_AUTHOR);
    let title = or_placeholder(raw.title.as_deref(), MIN_TITLE_LEN, PLACEHOLDER_TITLE);
    let description = or_placeholder(
        raw.description.as_deref(),
        MIN_DESCRIPTION_LEN,
        PLACEHOLDER_DESCRIPTION,
    );

    // A bad timestamp is reported only once every earlier field has passed
    let (published_at, timestamp_err) = match raw
        .published_at
        .as_deref()
        .map(|value| normalize_published_at(value, offset))
        .transpose()
    {
        Ok(published_at) => (published_at, None),
        Err(err) => (None, Some(err)),
    };

    News::new(NewsDraft {
        title,
        source: raw.source_name().unwrap_or_default().to_string(),
        author,
        url: raw.url.clone(),
        url_image: raw.url_to_image.clone(),
        // NewsAPI truncates `content`, the description is the usable body
        content: description.clone(),
        description,
        published_at,
    })
    .map_err(|err| match (err, timestamp_err) {
        (
            ValidationError::Missing {
                field: NewsField::PublishedAt,
            },
            Some(timestamp_err),
        ) => timestamp_err,
        (err, _) => err.into(),
    })
}

/// ISO 8601 without seconds, e.g. `2021-11-05T16:00Z`
const MINUTE_PRECISION_FORMAT: &str = "%Y-%m-%dT%H:%M%#z";

/// Parse an ISO 8601 timestamp and express the same instant at `offset`
///
/// RFC 3339 is tried first; timestamps without seconds are also accepted.
pub fn normalize_published_at(
    value: &str,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, NormalizeError> {
    let value_trimmed = value.trim();
    DateTime::parse_from_rfc3339(value_trimmed)
        .or_else(|err| {
            DateTime::parse_from_str(value_trimmed, MINUTE_PRECISION_FORMAT).map_err(|_| err)
        })
        .map(|parsed| parsed.with_timezone(&offset))
        .map_err(|source| NormalizeError::Timestamp {
            value: value.to_string(),
            source,
        })
}

impl NormalizeError {
    /// Field that caused the rejection
    pub fn field(&self) -> NewsField {
        match self {
            NormalizeError::Validation(err) => err.field(),
            NormalizeError::Timestamp { .. } => NewsField::PublishedAt,
        }
    }
}

fn or_placeholder(value: Option<&str>, min: usize, placeholder: &str) -> String {
    match value {
        Some(v) if v.chars().count() >= min => v.to_string(),
        _ => placeholder.to_string(),
    }
}
