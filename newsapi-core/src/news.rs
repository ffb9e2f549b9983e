//! The validated news record

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{NewsField, ValidationError};
use crate::identity::news_id;

const MIN_TITLE_LEN: usize = 2;
const MIN_SOURCE_LEN: usize = 2;
const MIN_AUTHOR_LEN: usize = 3;
const MIN_DESCRIPTION_LEN: usize = 4;
const MIN_CONTENT_LEN: usize = 2;

/// Unvalidated parts of a news record
///
/// This is what callers fill in before asking for a `News`. Text fields that
/// are absent are represented by an empty string and fail validation the same
/// way a too-short value does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_image: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub published_at: Option<DateTime<FixedOffset>>,
}

/// A validated, immutable news article
///
/// The only way to obtain one is through [`News::new`] (or deserializing,
/// which goes through the same checks), so every value in circulation has
/// passed validation and carries the identity derived from its
/// title, source and author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "NewsDraft")]
pub struct News {
    id: i64,
    title: String,
    source: String,
    author: String,
    url: Option<String>,
    url_image: Option<String>,
    description: String,
    content: String,
    published_at: DateTime<FixedOffset>,
}

impl News {
    /// Validate a draft and derive its identity
    ///
    /// Fields are checked in the order title, source, author, description,
    /// content, publishedAt; the error names the first one that fails.
    /// `url` and `url_image` are taken as they are.
    pub fn new(draft: NewsDraft) -> Result<Self, ValidationError> {
        check_len(NewsField::Title, &draft.title, MIN_TITLE_LEN)?;
        check_len(NewsField::Source, &draft.source, MIN_SOURCE_LEN)?;
        check_len(NewsField::Author, &draft.author, MIN_AUTHOR_LEN)?;
        check_len(NewsField::Description, &draft.description, MIN_DESCRIPTION_LEN)?;
        check_len(NewsField::Content, &draft.content, MIN_CONTENT_LEN)?;
        let published_at = draft
            .published_at
            .ok_or(ValidationError::missing(NewsField::PublishedAt))?;

        let id = news_id(&draft.title, &draft.source, &draft.author);

        Ok(Self {
            id,
            title: draft.title,
            source: draft.source,
            author: draft.author,
            url: draft.url,
            url_image: draft.url_image,
            description: draft.description,
            content: draft.content,
            published_at,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn url_image(&self) -> Option<&str> {
        self.url_image.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn published_at(&self) -> DateTime<FixedOffset> {
        self.published_at
    }
}

impl TryFrom<NewsDraft> for News {
    type Error = ValidationError;

    fn try_from(draft: NewsDraft) -> Result<Self, Self::Error> {
        News::new(draft)
    }
}

/// Minimum length check in Unicode scalar values
///
/// This differs from counting UTF-16 code units: a character outside the
/// Basic Multilingual Plane (most emoji) counts once, not twice.
fn check_len(field: NewsField, value: &str, min: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual < min {
        return Err(ValidationError::too_short(field, min, actual));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> NewsDraft {
        NewsDraft {
            title: "Rust 1.80 released".to_string(),
            source: "The Verge".to_string(),
            author: "Jane Doe".to_string(),
            url: Some("https://example.com/rust".to_string()),
            url_image: None,
            description: "A new stable release".to_string(),
            content: "A new stable release".to_string(),
            published_at: Some(DateTime::parse_from_rfc3339("2021-11-05T13:00:00-03:00").unwrap()),
        }
    }

    #[test]
    fn test_valid_draft_builds() {
        let news = News::new(valid_draft()).unwrap();
        assert_eq!(news.title(), "Rust 1.80 released");
        assert_eq!(news.source(), "The Verge");
        assert_eq!(news.url(), Some("https://example.com/rust"));
        assert_eq!(news.url_image(), None);
        assert_eq!(news.id(), news_id("Rust 1.80 released", "The Verge", "Jane Doe"));
    }

    #[test]
    fn test_id_ignores_non_identity_fields() {
        let first = News::new(valid_draft()).unwrap();
        let second = News::new(NewsDraft {
            url: None,
            url_image: Some(String::new()),
            description: "Edited description".to_string(),
            content: "Other content".to_string(),
            published_at: Some(DateTime::parse_from_rfc3339("2022-01-01T00:00:00Z").unwrap()),
            ..valid_draft()
        })
        .unwrap();

        assert_eq!(first.id(), second.id());
    }

    #[test]
    fn test_rejects_short_title() {
        let err = News::new(NewsDraft { title: "a".to_string(), ..valid_draft() }).unwrap_err();
        assert_eq!(err.field(), NewsField::Title);
        assert_eq!(err, ValidationError::too_short(NewsField::Title, 2, 1));
    }

    #[test]
    fn test_rejects_short_source() {
        let err = News::new(NewsDraft { source: "b".to_string(), ..valid_draft() }).unwrap_err();
        assert_eq!(err.field(), NewsField::Source);
    }

    #[test]
    fn test_rejects_short_author() {
        let err = News::new(NewsDraft { author: "cd".to_string(), ..valid_draft() }).unwrap_err();
        assert_eq!(err.field(), NewsField::Author);
    }

    #[test]
    fn test_rejects_short_description() {
        let err = News::new(NewsDraft { description: "abc".to_string(), ..valid_draft() })
            .unwrap_err();
        assert_eq!(err.field(), NewsField::Description);
    }

    #[test]
    fn test_rejects_empty_content() {
        let err = News::new(NewsDraft { content: String::new(), ..valid_draft() }).unwrap_err();
        assert_eq!(err, ValidationError::too_short(NewsField::Content, 2, 0));
    }

    #[test]
    fn test_rejects_missing_published_at() {
        let err = News::new(NewsDraft { published_at: None, ..valid_draft() }).unwrap_err();
        assert_eq!(err, ValidationError::missing(NewsField::PublishedAt));
    }

    #[test]
    fn test_reports_first_failing_field() {
        let err = News::new(NewsDraft {
            author: "x".to_string(),
            content: String::new(),
            published_at: None,
            ..valid_draft()
        })
        .unwrap_err();
        assert_eq!(err.field(), NewsField::Author);
    }

    #[test]
    fn test_length_counts_characters() {
        // two characters, four bytes
        let news = News::new(NewsDraft { title: "ñé".to_string(), ..valid_draft() });
        assert!(news.is_ok());
    }

    #[test]
    fn test_astral_character_counts_once() {
        let err = News::new(NewsDraft { title: "🦀".to_string(), ..valid_draft() }).unwrap_err();
        assert_eq!(err, ValidationError::too_short(NewsField::Title, 2, 1));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let news = News::new(valid_draft()).unwrap();
        let json = serde_json::to_value(&news).unwrap();

        assert_eq!(json["id"], news.id());
        assert_eq!(json["urlImage"], serde_json::Value::Null);
        assert_eq!(json["publishedAt"], "2021-11-05T13:00:00-03:00");
    }

    #[test]
    fn test_deserialize_recomputes_id() {
        let json = r#"
        {
            "id": 42,
            "title": "Rust 1.80 released",
            "source": "The Verge",
            "author": "Jane Doe",
            "description": "A new stable release",
            "content": "A new stable release",
            "publishedAt": "2021-11-05T13:00:00-03:00"
        }
        "#;

        let news: News = serde_json::from_str(json).unwrap();
        assert_eq!(news.id(), news_id("Rust 1.80 released", "The Verge", "Jane Doe"));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"title": "a", "source": "The Verge", "author": "Jane Doe"}"#;
        assert!(serde_json::from_str::<News>(json).is_err());
    }
}
