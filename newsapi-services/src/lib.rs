//! Business logic services for the technology news API
//!
//! This crate provides the normalization rules that turn raw articles into
//! `News` records, the SQLite store they are persisted in, and the service
//! that ties reloads and reads together.

pub mod news_service;
pub mod news_storage;
pub mod normalize;

pub use news_service::{
    NewsService, ReloadConfig, ReloadError, ReloadSummary, ServiceError, DEFAULT_UTC_OFFSET_HOURS,
};
pub use news_storage::{NewsStorage, StorageError};
pub use normalize::{
    normalize_article, normalize_published_at, NormalizeError, PLACEHOLDER_AUTHOR,
    PLACEHOLDER_DESCRIPTION, PLACEHOLDER_TITLE,
};
