//! Core types for the technology news API
//!
//! This crate defines the validated `News` record shared by the source
//! client, the ingestion services and the HTTP server, together with the
//! deterministic identity hash used to deduplicate articles.

pub mod error;
pub mod identity;
pub mod news;

pub use error::{NewsField, ValidationError};
pub use identity::{hash_str, news_id};
pub use news::{News, NewsDraft};
