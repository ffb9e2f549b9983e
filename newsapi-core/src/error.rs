//! Validation errors raised while building a `News` record

use std::fmt;

use thiserror::Error;

/// Fields of a `News` record that carry a validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewsField {
    Title,
    Source,
    Author,
    Description,
    Content,
    PublishedAt,
}

impl NewsField {
    /// Name of the field as it appears in the JSON representation
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsField::Title => "title",
            NewsField::Source => "source",
            NewsField::Author => "author",
            NewsField::Description => "description",
            NewsField::Content => "content",
            NewsField::PublishedAt => "publishedAt",
        }
    }
}

impl fmt::Display for NewsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `News` record could not be built from its parts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} required: minimum length is {min}, got {actual}")]
    TooShort {
        field: NewsField,
        min: usize,
        actual: usize,
    },

    #[error("{field} required")]
    Missing { field: NewsField },
}

impl ValidationError {
    pub fn too_short(field: NewsField, min: usize, actual: usize) -> Self {
        ValidationError::TooShort { field, min, actual }
    }

    pub fn missing(field: NewsField) -> Self {
        ValidationError::Missing { field }
    }

    /// The first field that failed validation
    pub fn field(&self) -> NewsField {
        match self {
            ValidationError::TooShort { field, .. } | ValidationError::Missing { field } => *field,
        }
    }
}
