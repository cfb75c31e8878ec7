//! Categories and locations. Both are managed by administrators only and
//! carry their own `is_published` flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Category {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) slug: String,
    pub(crate) is_published: bool,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Location {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) is_published: bool,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct CreateCategoryRequest {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) slug: String,
    pub(crate) is_published: bool,
}

impl CreateCategoryRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_label("title", &self.title)?,
            description: self.description.trim().to_string(),
            slug: normalize_slug(&self.slug)?,
            is_published: self.is_published,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CreateLocationRequest {
    pub(crate) name: String,
    pub(crate) is_published: bool,
}

impl CreateLocationRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            name: normalize_label("name", &self.name)?,
            is_published: self.is_published,
        })
    }
}

/// Slugs end up in URLs, so only ASCII letters, digits, `-` and `_` are kept.
pub(crate) fn normalize_slug(slug: &str) -> Result<String, DomainError> {
    let slug = slug.trim();
    if slug.is_empty() || slug.len() > 64 {
        return Err(DomainError::Validation {
            field: "slug",
            message: "must be 1..64 chars",
        });
    }
    if !slug
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        return Err(DomainError::Validation {
            field: "slug",
            message: "must contain only latin letters, digits, '-' and '_'",
        });
    }
    Ok(slug.to_string())
}

fn normalize_label(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > 256 {
        return Err(DomainError::Validation {
            field,
            message: "must be 1..256 chars",
        });
    }
    Ok(value.to_string())
}
