use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

const MAX_TITLE_CHARS: usize = 256;

/// Category fields a post listing needs, joined from `categories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CategoryRef {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) slug: String,
    pub(crate) is_published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LocationRef {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) is_published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) pub_date: DateTime<Utc>,
    pub(crate) author_id: i64,
    pub(crate) author_username: String,
    pub(crate) category: Option<CategoryRef>,
    pub(crate) location: Option<LocationRef>,
    pub(crate) image: Option<String>,
    pub(crate) is_published: bool,
    pub(crate) comment_count: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Post {
    pub(crate) fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }

    /// Location is shown only while it is published itself.
    pub(crate) fn visible_location(&self) -> Option<&LocationRef> {
        self.location.as_ref().filter(|location| location.is_published)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) pub_date: Option<DateTime<Utc>>,
    pub(crate) category_id: Option<i64>,
    pub(crate) location_id: Option<i64>,
    pub(crate) is_published: bool,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_optional_id("category_id", self.category_id)?;
        validate_optional_id("location_id", self.location_id)?;
        Ok(Self {
            title: normalize_title(&self.title)?,
            text: normalize_text(&self.text)?,
            ..self
        })
    }
}

/// Full replacement of the editable fields; `pub_date: None` keeps the stored date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) pub_date: Option<DateTime<Utc>>,
    pub(crate) category_id: Option<i64>,
    pub(crate) location_id: Option<i64>,
    pub(crate) is_published: bool,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_optional_id("category_id", self.category_id)?;
        validate_optional_id("location_id", self.location_id)?;
        Ok(Self {
            title: normalize_title(&self.title)?,
            text: normalize_text(&self.text)?,
            ..self
        })
    }
}

fn validate_optional_id(field: &'static str, value: Option<i64>) -> Result<(), DomainError> {
    match value {
        Some(id) if id <= 0 => Err(DomainError::Validation {
            field,
            message: "must be > 0",
        }),
        _ => Ok(()),
    }
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > MAX_TITLE_CHARS {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..256 chars",
        });
    }
    Ok(title.to_string())
}

pub(crate) fn normalize_text(text: &str) -> Result<String, DomainError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::Validation {
            field: "text",
            message: "must not be empty",
        });
    }
    Ok(text.to_string())
}
