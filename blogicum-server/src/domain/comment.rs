use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::post::normalize_text;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Comment {
    pub(crate) id: i64,
    pub(crate) text: String,
    pub(crate) post_id: i64,
    pub(crate) author_id: i64,
    pub(crate) author_username: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl Comment {
    pub(crate) fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CommentRequest {
    pub(crate) text: String,
}

impl CommentRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            text: normalize_text(&self.text)?,
        })
    }
}
