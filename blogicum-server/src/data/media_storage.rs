use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;

pub(crate) const POST_IMAGES_DIR: &str = "posts_images";
const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

static UPLOAD_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Blob store for uploaded files, addressed by relative keys such as
/// `posts_images/7-1700000000123-0.png`.
#[async_trait]
pub(crate) trait MediaStorage: Send + Sync {
    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), DomainError>;
    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}

/// Builds the storage key for a post image from the uploaded file name.
/// Only the extension of the client-side name survives. The trailing sequence
/// number keeps keys distinct within one millisecond.
pub(crate) fn post_image_key(
    post_id: i64,
    file_name: &str,
    now: DateTime<Utc>,
) -> Result<String, DomainError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .ok_or(DomainError::Validation {
            field: "image",
            message: "must be a jpg, jpeg, png, gif or webp file",
        })?;

    let sequence = UPLOAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    Ok(format!(
        "{POST_IMAGES_DIR}/{post_id}-{}-{sequence}.{extension}",
        now.timestamp_millis()
    ))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::post_image_key;

    #[test]
    fn key_keeps_only_lowercased_extension() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let key = post_image_key(7, "../../etc/Holiday.PNG", now).expect("png is allowed");
        assert!(key.starts_with("posts_images/7-1700000000123-"), "{key}");
        assert!(key.ends_with(".png"), "{key}");
    }

    #[test]
    fn keys_differ_within_the_same_millisecond() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let first = post_image_key(7, "a.png", now).expect("png is allowed");
        let second = post_image_key(7, "a.png", now).expect("png is allowed");
        assert_ne!(first, second);
    }

    #[test]
    fn key_rejects_unknown_or_missing_extension() {
        let now = Utc::now();
        assert!(post_image_key(7, "script.sh", now).is_err());
        assert!(post_image_key(7, "no_extension", now).is_err());
    }
}
