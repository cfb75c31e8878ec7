use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::data::media_storage::MediaStorage;
use crate::domain::error::DomainError;

/// Stores uploads below `root`; the same directory is served under `/media`.
#[derive(Debug, Clone)]
pub(crate) struct LocalMediaStorage {
    root: PathBuf,
}

impl LocalMediaStorage {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, DomainError> {
        let relative = Path::new(key);
        let is_plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if key.is_empty() || !is_plain {
            return Err(DomainError::Unexpected(format!("invalid media key: {key}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), DomainError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        }
        fs::write(&path, bytes)
            .await
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    /// Removing a file that is already gone is not an error.
    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(DomainError::Unexpected(err.to_string())),
        }
    }
}
