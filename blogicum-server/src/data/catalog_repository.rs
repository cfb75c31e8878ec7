use async_trait::async_trait;

use crate::domain::catalog::{Category, Location};
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewCategory {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) slug: String,
    pub(crate) is_published: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct NewLocation {
    pub(crate) name: String,
    pub(crate) is_published: bool,
}

#[async_trait]
pub(crate) trait CatalogRepository: Send + Sync {
    async fn create_category(&self, input: NewCategory) -> Result<Category, DomainError>;
    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError>;
    async fn set_category_published(
        &self,
        slug: &str,
        is_published: bool,
    ) -> Result<Option<Category>, DomainError>;
    async fn list_categories(&self) -> Result<Vec<Category>, DomainError>;

    async fn create_location(&self, input: NewLocation) -> Result<Location, DomainError>;
    async fn set_location_published(
        &self,
        id: i64,
        is_published: bool,
    ) -> Result<Option<Location>, DomainError>;
    async fn list_locations(&self) -> Result<Vec<Location>, DomainError>;
}
