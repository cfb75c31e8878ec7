use tracing::info;

use crate::data::catalog_repository::{CatalogRepository, NewCategory, NewLocation};
use crate::domain::catalog::{Category, CreateCategoryRequest, CreateLocationRequest, Location};
use crate::domain::error::DomainError;

/// Administrative operations on categories and locations.
pub(crate) struct CatalogService<C: CatalogRepository> {
    repo: C,
}

impl<C: CatalogRepository> CatalogService<C> {
    pub(crate) fn new(repo: C) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_category(
        &self,
        req: CreateCategoryRequest,
    ) -> Result<Category, DomainError> {
        let req = req.validate()?;
        let category = self
            .repo
            .create_category(NewCategory {
                title: req.title,
                description: req.description,
                slug: req.slug,
                is_published: req.is_published,
            })
            .await?;
        info!(slug = %category.slug, "category created");
        Ok(category)
    }

    pub(crate) async fn set_category_published(
        &self,
        slug: &str,
        is_published: bool,
    ) -> Result<Category, DomainError> {
        let category = self
            .repo
            .set_category_published(slug, is_published)
            .await?
            .ok_or_else(|| DomainError::category_not_found(slug))?;
        info!(slug, is_published, "category visibility changed");
        Ok(category)
    }

    pub(crate) async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.repo.list_categories().await
    }

    pub(crate) async fn create_location(
        &self,
        req: CreateLocationRequest,
    ) -> Result<Location, DomainError> {
        let req = req.validate()?;
        let location = self
            .repo
            .create_location(NewLocation {
                name: req.name,
                is_published: req.is_published,
            })
            .await?;
        info!(location_id = location.id, "location created");
        Ok(location)
    }

    pub(crate) async fn set_location_published(
        &self,
        id: i64,
        is_published: bool,
    ) -> Result<Location, DomainError> {
        let location = self
            .repo
            .set_location_published(id, is_published)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("location id: {id}")))?;
        info!(location_id = id, is_published, "location visibility changed");
        Ok(location)
    }

    pub(crate) async fn list_locations(&self) -> Result<Vec<Location>, DomainError> {
        self.repo.list_locations().await
    }
}
