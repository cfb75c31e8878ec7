pub(crate) mod catalog_repository;
pub(crate) mod comment_repository;
pub(crate) mod media_storage;
pub(crate) mod post_repository;
pub(crate) mod repositories;
pub(crate) mod user_repository;
