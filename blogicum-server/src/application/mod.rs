pub(crate) mod auth_service;
pub(crate) mod blog_service;
pub(crate) mod catalog_service;
pub(crate) mod comment_service;
pub(crate) mod listing;
pub(crate) mod profile_service;
