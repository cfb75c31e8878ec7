use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::blog_service::BlogService;
use crate::application::comment_service::CommentService;
use crate::application::profile_service::ProfileService;
use crate::data::repositories::postgres::catalog_repository::PostgresCatalogRepository;
use crate::data::repositories::postgres::comment_repository::PostgresCommentRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::media_storage::LocalMediaStorage;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

pub(crate) type PgAuthService = AuthService<PostgresUserRepository>;
pub(crate) type PgBlogService =
    BlogService<PostgresPostRepository, PostgresCatalogRepository, LocalMediaStorage>;
pub(crate) type PgCommentService =
    CommentService<PostgresPostRepository, PostgresCommentRepository>;
pub(crate) type PgProfileService = ProfileService<PostgresUserRepository, PostgresPostRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<PgAuthService>,
    pub(crate) blog_service: Arc<PgBlogService>,
    pub(crate) comment_service: Arc<PgCommentService>,
    pub(crate) profile_service: Arc<PgProfileService>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<PgAuthService>,
        blog_service: Arc<PgBlogService>,
        comment_service: Arc<PgCommentService>,
        profile_service: Arc<PgProfileService>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            auth_service,
            blog_service,
            comment_service,
            profile_service,
            jwt,
        }
    }
}
