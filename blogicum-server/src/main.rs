use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use sqlx::PgPool;
use tracing::info;

mod application;
mod cli;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;
#[cfg(test)]
mod test_support;

use application::auth_service::AuthService;
use application::blog_service::BlogService;
use application::catalog_service::CatalogService;
use application::comment_service::CommentService;
use application::profile_service::ProfileService;
use cli::{Cli, Command};
use data::repositories::postgres::catalog_repository::PostgresCatalogRepository;
use data::repositories::postgres::comment_repository::PostgresCommentRepository;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::media_storage::LocalMediaStorage;
use infrastructure::settings::{DatabaseSettings, Settings};
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve);
    let database = DatabaseSettings::from_env()?;

    init_logging(&database.log_level)?;

    match command {
        Command::Serve => {
            let settings = Settings::from_env()?;
            let pool = connect(&settings.database).await?;
            run_migrations(&pool).await?;
            let state = build_state(&settings, pool);
            server::run_http(&settings, state).await?;
        }
        Command::Migrate => run_migrations(&connect(&database).await?).await?,
        Command::Category(command) => {
            let catalog = CatalogService::new(PostgresCatalogRepository::new(
                connect(&database).await?,
            ));
            cli::run_category_command(&catalog, command).await?;
        }
        Command::Location(command) => {
            let catalog = CatalogService::new(PostgresCatalogRepository::new(
                connect(&database).await?,
            ));
            cli::run_location_command(&catalog, command).await?;
        }
    }

    Ok(())
}

async fn connect(database: &DatabaseSettings) -> Result<PgPool> {
    create_pool(&database.database_url, database.database_max_connections).await
}

fn build_state(settings: &Settings, pool: PgPool) -> AppState {
    let jwt = JwtService::new(&settings.jwt_secret, settings.jwt_ttl_seconds);

    let users = PostgresUserRepository::new(pool.clone());
    let posts = PostgresPostRepository::new(pool.clone());
    let catalog = PostgresCatalogRepository::new(pool.clone());
    let comments = PostgresCommentRepository::new(pool);
    let media = LocalMediaStorage::new(&settings.media_root);
    info!(media_root = %settings.media_root.display(), "media storage ready");

    AppState::new(
        Arc::new(AuthService::new(users.clone(), jwt.clone())),
        Arc::new(BlogService::new(posts.clone(), catalog, media)),
        Arc::new(CommentService::new(posts.clone(), comments)),
        Arc::new(ProfileService::new(users, posts)),
        Arc::new(jwt),
    )
}
