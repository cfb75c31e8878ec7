use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::application::catalog_service::CatalogService;
use crate::data::catalog_repository::CatalogRepository;
use crate::domain::catalog::{CreateCategoryRequest, CreateLocationRequest};

#[derive(Debug, Parser)]
#[command(name = "blogicum-server", version, about = "Blogicum HTTP server and admin tools")]
pub(crate) struct Cli {
    /// Defaults to `serve`.
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Run the HTTP server.
    Serve,
    /// Apply pending database migrations and exit.
    Migrate,
    /// Manage categories.
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Manage locations.
    #[command(subcommand)]
    Location(LocationCommand),
}

#[derive(Debug, Subcommand)]
pub(crate) enum CategoryCommand {
    /// Create a category.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        slug: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Create it unpublished.
        #[arg(long)]
        hidden: bool,
    },
    /// Publish a category.
    Publish(SlugArgs),
    /// Hide a category together with its posts.
    Hide(SlugArgs),
    /// List every category.
    List,
}

#[derive(Debug, Subcommand)]
pub(crate) enum LocationCommand {
    /// Create a location.
    Add {
        #[arg(long)]
        name: String,
        /// Create it unpublished.
        #[arg(long)]
        hidden: bool,
    },
    /// Publish a location.
    Publish(IdArgs),
    /// Hide a location.
    Hide(IdArgs),
    /// List every location.
    List,
}

#[derive(Debug, Args)]
pub(crate) struct SlugArgs {
    #[arg(long)]
    pub(crate) slug: String,
}

#[derive(Debug, Args)]
pub(crate) struct IdArgs {
    #[arg(long)]
    pub(crate) id: i64,
}

pub(crate) async fn run_category_command<C: CatalogRepository>(
    service: &CatalogService<C>,
    command: CategoryCommand,
) -> Result<()> {
    match command {
        CategoryCommand::Add {
            title,
            slug,
            description,
            hidden,
        } => {
            let category = service
                .create_category(CreateCategoryRequest {
                    title,
                    description,
                    slug,
                    is_published: !hidden,
                })
                .await?;
            print_json(&category)
        }
        CategoryCommand::Publish(args) => {
            print_json(&service.set_category_published(&args.slug, true).await?)
        }
        CategoryCommand::Hide(args) => {
            print_json(&service.set_category_published(&args.slug, false).await?)
        }
        CategoryCommand::List => print_json(&service.list_categories().await?),
    }
}

pub(crate) async fn run_location_command<C: CatalogRepository>(
    service: &CatalogService<C>,
    command: LocationCommand,
) -> Result<()> {
    match command {
        LocationCommand::Add { name, hidden } => {
            let location = service
                .create_location(CreateLocationRequest {
                    name,
                    is_published: !hidden,
                })
                .await?;
            print_json(&location)
        }
        LocationCommand::Publish(args) => {
            print_json(&service.set_location_published(args.id, true).await?)
        }
        LocationCommand::Hide(args) => {
            print_json(&service.set_location_published(args.id, false).await?)
        }
        LocationCommand::List => print_json(&service.list_locations().await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{rendered}");
    Ok(())
}
