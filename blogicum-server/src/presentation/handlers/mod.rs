use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::pagination::{Page, PageRequest};
use crate::domain::post::Post;

pub(crate) mod auth;
pub(crate) mod categories;
pub(crate) mod comments;
pub(crate) mod posts;
pub(crate) mod profiles;

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub(crate) struct PageQuery {
    /// Page number starting at 1, or `last`.
    pub(crate) page: Option<String>,
}

impl PageQuery {
    pub(crate) fn page_request(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryRefDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) slug: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LocationRefDto {
    pub(crate) id: i64,
    pub(crate) name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) pub_date: DateTime<Utc>,
    pub(crate) author_id: i64,
    pub(crate) author_username: String,
    pub(crate) category: Option<CategoryRefDto>,
    pub(crate) location: Option<LocationRefDto>,
    pub(crate) image_url: Option<String>,
    pub(crate) is_published: bool,
    pub(crate) comment_count: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        let location = post.visible_location().map(|location| LocationRefDto {
            id: location.id,
            name: location.name.clone(),
        });
        Self {
            id: post.id,
            title: post.title,
            text: post.text,
            pub_date: post.pub_date,
            author_id: post.author_id,
            author_username: post.author_username,
            category: post.category.map(|category| CategoryRefDto {
                id: category.id,
                title: category.title,
                slug: category.slug,
            }),
            location,
            image_url: post.image.as_deref().map(media_url),
            is_published: post.is_published,
            comment_count: post.comment_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostPageDto {
    pub(crate) posts: Vec<PostDto>,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) total: i64,
    pub(crate) num_pages: u32,
    pub(crate) has_next: bool,
    pub(crate) has_previous: bool,
}

impl From<Page<Post>> for PostPageDto {
    fn from(page: Page<Post>) -> Self {
        let has_next = page.has_next();
        let has_previous = page.has_previous();
        let page = page.map(PostDto::from);
        Self {
            posts: page.items,
            page: page.page,
            page_size: page.page_size,
            total: page.total,
            num_pages: page.num_pages,
            has_next,
            has_previous,
        }
    }
}

pub(crate) fn media_url(key: &str) -> String {
    format!("/media/{key}")
}
