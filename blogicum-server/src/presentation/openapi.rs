use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::auth::{LoginDto, RegisterDto, TokenDto};
use crate::presentation::handlers::categories::{CategoryDto, CategoryPostsDto};
use crate::presentation::handlers::comments::{CommentDto, CommentInputDto};
use crate::presentation::handlers::posts::{
    CreatePostDto, ImageUploadForm, PostDetailDto, UpdatePostDto,
};
use crate::presentation::handlers::profiles::{
    AccountDto, ProfileDto, ProfilePageDto, UpdateProfileDto,
};
use crate::presentation::handlers::{CategoryRefDto, LocationRefDto, PostDto, PostPageDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::posts::upload_image,
        crate::presentation::handlers::comments::add_comment,
        crate::presentation::handlers::comments::update_comment,
        crate::presentation::handlers::comments::delete_comment,
        crate::presentation::handlers::categories::category_posts,
        crate::presentation::handlers::profiles::profile,
        crate::presentation::handlers::profiles::update_profile
    ),
    components(
        schemas(
            RegisterDto,
            LoginDto,
            TokenDto,
            AccountDto,
            CreatePostDto,
            UpdatePostDto,
            ImageUploadForm,
            PostDto,
            PostPageDto,
            PostDetailDto,
            CategoryRefDto,
            LocationRefDto,
            CommentDto,
            CommentInputDto,
            CategoryDto,
            CategoryPostsDto,
            ProfileDto,
            ProfilePageDto,
            UpdateProfileDto
        )
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "posts", description = "Post feed, detail and authoring"),
        (name = "comments", description = "Comments on posts"),
        (name = "categories", description = "Category pages"),
        (name = "profiles", description = "User profiles")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/auth/register/",
            "/posts/{id}/",
            "/posts/{id}/image/",
            "/posts/{id}/delete_comment/{comment_id}/",
            "/category/{slug}/",
            "/profile/{username}/edit/",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} is missing");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components must exist");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
