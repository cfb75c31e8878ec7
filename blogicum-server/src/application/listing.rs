use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::pagination::{POSTS_PER_PAGE, Page, PageRequest, Pagination, num_pages};
use crate::domain::post::Post;
use crate::domain::visibility::PostFilter;

/// Counts first so an out-of-range page can be clamped to the last one.
pub(crate) async fn paginate_posts<P: PostRepository>(
    repo: &P,
    filter: PostFilter,
    page: PageRequest,
) -> Result<Page<Post>, DomainError> {
    let total = repo.count_posts(&filter).await?;
    let num_pages = num_pages(total, POSTS_PER_PAGE);
    let pagination = Pagination {
        page: page.resolve(num_pages),
        page_size: POSTS_PER_PAGE,
    };
    let items = repo.list_posts(&filter, pagination).await?;

    Ok(Page {
        items,
        page: pagination.page,
        page_size: pagination.page_size,
        total,
        num_pages,
    })
}
