mod error;
mod operations;
mod requests;
mod types;

pub use error::BlogError;
pub use operations::{validate_blog, Pagination, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use requests::{CreateBlogRequest, ListBlogsQuery, UpdateBlogRequest};
pub use types::{AuthorSummary, Blog, BlogPage, BlogView};
