//! Post routes - related content for an article

pub mod api;

pub use api::{api_related_posts, RelatedPostsResponse};
