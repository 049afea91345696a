//! One module per upstream page type. Each has a synchronous `parse_*`
//! function over the page markup and an async `fetch_*` wrapper that drives
//! [`ForumClient`](crate::api::forum::ForumClient).
//!
//! Parsing stays out of the async functions: a `scraper::Html` is not
//! `Send` and must be dropped before the next request is awaited.

pub mod project;
pub mod search;
pub mod top_boards;
pub mod versions;

pub use project::fetch_project;
pub use search::search_projects;
pub use top_boards::fetch_top_boards;
pub use versions::fetch_versions;
