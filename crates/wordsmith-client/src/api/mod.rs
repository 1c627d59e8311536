//! API endpoint implementations.

mod articles;

pub use articles::ArticlesApi;
